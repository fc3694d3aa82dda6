//! Catalog file format.
//!
//! A catalog is a YAML or JSON document holding the species lexicon, the
//! ordered intent list, and an optional fallback message:
//!
//! ```yaml
//! species:
//!   - tag: dog
//!     keywords: [dog, dogs, puppy, puppies]
//! intents:
//!   - name: food
//!     patterns: [food, diet, feed]
//!     responses:
//!       dog: ["Feed adult dogs twice a day."]
//!       default: ["Provide species-appropriate food."]
//! ```
//!
//! These types only describe the document. Validation happens when the
//! catalog is compiled into a [`Chatbot`](crate::Chatbot).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::species::Species;

/// The catalog compiled into the binary.
pub const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.yaml");

/// One lexicon entry: a species tag and its surface forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub tag: Species,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One conversational intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentDef {
    /// Unique name (e.g. "greeting", "food").
    pub name: String,

    /// Trigger keywords or phrases, matched as whole words.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Candidate replies keyed by species. Must contain `default`.
    #[serde(default)]
    pub responses: BTreeMap<Species, Vec<String>>,
}

impl IntentDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_responses<I, S>(mut self, species: Species, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responses
            .insert(species, responses.into_iter().map(Into::into).collect());
        self
    }
}

/// Top-level catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Help text returned when no intent matches. The builtin text is used
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,

    /// Species lexicon, in detection order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species: Vec<SpeciesDef>,

    /// Intents, in matching order.
    #[serde(default)]
    pub intents: Vec<IntentDef>,
}

impl CatalogFile {
    /// Parse the embedded builtin catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG.as_bytes())
    }

    /// Parse a catalog from YAML bytes.
    pub fn from_yaml(data: &[u8]) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_slice(data)?)
    }

    /// Parse a catalog from JSON bytes.
    pub fn from_json(data: &[u8]) -> Result<Self, CatalogError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Load a catalog file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Self::from_json(&std::fs::read(path)?),
            "yaml" | "yml" => Self::from_yaml(&std::fs::read(path)?),
            _ => Err(CatalogError::UnsupportedFormat(ext)),
        }
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, CatalogError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Look up an intent definition by name.
    pub fn intent(&self, name: &str) -> Option<&IntentDef> {
        self.intents.iter().find(|i| i.name == name)
    }
}

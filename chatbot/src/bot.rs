//! The chatbot entry point.

use std::path::Path;

use rand::Rng;
use serde::Serialize;

use crate::catalog::CatalogFile;
use crate::error::CatalogError;
use crate::intent::{Intent, IntentCatalog};
use crate::species::{Species, SpeciesLexicon};

/// Help text returned when no intent matches and the catalog sets none.
pub const DEFAULT_FALLBACK: &str = "🤔 I'm not sure I understood that.

You can ask about:
🍖 Food • 💉 Vaccination • ✂️ Grooming • 🏥 Health • 🐾 Adoption

Examples:
• food for dog
• how to vaccinate my cat
• grooming tips for bird";

/// Normalize raw user text for matching: trim, then lowercase.
///
/// Punctuation is kept; whole-word matching already tolerates it.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The deterministic part of a chatbot answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub species: Species,
    /// Matched intent name; `None` means the fallback answers.
    pub intent: Option<String>,
}

/// A chatbot answer together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub species: Species,
    pub intent: Option<String>,
}

impl Reply {
    pub fn is_fallback(&self) -> bool {
        self.intent.is_none()
    }
}

/// Compiled, immutable chatbot.
///
/// A `Chatbot` holds only read-only tables and is `Send + Sync`; share it
/// behind an `Arc` and call it from any number of tasks.
#[derive(Debug, Clone)]
pub struct Chatbot {
    lexicon: SpeciesLexicon,
    catalog: IntentCatalog,
    fallback: String,
}

impl Chatbot {
    /// Compile and validate a catalog.
    pub fn compile(file: &CatalogFile) -> Result<Self, CatalogError> {
        let fallback = match &file.fallback {
            Some(text) if text.trim().is_empty() => return Err(CatalogError::BlankFallback),
            Some(text) => text.clone(),
            None => DEFAULT_FALLBACK.to_string(),
        };

        let lexicon = SpeciesLexicon::compile(&file.species)?;
        let catalog = IntentCatalog::compile(&file.intents)?;

        tracing::debug!(
            species = lexicon.len(),
            intents = catalog.len(),
            "compiled chatbot catalog"
        );

        Ok(Self {
            lexicon,
            catalog,
            fallback,
        })
    }

    /// Compile the embedded builtin catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::compile(&CatalogFile::builtin()?)
    }

    /// Load and compile a YAML or JSON catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::compile(&CatalogFile::from_path(path)?)
    }

    pub fn lexicon(&self) -> &SpeciesLexicon {
        &self.lexicon
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Species mentioned in normalized text, or [`Species::Default`].
    pub fn detect_species(&self, text: &str) -> Species {
        self.lexicon.detect(text)
    }

    /// First intent (in catalog order) matching normalized text.
    pub fn match_intent(&self, text: &str) -> Option<&Intent> {
        self.catalog.match_intent(text)
    }

    /// Pick a reply from the intent's set for `species`, falling back to its
    /// `default` set.
    pub fn select_response<'a, R: Rng + ?Sized>(
        &self,
        intent: &'a Intent,
        species: Species,
        rng: &mut R,
    ) -> &'a str {
        intent.select(species, rng)
    }

    /// Classify raw text without picking a reply.
    pub fn classify(&self, raw: &str) -> Classification {
        let text = normalize(raw);
        Classification {
            species: self.detect_species(&text),
            intent: self.match_intent(&text).map(|i| i.name().to_string()),
        }
    }

    /// Answer raw text using the thread-local random source.
    pub fn respond(&self, raw: &str) -> Reply {
        self.respond_with(raw, &mut rand::thread_rng())
    }

    /// Answer raw text using the given random source.
    pub fn respond_with<R: Rng + ?Sized>(&self, raw: &str, rng: &mut R) -> Reply {
        let text = normalize(raw);
        let species = self.detect_species(&text);

        let reply = match self.match_intent(&text) {
            Some(intent) => Reply {
                text: self.select_response(intent, species, rng).to_string(),
                species,
                intent: Some(intent.name().to_string()),
            },
            None => Reply {
                text: self.fallback.clone(),
                species,
                intent: None,
            },
        };

        tracing::debug!(
            species = %reply.species,
            intent = reply.intent.as_deref().unwrap_or("-"),
            "chatbot reply"
        );

        reply
    }

    /// Answer raw text. Never fails and never returns an empty string.
    pub fn get_response(&self, raw: &str) -> String {
        self.respond(raw).text
    }

    /// Answer raw text using the given random source.
    pub fn get_response_with<R: Rng + ?Sized>(&self, raw: &str, rng: &mut R) -> String {
        self.respond_with(raw, rng).text
    }
}

//! Species tags and the keyword lexicon used to detect them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::SpeciesDef;
use crate::error::CatalogError;
use crate::pattern::WordPattern;

/// Pet category a message refers to.
///
/// `Default` is the sentinel for "no recognizable species" and also keys
/// the fallback response set of every intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Default,
}

impl Species {
    /// All tags, in declaration order.
    pub const ALL: [Species; 5] = [
        Species::Dog,
        Species::Cat,
        Species::Bird,
        Species::Rabbit,
        Species::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Bird => "bird",
            Species::Rabbit => "rabbit",
            Species::Default => "default",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Species::Default
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Species::ALL
            .into_iter()
            .find(|sp| sp.as_str() == lower)
            .ok_or_else(|| CatalogError::UnknownSpecies(s.to_string()))
    }
}

/// Ordered species keyword table.
///
/// Detection is first-wins in both dimensions: species are tried in the
/// order they were declared, and within a species its keywords are tried
/// in order. A message naming two species ("dog and cat food") resolves to
/// whichever was declared first.
#[derive(Debug, Clone, Default)]
pub struct SpeciesLexicon {
    entries: Vec<(Species, Vec<WordPattern>)>,
}

impl SpeciesLexicon {
    /// Compile and validate lexicon definitions.
    pub fn compile(defs: &[SpeciesDef]) -> Result<Self, CatalogError> {
        let mut entries: Vec<(Species, Vec<WordPattern>)> = Vec::with_capacity(defs.len());

        for def in defs {
            if def.tag.is_default() {
                return Err(CatalogError::DefaultInLexicon);
            }
            if entries.iter().any(|(sp, _)| *sp == def.tag) {
                return Err(CatalogError::DuplicateSpecies(def.tag));
            }
            if def.keywords.is_empty() {
                return Err(CatalogError::NoKeywords(def.tag));
            }

            let mut keywords = Vec::with_capacity(def.keywords.len());
            for (index, kw) in def.keywords.iter().enumerate() {
                if kw.trim().is_empty() {
                    return Err(CatalogError::BlankKeyword {
                        species: def.tag,
                        index,
                    });
                }
                let pattern = WordPattern::new(kw).map_err(|source| CatalogError::Pattern {
                    pattern: kw.clone(),
                    source,
                })?;
                keywords.push(pattern);
            }

            entries.push((def.tag, keywords));
        }

        Ok(Self { entries })
    }

    /// Detect the species mentioned in normalized text.
    ///
    /// Returns [`Species::Default`] when no keyword matches.
    pub fn detect(&self, text: &str) -> Species {
        for (species, keywords) in &self.entries {
            if keywords.iter().any(|kw| kw.is_match(text)) {
                return *species;
            }
        }
        Species::Default
    }

    /// Species in detection order.
    pub fn species(&self) -> impl Iterator<Item = Species> + '_ {
        self.entries.iter().map(|(sp, _)| *sp)
    }

    /// Keywords for a species, in detection order.
    pub fn keywords(&self, species: Species) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |(sp, _)| *sp == species)
            .flat_map(|(_, kws)| kws.iter().map(WordPattern::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

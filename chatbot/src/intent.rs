//! Compiled intents and the ordered intent catalog.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;

use crate::catalog::IntentDef;
use crate::error::CatalogError;
use crate::pattern::WordPattern;
use crate::species::Species;

/// A non-empty list of candidate replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSet {
    replies: Vec<String>,
}

impl ResponseSet {
    fn new(intent: &str, species: Species, replies: &[String]) -> Result<Self, CatalogError> {
        if replies.is_empty() {
            return Err(CatalogError::EmptyResponses {
                intent: intent.to_string(),
                species,
            });
        }
        if let Some(index) = replies.iter().position(|r| r.trim().is_empty()) {
            return Err(CatalogError::BlankResponse {
                intent: intent.to_string(),
                species,
                index,
            });
        }
        Ok(Self {
            replies: replies.to_vec(),
        })
    }

    /// Pick one reply uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.replies[rng.gen_range(0..self.replies.len())]
    }

    pub fn contains(&self, reply: &str) -> bool {
        self.replies.iter().any(|r| r == reply)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.replies
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}

/// A validated intent: trigger patterns plus species-keyed response sets.
///
/// Construction guarantees at least one pattern and a `default` response
/// set, so [`Intent::responses_for`] always has an answer.
#[derive(Debug, Clone)]
pub struct Intent {
    name: String,
    patterns: Vec<WordPattern>,
    default: ResponseSet,
    by_species: BTreeMap<Species, ResponseSet>,
}

impl Intent {
    /// Compile and validate an intent definition.
    pub fn compile(def: &IntentDef) -> Result<Self, CatalogError> {
        if def.patterns.is_empty() {
            return Err(CatalogError::NoPatterns(def.name.clone()));
        }

        let mut patterns = Vec::with_capacity(def.patterns.len());
        for (index, p) in def.patterns.iter().enumerate() {
            if p.trim().is_empty() {
                return Err(CatalogError::BlankPattern {
                    intent: def.name.clone(),
                    index,
                });
            }
            let pattern = WordPattern::new(p).map_err(|source| CatalogError::Pattern {
                pattern: p.clone(),
                source,
            })?;
            patterns.push(pattern);
        }

        let default = match def.responses.get(&Species::Default) {
            Some(replies) => ResponseSet::new(&def.name, Species::Default, replies)?,
            None => return Err(CatalogError::MissingDefault(def.name.clone())),
        };

        let mut by_species = BTreeMap::new();
        for (species, replies) in &def.responses {
            if species.is_default() {
                continue;
            }
            by_species.insert(*species, ResponseSet::new(&def.name, *species, replies)?);
        }

        Ok(Self {
            name: def.name.clone(),
            patterns,
            default,
            by_species,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trigger patterns, in matching order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.patterns.iter().map(WordPattern::as_str)
    }

    /// Whether any pattern occurs as whole words in normalized text.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }

    /// The response set for a species, or the `default` set when the
    /// intent has no species-specific answers.
    pub fn responses_for(&self, species: Species) -> &ResponseSet {
        self.by_species.get(&species).unwrap_or(&self.default)
    }

    /// Whether the intent carries a set dedicated to `species`.
    pub fn has_species_responses(&self, species: Species) -> bool {
        species.is_default() || self.by_species.contains_key(&species)
    }

    /// Pick one reply for a species.
    pub fn select<R: Rng + ?Sized>(&self, species: Species, rng: &mut R) -> &str {
        self.responses_for(species).pick(rng)
    }
}

/// Intents in declared order. The first intent with a matching pattern wins;
/// there is no scoring across intents.
#[derive(Debug, Clone, Default)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
}

impl IntentCatalog {
    /// Compile and validate intent definitions.
    pub fn compile(defs: &[IntentDef]) -> Result<Self, CatalogError> {
        if defs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut intents = Vec::with_capacity(defs.len());
        for def in defs {
            if !seen.insert(def.name.as_str()) {
                return Err(CatalogError::DuplicateIntent(def.name.clone()));
            }
            intents.push(Intent::compile(def)?);
        }

        Ok(Self { intents })
    }

    /// The first intent (in catalog order) matching normalized text.
    pub fn match_intent(&self, text: &str) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.matches(text))
    }

    pub fn get(&self, name: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intent> + '_ {
        self.intents.iter()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn food() -> IntentDef {
        IntentDef::new("food")
            .with_patterns(["food", "diet", "feed"])
            .with_responses(Species::Dog, ["dog food"])
            .with_responses(Species::Default, ["any food", "clean water"])
    }

    fn greeting() -> IntentDef {
        IntentDef::new("greeting")
            .with_patterns(["hi", "good morning"])
            .with_responses(Species::Default, ["hello"])
    }

    #[test]
    fn test_responses_for() {
        let intent = Intent::compile(&food()).unwrap();
        assert_eq!(intent.responses_for(Species::Dog).as_slice(), ["dog food"]);
        assert_eq!(intent.responses_for(Species::Cat).len(), 2);
        assert_eq!(intent.responses_for(Species::Default).len(), 2);
        assert!(intent.has_species_responses(Species::Dog));
        assert!(!intent.has_species_responses(Species::Cat));
    }

    #[test]
    fn test_select_draws_from_resolved_set() {
        let intent = Intent::compile(&food()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            assert_eq!(intent.select(Species::Dog, &mut rng), "dog food");
            let reply = intent.select(Species::Rabbit, &mut rng);
            assert!(intent.responses_for(Species::Default).contains(reply));
        }
    }

    #[test]
    fn test_match_intent_order() {
        let catalog = IntentCatalog::compile(&[greeting(), food()]).unwrap();
        assert_eq!(catalog.match_intent("hi, what food?").unwrap().name(), "greeting");
        assert_eq!(catalog.match_intent("diet tips").unwrap().name(), "food");
        assert!(catalog.match_intent("xyzzy").is_none());
        assert!(catalog.match_intent("").is_none());

        // Reversed declaration order flips the winner.
        let catalog = IntentCatalog::compile(&[food(), greeting()]).unwrap();
        assert_eq!(catalog.match_intent("hi, what food?").unwrap().name(), "food");
    }

    #[test]
    fn test_compile_validation_errors() {
        assert!(matches!(IntentCatalog::compile(&[]), Err(CatalogError::Empty)));

        assert!(matches!(
            IntentCatalog::compile(&[greeting(), greeting()]),
            Err(CatalogError::DuplicateIntent(name)) if name == "greeting"
        ));

        let no_patterns = IntentDef::new("x").with_responses(Species::Default, ["r"]);
        assert!(matches!(
            Intent::compile(&no_patterns),
            Err(CatalogError::NoPatterns(_))
        ));

        let blank_pattern = IntentDef::new("x")
            .with_patterns(["ok", " "])
            .with_responses(Species::Default, ["r"]);
        assert!(matches!(
            Intent::compile(&blank_pattern),
            Err(CatalogError::BlankPattern { index: 1, .. })
        ));

        let no_default = IntentDef::new("x")
            .with_patterns(["x"])
            .with_responses(Species::Dog, ["woof"]);
        assert!(matches!(
            Intent::compile(&no_default),
            Err(CatalogError::MissingDefault(_))
        ));

        let empty_set = IntentDef::new("x")
            .with_patterns(["x"])
            .with_responses(Species::Default, ["r"])
            .with_responses(Species::Cat, Vec::<String>::new());
        assert!(matches!(
            Intent::compile(&empty_set),
            Err(CatalogError::EmptyResponses { species: Species::Cat, .. })
        ));

        let blank_reply = IntentDef::new("x")
            .with_patterns(["x"])
            .with_responses(Species::Default, ["r", ""]);
        assert!(matches!(
            Intent::compile(&blank_reply),
            Err(CatalogError::BlankResponse { index: 1, .. })
        ));
    }
}

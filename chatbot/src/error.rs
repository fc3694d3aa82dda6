use thiserror::Error;

use crate::species::Species;

/// Errors raised while loading or compiling a catalog.
///
/// All of these are configuration errors: a [`Chatbot`](crate::Chatbot)
/// is never built from a catalog that fails validation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog: no intents defined")]
    Empty,

    #[error("catalog: duplicate intent name {0:?}")]
    DuplicateIntent(String),

    #[error("catalog: intent {0:?} has no patterns")]
    NoPatterns(String),

    #[error("catalog: intent {intent:?}: pattern[{index}] is blank")]
    BlankPattern { intent: String, index: usize },

    #[error("catalog: intent {0:?} has no default response set")]
    MissingDefault(String),

    #[error("catalog: intent {intent:?}: {species} response set is empty")]
    EmptyResponses { intent: String, species: Species },

    #[error("catalog: intent {intent:?}: {species} response[{index}] is blank")]
    BlankResponse {
        intent: String,
        species: Species,
        index: usize,
    },

    #[error("catalog: species {0} listed more than once")]
    DuplicateSpecies(Species),

    #[error("catalog: species {0} has no keywords")]
    NoKeywords(Species),

    #[error("catalog: species {species}: keyword[{index}] is blank")]
    BlankKeyword { species: Species, index: usize },

    #[error("catalog: the default tag cannot carry keywords")]
    DefaultInLexicon,

    #[error("catalog: fallback message is blank")]
    BlankFallback,

    #[error("catalog: unknown species {0:?}")]
    UnknownSpecies(String),

    #[error("catalog: invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("catalog: unsupported file extension {0:?} (expected json, yaml or yml)")]
    UnsupportedFormat(String),

    #[error("catalog: io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog: yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("catalog: json error: {0}")]
    Json(#[from] serde_json::Error),
}

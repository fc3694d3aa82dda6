//! Rule-based pet-care FAQ chatbot.
//!
//! Free-form user text is classified in two deterministic passes (which
//! pet species it mentions, which conversational intent it expresses) and
//! answered with one canned response drawn at random from the matching
//! response set. Everything is driven by a [`CatalogFile`] that is compiled
//! and validated once into a [`Chatbot`].
//!
//! # Example
//!
//! ```rust,ignore
//! use petcare_chatbot::Chatbot;
//!
//! let bot = Chatbot::builtin()?;
//! println!("{}", bot.get_response("what food should my puppy eat?"));
//! ```

mod bot;
mod catalog;
mod error;
mod intent;
mod pattern;
mod species;

pub use bot::{normalize, Chatbot, Classification, Reply, DEFAULT_FALLBACK};
pub use catalog::{CatalogFile, IntentDef, SpeciesDef, BUILTIN_CATALOG};
pub use error::CatalogError;
pub use intent::{Intent, IntentCatalog, ResponseSet};
pub use pattern::WordPattern;
pub use species::{Species, SpeciesLexicon};

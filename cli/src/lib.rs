//! Command line helpers for petcare.
//!
//! Named deployment contexts stored under `~/.petcare/<app>/config.yaml`,
//! YAML/JSON document loading, and YAML/JSON result output.

pub mod config;
pub mod load;
pub mod output;
pub mod paths;

pub use config::{load_config, Config, Context};
pub use load::{load_document, parse_document, LoadError};
pub use output::{Output, OutputFormat};
pub use paths::Paths;

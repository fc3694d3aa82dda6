//! CLI commands module.

mod ask;
mod catalog;
mod chat;
mod config;
mod serve;
mod util;

pub use ask::{AskCommand, ClassifyCommand};
pub use catalog::CatalogCommand;
pub use chat::ChatCommand;
pub use config::ConfigCommand;
pub use serve::ServeCommand;

pub(crate) use util::*;

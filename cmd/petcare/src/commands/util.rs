//! Helpers shared by the commands.

use std::path::PathBuf;

use anyhow::Context as _;
use serde::Serialize;

use petcare_chatbot::{CatalogFile, Chatbot};
use petcare_cli::{load_config, Config, Context, Output, OutputFormat};

use crate::Cli;

/// Application name, used for the config directory.
pub const APP_NAME: &str = "petcare";

/// Loads the configuration file.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(APP_NAME, cli.config.as_deref())
}

/// Resolves the context to run with.
///
/// A context named with `-c` must exist. Without one, the current context
/// is used, and defaults apply when none is set.
pub fn get_context(cli: &Cli) -> anyhow::Result<Context> {
    let cfg = get_config(cli)?;
    match cli.context.as_deref() {
        Some(name) => cfg
            .get_context(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("context '{}' not found", name)),
        None => Ok(cfg.get_current_context().cloned().unwrap_or_default()),
    }
}

/// Log filter of the active context, if any.
pub fn log_filter(cli: &Cli) -> Option<String> {
    get_context(cli)
        .ok()
        .and_then(|ctx| ctx.log_filter().map(str::to_string))
}

/// Catalog path from `--catalog`, else from the context.
fn catalog_path(cli: &Cli, ctx: &Context) -> Option<PathBuf> {
    cli.catalog.clone().or_else(|| ctx.catalog.clone())
}

/// Loads the active catalog file without compiling it.
pub fn load_catalog(cli: &Cli, ctx: &Context) -> anyhow::Result<CatalogFile> {
    match catalog_path(cli, ctx) {
        Some(path) => CatalogFile::from_path(&path)
            .with_context(|| format!("loading catalog {}", path.display())),
        None => Ok(CatalogFile::builtin()?),
    }
}

/// Builds the chatbot from the active catalog.
pub fn load_chatbot(cli: &Cli, ctx: &Context) -> anyhow::Result<Chatbot> {
    let file = load_catalog(cli, ctx)?;
    let bot = Chatbot::compile(&file)?;
    tracing::info!(
        species = bot.lexicon().len(),
        intents = bot.catalog().len(),
        source = %catalog_path(cli, ctx).map(|p| p.display().to_string()).unwrap_or_else(|| "builtin".to_string()),
        "catalog loaded"
    );
    Ok(bot)
}

/// Writes a result as YAML, or JSON with `--json`.
pub fn output_result<T: Serialize>(cli: &Cli, value: &T) -> anyhow::Result<()> {
    Output::new(OutputFormat::from_json_flag(cli.json), None).write(value)
}

/// Joins positional words into one message.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("✓ {}", message);
}

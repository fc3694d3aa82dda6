//! Catalog commands.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Subcommand};

use petcare_chatbot::Chatbot;

use super::{get_context, load_catalog, output_result, print_success};
use crate::Cli;

/// Inspect and validate catalogs.
///
/// A catalog lists species keywords, intents with their trigger words and
/// per-species responses, and the fallback reply.
#[derive(Args)]
pub struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Subcommand)]
enum CatalogSubcommand {
    /// Check that a catalog file loads and compiles
    Validate {
        /// Catalog file (YAML or JSON)
        file: PathBuf,
    },
    /// Print the active catalog
    Show,
}

impl CatalogCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            CatalogSubcommand::Validate { file } => {
                print_success(&validate_catalog(file)?);
                Ok(())
            }
            CatalogSubcommand::Show => {
                let ctx = get_context(cli)?;
                let catalog = load_catalog(cli, &ctx)?;
                output_result(cli, &catalog)
            }
        }
    }
}

/// Load and compile a catalog file, returning a one-line summary.
pub fn validate_catalog(file: &Path) -> anyhow::Result<String> {
    let bot = Chatbot::from_path(file)
        .with_context(|| format!("invalid catalog {}", file.display()))?;
    Ok(format!(
        "{}: {} species, {} intents",
        file.display(),
        bot.lexicon().len(),
        bot.catalog().len()
    ))
}

#[cfg(test)]
mod tests {
    use petcare_chatbot::{CatalogError, BUILTIN_CATALOG};

    use super::*;

    #[test]
    fn test_validate_builtin_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, BUILTIN_CATALOG).unwrap();

        let summary = validate_catalog(&path).unwrap();
        assert!(summary.ends_with("4 species, 9 intents"));
    }

    #[test]
    fn test_validate_rejects_missing_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(
            &path,
            "intents:\n  - name: food\n    patterns: [food]\n    responses:\n      dog: [kibble]\n",
        )
        .unwrap();

        let err = validate_catalog(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::MissingDefault(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_catalog(&dir.path().join("missing.yaml")).is_err());
    }
}

//! Configuration management commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use petcare_cli::Context as CliContext;

use super::{get_config, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Contexts allow you to keep several deployments (listen address,
/// catalog, seed pets, log filter), similar to kubectl's context
/// management.
///
/// Configuration is stored in ~/.petcare/petcare/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Add a new context
    #[command(name = "add-context")]
    AddContext {
        /// Context name
        name: String,
        /// Server listen address
        #[arg(long)]
        listen: Option<String>,
        /// Catalog file
        #[arg(long)]
        catalog_file: Option<PathBuf>,
        /// Seed pets file
        #[arg(long)]
        seed: Option<PathBuf>,
        /// Log filter (e.g. info, petcare=debug)
        #[arg(long)]
        log: Option<String>,
        /// Maximum chat exchanges kept in memory
        #[arg(long)]
        chat_limit: Option<usize>,
    },
    /// Delete a context
    #[command(name = "delete-context")]
    DeleteContext {
        /// Context name
        name: String,
    },
    /// Set the current context
    #[command(name = "use-context")]
    UseContext {
        /// Context name
        name: String,
    },
    /// Display the current context
    #[command(name = "get-context")]
    GetContext,
    /// List all contexts
    #[command(name = "list-contexts", alias = "get-contexts")]
    ListContexts,
    /// View the current configuration
    View,
}

impl ConfigCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::AddContext {
                name,
                listen,
                catalog_file,
                seed,
                log,
                chat_limit,
            } => {
                let mut cfg = get_config(cli)?;

                let ctx = CliContext {
                    listen: listen.clone().unwrap_or_default(),
                    catalog: catalog_file.clone(),
                    seed: seed.clone(),
                    log: log.clone().unwrap_or_default(),
                    chat_limit: *chat_limit,
                    ..Default::default()
                };

                cfg.add_context(name, ctx)?;
                print_success(&format!("Context \"{}\" added successfully", name));
                Ok(())
            }

            ConfigSubcommand::DeleteContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.delete_context(name)?;
                print_success(&format!("Context \"{}\" deleted", name));
                Ok(())
            }

            ConfigSubcommand::UseContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.use_context(name)?;
                print_success(&format!("Switched to context \"{}\"", name));
                Ok(())
            }

            ConfigSubcommand::GetContext => {
                let cfg = get_config(cli)?;
                if cfg.current_context.is_empty() {
                    println!("No current context set");
                } else {
                    println!("{}", cfg.current_context);
                }
                Ok(())
            }

            ConfigSubcommand::ListContexts => {
                let cfg = get_config(cli)?;

                if cfg.contexts.is_empty() {
                    println!("No contexts configured");
                    return Ok(());
                }

                println!("{:<8} {:<20} {:<24} {}", "CURRENT", "NAME", "LISTEN", "CATALOG");

                for (name, ctx) in &cfg.contexts {
                    let current = if name == &cfg.current_context { "*" } else { "" };
                    let catalog = ctx
                        .catalog
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(builtin)".to_string());
                    println!("{:<8} {:<20} {:<24} {}", current, name, ctx.listen_addr(), catalog);
                }

                Ok(())
            }

            ConfigSubcommand::View => {
                let cfg = get_config(cli)?;

                println!("Config file: {}", cfg.path().display());
                println!("Current context: {}", cfg.current_context);
                println!("Contexts: {}", cfg.contexts.len());

                if !cfg.contexts.is_empty() {
                    println!("\nContext details:");

                    for (name, ctx) in &cfg.contexts {
                        println!("\n  {}:", name);
                        println!("    Listen: {}", ctx.listen_addr());
                        if let Some(catalog) = &ctx.catalog {
                            println!("    Catalog: {}", catalog.display());
                        }
                        if let Some(seed) = &ctx.seed {
                            println!("    Seed: {}", seed.display());
                        }
                        if let Some(log) = ctx.log_filter() {
                            println!("    Log: {}", log);
                        }
                        if let Some(limit) = ctx.chat_limit {
                            println!("    Chat limit: {}", limit);
                        }
                    }
                }

                Ok(())
            }
        }
    }
}

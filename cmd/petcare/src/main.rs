//! petcare - pet-care assistant command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod server;

use commands::{AskCommand, CatalogCommand, ChatCommand, ClassifyCommand, ConfigCommand, ServeCommand};

/// petcare - rule-based pet-care assistant.
///
/// Answers pet-care questions (food, health, grooming, vaccination,
/// adoption, emergencies) with species-aware replies, and serves the
/// chatbot together with an adoption and reminder registry over HTTP.
///
/// Configuration is stored in ~/.petcare/petcare/ and supports multiple
/// contexts, similar to kubectl's context management.
#[derive(Parser)]
#[command(name = "petcare")]
#[command(about = "Pet-care assistant")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.petcare/petcare/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Context name to use
    #[arg(short = 'c', long, global = true)]
    pub context: Option<String>,

    /// Catalog file (YAML or JSON) replacing the built-in one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a single message
    Ask(AskCommand),
    /// Show the detected species and intent of a message
    Classify(ClassifyCommand),
    /// Chat interactively on stdin
    Chat(ChatCommand),
    /// Inspect and validate catalogs
    Catalog(CatalogCommand),
    /// Start the HTTP server
    Serve(ServeCommand),
    /// Manage CLI configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match &cli.command {
        Commands::Ask(cmd) => cmd.run(&cli).await,
        Commands::Classify(cmd) => cmd.run(&cli).await,
        Commands::Chat(cmd) => cmd.run(&cli).await,
        Commands::Catalog(cmd) => cmd.run(&cli).await,
        Commands::Serve(cmd) => cmd.run(&cli).await,
        Commands::Config(cmd) => cmd.run(&cli).await,
    }
}

/// `-v` forces debug; otherwise `RUST_LOG`, then the context's `log`
/// filter, then `info`. Logs go to stderr so command output stays clean.
fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = commands::log_filter(cli).unwrap_or_else(|| "info".to_string());
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
        })
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

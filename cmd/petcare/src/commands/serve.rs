//! HTTP server command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Args;

use petcare_cli::load_document;
use petcare_shelter::{NewPet, Shelter, DEFAULT_CHAT_LIMIT};

use super::{get_context, load_chatbot};
use crate::server;
use crate::Cli;

/// Start the HTTP server.
///
/// Serves the chatbot and the adoption and reminder registry. The
/// registry lives in memory and starts from the seed file, if any.
#[derive(Args)]
pub struct ServeCommand {
    /// Listen address (e.g. :8080, 127.0.0.1:3000); overrides the context
    #[arg(short = 'l', long)]
    listen: Option<String>,

    /// Seed pets file (YAML or JSON list); overrides the context
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Maximum chat exchanges kept in memory; overrides the context
    #[arg(long)]
    chat_limit: Option<usize>,
}

impl ServeCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let ctx = get_context(cli)?;
        let bot = load_chatbot(cli, &ctx)?;

        let chat_limit = self
            .chat_limit
            .or(ctx.chat_limit)
            .unwrap_or(DEFAULT_CHAT_LIMIT);
        let mut shelter = Shelter::new().with_chat_limit(chat_limit);
        if let Some(seed) = self.seed.as_ref().or(ctx.seed.as_ref()) {
            let pets: Vec<NewPet> = load_document(seed)
                .with_context(|| format!("loading seed pets {}", seed.display()))?;
            for pet in pets {
                shelter.add_pet(pet)?;
            }
            tracing::info!(pets = shelter.available_pets(None).len(), "shelter seeded");
        }

        let listen = self.listen.as_deref().unwrap_or(ctx.listen_addr());
        server::start_server(listen, Arc::new(bot), shelter).await
    }
}

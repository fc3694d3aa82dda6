//! One-shot commands: `ask` and `classify`.

use clap::Args;

use petcare_chatbot::{Chatbot, Classification, Reply};

use super::{get_context, join_words, load_chatbot, output_result};
use crate::Cli;

/// Answer a single message.
///
/// Prints the reply text, or the full reply (text, species, intent) with
/// `--json`.
#[derive(Args)]
pub struct AskCommand {
    /// Message text
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

impl AskCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let ctx = get_context(cli)?;
        let bot = load_chatbot(cli, &ctx)?;

        let reply = ask(&bot, &self.text);
        if cli.json {
            output_result(cli, &reply)
        } else {
            println!("{}", reply.text);
            Ok(())
        }
    }
}

/// Show the species and intent a message resolves to.
#[derive(Args)]
pub struct ClassifyCommand {
    /// Message text
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

impl ClassifyCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let ctx = get_context(cli)?;
        let bot = load_chatbot(cli, &ctx)?;

        output_result(cli, &classify(&bot, &self.text))
    }
}

/// Answer positional words as one message.
pub fn ask(bot: &Chatbot, words: &[String]) -> Reply {
    bot.respond(&join_words(words))
}

pub fn classify(bot: &Chatbot, words: &[String]) -> Classification {
    bot.classify(&join_words(words))
}

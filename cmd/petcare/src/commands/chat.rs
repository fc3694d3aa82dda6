//! Interactive chat on stdin.

use std::io::{self, BufRead, Write};

use clap::Args;

use petcare_chatbot::Chatbot;

use super::{get_context, load_chatbot};
use crate::Cli;

/// Intent whose reply ends the session.
const GOODBYE_INTENT: &str = "goodbye";

/// Chat interactively.
///
/// Reads one message per line and prints the reply. The session ends at
/// end of input, or after answering a goodbye.
#[derive(Args)]
pub struct ChatCommand {
    /// Prompt shown before each message (empty for none)
    #[arg(long, default_value = "you> ")]
    prompt: String,
}

impl ChatCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let ctx = get_context(cli)?;
        let bot = load_chatbot(cli, &ctx)?;

        let replies = chat_session(&bot, &self.prompt, io::stdin().lock(), io::stdout())?;
        tracing::debug!(replies, "chat session ended");
        Ok(())
    }
}

/// Answer `input` line by line until end of input or a goodbye. Blank lines
/// are skipped. Returns the number of replies written.
pub fn chat_session<R: BufRead, W: Write>(
    bot: &Chatbot,
    prompt: &str,
    input: R,
    mut output: W,
) -> io::Result<usize> {
    let mut lines = input.lines();
    let mut replies = 0;

    loop {
        if !prompt.is_empty() {
            write!(output, "{}", prompt)?;
            output.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = bot.respond(&line);
        writeln!(output, "{}", reply.text)?;
        replies += 1;

        if reply.intent.as_deref() == Some(GOODBYE_INTENT) {
            break;
        }
    }

    Ok(replies)
}

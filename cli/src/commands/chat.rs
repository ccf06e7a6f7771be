//! # TechSupport Chat Command
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `techsupport chat`, the interactive terminal front end. It reads
//! lines from stdin, hands each one to a single `Chatbot` conversation, waits
//! for the advisory typing delay, then prints the reply.
//!
//! Blank lines are ignored. Lines starting with `/` are REPL commands:
//!
//! - `/help`: list the commands
//! - `/history`: print the conversation so far with timestamps
//! - `/context`: print the entities remembered in this conversation
//! - `/quit`: leave (end-of-input works too)
//!
//! ## Examples
//!
//! ```bash
//! techsupport chat
//! techsupport --seed 1 chat --no-delay < transcript.txt
//! ```
//!
use super::GlobalOptions;
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;
use techsupport::core::error::Result;
use techsupport::dialogue::session::{ConversationContext, ConversationHistory, Speaker};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

const HELP_TEXT: &str = "Commands: /help, /history, /context, /quit";

/// # Chat Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Print replies immediately instead of simulating typing.
    #[arg(long)]
    pub no_delay: bool,
}

/// Slash commands understood by the REPL.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Help,
    History,
    Context,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// `None` means the line is a message for the bot.
    fn parse(line: &str) -> Option<Self> {
        let word = line.strip_prefix('/')?.split_whitespace().next().unwrap_or("");
        Some(match word.to_lowercase().as_str() {
            "help" | "?" => ReplCommand::Help,
            "history" => ReplCommand::History,
            "context" => ReplCommand::Context,
            "quit" | "exit" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(word.to_string()),
        })
    }
}

pub async fn handle_chat(args: ChatArgs, global: &GlobalOptions) -> Result<()> {
    let (cfg, mut bot) = global.start_session()?;
    info!("Starting interactive chat (typing delay: {})", !args.no_delay);

    println!("{}: {}", cfg.bot.name, cfg.bot.welcome);
    println!("({})", HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let line = match lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        {
            Some(line) => line,
            None => {
                debug!("End of input, leaving chat");
                println!();
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match ReplCommand::parse(line.trim()) {
            Some(ReplCommand::Quit) => break,
            Some(ReplCommand::Help) => println!("{}", HELP_TEXT),
            Some(ReplCommand::History) => {
                print!("{}", format_history(bot.history(), &cfg.bot.name))
            }
            Some(ReplCommand::Context) => print!("{}", format_context(bot.context())),
            Some(ReplCommand::Unknown(word)) => {
                println!("Unknown command '/{}'. {}", word, HELP_TEXT)
            }
            None => {
                let reply = bot.process_message(&line);
                if !args.no_delay {
                    if let Some(pause) = typing_pause(reply.typing_delay_secs) {
                        tokio::time::sleep(pause).await;
                    }
                }
                println!("{}: {}", cfg.bot.name, reply.text);
            }
        }
    }
    Ok(())
}

/// Converts the advisory delay into a sleep. Zero and values `Duration` cannot
/// hold give `None`.
fn typing_pause(secs: f64) -> Option<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(pause) if !pause.is_zero() => Some(pause),
        Ok(_) => None,
        Err(e) => {
            warn!("Skipping typing delay of {}s: {}", secs, e);
            None
        }
    }
}

fn format_history(history: &ConversationHistory, bot_name: &str) -> String {
    if history.is_empty() {
        return "No messages yet.\n".to_string();
    }
    history
        .turns()
        .iter()
        .map(|turn| {
            let who = match turn.speaker {
                Speaker::User => "You",
                Speaker::Bot => bot_name,
            };
            format!("[{}] {}: {}\n", turn.at.format("%H:%M:%S"), who, turn.text)
        })
        .collect()
}

fn format_context(context: &ConversationContext) -> String {
    if context.is_empty() {
        return "Nothing remembered yet.\n".to_string();
    }
    context
        .iter()
        .map(|(field, value)| format!("{}: {}\n", field, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slash_commands() {
        assert_eq!(ReplCommand::parse("/quit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("/EXIT"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("/history now"), Some(ReplCommand::History));
        assert_eq!(ReplCommand::parse("/context"), Some(ReplCommand::Context));
        assert_eq!(ReplCommand::parse("/help"), Some(ReplCommand::Help));
        assert_eq!(
            ReplCommand::parse("/dance"),
            Some(ReplCommand::Unknown("dance".to_string()))
        );
        assert_eq!(ReplCommand::parse("hello /quit"), None);
    }

    #[test]
    fn typing_pause_handles_extremes() {
        assert_eq!(typing_pause(0.25), Some(Duration::from_millis(250)));
        assert_eq!(typing_pause(0.0), None);
        assert_eq!(typing_pause(1e300), None);
        assert_eq!(typing_pause(f64::INFINITY), None);
        assert_eq!(typing_pause(-1.0), None);
    }

    #[test]
    fn empty_views() {
        assert_eq!(
            format_history(&ConversationHistory::default(), "Bot"),
            "No messages yet.\n"
        );
        assert_eq!(
            format_context(&ConversationContext::default()),
            "Nothing remembered yet.\n"
        );
    }
}

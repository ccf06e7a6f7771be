//! # TechSupport Ask Command
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `techsupport ask`, which sends each message given on the command
//! line, in order, through a single conversation and prints one reply per
//! message. Typing delays are not waited for.
//!
//! ## Examples
//!
//! ```bash
//! techsupport --seed 7 ask "hi, my name is Alex" "My order 123456 hasn't shipped yet"
//! ```
//!
//! ```text
//! TechSupport Assistant: Nice to meet you, Alex! Hello! How can I help you today?
//! TechSupport Assistant: Let me look up information for order number 123456. Please wait a moment...
//! ```
//!
use super::GlobalOptions;
use clap::Parser;
use techsupport::core::error::Result;
use tracing::debug;

/// # Ask Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Messages to send, processed in order within one conversation.
    #[arg(required = true)]
    pub messages: Vec<String>,
}

pub async fn handle_ask(args: AskArgs, global: &GlobalOptions) -> Result<()> {
    let (cfg, mut bot) = global.start_session()?;
    for message in &args.messages {
        let reply = bot.process_message(message);
        debug!(
            "Reply ready (advisory typing delay {:.2}s)",
            reply.typing_delay_secs
        );
        println!("{}: {}", cfg.bot.name, reply.text);
    }
    Ok(())
}

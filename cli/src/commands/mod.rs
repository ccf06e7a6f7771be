//! # TechSupport Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the `techsupport` binary. Each
//! subcommand defines its own arguments structure and an async handler.
//!
//! ## Command Groups
//!
//! - `chat`: Interactive conversation in the terminal
//! - `ask`: One-shot conversation over messages given as arguments
//! - `analyze`: Shows tokens, intent and entities for a message
//!
use techsupport::core::config::{self, Config};
use techsupport::core::error::Result;
use techsupport::dialogue::session::Chatbot;
use tracing::debug;

/// Command for the interactive terminal chat.
pub mod chat;
/// Command that answers messages passed on the command line.
pub mod ask;
/// Command that explains how a message is understood.
pub mod analyze;

/// Options shared by every subcommand (global flags on the top-level CLI).
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit configuration file (`--config`).
    pub config: Option<String>,
    /// Seed overriding `session.seed` (`--seed`).
    pub seed: Option<u64>,
}

impl GlobalOptions {
    /// Loads configuration and builds a fresh conversation from it.
    pub fn start_session(&self) -> Result<(Config, Chatbot)> {
        let cfg = config::load_config(self.config.as_deref())?;
        let bot = Chatbot::from_config(&cfg, self.seed)?;
        debug!("Started a new session for '{}'", cfg.bot.name);
        Ok((cfg, bot))
    }
}

//! # TechSupport Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `techsupport` binary.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! The dialogue engine itself lives in the `techsupport` library crate; this
//! binary is only the terminal presentation layer around it.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! techsupport --help
//!
//! # Chat with debug logging and a reproducible seed
//! techsupport -vv --seed 42 chat
//!
//! # See how a message is understood
//! techsupport analyze "my laptop is broken"
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (chat, ask, analyze)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "techsupport",
    about = "TechSupport Assistant: rule-based customer-service chat",
    long_about = "Chat with a rule-based customer-service assistant that classifies intent,\n\
                  extracts order numbers, dates, products and issue types, and replies from templates.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Read configuration from this file only (`~` is expanded).
    #[arg(long, global = true, env = "TECHSUPPORT_CONFIG")]
    config: Option<String>,
    /// Seed for reply selection, overriding `session.seed`.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Start an interactive chat session.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Send one or more messages through a single session and print the replies.
    Ask(commands::ask::AskArgs),
    /// Show tokens, intent and entities for a message.
    #[command(alias = "a")]
    Analyze(commands::analyze::AnalyzeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let global = commands::GlobalOptions {
        config: cli.config,
        seed: cli.seed,
    };

    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args, &global).await,
        Commands::Ask(args) => commands::ask::handle_ask(args, &global).await,
        Commands::Analyze(args) => commands::analyze::handle_analyze(args, &global).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

//! # Parley Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Parley CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each command (`chat`, `stats`) is a variant of the `Commands` enum
//! - With no command, `chat` runs with default arguments
//! - Logs go to stderr; stdout carries the conversation itself
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! ```bash
//! # Start chatting
//! parley
//!
//! # Chat with debug logging of which rule answered
//! parley -vv
//!
//! # Show statistics for a specific log
//! parley --history ./conversation_log.json stats
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod chat; // Conversation engine (entities, rules, history, session loop)
mod commands; // Command handlers (chat, stats)
mod common; // Shared utilities (fs)
mod core; // Core infrastructure (errors, config, templating)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "parley",
    about = "🤖 Parley: a pattern-matching chatbot with entity-aware replies",
    long_about = "Chat with a rule-based bot that recognises places and names in what you type.\n\
                  Every exchange is saved to a JSON conversation log.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of searching for .parley.toml.
    #[arg(short, long, global = true, env = "PARLEY_CONFIG")]
    config: Option<PathBuf>,
    /// Conversation log file (overrides [history] path).
    #[arg(long, global = true, env = "PARLEY_HISTORY")]
    history: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Start an interactive chat session (default)
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Show statistics for the conversation log
    #[command(alias = "s")]
    Stats(commands::stats::StatsArgs),
}

fn main() -> anyhow::Result<()> {
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

    let options = commands::GlobalOptions {
        config: cli.config,
        history: cli.history,
    };
    let command = cli
        .command
        .unwrap_or(Commands::Chat(commands::chat::ChatArgs::default()));

    let command_result = match command {
        Commands::Chat(args) => commands::chat::handle_chat(args, &options),
        Commands::Stats(args) => commands::stats::handle_stats(args, &options),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

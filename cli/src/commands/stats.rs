//! # Parley Stats Command
//!
//! File: cli/src/commands/stats.rs
//! Author: Christi Mahu
//!
//! Implements `parley stats`: prints the same statistics block a chat session
//! ends with, for the configured log, without starting a conversation.
//!
//! ```bash
//! parley stats
//! parley --history ~/old_log.json stats
//! ```
//!
use crate::chat::history::{ConversationHistory, LoadStatus};
use crate::commands::{load_settings, GlobalOptions};
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug, Default)]
pub struct StatsArgs {}

pub fn handle_stats(_args: StatsArgs, options: &GlobalOptions) -> Result<()> {
    info!("Handling stats command...");
    let cfg = load_settings(options)?;
    let history = ConversationHistory::load(cfg.history_path());
    match history.load_status() {
        LoadStatus::Missing => println!(
            "No conversation log found at {}.",
            history.path().display()
        ),
        LoadStatus::Reset(reason) => eprintln!(
            "Warning: conversation log at {} could not be read ({}); showing empty statistics.",
            history.path().display(),
            reason
        ),
        LoadStatus::Loaded(_) if history.is_empty() => println!(
            "The conversation log at {} has no messages yet.",
            history.path().display()
        ),
        LoadStatus::Loaded(_) => {}
    }
    println!("{}", history.stats().render()?);
    Ok(())
}

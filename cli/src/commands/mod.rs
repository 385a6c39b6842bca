//! # Parley Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the Parley CLI and the
//! option handling they share.
//!
//! ## Commands
//!
//! - `chat`: the interactive conversation (the default when no command is given)
//! - `stats`: print the statistics report for an existing conversation log
//!
//! Each command defines its own `clap` arguments struct and a `handle_*`
//! function. Options that apply to every command (`--config`, `--history`)
//! arrive through `GlobalOptions`.
//!
use crate::core::config::{self, Config};
use crate::core::error::Result;
use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;

/// Interactive chat session. Runs when no subcommand is given.
pub mod chat;
/// Statistics report for an existing conversation log.
pub mod stats;

/// Options accepted before or after any subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit configuration file; disables the `.parley.toml` search.
    pub config: Option<PathBuf>,
    /// Conversation log location, overriding `[history] path`.
    pub history: Option<PathBuf>,
}

/// Loads the configuration and applies command-line overrides.
pub fn load_settings(options: &GlobalOptions) -> Result<Config> {
    let mut cfg =
        config::load_config(options.config.as_deref()).context("Failed to load Parley configuration")?;
    if let Some(history) = &options.history {
        debug!("History path overridden on command line: {}", history.display());
        cfg.history.path = history.to_string_lossy().into_owned();
    }
    Ok(cfg)
}

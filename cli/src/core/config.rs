//! # Parley Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements configuration loading for Parley: where the
//! conversation log lives, how the session labels speakers and recognises exit
//! keywords, and whether (and from which lexicon) the tagging pipeline is built.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit `--config <path>` (replaces the search below entirely)
//! 2. Project-specific `.parley.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! After merging, paths are expanded (`~` to the home directory) and the
//! result is validated before use.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let log_path = cfg.history_path();
//! let labels = (&cfg.session.user_label, &cfg.session.bot_label);
//! ```
//!
//! Example `.parley.toml`:
//!
//! ```toml
//! [history]
//! path = "~/chat/conversation_log.json"
//!
//! [session]
//! bot_label = "Rusty"
//! exit_keywords = ["quit", "exit", "bye", "goodbye", "ciao"]
//!
//! [pipeline]
//! lexicon = "~/chat/extra_names.toml"
//! ```
//!
use crate::core::error::{ParleyError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Where the conversation log is persisted.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Path of the JSON log (can use ~). Will be expanded.
    #[serde(default = "default_history_path")]
    pub path: String,
}

/// Settings for the interactive session loop.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Prefix printed before each bot reply.
    #[serde(default = "default_bot_label")]
    pub bot_label: String,
    /// Prompt printed before reading each user line.
    #[serde(default = "default_user_label")]
    pub user_label: String,
    /// Inputs (compared case-insensitively after trimming) that end the session.
    #[serde(default = "default_exit_keywords")]
    pub exit_keywords: Vec<String>,
}

/// Settings for the entity tagging pipeline.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// When false the extractor starts degraded and replies come from the rules alone.
    #[serde(default = "default_pipeline_enabled")]
    pub enabled: bool,
    /// Optional lexicon file merged into the built-in one (can use ~).
    #[serde(default)]
    pub lexicon: Option<String>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bot_label: default_bot_label(),
            user_label: default_user_label(),
            exit_keywords: default_exit_keywords(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enabled: default_pipeline_enabled(),
            lexicon: None,
        }
    }
}

impl Config {
    /// The configured history log location as a path.
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.history.path)
    }
}

fn default_history_path() -> String {
    "conversation_log.json".to_string()
}
fn default_bot_label() -> String {
    "Bot".to_string()
}
fn default_user_label() -> String {
    "You".to_string()
}
fn default_exit_keywords() -> Vec<String> {
    ["quit", "exit", "bye", "goodbye"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_pipeline_enabled() -> bool {
    true
}

const PROJECT_CONFIG_FILENAME: &str = ".parley.toml";

/// Loads, merges, expands and validates the configuration.
///
/// With `explicit` set, only that file is read (it must exist). Otherwise the
/// user config and the nearest project config are merged over the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            let project_config = load_project_config(&current_dir)?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config).context("Failed to expand paths in configuration")?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Parley", "parley") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.parley.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` up to the filesystem root looking for `.parley.toml`,
/// stopping at the first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.history.path = if project_cfg.history.path != default_history_path() {
        project_cfg.history.path
    } else {
        user.history.path
    };
    merged.session.bot_label = if project_cfg.session.bot_label != default_bot_label() {
        project_cfg.session.bot_label
    } else {
        user.session.bot_label
    };
    merged.session.user_label = if project_cfg.session.user_label != default_user_label() {
        project_cfg.session.user_label
    } else {
        user.session.user_label
    };
    merged.session.exit_keywords =
        if project_cfg.session.exit_keywords != default_exit_keywords() {
            project_cfg.session.exit_keywords
        } else {
            user.session.exit_keywords
        };
    // A project can only switch the pipeline off, never back on over a user's choice.
    merged.pipeline.enabled = project_cfg.pipeline.enabled && user.pipeline.enabled;
    merged.pipeline.lexicon = project_cfg.pipeline.lexicon.or(user.pipeline.lexicon);
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    config.history.path = shellexpand::tilde(&config.history.path).into_owned();
    debug!("Expanded history path: {}", config.history.path);
    if let Some(lexicon) = config.pipeline.lexicon.as_mut() {
        *lexicon = shellexpand::tilde(lexicon).into_owned();
        debug!("Expanded lexicon path: {}", lexicon);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.history.path.trim().is_empty() {
        return Err(anyhow!(ParleyError::Config(
            "History path cannot be empty.".to_string()
        )));
    }
    let history_path = config.history_path();
    if history_path.is_dir() {
        return Err(anyhow!(ParleyError::Config(format!(
            "Configured history path '{}' is a directory, expected a file.",
            history_path.display()
        ))));
    }
    if config.session.exit_keywords.is_empty() {
        return Err(anyhow!(ParleyError::Config(
            "At least one exit keyword is required.".to_string()
        )));
    }
    if let Some(blank) = config
        .session
        .exit_keywords
        .iter()
        .position(|k| k.trim().is_empty())
    {
        return Err(anyhow!(ParleyError::Config(format!(
            "Exit keyword #{} is blank.",
            blank + 1
        ))));
    }
    if config.session.bot_label.trim().is_empty() {
        return Err(anyhow!(ParleyError::Config(
            "Bot label cannot be empty.".to_string()
        )));
    }
    info!("Configuration validation successful.");
    Ok(())
}

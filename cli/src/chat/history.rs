//! # Parley Conversation History
//!
//! File: cli/src/chat/history.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `ConversationHistory` owns the ordered list of exchanges and the JSON file
//! that mirrors it. The file is a pretty-printed array (4-space indent):
//!
//! ```json
//! [
//!     {
//!         "timestamp": "2024-05-01 09:30:12",
//!         "user": "hi",
//!         "bot": "Hello! How can I help you today?"
//!     }
//! ]
//! ```
//!
//! ## Behaviour
//!
//! - **Load** is best-effort and never fails. A missing file and an unreadable
//!   or malformed file both produce an empty history; `LoadStatus` records
//!   which case happened so the caller can report it.
//! - **Append** stamps the exchange with the local time, pushes it, and then
//!   rewrites the whole file. If the write fails the error is returned but the
//!   entry stays in memory, so the next successful write still persists it.
//! - Timestamps are written as read from the local clock; entries loaded from
//!   an existing file never influence them.
//!
use crate::common::fs::io;
use crate::core::error::{ParleyError, Result};
use crate::core::templating;
use anyhow::Context;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Timestamp format of every entry, e.g. `2024-05-01 09:30:12`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One exchange between the user and the bot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub timestamp: String,
    pub user: String,
    pub bot: String,
}

/// What happened when the history file was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No file existed yet.
    Missing,
    /// The file was read and parsed.
    Loaded(usize),
    /// The file existed but could not be read or parsed; history was reset.
    Reset(String),
}

pub struct ConversationHistory {
    path: PathBuf,
    entries: Vec<ConversationEntry>,
    load_status: LoadStatus,
}

impl ConversationHistory {
    /// Loads the history at `path`, falling back to an empty history.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (entries, load_status) = match read_entries(&path) {
            Ok(None) => {
                debug!("No conversation log at {}, starting fresh.", path.display());
                (Vec::new(), LoadStatus::Missing)
            }
            Ok(Some(entries)) => {
                info!(
                    "Loaded {} previous messages from {}",
                    entries.len(),
                    path.display()
                );
                let count = entries.len();
                (entries, LoadStatus::Loaded(count))
            }
            Err(e) => {
                warn!(
                    "Discarding unreadable conversation log {}: {:#}",
                    path.display(),
                    e
                );
                (Vec::new(), LoadStatus::Reset(format!("{:#}", e)))
            }
        };
        Self {
            path,
            entries,
            load_status,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Records an exchange stamped with the current local time and rewrites the file.
    pub fn append(&mut self, user: &str, bot: &str) -> Result<()> {
        let now = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.append_at(now, user, bot)
    }

    /// Records an exchange with an explicit timestamp and rewrites the file.
    pub fn append_at(&mut self, timestamp: String, user: &str, bot: &str) -> Result<()> {
        self.entries.push(ConversationEntry {
            timestamp,
            user: user.to_string(),
            bot: bot.to_string(),
        });
        self.save()
    }

    /// Serializes every entry and overwrites the file.
    pub fn save(&self) -> Result<()> {
        let json = to_pretty_json(&self.entries)?;
        io::write_string_to_file(&self.path, &json).with_context(|| {
            format!(
                "Failed to save conversation log ({} entries)",
                self.entries.len()
            )
        })
    }

    /// Summary figures for the statistics report.
    pub fn stats(&self) -> ConversationStats {
        ConversationStats {
            total: self.entries.len(),
            first: self.entries.first().map(|e| e.timestamp.clone()),
            latest: self.entries.last().map(|e| e.timestamp.clone()),
            path: self.path.display().to_string(),
        }
    }
}

/// Totals shown by the statistics report.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ConversationStats {
    pub total: usize,
    pub first: Option<String>,
    pub latest: Option<String>,
    pub path: String,
}

const STATS_RULE_WIDTH: usize = 50;

const STATS_TEMPLATE: &str = "\n{{ rule }}\n\
📊 Conversation Statistics:\n\
{{ rule }}\n\
Total messages in history: {{ total }}\n\
{% if first %}First conversation: {{ first }}\n\
Latest conversation: {{ latest }}\n\
{% endif %}Conversation saved to: {{ path }}\n\
{{ rule }}";

#[derive(Serialize)]
struct StatsView<'a> {
    rule: String,
    #[serde(flatten)]
    stats: &'a ConversationStats,
}

impl ConversationStats {
    /// Renders the framed statistics block printed at the end of a session.
    pub fn render(&self) -> Result<String> {
        let view = StatsView {
            rule: "=".repeat(STATS_RULE_WIDTH),
            stats: self,
        };
        templating::render_report("conversation statistics", STATS_TEMPLATE, &view)
    }
}

fn read_entries(path: &Path) -> Result<Option<Vec<ConversationEntry>>> {
    let Some(content) = io::read_optional_file(path)? else {
        return Ok(None);
    };
    let entries: Vec<ConversationEntry> =
        serde_json::from_str(&content).map_err(ParleyError::from)?;
    Ok(Some(entries))
}

fn to_pretty_json(entries: &[ConversationEntry]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut serializer)
        .map_err(ParleyError::from)?;
    String::from_utf8(buf).context("Serialized conversation log is not UTF-8")
}

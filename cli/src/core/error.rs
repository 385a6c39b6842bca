//! # Parley Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout Parley. Failures that
//! callers need to recognise (a degraded tagging pipeline, a corrupt history
//! file) get their own variant so they can be matched with `downcast_ref`;
//! everything else travels as `anyhow::Error` with context attached.
//!
//! ## Architecture
//!
//! - `ParleyError`: a `thiserror` enum of the specific failure kinds
//! - `Result<T>`: an alias for `anyhow::Result<T>`
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if lexicon.places.is_empty() {
//!     return Err(ParleyError::Lexicon("no places defined".into()))?;
//! }
//!
//! // Recognise a recoverable failure
//! match extractor.analyze(input) {
//!     Ok(analysis) => { /* ... */ }
//!     Err(e) if e.downcast_ref::<ParleyError>().is_some_and(|pe| matches!(pe, ParleyError::PipelineUnavailable { .. })) => {
//!         // fall back to pattern rules
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the Parley application.
#[derive(Error, Debug)]
pub enum ParleyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Conversation history is not valid JSON: {source}")]
    HistoryFormat {
        #[from]
        source: serde_json::Error,
    },

    #[error("Tagging pipeline is unavailable: {reason}")]
    PipelineUnavailable { reason: String },

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Invalid pattern rule '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

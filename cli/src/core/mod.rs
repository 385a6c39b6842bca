//! # Parley Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the infrastructure components shared by every
//! command:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Tera rendering for terminal reports
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ParleyError, Result}; // For error handling
//! use crate::core::templating; // For rendering reports
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;

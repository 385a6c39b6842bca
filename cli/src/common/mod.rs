//! # Parley Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Root of the shared utility modules used across Parley. These hold
//! cross-cutting helpers that are not specific to the conversation engine
//! (`chat::`) or to a particular command (`commands::`).
//!
//! - **`fs`**: reading and writing files with contextual errors.
//!

pub mod fs;

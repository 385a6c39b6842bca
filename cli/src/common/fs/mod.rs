//! # Parley Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Filesystem helpers shared by the history log and the lexicon loader.
//! Callers import the submodule directly, e.g.
//! `use crate::common::fs::io::write_string_to_file;`.
//!

/// Basic file I/O (`ensure_dir_exists`, `read_file_to_string`, `read_optional_file`, `write_string_to_file`).
pub mod io;

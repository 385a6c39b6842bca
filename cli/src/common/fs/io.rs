//! # Parley Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used by the history log and the lexicon
//! loader. They attach the offending path to every error through
//! `anyhow::Context` so a failure surfaces as
//! `Failed to write to file "conversation_log.json": Permission denied`
//! rather than a bare OS message.
//!
//! - **`ensure_dir_exists`**: creates a directory (and parents) if missing, and
//!   rejects a path that exists but is not a directory.
//! - **`read_file_to_string`**: reads a whole file, failing if it is absent.
//! - **`read_optional_file`**: reads a whole file, returning `None` when it does
//!   not exist. Callers use this to tell "no file yet" from "unreadable file".
//! - **`write_string_to_file`**: creates the parent directory if needed and
//!   overwrites the file with the given content.
//!
use crate::core::error::{ParleyError, Result};
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Creates the directory and any missing parents. Returns
/// `ParleyError::FileSystem` if the path exists but is not a directory.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ParleyError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Reads the entire content of a file, or `Ok(None)` if it does not exist.
///
/// Any other I/O failure (permissions, invalid UTF-8, path is a directory)
/// is returned as an error.
pub fn read_optional_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("File not found, treating as absent: {:?}", path);
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read file {:?}", path)),
    }
}

/// Writes string content to a file path, overwriting it if it exists.
///
/// The parent directory is created first when missing.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        // `Path::new("log.json").parent()` is `Some("")`, which is the working directory.
        if !parent.as_os_str().is_empty() {
            ensure_dir_exists(parent)?;
        }
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote {} bytes to file: {:?}", content.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_write_creates_parent_and_overwrites() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("logs/chat.json");
        write_string_to_file(&file_path, "first")?;
        write_string_to_file(&file_path, "second")?;
        assert_eq!(read_file_to_string(&file_path)?, "second");
        Ok(())
    }

    #[test]
    fn test_read_optional_file_absent() -> Result<()> {
        let base_dir = tempdir()?;
        let missing = base_dir.path().join("nonexistent.json");
        assert_eq!(read_optional_file(&missing)?, None);
        Ok(())
    }

    #[test]
    fn test_read_optional_file_directory_is_error() -> Result<()> {
        let base_dir = tempdir()?;
        assert!(read_optional_file(base_dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let base_dir = tempdir()?;
        let result = read_file_to_string(&base_dir.path().join("nonexistent.txt"));
        assert!(result.is_err());
        Ok(())
    }
}

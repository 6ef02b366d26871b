//! Error types for name planning and renaming.

use std::path::PathBuf;
use thiserror::Error;

use crate::ParseError;

/// A file name that cannot be turned into a canonical name.
#[derive(Debug, Error)]
pub enum NameError {
    /// No recognizer fired.
    #[error("no date recognized in '{name}'")]
    Unrecognized { name: String },

    /// A recognizer fired but the triple is not a real date.
    #[error("'{name}': {date} ({pattern}) is not a valid date: {source}")]
    InvalidDate {
        name: String,
        date: String,
        pattern: &'static str,
        #[source]
        source: ParseError,
    },
}

/// Errors raised while scanning a directory or renaming one file.
#[derive(Debug, Error)]
pub enum RenameError {
    // === Directory Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === File Errors ===
    /// File name cannot be handled as text.
    #[error("file name is not valid UTF-8: {path}")]
    NonUtf8Name { path: PathBuf },

    /// The canonical name is taken, on disk or by an earlier file of this run.
    #[error("target already exists: {path}")]
    TargetExists { path: PathBuf },

    /// The rename itself failed.
    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Name(#[from] NameError),
}

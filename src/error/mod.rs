//! # Error Module
//!
//! Error types for the duplicate image remover.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Fail fast** - load and delete failures abort the whole run; the
//!   binary maps every error to a non-zero exit

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ImageRemoverError {
    #[error("Loading error: {0}")]
    Load(#[from] LoadError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Deletion error: {0}")]
    Delete(#[from] DeleteError),
}

/// Errors that occur while building the image matrix
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Errors that occur while writing the duplicates report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create report file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors that occur while deleting flagged duplicates
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("Cannot delete file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ImageRemoverError>;

/*!
 * Error types for the cutup application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a chapter title into a citation
#[derive(Error, Debug)]
pub enum CitationError {
    /// The matched digit run contains a character with no decimal value
    #[error("Invalid number '{digits}' in citation '{title}'")]
    InvalidNumber {
        /// Title the digits were taken from
        title: String,
        /// Offending digit run
        digits: String,
    },
}

/// Errors raised when a video filename does not follow the publication naming convention
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VideoNameError {
    /// The name has no field at the requested position
    #[error("Filename '{name}' has no {field} field")]
    MissingField {
        /// Field that was requested
        field: &'static str,
        /// Filename stem that was inspected
        name: String,
    },

    /// The book number field is not numeric
    #[error("Filename '{name}' has an invalid book number '{value}'")]
    InvalidBookNumber {
        /// Filename stem that was inspected
        name: String,
        /// Raw field value
        value: String,
    },

    /// The path has no usable file name
    #[error("Path {0:?} has no file name")]
    NoFileName(PathBuf),
}

/// Errors that can occur when working with book catalogs
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Reading or writing the catalog file failed
    #[error("Catalog file error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON
    #[error("Failed to parse catalog {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A catalog entry is malformed
    #[error("Invalid catalog entry '{book_number}': {reason}")]
    InvalidEntry {
        book_number: String,
        reason: String,
    },

    /// No display name is known for a book number
    #[error("Book number '{0}' is not in the catalog")]
    UnknownBook(String),

    /// The catalog source rejected the language code
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// The catalog source failed for another reason
    #[error("Catalog source failed: {0}")]
    Source(String),
}

/// Errors that can occur when invoking the probing tool
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The input file does not exist
    #[error("Video file not found: {0:?}")]
    NotFound(PathBuf),

    /// The tool could not be started
    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool did not finish in time
    #[error("{tool} timed out after {secs} seconds")]
    Timeout { tool: String, secs: u64 },

    /// The tool exited with a failure status
    #[error("{tool} failed on {path:?}: {stderr}")]
    Failed {
        tool: String,
        path: PathBuf,
        stderr: String,
    },

    /// The tool printed something we could not interpret
    #[error("Failed to parse probe output: {0}")]
    Parse(String),
}

/// Errors that can occur while adding or removing numeration prefixes
#[derive(Error, Debug)]
pub enum NumerationError {
    /// The target is not a directory
    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// Renaming would replace an existing entry
    #[error("Cannot rename {from:?}: {to:?} already exists")]
    TargetExists { from: PathBuf, to: PathBuf },

    /// The rename failed for a reason other than a missing source
    #[error("Failed to rename {from:?} to {to:?}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Main application error type that wraps all other errors.
///
/// The controller and the binary report through `anyhow`; this type is for
/// library consumers that want to match on the failing stage.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from citation parsing
    #[error("Citation error: {0}")]
    Citation(#[from] CitationError),

    /// Error from filename parsing
    #[error("Video name error: {0}")]
    VideoName(#[from] VideoNameError),

    /// Error from the book catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error from the probing tool
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Error from the numeration toggler
    #[error("Numeration error: {0}")]
    Numeration(#[from] NumerationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

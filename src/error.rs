//! Error types for the bayesfilter library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`BayesFilterError`] enum.
//!
//! # Examples
//!
//! ```
//! use bayesfilter::error::{BayesFilterError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BayesFilterError::empty_model("nothing has been learned yet"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::Path;

use thiserror::Error;

/// The main error type for bayesfilter operations.
///
/// The first four variants are the classifier's own failure modes. The
/// rest cover the surrounding analysis, configuration and storage layers.
#[derive(Error, Debug)]
pub enum BayesFilterError {
    /// I/O errors (opening corpora, reading or writing the artifact).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A training label outside the configured class set.
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// Scoring attempted before anything was learned.
    #[error("Empty model: {0}")]
    EmptyModel(String),

    /// The persisted artifact failed validation.
    #[error("Corrupt artifact: {0}")]
    CorruptArtifact(String),

    /// Analysis-related errors (normalization, tokenization).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with BayesFilterError.
pub type Result<T> = std::result::Result<T, BayesFilterError>;

impl BayesFilterError {
    /// Create a new unknown class error.
    pub fn unknown_class<S: Into<String>>(class: S) -> Self {
        BayesFilterError::UnknownClass(class.into())
    }

    /// Create a new empty model error.
    pub fn empty_model<S: Into<String>>(msg: S) -> Self {
        BayesFilterError::EmptyModel(msg.into())
    }

    /// Create a new corrupt artifact error.
    pub fn corrupt_artifact<S: Into<String>>(msg: S) -> Self {
        BayesFilterError::CorruptArtifact(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        BayesFilterError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        BayesFilterError::InvalidConfig(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        BayesFilterError::Storage(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BayesFilterError::Other(msg.into())
    }

    /// Wrap an I/O error with the path it happened on.
    ///
    /// The error kind is preserved so callers can still match on it.
    pub fn io_at<P: AsRef<Path>>(path: P, err: io::Error) -> Self {
        BayesFilterError::Io(io::Error::new(
            err.kind(),
            format!("{}: {err}", path.as_ref().display()),
        ))
    }

    /// Whether this error came from the I/O layer.
    pub fn is_io(&self) -> bool {
        matches!(self, BayesFilterError::Io(_))
    }
}

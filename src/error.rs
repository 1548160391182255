//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the CLI
//! and `main` use `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`DatasetError`], [`ConfigError`], [`LookupError`])
//!   for detailed handling
//! - Lookup errors are normally absorbed by the enrichment service; they only
//!   surface here from setup steps such as building an HTTP client
//!
//! # Example
//!
//! ```ignore
//! use skiptrace::error::{Result, ResultExt};
//!
//! fn load(path: &Path) -> Result<LeadDataset> {
//!     dataset::read_leads(path).with_context("loading lead list")
//! }
//! ```

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::enrichment::LookupError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Lead list read/write error
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Lookup source error
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed fixture or other structured input
    #[error("Invalid format in {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an invalid format error.
    pub fn invalid_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, DatasetError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Dataset(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, LookupError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Lookup(e).context(ctx))
    }
}

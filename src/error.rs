//! Error types for content resolution.
//!
//! Most of these never reach a caller of [`crate::ContentLoader`]: the loader
//! builds them to describe each step of its fallback chain and logs them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching, parsing or configuring content.
#[derive(Error, Debug)]
pub enum ContentError {
    /// A section document or lookup table could not be fetched.
    #[error("source unavailable at {path}: {reason}")]
    SourceUnavailable {
        /// Path that was requested.
        path: String,
        /// Status or transport failure description.
        reason: String,
    },

    /// A section document was fetched but produced no records.
    #[error("no records parsed from {path}")]
    EmptyParse {
        /// Path of the document.
        path: String,
    },

    /// No candidate resolved for an asset.
    #[error("no asset found for {base_path}")]
    AssetNotFound {
        /// Base path that was probed.
        base_path: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("failed to load configuration {}: {reason}", path.display())]
    Config {
        /// File that caused the error.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// Transport level failure reported by an HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ContentError {
    /// Create a source unavailable error.
    pub fn unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias using [`ContentError`].
pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_source_unavailable() {
        let err = ContentError::unavailable("/acme/programs.md", "404 Not Found");
        assert_eq!(
            err.to_string(),
            "source unavailable at /acme/programs.md: 404 Not Found"
        );
    }

    #[test]
    fn formats_config_errors_with_the_path() {
        let err = ContentError::Config {
            path: PathBuf::from("conf/college_content.config.json"),
            reason: "expected value".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load configuration conf/college_content.config.json: expected value"
        );
    }
}

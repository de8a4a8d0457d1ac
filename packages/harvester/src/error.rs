//! Error types for the harvester.
//!
//! `MalformedFragment` and `MissingSection` are raised while parsing a single
//! posting and never escape the segmenter: they are turned into a
//! [`PostingFailure`](crate::harvester::PostingFailure) and logged. The
//! remaining variants belong to the input/output layers.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid CVR number format.
    #[error("Invalid company id: '{0}'. Expected an 8-digit CVR number (e.g., 12345678)")]
    InvalidCompanyId(String),

    /// Invalid posting date.
    #[error("Invalid posting date: '{0}'. Expected DD.MM.YYYY (e.g., 01.02.2016)")]
    InvalidDate(String),

    /// A field extractor could not find an expected delimiter.
    #[error("Malformed fragment in {stage}: {reason}")]
    MalformedFragment { stage: &'static str, reason: String },

    /// A labelled field is absent from the posting.
    #[error("Missing section '{section}' in posting")]
    MissingSection { section: String },

    /// Failed to read an input file.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl HarvesterError {
    /// Shorthand for a [`HarvesterError::MalformedFragment`].
    pub(crate) fn malformed(stage: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedFragment {
            stage,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`HarvesterError::MissingSection`].
    pub(crate) fn missing(section: impl Into<String>) -> Self {
        Self::MissingSection {
            section: section.into(),
        }
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

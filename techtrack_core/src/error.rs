//! Error types for the report pipeline.
//!
//! Every failure is fatal for the whole run: there is no retry, no
//! skip-and-continue, and no partial report.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, building, or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input file could not be opened.
    #[error("input load failed: cannot open {path}: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid JSON.
    #[error("input load failed: {path} is not valid JSON: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A timestep entry does not have the expected structure
    /// (wrong feature count, missing coordinates, missing timestamp).
    #[error("row construction failed at timestep {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// The report does not cover the roster the fixed output schema needs.
    #[error("output write failed: {reason}")]
    UnexpectedRoster { reason: String },

    /// The report file could not be written.
    #[error("output write failed: cannot write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Creates a malformed-record error for the given timestep index.
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }
}

//! Error types for the on-call pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building an on-call report.
///
/// None of these are recovered inside the library; every variant aborts the
/// run and is reported once by the binary.
#[derive(Error, Debug)]
pub enum CrewError {
    /// A required setting is missing, empty, or unparseable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream API answered with a failure.
    #[error("{service} returned {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Response body did not match the expected envelope.
    #[error("Failed to decode {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Timeframe selector is not one of the supported values.
    #[error("CREW_TIMEFRAME must be one of: (Current|Next), got {0:?}")]
    InvalidTimeframe(String),

    /// Input could not be read or output could not be written.
    #[error("File error at {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file was readable but its contents are not usable.
    #[error("Malformed input file {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },
}

impl CrewError {
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CrewError>;

//! Timestamp input file.
//!
//! The CI time resource drops a JSON document shaped like
//! `{"version": {"time": "2024-01-05T09:00:00Z"}}`; only `version.time` is read.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{CrewError, Result};

/// Default input file name, relative to the working directory.
pub const DEFAULT_INPUT_FILE: &str = "input";

#[derive(Debug, Deserialize)]
struct TimeResourceOutput {
    version: TimeResourceVersion,
}

#[derive(Debug, Deserialize)]
struct TimeResourceVersion {
    time: String,
}

/// Read the "current instant" from the time resource file, normalized to UTC.
pub fn read_time(path: &Path) -> Result<DateTime<Utc>> {
    let content = std::fs::read_to_string(path).map_err(|e| CrewError::file_io(path, e))?;
    parse_time(&content).map_err(|reason| CrewError::MalformedInput {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_time(content: &str) -> std::result::Result<DateTime<Utc>, String> {
    let output: TimeResourceOutput = serde_json::from_str(content).map_err(|e| e.to_string())?;
    DateTime::parse_from_rfc3339(&output.version.time)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("version.time {:?}: {e}", output.version.time))
}

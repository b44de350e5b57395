//! Report assembly and output files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{CrewError, Result};
use crate::render::ReportBody;

/// Pipeline-internal report file name.
pub const INTERNAL_REPORT_FILE: &str = "private.txt";

/// Audience-facing report file name.
pub const AUDIENCE_REPORT_FILE: &str = "wings.txt";

/// Default issue tracker linked from the audience report.
pub const DEFAULT_ISSUES_URL: &str = "https://github.com/pivotal-cf/concourse-wings/issues";

const AUDIENCE_GREETING: &str = "Good morning, your pilots (interrupt pair) for today are:";

/// One labelled roster in the internal report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Audience label, e.g. `Current` or `Next external`.
    pub label: String,
    pub body: ReportBody,
}

impl Section {
    #[must_use]
    pub fn new(label: impl Into<String>, body: ReportBody) -> Self {
        Self {
            label: label.into(),
            body,
        }
    }

    /// `"<label> on-call users for <date>:\n<body>"`
    #[must_use]
    pub fn render(&self, date: &str) -> String {
        format!("{} on-call users for {date}:\n{}", self.label, self.body)
    }
}

/// Concatenate every section, in order, into the internal report.
#[must_use]
pub fn internal_report(sections: &[Section], date: &str) -> String {
    sections.iter().map(|s| s.render(date)).collect()
}

/// Greeting, roster lines, then a pointer to the issue tracker. No trailing newline.
#[must_use]
pub fn audience_report(body: &ReportBody, issues_url: &str) -> String {
    format!("{AUDIENCE_GREETING}\n{body}Reminder, you can also submit issues to {issues_url}")
}

/// Final documents for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reports {
    pub internal: String,
    pub audience: String,
}

impl Reports {
    /// Replace both report files inside `dir`, returning the written paths.
    ///
    /// Either both files are replaced or neither is: each document is staged
    /// in a hidden sibling file and renamed into place only after every
    /// stage succeeded. A failed rename restores the files already replaced.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let outputs = [
            (INTERNAL_REPORT_FILE, &self.internal),
            (AUDIENCE_REPORT_FILE, &self.audience),
        ];

        let mut staged = Vec::with_capacity(outputs.len());
        for (file, contents) in outputs {
            let target = dir.join(file);
            let previous = match read_previous(&target) {
                Ok(previous) => previous,
                Err(e) => {
                    discard(&staged);
                    return Err(e);
                }
            };

            let temp = dir.join(format!(".{file}.tmp"));
            if let Err(e) = std::fs::write(&temp, contents) {
                let _ = std::fs::remove_file(&temp);
                discard(&staged);
                return Err(CrewError::file_io(&temp, e));
            }

            staged.push(Staged {
                temp,
                target,
                previous,
                bytes: contents.len(),
            });
        }

        for (i, stage) in staged.iter().enumerate() {
            if let Err(e) = std::fs::rename(&stage.temp, &stage.target) {
                restore(&staged[..i]);
                discard(&staged[i..]);
                return Err(CrewError::file_io(&stage.target, e));
            }
        }

        Ok(staged
            .into_iter()
            .map(|stage| {
                info!(path = %stage.target.display(), bytes = stage.bytes, "Wrote report");
                stage.target
            })
            .collect())
    }
}

/// A report written to its temp path but not yet renamed over the target.
struct Staged {
    temp: PathBuf,
    target: PathBuf,
    /// Target contents before this run, `None` if it did not exist.
    previous: Option<Vec<u8>>,
    bytes: usize,
}

fn read_previous(target: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(target) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CrewError::file_io(target, e)),
    }
}

fn discard(staged: &[Staged]) {
    for stage in staged {
        let _ = std::fs::remove_file(&stage.temp);
    }
}

fn restore(replaced: &[Staged]) {
    for stage in replaced {
        let restored = match &stage.previous {
            Some(bytes) => std::fs::write(&stage.target, bytes),
            None => std::fs::remove_file(&stage.target),
        };
        if let Err(e) = restored {
            warn!(path = %stage.target.display(), error = %e, "Failed to restore report");
        }
    }
}

//! Per-file outcomes and the batch report
//!
//! Every input path produces exactly one [`FileOutcome`]. Failures are values,
//! not control flow: the driver records them and moves on to the next file.

use serde::Serialize;
use std::path::PathBuf;

/// A test specification that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Written {
    pub input: PathBuf,
    pub output: PathBuf,
    pub bytes_written: usize,
}

/// Why a single input could not be turned into a test specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileFailure {
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("{} is not a valid UTF-8 path; refusing to derive its output path", .path.display())]
    InvalidPath { path: PathBuf },

    #[error("{} is not valid UTF-8: {message}", .path.display())]
    Decoding { path: PathBuf, message: String },

    #[error("failed to read {}: {message}", .path.display())]
    ReadFailed { path: PathBuf, message: String },

    #[error("failed to initialize the generation client for {}: {message}", .path.display())]
    ClientInit { path: PathBuf, message: String },

    #[error("generation failed for {}: {message}", .path.display())]
    Generation { path: PathBuf, message: String },

    #[error("failed to write {}: {message}", .output.display())]
    WriteFailed {
        path: PathBuf,
        output: PathBuf,
        message: String,
    },
}

impl FileFailure {
    /// The input path the failure belongs to.
    pub fn path(&self) -> &PathBuf {
        match self {
            FileFailure::FileNotFound { path }
            | FileFailure::InvalidPath { path }
            | FileFailure::Decoding { path, .. }
            | FileFailure::ReadFailed { path, .. }
            | FileFailure::ClientInit { path, .. }
            | FileFailure::Generation { path, .. }
            | FileFailure::WriteFailed { path, .. } => path,
        }
    }

    /// Short label used in summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            FileFailure::FileNotFound { .. } => "file not found",
            FileFailure::InvalidPath { .. } => "invalid path",
            FileFailure::Decoding { .. } => "decoding error",
            FileFailure::ReadFailed { .. } => "read error",
            FileFailure::ClientInit { .. } => "client init error",
            FileFailure::Generation { .. } => "generation error",
            FileFailure::WriteFailed { .. } => "write error",
        }
    }
}

pub type FileOutcome = Result<Written, FileFailure>;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum OutcomeEntry<'a> {
    Written(&'a Written),
    Failed(&'a FileFailure),
}

/// Outcomes of one invocation, in command-line order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }
}

impl Serialize for BatchReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let entries: Vec<OutcomeEntry<'_>> = self
            .outcomes
            .iter()
            .map(|o| match o {
                Ok(written) => OutcomeEntry::Written(written),
                Err(failure) => OutcomeEntry::Failed(failure),
            })
            .collect();

        let mut state = serializer.serialize_struct("BatchReport", 3)?;
        state.serialize_field("succeeded", &self.succeeded())?;
        state.serialize_field("failed", &self.failed())?;
        state.serialize_field("files", &entries)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(name: &str) -> FileOutcome {
        Ok(Written {
            input: PathBuf::from(format!("docs/{name}.md")),
            output: PathBuf::from(format!("tests/{name}.csv")),
            bytes_written: 42,
        })
    }

    #[test]
    fn test_counts() {
        let mut report = BatchReport::new();
        report.record(written("a"));
        report.record(Err(FileFailure::FileNotFound {
            path: PathBuf::from("docs/missing.md"),
        }));
        report.record(written("b"));

        assert_eq!(report.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_failure_message_names_path() {
        let failure = FileFailure::FileNotFound {
            path: PathBuf::from("docs/missing.md"),
        };
        assert_eq!(failure.to_string(), "file not found: docs/missing.md");
        assert_eq!(failure.path(), &PathBuf::from("docs/missing.md"));
    }

    #[test]
    fn test_write_failure_names_output() {
        let failure = FileFailure::WriteFailed {
            path: PathBuf::from("docs/a.md"),
            output: PathBuf::from("tests/a.csv"),
            message: "Permission denied".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "failed to write tests/a.csv: Permission denied"
        );
        assert_eq!(failure.kind(), "write error");
    }

    #[test]
    fn test_report_json() {
        let mut report = BatchReport::new();
        report.record(written("a"));
        report.record(Err(FileFailure::Decoding {
            path: PathBuf::from("docs/bin.md"),
            message: "invalid utf-8 sequence".to_string(),
        }));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["succeeded"], 1);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["files"][0]["status"], "written");
        assert_eq!(json["files"][0]["bytes_written"], 42);
        assert_eq!(json["files"][1]["status"], "failed");
        assert_eq!(json["files"][1]["kind"], "decoding");
        assert_eq!(json["files"][1]["path"], "docs/bin.md");
    }
}

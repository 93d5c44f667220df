//! Run report, saved as JSON.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::merger::MergeStats;
use crate::Result;

/// Final state of one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Written,
    Skipped,
    Failed,
}

/// Report entry for one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub rules: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<MergeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FileReport {
    pub fn written(input: &Path, output: PathBuf, rules: usize, stats: MergeStats) -> Self {
        Self {
            input: input.to_path_buf(),
            status: FileStatus::Written,
            output: Some(output),
            rules,
            stats: Some(stats),
            reason: None,
        }
    }

    pub fn skipped(input: &Path, reason: impl Into<String>) -> Self {
        Self::without_output(input, FileStatus::Skipped, reason.into())
    }

    pub fn failed(input: &Path, reason: impl Into<String>) -> Self {
        Self::without_output(input, FileStatus::Failed, reason.into())
    }

    fn without_output(input: &Path, status: FileStatus, reason: String) -> Self {
        Self {
            input: input.to_path_buf(),
            status,
            output: None,
            rules: 0,
            stats: None,
            reason: Some(reason),
        }
    }
}

/// Summary of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// Append an entry.
    pub fn push(&mut self, entry: FileReport) {
        self.files.push(entry);
    }

    /// Number of files with the given status.
    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Total rules written across all files.
    pub fn total_rules(&self) -> usize {
        self.files.iter().map(|f| f.rules).sum()
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

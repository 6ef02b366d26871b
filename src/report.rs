//! Per-file outcomes and the counters accumulated over a run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::CalendarDate;
use crate::prelude::*;

/// Why a file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The name already starts with `yyyy-mm-dd `.
    #[display(fmt = "already prefixed")]
    AlreadyCanonical,
    /// The canonical name is identical to the current one.
    #[display(fmt = "name unchanged")]
    Unchanged,
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Renamed {
        from: String,
        to: String,
        date: CalendarDate,
        pattern: &'static str,
    },
    /// Dry run: the rename that `--execute` would perform.
    WouldRename {
        from: String,
        to: String,
        date: CalendarDate,
        pattern: &'static str,
    },
    Skipped {
        name: String,
        reason: SkipReason,
    },
    Failed {
        name: String,
        error: String,
    },
}

/// Renamed / skipped / errored tallies. Planned renames of a dry run count
/// as renamed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub renamed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl Counts {
    pub const fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Renamed { .. } | FileOutcome::WouldRename { .. } => self.renamed += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { .. } => self.errors += 1,
        }
    }

    pub const fn merge(&mut self, other: Self) {
        self.renamed += other.renamed;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }

    pub const fn total(&self) -> usize {
        self.renamed + self.skipped + self.errors
    }
}

/// Everything that happened in one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryReport {
    pub path: PathBuf,
    pub outcomes: Vec<FileOutcome>,
    pub counts: Counts,
    /// Set when the directory itself could not be scanned
    pub error: Option<String>,
}

impl DirectoryReport {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            outcomes: Vec::new(),
            counts: Counts::default(),
            error: None,
        }
    }

    /// A directory that could not be scanned counts as one error.
    pub fn failed(path: &Path, error: impl ToString) -> Self {
        Self {
            counts: Counts {
                errors: 1,
                ..Counts::default()
            },
            error: Some(error.to_string()),
            ..Self::new(path)
        }
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.counts.record(&outcome);
        self.outcomes.push(outcome);
    }
}

/// The result of one run over all requested directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub directories: Vec<DirectoryReport>,
    pub totals: Counts,
}

impl RunReport {
    pub const fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            directories: Vec::new(),
            totals: Counts {
                renamed: 0,
                skipped: 0,
                errors: 0,
            },
        }
    }

    pub fn push(&mut self, directory: DirectoryReport) {
        self.totals.merge(directory.counts);
        self.directories.push(directory);
    }

    pub const fn has_errors(&self) -> bool {
        self.totals.errors > 0
    }
}

//! The session report: one entry per processed file, in processing order.
//!
//! The report is an owned, append-only accumulator created by the batch
//! driver and returned to the caller — there is no ambient session state.
//! Its single writer is the dispatcher, which appends exactly one entry per
//! file offered to it, even for inaccessible or unsupported inputs, so the
//! entry count always equals the submission count.

use crate::classify::FileCategory;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sentinel recorded in [`ReportEntry::output`] when no output was produced.
pub const NO_OUTPUT: &str = "none";

/// Final status of one file's conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Success,
    Failed,
}

/// One processed file's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Source filename (no directory).
    pub source: String,
    /// Category the file classified into.
    pub category: FileCategory,
    /// Produced output filename, or [`NO_OUTPUT`].
    pub output: String,
    pub status: EntryStatus,
    /// Human-readable outcome. Degraded successes (placeholder output,
    /// skipped metadata copy) disclose themselves here while keeping
    /// `status == Success`.
    pub message: String,
}

/// Accumulated results of one batch run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionReport {
    entries: Vec<ReportEntry>,
}

impl SessionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry. Called exactly once per processed file.
    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// All entries, in processing order.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful conversions (including degraded successes).
    pub fn succeeded(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Success)
            .count()
    }

    /// Number of failed conversions.
    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Failed)
            .count()
    }

    /// Output paths of successful conversions, joined onto `output_dir`,
    /// in processing order. This is the combiner's input list.
    pub fn successful_outputs(&self, output_dir: &std::path::Path) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Success && e.output != NO_OUTPUT)
            .map(|e| output_dir.join(&e.output))
            .collect()
    }
}

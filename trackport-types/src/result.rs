//! Per-record and per-batch import outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of processing a single record.
///
/// Every record in a batch yields exactly one status; the aggregate counters
/// in [`ImportResult`] partition the batch along these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    /// Stored under its original name with no collision.
    Imported,
    /// Name collision under the Skip policy; nothing written.
    Skipped,
    /// Name collision under the Rename policy; stored under a fresh name.
    Renamed,
    /// Name collision under the Overwrite policy; existing value replaced.
    Overwritten,
    /// The record could not be stored.
    Error,
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Imported => "imported",
            Self::Skipped => "skipped",
            Self::Renamed => "renamed",
            Self::Overwritten => "overwritten",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// A record that could not be imported, with enough context to retry it
/// by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedTrack {
    /// Display name the record was going to be stored under.
    pub name: String,
    /// The original payload or share code.
    pub data: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Aggregate result of one import batch.
///
/// Built incrementally by the engine and returned to the caller. The
/// counters partition the processed records: `imported + skipped + renamed +
/// overwritten + errored()` equals the number of records processed, and
/// `total` always equals the input batch length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    /// False only when the call failed before processing started.
    pub success: bool,
    /// Records stored under their original name with no collision.
    pub imported: usize,
    /// Records skipped because of a name collision.
    pub skipped: usize,
    /// Records stored under a generated name.
    pub renamed: usize,
    /// Records that replaced an existing value.
    pub overwritten: usize,
    /// Input batch length.
    pub total: usize,
    /// Per-record error messages.
    pub errors: Vec<String>,
    /// Non-fatal notes (e.g. share codes stored without native conversion).
    pub warnings: Vec<String>,
    /// Records that could not be stored.
    pub failed_tracks: Vec<FailedTrack>,
}

impl ImportResult {
    /// Creates an empty result for a batch of `total` records.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            success: true,
            total,
            ..Self::default()
        }
    }

    /// Number of records that failed.
    #[must_use]
    pub fn errored(&self) -> usize {
        self.failed_tracks.len()
    }

    /// Number of records that have been processed so far.
    ///
    /// Equals `total` for a completed batch; smaller when the batch was
    /// cancelled between records.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.imported + self.skipped + self.renamed + self.overwritten + self.errored()
    }
}

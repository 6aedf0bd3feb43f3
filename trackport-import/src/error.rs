//! Per-record failure reasons.
//!
//! These never abort a batch: the engine converts each into an error entry
//! and a failed-track record, then moves on.

use thiserror::Error;

/// Why a single record could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Neither a native payload nor a share code could be resolved.
    #[error("no valid data for track \"{0}\"")]
    UnresolvedPayload(String),

    /// The rename collision search exceeded the attempt cap.
    #[error("could not generate unique name for \"{0}\"")]
    NameExhaustion(String),
}

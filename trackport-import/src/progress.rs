//! Per-record progress reporting boundary.

use trackport_types::ImportStatus;
use tracing::{info, warn};

/// Receives one notification per processed record.
///
/// Delivery is fire-and-forget: implementations must not panic, and the
/// engine never depends on a sink's outcome.
pub trait ProgressSink {
    /// Called after each record, success or failure.
    fn on_progress(&self, current: usize, total: usize, name: &str, status: ImportStatus);
}

/// A sink that discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_progress(&self, _current: usize, _total: usize, _name: &str, _status: ImportStatus) {}
}

/// A sink that logs each record through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn on_progress(&self, current: usize, total: usize, name: &str, status: ImportStatus) {
        match status {
            ImportStatus::Error => warn!("[{current}/{total}] failed: {name}"),
            _ => info!("[{current}/{total}] {status}: {name}"),
        }
    }
}

//! Batch import engine and text formats for trackport.
//!
//! Ties the other crates together: parses line-oriented track manifests
//! into [`TrackRecord`]s, merges them into a [`TrackStore`] under a
//! [`CollisionPolicy`] (consulting the detected storage schema), and
//! renders the export manifest and failed-tracks report.
//!
//! All operations are synchronous pure functions over in-memory data; the
//! batch loop is sequential and order-preserving, so later records observe
//! the writes of earlier ones.
//!
//! [`TrackRecord`]: trackport_types::TrackRecord
//! [`CollisionPolicy`]: trackport_types::CollisionPolicy
//! [`TrackStore`]: trackport_store::TrackStore

mod engine;
mod error;
mod export;
mod manifest;
mod progress;
mod report;

pub use engine::{ImportEngine, RENAME_ATTEMPT_CAP};
pub use error::RecordError;
pub use export::{delete_all, export_all, render_manifest, ExportedTrack};
pub use manifest::{parse_manifest, ParsedManifest, MIN_PAYLOAD_LEN};
pub use progress::{LogSink, NullSink, ProgressSink};
pub use report::render_failed_report;

//! Core type definitions for trackport.
//!
//! This crate defines the plain data types shared by the codec, store and
//! import crates:
//! - `TrackRecord`: one parsed track, ready for import
//! - `CollisionPolicy`: what to do when a track name already exists
//! - `ImportStatus`, `FailedTrack`, `ImportResult`: per-record and per-batch
//!   outcomes
//!
//! Everything here is serializable and comparable; no behavior beyond small
//! accessors lives in this crate.

mod policy;
mod record;
mod result;

pub use policy::CollisionPolicy;
pub use record::TrackRecord;
pub use result::{FailedTrack, ImportResult, ImportStatus};

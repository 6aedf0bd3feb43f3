//! Track store abstraction for trackport.
//!
//! The game persists tracks in a flat keyed namespace (one string value per
//! key, keys sharing a per-version prefix). This crate defines the
//! [`TrackStore`] trait at that boundary, two implementations (in-memory and
//! JSON-file-backed), and the schema detector that infers the active
//! key-naming and payload-envelope convention from whatever entries already
//! exist.
//!
//! Stores are injected explicitly wherever they are read or written; nothing
//! in the workspace touches a global store.

mod error;
mod file;
mod memory;
mod schema;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use schema::{
    detect_schema, NameCodec, PayloadMode, StorageSchemaConfig, DEFAULT_SCHEMA_VERSION,
};

/// A flat keyed store of string values.
///
/// Mirrors the localStorage-shaped surface the game uses: presence check,
/// get/set/remove, and ordered key iteration. Implementations preserve
/// insertion order in [`keys`](TrackStore::keys); schema detection
/// tie-breaking depends on that order being stable.
pub trait TrackStore {
    /// Returns true when `key` has a value.
    fn has(&self, key: &str) -> bool;

    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any existing value.
    fn set(&mut self, key: &str, value: &str);

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str);

    /// All keys, in insertion order.
    fn keys(&self) -> Vec<String>;
}

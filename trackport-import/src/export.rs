//! Store-wide export and deletion, scoped to the detected prefix.

use trackport_store::{StorageSchemaConfig, TrackStore};
use tracing::info;

/// One exported track: display name plus the unwrapped payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTrack {
    /// Display name decoded from the key suffix.
    pub name: String,
    /// Payload with any JSON envelope removed.
    pub data: String,
}

/// Collects every track under the schema's prefix, in store order.
#[must_use]
pub fn export_all(store: &dyn TrackStore, schema: &StorageSchemaConfig) -> Vec<ExportedTrack> {
    let mut tracks = Vec::new();
    for key in store.keys() {
        let Some(name) = schema.name_for(&key) else {
            continue;
        };
        let Some(stored) = store.get(&key) else {
            continue;
        };
        tracks.push(ExportedTrack {
            name,
            data: schema.payload_of(&stored),
        });
    }
    tracks
}

/// Removes every entry under the schema's prefix, returning the count.
pub fn delete_all(store: &mut dyn TrackStore, schema: &StorageSchemaConfig) -> usize {
    let doomed: Vec<String> = store
        .keys()
        .into_iter()
        .filter(|key| key.starts_with(&schema.key_prefix))
        .collect();
    for key in &doomed {
        store.remove(key);
    }
    info!("deleted {} track(s) under {:?}", doomed.len(), schema.key_prefix);
    doomed.len()
}

/// Renders tracks as a manifest document that round-trips through
/// [`parse_manifest`](crate::parse_manifest).
#[must_use]
pub fn render_manifest(tracks: &[ExportedTrack]) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut out = String::new();
    out.push_str(&format!("# PolyTrack track export - {timestamp}\n"));
    out.push_str(&format!("# {} track(s)\n\n", tracks.len()));
    for track in tracks {
        out.push_str(&format!("{} | {}\n", track.name, track.data));
    }
    out
}

//! Storage schema detection.
//!
//! The game has changed its key-naming and payload-envelope convention
//! across releases: the version number in the key prefix moves, names are
//! sometimes percent-encoded into the key, and payloads are stored either
//! as bare strings or wrapped in a JSON envelope with a `data` field. The
//! detector infers the active convention from whatever entries already
//! exist, so imports land where the current game build will find them.
//!
//! Detection runs once per session; the resulting [`StorageSchemaConfig`]
//! is an immutable plain value.

use crate::TrackStore;
use serde_json::Value;
use tracing::debug;

/// Version used when the store holds no versioned keys at all.
pub const DEFAULT_SCHEMA_VERSION: u32 = 4;

const KEY_STEM: &str = "polytrack_v";
const TRACK_SEGMENT: &str = "_track_";

/// How display names are mapped into key suffixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NameCodec {
    /// Names appear in keys verbatim.
    #[default]
    Identity,
    /// Names are percent-encoded into keys.
    PercentEncoding,
}

impl NameCodec {
    /// Encodes a display name into its key-suffix form.
    #[must_use]
    pub fn encode(&self, name: &str) -> String {
        match self {
            Self::Identity => name.to_string(),
            Self::PercentEncoding => urlencoding::encode(name).into_owned(),
        }
    }

    /// Decodes a key suffix back into a display name.
    ///
    /// Percent sequences that do not form valid UTF-8 are left as-is, so
    /// decoding never fails.
    #[must_use]
    pub fn decode(&self, suffix: &str) -> String {
        match self {
            Self::Identity => suffix.to_string(),
            Self::PercentEncoding => urlencoding::decode(suffix)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| suffix.to_string()),
        }
    }
}

/// How payload values are wrapped in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PayloadMode {
    /// Values are bare payload strings.
    #[default]
    Raw,
    /// Values are JSON envelopes carrying the payload in a `data` field.
    Json,
}

/// The detected key-naming and payload-envelope convention.
///
/// `payload_template`, when present, is a representative previously-observed
/// envelope; its non-`data` fields are preserved on every write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSchemaConfig {
    /// Key prefix all track entries share.
    pub key_prefix: String,
    /// How names map to key suffixes.
    pub name_codec: NameCodec,
    /// How payload values are wrapped.
    pub payload_mode: PayloadMode,
    /// Observed envelope whose non-`data` fields are kept on writes.
    pub payload_template: Option<serde_json::Map<String, Value>>,
}

impl StorageSchemaConfig {
    /// The fallback convention for an empty store.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            key_prefix: prefix_for_version(DEFAULT_SCHEMA_VERSION),
            ..Self::default()
        }
    }

    /// The full store key for a display name.
    #[must_use]
    pub fn key_for(&self, name: &str) -> String {
        format!("{}{}", self.key_prefix, self.name_codec.encode(name))
    }

    /// The display name for a full store key, or `None` when the key is not
    /// under this schema's prefix.
    #[must_use]
    pub fn name_for(&self, key: &str) -> Option<String> {
        key.strip_prefix(&self.key_prefix)
            .map(|suffix| self.name_codec.decode(suffix))
    }

    /// Wraps a payload for storage under this schema.
    ///
    /// Raw mode stores the payload string directly. Json mode shallow-clones
    /// the observed template (or an empty object), sets its `data` field to
    /// the payload and its `saveTime` field to `now_ms`.
    #[must_use]
    pub fn envelope_for(&self, payload: &str, now_ms: i64) -> String {
        match self.payload_mode {
            PayloadMode::Raw => payload.to_string(),
            PayloadMode::Json => {
                let mut envelope = self.payload_template.clone().unwrap_or_default();
                envelope.insert("data".to_string(), Value::String(payload.to_string()));
                envelope.insert("saveTime".to_string(), Value::from(now_ms));
                Value::Object(envelope).to_string()
            }
        }
    }

    /// Unwraps a stored value back to its payload string.
    ///
    /// JSON envelopes yield their `data` field; anything else is returned
    /// verbatim.
    #[must_use]
    pub fn payload_of(&self, stored: &str) -> String {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(stored) {
            if let Some(Value::String(data)) = map.get("data") {
                return data.clone();
            }
        }
        stored.to_string()
    }
}

/// Infers the active storage convention from the store's existing entries.
///
/// Scans all keys once: the most frequent versioned track prefix wins (ties
/// broken by first encounter in iteration order). With no track-prefixed
/// keys, a prefix is synthesized from the highest observed version number;
/// with no versioned keys at all, the hard-coded default version is used.
/// The first entry under the winning prefix decides the name codec and the
/// payload envelope mode.
#[must_use]
pub fn detect_schema(store: &dyn TrackStore) -> StorageSchemaConfig {
    let keys = store.keys();

    let Some(prefix) = winning_prefix(&keys) else {
        debug!("no versioned keys found, using fallback schema");
        return StorageSchemaConfig::fallback();
    };

    let first_key = keys.iter().find(|k| k.starts_with(&prefix));
    let (name_codec, payload_mode, payload_template) = match first_key {
        Some(key) => {
            let suffix = &key[prefix.len()..];
            let name_codec = match urlencoding::decode(suffix) {
                Ok(decoded) if decoded != *suffix => NameCodec::PercentEncoding,
                _ => NameCodec::Identity,
            };
            match store.get(key).map(|v| serde_json::from_str::<Value>(&v)) {
                Some(Ok(Value::Object(map))) if map.contains_key("data") => {
                    (name_codec, PayloadMode::Json, Some(map))
                }
                _ => (name_codec, PayloadMode::Raw, None),
            }
        }
        // Synthesized prefix with no matching entries yet.
        None => (NameCodec::Identity, PayloadMode::Raw, None),
    };

    debug!(
        "detected schema: prefix={prefix:?} name_codec={name_codec:?} payload_mode={payload_mode:?}"
    );

    StorageSchemaConfig {
        key_prefix: prefix,
        name_codec,
        payload_mode,
        payload_template,
    }
}

fn prefix_for_version(version: u32) -> String {
    format!("{KEY_STEM}{version}_prod{TRACK_SEGMENT}")
}

/// The winning track prefix, or a synthesized one from the highest observed
/// version, or `None` when no versioned keys exist.
fn winning_prefix(keys: &[String]) -> Option<String> {
    // First-encounter order matters for tie-breaking, so tally in a vec.
    let mut tallies: Vec<(&str, usize)> = Vec::new();
    let mut max_version: Option<u32> = None;

    for key in keys {
        let Some(version) = key_version(key) else {
            continue;
        };
        max_version = Some(max_version.map_or(version, |v| v.max(version)));

        if let Some(prefix) = track_prefix(key) {
            match tallies.iter_mut().find(|(p, _)| *p == prefix) {
                Some((_, count)) => *count += 1,
                None => tallies.push((prefix, 1)),
            }
        }
    }

    // Strictly-greater comparison so the first-encountered prefix wins ties.
    let mut best: Option<(&str, usize)> = None;
    for &(prefix, count) in &tallies {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((prefix, count));
        }
    }

    if let Some((prefix, _)) = best {
        return Some(prefix.to_string());
    }

    max_version.map(prefix_for_version)
}

/// The version number of a `polytrack_v<N>_…` key.
fn key_version(key: &str) -> Option<u32> {
    let rest = key.strip_prefix(KEY_STEM)?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() || !rest[digits.len()..].starts_with('_') {
        return None;
    }
    digits.parse().ok()
}

/// The track prefix of a versioned track key: everything up to and
/// including the first `_track_` segment.
fn track_prefix(key: &str) -> Option<&str> {
    key_version(key)?;
    let pos = key.find(TRACK_SEGMENT)?;
    Some(&key[..pos + TRACK_SEGMENT.len()])
}

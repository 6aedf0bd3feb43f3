//! The unit of import: one track with a display name and a payload.

use serde::{Deserialize, Serialize};

/// A track record produced by parsing input text and consumed once by the
/// import engine.
///
/// At least one of `data` / `share_code` is present; the constructors
/// maintain this. `data` is a payload already in the store's native format
/// and is treated as an opaque string. `share_code` is the portable textual
/// encoding the payload was delivered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Display name, extracted from the share code or synthesized by the
    /// caller.
    pub name: String,

    /// Native-format payload, stored verbatim when present.
    #[serde(default)]
    pub data: Option<String>,

    /// Original share code, kept unmodified.
    #[serde(default)]
    pub share_code: Option<String>,
}

impl TrackRecord {
    /// Creates a record carrying a native-format payload.
    #[must_use]
    pub fn native(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Some(data.into()),
            share_code: None,
        }
    }

    /// Creates a record carrying a share code whose payload the store
    /// cannot further interpret.
    #[must_use]
    pub fn from_share_code(name: impl Into<String>, share_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
            share_code: Some(share_code.into()),
        }
    }
}

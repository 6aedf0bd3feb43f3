//! Collision handling policy for batch imports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The rule applied when an imported record's name already exists in the
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Leave the existing track untouched and skip the incoming one.
    Skip,
    /// Replace the existing track's payload under the same name.
    Overwrite,
    /// Store the incoming track under a fresh `"name (n)"` variant.
    Rename,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Skip => "skip",
            Self::Overwrite => "overwrite",
            Self::Rename => "rename",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(Self::Skip),
            "overwrite" => Ok(Self::Overwrite),
            "rename" => Ok(Self::Rename),
            other => Err(format!("unknown collision policy: {other}")),
        }
    }
}

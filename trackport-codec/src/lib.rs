//! Share code encoding and parsing for trackport.
//!
//! The game encodes portable "share codes" with a custom variable-width
//! bit-packing scheme over a 62-character alphabet (`A-Z a-z 0-9`). This
//! crate provides:
//! - the low-level alphabet codec (`alphabet`)
//! - versioned share-code parsers that extract the embedded display name
//!   (`share_code`)
//! - a best-effort converter from newer native payload formats back to the
//!   baseline tag (`legacy`)
//!
//! Native payloads (strings with the `PolyTrack` prefix) are never
//! interpreted here; they are opaque to everything but their version tag.

mod alphabet;
mod error;
mod legacy;
mod share_code;

pub use alphabet::{decode, encode, ALPHABET};
pub use error::{CodecError, CodecResult};
pub use legacy::{to_baseline, BASELINE_PAYLOAD_PREFIX, NATIVE_PAYLOAD_PREFIX};
pub use share_code::{decode_v1n, decode_v3, extract_track_name, DecodedShareCode, ShareCodeFormat};

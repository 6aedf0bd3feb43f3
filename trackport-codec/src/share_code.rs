//! Versioned share-code parsing.
//!
//! Share codes embed a display name ahead of the track data:
//! - `v3` codes: 2 alphabet-packed chars carrying the UTF-8 name length,
//!   then `ceil(4L/3)` alphabet-packed chars carrying the name bytes.
//! - `v1n` codes: 2 base64url chars carrying the length of a
//!   percent-encoded name, then the percent-encoded name itself.
//!
//! Name extraction is best-effort: a malformed name never invalidates the
//! code as a payload candidate, so both decoders return `Option` and never
//! panic on malformed input.

use crate::alphabet;
use crate::legacy::NATIVE_PAYLOAD_PREFIX;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tracing::debug;

/// The recognized input formats, determined by literal prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareCodeFormat {
    /// Already in the store's internal format; stored verbatim, opaque.
    NativePayload,
    /// `v3` share code (alphabet-packed name).
    V3,
    /// `v1n` share code (base64url length, percent-encoded name).
    V1n,
    /// Not a known track representation; callers must reject it.
    Unrecognized,
}

impl ShareCodeFormat {
    /// Classifies input text by its literal prefix.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        if text.starts_with(NATIVE_PAYLOAD_PREFIX) {
            Self::NativePayload
        } else if text.starts_with("v3") && !text.starts_with("v2") {
            Self::V3
        } else if text.starts_with("v1n") {
            Self::V1n
        } else {
            Self::Unrecognized
        }
    }
}

/// A share code with its embedded display name extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedShareCode {
    /// The display name embedded in the code.
    pub name: String,
    /// The full original text, unmodified.
    pub share_code: String,
}

/// Decodes a `v3` share code's embedded name.
///
/// The two characters after the `v3` tag alphabet-decode to a single byte,
/// the UTF-8 name length `L`; the next `ceil(4L/3)` characters decode to the
/// name bytes, of which the first `L` are interpreted as UTF-8 (lossily).
/// Returns `None` when the length prefix fails to decode or decodes to zero
/// bytes.
#[must_use]
pub fn decode_v3(text: &str) -> Option<DecodedShareCode> {
    if ShareCodeFormat::classify(text) != ShareCodeFormat::V3 {
        return None;
    }

    let len_chars = slice_chars(text, 2, 4);
    let len_bytes = match alphabet::decode(len_chars) {
        Ok(bytes) if !bytes.is_empty() => bytes,
        _ => {
            debug!("v3 decode: bad name length prefix {:?}", len_chars);
            return None;
        }
    };

    let name_len = len_bytes[0] as usize;
    let encoded_len = (name_len * 4).div_ceil(3);
    let encoded_name = slice_chars(text, 4, 4 + encoded_len);

    let name_bytes = alphabet::decode(encoded_name).ok()?;
    let take = name_len.min(name_bytes.len());
    let name = String::from_utf8_lossy(&name_bytes[..take]).into_owned();

    Some(DecodedShareCode {
        name,
        share_code: text.to_string(),
    })
}

/// Decodes a `v1n` share code's embedded name.
///
/// The characters at offsets 3–4 base64url-decode to a single byte, the
/// length `L` of a percent-encoded name; the characters at offsets 5..5+L
/// percent-decode to the name. Returns `None` on any decode failure,
/// including a `%` not followed by two hex digits.
#[must_use]
pub fn decode_v1n(text: &str) -> Option<DecodedShareCode> {
    if ShareCodeFormat::classify(text) != ShareCodeFormat::V1n {
        return None;
    }

    let len_chars = slice_chars(text, 3, 5);
    let len_bytes = URL_SAFE_NO_PAD.decode(len_chars).ok()?;
    if len_bytes.is_empty() {
        return None;
    }

    let name_len = len_bytes[0] as usize;
    let encoded_name = slice_chars(text, 5, 5 + name_len);
    if !percent_sequences_valid(encoded_name) {
        debug!("v1n decode: malformed percent sequence in {:?}", encoded_name);
        return None;
    }
    let name = urlencoding::decode(encoded_name).ok()?.into_owned();

    Some(DecodedShareCode {
        name,
        share_code: text.to_string(),
    })
}

/// True when every `%` in `text` starts a complete `%XX` hex escape.
/// `urlencoding::decode` passes malformed escapes through verbatim, so
/// this check is what makes them a decode failure.
fn percent_sequences_valid(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Extracts the display name from any recognized share code format, or
/// `None` when there is no embedded name (native payloads) or extraction
/// fails.
#[must_use]
pub fn extract_track_name(text: &str) -> Option<String> {
    match ShareCodeFormat::classify(text) {
        ShareCodeFormat::V3 => decode_v3(text).map(|d| d.name),
        ShareCodeFormat::V1n => decode_v1n(text).map(|d| d.name),
        _ => None,
    }
}

/// Char-index slice with end clamping, so short inputs degrade like a
/// substring rather than panicking.
fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let mut indices = text.char_indices().map(|(i, _)| i);
    let byte_start = match indices.nth(start) {
        Some(i) => i,
        None => return "",
    };
    let byte_end = text
        .char_indices()
        .map(|(i, _)| i)
        .nth(end)
        .unwrap_or(text.len());
    &text[byte_start..byte_end]
}

//! Best-effort downgrade of native payloads to the baseline version tag.

/// Prefix every native payload starts with.
pub const NATIVE_PAYLOAD_PREFIX: &str = "PolyTrack";

/// The baseline native payload prefix older game versions understand.
pub const BASELINE_PAYLOAD_PREFIX: &str = "PolyTrack1";

/// Rewrites a newer native payload's version tag to the baseline tag.
///
/// The version tag is the run of lowercase letters and digits immediately
/// following the `PolyTrack` prefix; the encoded body begins at the first
/// ASCII uppercase letter after the prefix. The tag is replaced with `1`
/// and the body is left untouched.
///
/// This is a heuristic over observed payloads, not a verified grammar.
/// Returns `None` when the payload is already baseline, is not a native
/// payload, or no uppercase body marker follows the prefix.
#[must_use]
pub fn to_baseline(payload: &str) -> Option<String> {
    if !payload.starts_with(NATIVE_PAYLOAD_PREFIX) || payload.starts_with(BASELINE_PAYLOAD_PREFIX) {
        return None;
    }

    let rest = &payload[NATIVE_PAYLOAD_PREFIX.len()..];
    let body_start = rest.find(|c: char| c.is_ascii_uppercase())?;
    if body_start == 0 {
        // Uppercase immediately after the prefix means there is no version
        // tag to rewrite.
        return None;
    }

    Some(format!("{BASELINE_PAYLOAD_PREFIX}{}", &rest[body_start..]))
}

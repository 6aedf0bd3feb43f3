//! Line-oriented track manifest parsing.
//!
//! The input format round-trips with [`render_manifest`]: lines beginning
//! `#` or `//` are comments, blank lines are ignored, and each data line is
//! either `<name> | <payload>` or a bare payload (the name then comes from
//! share-code extraction, or is synthesized). All whitespace is stripped
//! from payloads before classification, matching what the game itself
//! accepts.
//!
//! [`render_manifest`]: crate::render_manifest

use trackport_codec::{extract_track_name, ShareCodeFormat};
use trackport_types::TrackRecord;
use tracing::{debug, warn};

/// Payload candidates shorter than this are never valid track data.
pub const MIN_PAYLOAD_LEN: usize = 10;

/// The outcome of parsing one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    /// Valid records, in input order.
    pub records: Vec<TrackRecord>,
    /// Data lines that could not be recognized as track data.
    pub invalid_lines: usize,
    /// How many records carry a share code rather than a native payload.
    pub share_codes: usize,
}

impl ParsedManifest {
    /// Merges another manifest's results into this one, renumbering nothing
    /// (names were already fixed at parse time).
    pub fn merge(&mut self, other: ParsedManifest) {
        self.records.extend(other.records);
        self.invalid_lines += other.invalid_lines;
        self.share_codes += other.share_codes;
    }
}

/// Parses a manifest document into track records.
///
/// Unrecognized lines are counted, never fatal.
#[must_use]
pub fn parse_manifest(text: &str) -> ParsedManifest {
    let mut parsed = ParsedManifest::default();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        // `name | payload` form first.
        if let Some((name_part, payload_part)) = line.split_once('|') {
            let name = name_part.trim();
            if !name.is_empty() {
                if let Some(record) = record_from_payload(payload_part, Some(name)) {
                    debug!("line {}: {:?} (pipe format)", line_no + 1, name);
                    push_record(&mut parsed, record);
                    continue;
                }
            }
        }

        // Otherwise the whole line must be valid track data.
        match record_from_payload(line, None) {
            Some(mut record) => {
                if record.name.is_empty() {
                    record.name = format!("Imported Track {}", parsed.records.len() + 1);
                    debug!("line {}: using generated name {:?}", line_no + 1, record.name);
                } else {
                    debug!("line {}: {:?} (extracted from share code)", line_no + 1, record.name);
                }
                push_record(&mut parsed, record);
            }
            None => {
                warn!("line {}: not recognized as track data", line_no + 1);
                parsed.invalid_lines += 1;
            }
        }
    }

    parsed
}

fn push_record(parsed: &mut ParsedManifest, record: TrackRecord) {
    if record.share_code.is_some() {
        parsed.share_codes += 1;
    }
    parsed.records.push(record);
}

/// Classifies a payload candidate into a record, or `None` when it is not
/// recognizable track data.
///
/// The record's name is empty when no explicit name was given and none
/// could be extracted from a share code; the caller synthesizes one.
fn record_from_payload(raw: &str, explicit_name: Option<&str>) -> Option<TrackRecord> {
    let clean: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if clean.len() < MIN_PAYLOAD_LEN {
        return None;
    }

    match ShareCodeFormat::classify(&clean) {
        ShareCodeFormat::NativePayload => Some(TrackRecord::native(
            explicit_name.unwrap_or_default(),
            clean,
        )),
        ShareCodeFormat::V3 | ShareCodeFormat::V1n => {
            // Name extraction failure is not payload failure: the code is
            // still a valid candidate.
            let name = match explicit_name {
                Some(name) => name.to_string(),
                None => extract_track_name(&clean).unwrap_or_default(),
            };
            Some(TrackRecord::from_share_code(name, clean))
        }
        ShareCodeFormat::Unrecognized => None,
    }
}

//! Failed-tracks report rendering.

use trackport_types::FailedTrack;

/// Renders the failed-tracks report: one block per failed record, with a
/// heading, the failure reason and the original payload so the track can be
/// retried by hand.
#[must_use]
pub fn render_failed_report(failed: &[FailedTrack]) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut out = String::new();
    out.push_str(&format!("# PolyTrack Failed Tracks Log - {timestamp}\n"));
    out.push_str(&format!("# Total Failed: {}\n", failed.len()));
    out.push_str("# These tracks could not be imported due to decode/encode errors\n\n");

    for (index, track) in failed.iter().enumerate() {
        out.push_str(&format!("## Track {}: {}\n", index + 1, track.name));
        out.push_str(&format!("Reason: {}\n", track.reason));
        out.push_str(&format!("Data: {}\n\n", track.data));
    }

    out
}

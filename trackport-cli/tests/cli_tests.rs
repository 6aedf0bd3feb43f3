use std::fs;
use std::path::PathBuf;

use trackport_cli::{run_delete_all, run_export, run_import, run_inspect};
use trackport_store::{JsonFileStore, TrackStore};
use trackport_types::CollisionPolicy;

fn write_manifest(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

// ── Import ───────────────────────────────────────────────────────

#[test]
fn import_writes_tracks_to_the_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("storage.json");
    let manifest = write_manifest(&dir, "tracks.txt", "Loop | PolyTrack1AAAA\nHill | PolyTrack1BBBB\n");

    run_import(&[manifest], &store_path, CollisionPolicy::Skip, false, None).unwrap();

    let store = JsonFileStore::load(&store_path).unwrap();
    assert_eq!(
        store.get("polytrack_v4_prod_track_Loop").as_deref(),
        Some("PolyTrack1AAAA")
    );
    assert_eq!(
        store.get("polytrack_v4_prod_track_Hill").as_deref(),
        Some("PolyTrack1BBBB")
    );
}

#[test]
fn import_merges_multiple_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("storage.json");
    let first = write_manifest(&dir, "a.txt", "Alpha | PolyTrack1AAAA\n");
    let second = write_manifest(&dir, "b.txt", "Beta | PolyTrack1BBBB\n");

    run_import(
        &[first, second],
        &store_path,
        CollisionPolicy::Skip,
        false,
        None,
    )
    .unwrap();

    let store = JsonFileStore::load(&store_path).unwrap();
    assert_eq!(
        store.keys(),
        vec![
            "polytrack_v4_prod_track_Alpha",
            "polytrack_v4_prod_track_Beta"
        ]
    );
}

#[test]
fn import_with_no_valid_tracks_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("storage.json");
    let manifest = write_manifest(&dir, "junk.txt", "# only comments\nnot track data at all\n");

    let result = run_import(&[manifest], &store_path, CollisionPolicy::Skip, false, None);
    assert!(result.is_err());
    assert!(!store_path.exists());
}

#[test]
fn failed_records_write_a_report_and_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("storage.json");

    // Exhaust every rename candidate so the incoming record can only fail.
    let mut store = JsonFileStore::load(&store_path).unwrap();
    store.set("polytrack_v4_prod_track_Track", "x");
    for n in 1..=1000 {
        store.set(&format!("polytrack_v4_prod_track_Track ({n})"), "x");
    }
    store.save().unwrap();

    let manifest = write_manifest(&dir, "tracks.txt", "Track | PolyTrack1NEW1\n");
    let report_path = dir.path().join("failed.txt");

    let result = run_import(
        &[manifest],
        &store_path,
        CollisionPolicy::Rename,
        false,
        Some(&report_path),
    );

    assert!(result.is_err());
    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("# Total Failed: 1"));
    assert!(report.contains("## Track 1: Track"));
    assert!(report.contains("Data: PolyTrack1NEW1"));
}

// ── Export round-trip ────────────────────────────────────────────

#[test]
fn exported_manifest_reimports_into_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("storage.json");
    let manifest = write_manifest(&dir, "tracks.txt", "Loop | PolyTrack1AAAA\nHill | PolyTrack1BBBB\n");
    run_import(&[manifest], &store_path, CollisionPolicy::Skip, false, None).unwrap();

    let export_path = dir.path().join("backup.txt");
    run_export(&store_path, Some(&export_path)).unwrap();
    let exported = fs::read_to_string(&export_path).unwrap();
    assert!(exported.contains("Loop | PolyTrack1AAAA"));
    assert!(exported.contains("Hill | PolyTrack1BBBB"));

    let second_store = dir.path().join("restored.json");
    run_import(
        &[export_path],
        &second_store,
        CollisionPolicy::Skip,
        false,
        None,
    )
    .unwrap();

    let restored = JsonFileStore::load(&second_store).unwrap();
    assert_eq!(
        restored.get("polytrack_v4_prod_track_Loop").as_deref(),
        Some("PolyTrack1AAAA")
    );
    assert_eq!(restored.len(), 2);
}

#[test]
fn export_of_an_empty_store_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("storage.json");
    assert!(run_export(&store_path, None).is_err());
}

// ── Delete-all gate ──────────────────────────────────────────────

#[test]
fn delete_all_refuses_without_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("storage.json");
    let mut store = JsonFileStore::load(&store_path).unwrap();
    store.set("polytrack_v4_prod_track_Loop", "PolyTrack1AAAA");
    store.save().unwrap();

    let result = run_delete_all(&store_path, false);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("--yes"));

    // Nothing was touched.
    let store = JsonFileStore::load(&store_path).unwrap();
    assert!(store.has("polytrack_v4_prod_track_Loop"));
}

#[test]
fn delete_all_with_confirmation_removes_only_tracks() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("storage.json");
    let mut store = JsonFileStore::load(&store_path).unwrap();
    store.set("polytrack_v4_prod_track_Loop", "PolyTrack1AAAA");
    store.set("polytrack_v4_prod_track_Hill", "PolyTrack1BBBB");
    store.set("unrelated_setting", "kept");
    store.save().unwrap();

    run_delete_all(&store_path, true).unwrap();

    let store = JsonFileStore::load(&store_path).unwrap();
    assert!(!store.has("polytrack_v4_prod_track_Loop"));
    assert!(!store.has("polytrack_v4_prod_track_Hill"));
    assert_eq!(store.get("unrelated_setting").as_deref(), Some("kept"));
}

// ── Inspect ──────────────────────────────────────────────────────

#[test]
fn inspect_accepts_known_formats() {
    assert!(run_inspect("PolyTrack1SomeBody").is_ok());
    assert!(run_inspect("v3EAM92bwBXrest").is_ok());
    assert!(run_inspect("v1nCQTrack%201BQAB").is_ok());
}

#[test]
fn inspect_rejects_unrecognized_input() {
    assert!(run_inspect("definitely not a track").is_err());
}

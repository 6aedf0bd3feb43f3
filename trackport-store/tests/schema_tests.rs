use pretty_assertions::assert_eq;
use trackport_store::{
    detect_schema, MemoryStore, NameCodec, PayloadMode, StorageSchemaConfig, TrackStore,
};

fn store_of(entries: &[(&str, &str)]) -> MemoryStore {
    MemoryStore::from_entries(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    )
}

// ── Prefix detection ─────────────────────────────────────────────

#[test]
fn empty_store_falls_back_to_default_version() {
    let store = MemoryStore::new();
    let schema = detect_schema(&store);
    assert_eq!(schema.key_prefix, "polytrack_v4_prod_track_");
    assert_eq!(schema.name_codec, NameCodec::Identity);
    assert_eq!(schema.payload_mode, PayloadMode::Raw);
}

#[test]
fn most_frequent_track_prefix_wins() {
    let store = store_of(&[
        ("polytrack_v4_prod_track_Old", "PolyTrack1AAA"),
        ("polytrack_v5_prod_track_A", "PolyTrack1BBB"),
        ("polytrack_v5_prod_track_B", "PolyTrack1CCC"),
        ("polytrack_v5_prod_track_C", "PolyTrack1DDD"),
    ]);
    assert_eq!(detect_schema(&store).key_prefix, "polytrack_v5_prod_track_");
}

#[test]
fn unrelated_keys_are_ignored() {
    let store = store_of(&[
        ("settings", "{}"),
        ("polytrack_v5_prod_track_Loop", "PolyTrack1XYZ"),
        ("some_other_app_state", "x"),
    ]);
    assert_eq!(detect_schema(&store).key_prefix, "polytrack_v5_prod_track_");
}

#[test]
fn version_tagged_keys_without_tracks_synthesize_prefix() {
    // No *_track_* keys, but versioned keys exist: use the highest version.
    let store = store_of(&[
        ("polytrack_v3_prod_settings", "{}"),
        ("polytrack_v7_prod_profile", "{}"),
        ("polytrack_v5_prod_ghosts", "{}"),
    ]);
    assert_eq!(detect_schema(&store).key_prefix, "polytrack_v7_prod_track_");
}

#[test]
fn non_versioned_keys_do_not_count() {
    let store = store_of(&[("polytrack_vX_prod_track_A", "data"), ("other", "x")]);
    assert_eq!(detect_schema(&store).key_prefix, "polytrack_v4_prod_track_");
}

#[test]
fn alternate_channel_segment_is_kept() {
    // The segment between version and _track_ is carried into the prefix
    // verbatim, whatever it is.
    let store = store_of(&[
        ("polytrack_v6_beta_track_A", "d1"),
        ("polytrack_v6_beta_track_B", "d2"),
    ]);
    assert_eq!(detect_schema(&store).key_prefix, "polytrack_v6_beta_track_");
}

// ── Name codec detection ─────────────────────────────────────────

#[test]
fn percent_encoded_suffix_detected() {
    let store = store_of(&[("polytrack_v4_prod_track_My%20Track", "PolyTrack1XYZ")]);
    let schema = detect_schema(&store);
    assert_eq!(schema.name_codec, NameCodec::PercentEncoding);
    assert_eq!(schema.key_for("My Track"), "polytrack_v4_prod_track_My%20Track");
    assert_eq!(
        schema.name_for("polytrack_v4_prod_track_My%20Track").as_deref(),
        Some("My Track")
    );
}

#[test]
fn plain_suffix_is_identity() {
    let store = store_of(&[("polytrack_v4_prod_track_Plain", "PolyTrack1XYZ")]);
    let schema = detect_schema(&store);
    assert_eq!(schema.name_codec, NameCodec::Identity);
    assert_eq!(schema.key_for("My Track"), "polytrack_v4_prod_track_My Track");
}

// ── Payload envelope detection ───────────────────────────────────

#[test]
fn json_envelope_with_data_field_detected() {
    let store = store_of(&[(
        "polytrack_v4_prod_track_Loop",
        r#"{"data":"PolyTrack1XYZ","saveTime":1700000000000,"origin":"game"}"#,
    )]);
    let schema = detect_schema(&store);
    assert_eq!(schema.payload_mode, PayloadMode::Json);
    let template = schema.payload_template.as_ref().unwrap();
    assert_eq!(template.get("origin").unwrap(), "game");
}

#[test]
fn bare_string_value_is_raw() {
    let store = store_of(&[("polytrack_v4_prod_track_Loop", "PolyTrack1XYZ")]);
    assert_eq!(detect_schema(&store).payload_mode, PayloadMode::Raw);
}

#[test]
fn json_without_data_field_is_raw() {
    let store = store_of(&[("polytrack_v4_prod_track_Loop", r#"{"other":"stuff"}"#)]);
    assert_eq!(detect_schema(&store).payload_mode, PayloadMode::Raw);
}

// ── Envelope construction ────────────────────────────────────────

#[test]
fn raw_envelope_is_the_payload() {
    let schema = StorageSchemaConfig::fallback();
    assert_eq!(schema.envelope_for("PolyTrack1XYZ", 123), "PolyTrack1XYZ");
}

#[test]
fn json_envelope_preserves_template_fields() {
    let store = store_of(&[(
        "polytrack_v4_prod_track_Loop",
        r#"{"data":"OLD","saveTime":1,"origin":"game"}"#,
    )]);
    let schema = detect_schema(&store);

    let written = schema.envelope_for("PolyTrack1NEW", 42);
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["data"], "PolyTrack1NEW");
    assert_eq!(parsed["saveTime"], 42);
    assert_eq!(parsed["origin"], "game");
}

#[test]
fn payload_of_unwraps_envelopes() {
    let schema = StorageSchemaConfig::fallback();
    assert_eq!(
        schema.payload_of(r#"{"data":"PolyTrack1XYZ","saveTime":1}"#),
        "PolyTrack1XYZ"
    );
    assert_eq!(schema.payload_of("PolyTrack1XYZ"), "PolyTrack1XYZ");
}

// ── Detection is read-only and stable ────────────────────────────

#[test]
fn detection_does_not_modify_the_store() {
    let store = store_of(&[("polytrack_v5_prod_track_A", "d")]);
    let before = store.keys();
    let _ = detect_schema(&store);
    assert_eq!(store.keys(), before);
}

#[test]
fn detection_is_deterministic() {
    let store = store_of(&[
        ("polytrack_v5_prod_track_A", "d1"),
        ("polytrack_v4_prod_track_B", "d2"),
        ("polytrack_v5_prod_track_C", "d3"),
    ]);
    assert_eq!(detect_schema(&store), detect_schema(&store));
}

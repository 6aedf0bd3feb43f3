//! Command runners for the trackport binary.
//!
//! Each subcommand is a plain function over filesystem paths, so the
//! binary stays a thin argument-parsing shell and the behavior is
//! testable against temporary store files.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use trackport_codec::{decode_v1n, decode_v3, ShareCodeFormat};
use trackport_import::{
    delete_all, export_all, parse_manifest, render_failed_report, render_manifest, ImportEngine,
    LogSink, ParsedManifest,
};
use trackport_store::{detect_schema, JsonFileStore};
use trackport_types::CollisionPolicy;

/// Imports the given manifest files, in order, into the storage file.
///
/// Fails when no file yields an importable track, or when any record
/// fails to import; in the latter case a failed-tracks report is written
/// first if a path was given.
pub fn run_import(
    files: &[impl AsRef<Path>],
    store_path: &Path,
    mode: CollisionPolicy,
    legacy: bool,
    failed_report: Option<&Path>,
) -> Result<()> {
    let mut parsed = ParsedManifest::default();
    for file in files {
        let file = file.as_ref();
        let text = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        parsed.merge(parse_manifest(&text));
    }

    if parsed.invalid_lines > 0 {
        warn!("{} line(s) were not recognized as track data", parsed.invalid_lines);
    }
    if parsed.records.is_empty() {
        bail!("no importable tracks found");
    }
    info!(
        "parsed {} track(s), {} as share codes",
        parsed.records.len(),
        parsed.share_codes
    );

    let mut store = JsonFileStore::load(store_path)
        .with_context(|| format!("failed to load {}", store_path.display()))?;
    let schema = detect_schema(&store);
    info!("storage schema: {}", schema.key_prefix);

    let sink = LogSink;
    let result = ImportEngine::new(mode)
        .with_legacy_mode(legacy)
        .with_progress(&sink)
        .run(&parsed.records, &schema, &mut store);

    store
        .save()
        .with_context(|| format!("failed to save {}", store_path.display()))?;

    println!("\nImported:    {}", result.imported);
    println!("Renamed:     {}", result.renamed);
    println!("Overwritten: {}", result.overwritten);
    println!("Skipped:     {}", result.skipped);
    println!("Failed:      {}", result.errored());
    for warning in &result.warnings {
        warn!("{warning}");
    }

    if !result.failed_tracks.is_empty() {
        if let Some(path) = failed_report {
            fs::write(path, render_failed_report(&result.failed_tracks))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("failed-tracks report written to {}", path.display());
        }
        bail!("{} track(s) failed to import", result.errored());
    }
    Ok(())
}

/// Exports every track in the storage file as a manifest, to `output` or
/// stdout.
pub fn run_export(store_path: &Path, output: Option<&Path>) -> Result<()> {
    let store = JsonFileStore::load(store_path)
        .with_context(|| format!("failed to load {}", store_path.display()))?;
    let schema = detect_schema(&store);

    let tracks = export_all(&store, &schema);
    if tracks.is_empty() {
        bail!("no tracks found under {}", schema.key_prefix);
    }
    info!("exporting {} track(s)", tracks.len());

    let manifest = render_manifest(&tracks);
    match output {
        Some(path) => {
            fs::write(path, manifest)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => print!("{manifest}"),
    }
    Ok(())
}

/// Deletes every track in the storage file. Refuses to act unless
/// `confirmed` is set.
pub fn run_delete_all(store_path: &Path, confirmed: bool) -> Result<()> {
    let mut store = JsonFileStore::load(store_path)
        .with_context(|| format!("failed to load {}", store_path.display()))?;
    let schema = detect_schema(&store);

    if !confirmed {
        bail!(
            "this deletes every track under {} in {}; pass --yes to confirm",
            schema.key_prefix,
            store_path.display()
        );
    }

    let deleted = delete_all(&mut store, &schema);
    store
        .save()
        .with_context(|| format!("failed to save {}", store_path.display()))?;
    println!("Deleted {deleted} track(s)");
    Ok(())
}

/// Classifies a share code and prints what it carries. Fails on input
/// that is not a recognized track representation.
pub fn run_inspect(code: &str) -> Result<()> {
    let clean: String = code.chars().filter(|c| !c.is_whitespace()).collect();
    match ShareCodeFormat::classify(&clean) {
        ShareCodeFormat::NativePayload => {
            println!("Format: native payload ({} chars)", clean.len());
        }
        ShareCodeFormat::V3 => {
            println!("Format: v3 share code");
            match decode_v3(&clean) {
                Some(decoded) => println!("Name:   {}", decoded.name),
                None => println!("Name:   <not decodable>"),
            }
        }
        ShareCodeFormat::V1n => {
            println!("Format: v1n share code");
            match decode_v1n(&clean) {
                Some(decoded) => println!("Name:   {}", decoded.name),
                None => println!("Name:   <not decodable>"),
            }
        }
        ShareCodeFormat::Unrecognized => {
            bail!("not recognized as a share code or native payload");
        }
    }
    Ok(())
}

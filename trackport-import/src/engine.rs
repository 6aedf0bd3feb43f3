//! The import-merge engine.
//!
//! Merges a batch of track records into a store under a collision policy,
//! producing one status per record and an aggregate [`ImportResult`]. The
//! loop is sequential and order-preserving: a record is fully resolved
//! (including rename generation, which depends on earlier writes) before
//! the next one begins. There is no rollback; a failure partway through
//! leaves prior writes intact.

use crate::error::RecordError;
use crate::progress::{NullSink, ProgressSink};
use std::borrow::Cow;
use trackport_codec::{to_baseline, BASELINE_PAYLOAD_PREFIX, NATIVE_PAYLOAD_PREFIX};
use trackport_store::{StorageSchemaConfig, TrackStore};
use trackport_types::{CollisionPolicy, FailedTrack, ImportResult, ImportStatus, TrackRecord};
use tracing::{debug, warn};

/// Hard cap on rename collision attempts for a single record.
pub const RENAME_ATTEMPT_CAP: usize = 1000;

static NULL_SINK: NullSink = NullSink;

/// Merges batches of [`TrackRecord`]s into a [`TrackStore`].
///
/// Configured once, then reused per batch via [`run`](ImportEngine::run).
pub struct ImportEngine<'a> {
    policy: CollisionPolicy,
    legacy_mode: bool,
    progress: &'a dyn ProgressSink,
    cancel: Option<&'a dyn Fn() -> bool>,
}

impl<'a> ImportEngine<'a> {
    /// Creates an engine with the given collision policy, no progress sink
    /// and no cancellation check.
    #[must_use]
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            legacy_mode: false,
            progress: &NULL_SINK,
            cancel: None,
        }
    }

    /// Converts native payloads to the baseline version tag before storing.
    #[must_use]
    pub fn with_legacy_mode(mut self, legacy_mode: bool) -> Self {
        self.legacy_mode = legacy_mode;
        self
    }

    /// Sets the per-record progress sink.
    #[must_use]
    pub fn with_progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = sink;
        self
    }

    /// Sets a cancellation check, polled before each record. When it
    /// returns true the batch stops and the partial result is returned.
    #[must_use]
    pub fn with_cancel(mut self, cancel: &'a dyn Fn() -> bool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Runs one batch against the store.
    ///
    /// `total` in the result always equals the batch length; the counters
    /// partition the processed records.
    pub fn run(
        &self,
        records: &[TrackRecord],
        schema: &StorageSchemaConfig,
        store: &mut dyn TrackStore,
    ) -> ImportResult {
        let mut result = ImportResult::new(records.len());
        let records = self.apply_legacy_conversion(records, &mut result);

        for (index, record) in records.iter().enumerate() {
            if let Some(cancel) = self.cancel {
                if cancel() {
                    warn!("import cancelled after {} of {} records", index, result.total);
                    break;
                }
            }
            self.process_record(index, record, schema, store, &mut result);
        }

        result
    }

    /// In legacy mode, rewrites newer native payloads to the baseline tag.
    fn apply_legacy_conversion<'r>(
        &self,
        records: &'r [TrackRecord],
        result: &mut ImportResult,
    ) -> Cow<'r, [TrackRecord]> {
        if !self.legacy_mode {
            return Cow::Borrowed(records);
        }

        let mut converted = 0usize;
        let mapped: Vec<TrackRecord> = records
            .iter()
            .map(|record| match record.data.as_deref().and_then(to_baseline) {
                Some(baseline) => {
                    converted += 1;
                    TrackRecord {
                        data: Some(baseline),
                        ..record.clone()
                    }
                }
                None => record.clone(),
            })
            .collect();

        if converted > 0 {
            result.warnings.push(format!(
                "converted {converted} track(s) to {BASELINE_PAYLOAD_PREFIX} format"
            ));
        }
        Cow::Owned(mapped)
    }

    fn process_record(
        &self,
        index: usize,
        record: &TrackRecord,
        schema: &StorageSchemaConfig,
        store: &mut dyn TrackStore,
        result: &mut ImportResult,
    ) {
        let total = result.total;
        let exists = store.has(&schema.key_for(&record.name));

        let mut final_name = record.name.clone();
        let mut status = ImportStatus::Imported;

        if exists {
            match self.policy {
                CollisionPolicy::Skip => {
                    result.skipped += 1;
                    debug!("skipping existing track {:?}", record.name);
                    self.progress
                        .on_progress(index + 1, total, &record.name, ImportStatus::Skipped);
                    return;
                }
                CollisionPolicy::Overwrite => {
                    status = ImportStatus::Overwritten;
                }
                CollisionPolicy::Rename => match unique_name(&record.name, schema, store) {
                    Some(name) => {
                        final_name = name;
                        status = ImportStatus::Renamed;
                    }
                    None => {
                        self.fail(
                            index,
                            record,
                            RecordError::NameExhaustion(record.name.clone()),
                            result,
                        );
                        return;
                    }
                },
            }
        }

        let payload = match (&record.data, &record.share_code) {
            (Some(data), _) if data.starts_with(NATIVE_PAYLOAD_PREFIX) => data.clone(),
            (_, Some(code)) => {
                // Best-effort path: the store cannot derive the native form
                // from a share code, so the consumer may have to re-import.
                result.warnings.push(format!(
                    "track \"{final_name}\" stored as share code - may need manual re-import"
                ));
                code.clone()
            }
            _ => {
                self.fail(
                    index,
                    record,
                    RecordError::UnresolvedPayload(record.name.clone()),
                    result,
                );
                return;
            }
        };

        let now_ms = chrono::Utc::now().timestamp_millis();
        store.set(
            &schema.key_for(&final_name),
            &schema.envelope_for(&payload, now_ms),
        );

        match status {
            ImportStatus::Imported => result.imported += 1,
            ImportStatus::Renamed => result.renamed += 1,
            ImportStatus::Overwritten => result.overwritten += 1,
            ImportStatus::Skipped | ImportStatus::Error => {}
        }

        debug!("stored track {final_name:?} ({status})");
        self.progress.on_progress(index + 1, total, &final_name, status);
    }

    fn fail(
        &self,
        index: usize,
        record: &TrackRecord,
        error: RecordError,
        result: &mut ImportResult,
    ) {
        warn!("record {:?} failed: {error}", record.name);
        result.errors.push(error.to_string());
        result.failed_tracks.push(FailedTrack {
            name: record.name.clone(),
            data: record
                .data
                .clone()
                .or_else(|| record.share_code.clone())
                .unwrap_or_default(),
            reason: error.to_string(),
        });
        self.progress
            .on_progress(index + 1, result.total, &record.name, ImportStatus::Error);
    }
}

/// First `"base (n)"` variant with no collision, for n in 1..=cap.
fn unique_name(
    base: &str,
    schema: &StorageSchemaConfig,
    store: &dyn TrackStore,
) -> Option<String> {
    for n in 1..=RENAME_ATTEMPT_CAP {
        let candidate = format!("{base} ({n})");
        if !store.has(&schema.key_for(&candidate)) {
            return Some(candidate);
        }
    }
    None
}

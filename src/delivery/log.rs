use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::HookError;
use crate::model::event::DocEvent;

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOutcome {
    Delivered,
    Failed,
    Skipped,
}

impl std::fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryOutcome::Delivered => write!(f, "delivered"),
            DeliveryOutcome::Failed => write!(f, "failed"),
            DeliveryOutcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// One delivery attempt: which webhook, for what event, and how it went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub webhook: String,
    pub document: String,
    pub event: DocEvent,
    pub method: String,
    pub resource_uri: String,
    pub outcome: DeliveryOutcome,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Persistent delivery log backed by a JSON file.
///
/// Stores delivery records in `deliveries.json` within the hookline data
/// directory. Entries are capped at a configurable limit; oldest entries
/// are removed when the limit is exceeded.
///
/// An exclusive advisory lock on `deliveries.lock` is held for the
/// entire lifetime of this struct and released automatically on drop,
/// preventing concurrent writers from corrupting the log file.
pub struct DeliveryLog {
    path: PathBuf,
    entries: Vec<DeliveryRecord>,
    limit: usize,
    /// Holds the open lock file. The `fs2` exclusive lock is tied to the
    /// file descriptor; dropping this field releases the lock.
    _lock_file: File,
}

impl DeliveryLog {
    /// Load the log from `data_dir/deliveries.json`.
    ///
    /// Acquires an exclusive advisory lock on `data_dir/deliveries.lock`
    /// before reading. The lock is held until the returned `DeliveryLog`
    /// is dropped; if another process holds it, this call blocks.
    ///
    /// A missing file yields an empty log. A corrupted file logs a
    /// warning and starts fresh.
    pub fn load(data_dir: &Path, limit: usize) -> Result<Self, HookError> {
        let lock_path = data_dir.join("deliveries.lock");
        let lock_file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| HookError::Io { source: e })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| HookError::Io { source: e })?;

        let path = data_dir.join("deliveries.json");

        let entries = if path.exists() {
            let contents =
                std::fs::read_to_string(&path).map_err(|e| HookError::Io { source: e })?;
            match serde_json::from_str::<Vec<DeliveryRecord>>(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Corrupted deliveries.json, starting fresh: {}", e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            entries,
            limit,
            _lock_file: lock_file,
        })
    }

    /// Append a record, truncating oldest entries if over the limit.
    ///
    /// Automatically saves to disk after appending.
    pub fn append(&mut self, record: DeliveryRecord) -> Result<(), HookError> {
        self.entries.push(record);

        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }

        self.save()
    }

    /// Append several records from one dispatch.
    pub fn extend(&mut self, records: Vec<DeliveryRecord>) -> Result<(), HookError> {
        for record in records {
            self.append(record)?;
        }
        Ok(())
    }

    /// Return a slice of all records, oldest first.
    pub fn list(&self) -> &[DeliveryRecord] {
        &self.entries
    }

    /// Clear all records.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Save the log to disk atomically (write temp, rename).
    pub fn save(&self) -> Result<(), HookError> {
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&tmp_path, json).map_err(|e| HookError::Io { source: e })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| HookError::Io { source: e })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(webhook: &str, outcome: DeliveryOutcome) -> DeliveryRecord {
        DeliveryRecord {
            webhook: webhook.to_string(),
            document: "Invoice".into(),
            event: DocEvent::Create,
            method: "POST".into(),
            resource_uri: "https://example.com/invoices".into(),
            outcome,
            error: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_log_returns_empty_slice() {
        let dir = tempfile::tempdir().unwrap();
        let log = DeliveryLog::load(dir.path(), 1000).unwrap();
        assert!(log.list().is_empty());
    }

    #[test]
    fn append_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = DeliveryLog::load(dir.path(), 1000).unwrap();

        log.append(record("billing", DeliveryOutcome::Delivered))
            .unwrap();
        assert_eq!(log.list().len(), 1);
        assert_eq!(log.list()[0].webhook, "billing");
        assert_eq!(log.list()[0].outcome, DeliveryOutcome::Delivered);
    }

    #[test]
    fn append_beyond_limit_truncates_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = DeliveryLog::load(dir.path(), 3).unwrap();

        for i in 0..5 {
            log.append(record(&format!("hook_{}", i), DeliveryOutcome::Delivered))
                .unwrap();
        }

        assert_eq!(log.list().len(), 3);
        assert_eq!(log.list()[0].webhook, "hook_2");
        assert_eq!(log.list()[2].webhook, "hook_4");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut log = DeliveryLog::load(dir.path(), 1000).unwrap();
            let mut rec = record("billing", DeliveryOutcome::Failed);
            rec.error = Some("HTTP 500".into());
            log.append(rec).unwrap();
        }

        {
            let log = DeliveryLog::load(dir.path(), 1000).unwrap();
            assert_eq!(log.list().len(), 1);
            assert_eq!(log.list()[0].outcome, DeliveryOutcome::Failed);
            assert_eq!(log.list()[0].error, Some("HTTP 500".into()));
        }
    }

    #[test]
    fn corrupted_json_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("deliveries.json"), "not valid json!!!").unwrap();
        let log = DeliveryLog::load(dir.path(), 1000).unwrap();
        assert!(log.list().is_empty());
    }

    #[test]
    fn clear_empties_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = DeliveryLog::load(dir.path(), 1000).unwrap();
        log.append(record("billing", DeliveryOutcome::Skipped))
            .unwrap();
        log.clear();
        assert!(log.list().is_empty());
    }
}

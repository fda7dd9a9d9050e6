//! Durable outbox of pending remote writes.
//!
//! Writes made while offline are queued here in order and replayed against
//! the remote store once connectivity returns. Every operation carries a key;
//! enqueueing a key that is already pending replaces that operation instead of
//! adding a second one, so a partially successful replay never duplicates a
//! record.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};

/// The kind of record an operation writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// An attendance session.
    Attendance,
    /// A user profile.
    User,
    /// A holiday entry.
    Holiday,
    /// A commitment change.
    Commitment,
}

/// One queued write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation<T> {
    /// Deduplication key, usually the record ID.
    pub key: String,
    /// The kind of record written.
    pub kind: OperationKind,
    /// The record to write.
    pub payload: T,
    /// When the key was first queued.
    pub enqueued_at: DateTime<Utc>,
    /// Failed replay attempts since the payload was last replaced.
    pub attempts: u32,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Operations applied and removed.
    pub applied: usize,
    /// Key of the operation that failed and stopped the replay.
    pub failed: Option<String>,
    /// Operations still queued.
    pub remaining: usize,
}

/// Ordered queue of pending operations, deduplicated by key.
///
/// # Example
///
/// ```
/// use attendance_engine::sync::{OperationKind, Outbox};
///
/// let mut outbox: Outbox<String> = Outbox::new();
/// assert!(outbox.enqueue("att_001", OperationKind::Attendance, "v1".to_string()));
/// assert!(!outbox.enqueue("att_001", OperationKind::Attendance, "v2".to_string()));
/// assert_eq!(outbox.len(), 1);
///
/// let report = outbox.replay(|op| -> Result<(), String> {
///     assert_eq!(op.payload, "v2");
///     Ok(())
/// });
/// assert_eq!(report.applied, 1);
/// assert!(outbox.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outbox<T> {
    operations: Vec<PendingOperation<T>>,
}

impl<T> Default for Outbox<T> {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
        }
    }
}

impl<T> Outbox<T> {
    /// Creates an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Pending operations in replay order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingOperation<T>> {
        self.operations.iter()
    }

    /// Returns the pending operation for a key.
    pub fn get(&self, key: &str) -> Option<&PendingOperation<T>> {
        self.operations.iter().find(|op| op.key == key)
    }

    /// Queues a write.
    ///
    /// If `key` is already pending, its kind and payload are replaced in place
    /// and its attempt count reset; the operation keeps its position. Returns
    /// true when a new operation was added.
    pub fn enqueue(&mut self, key: impl Into<String>, kind: OperationKind, payload: T) -> bool {
        let key = key.into();

        if let Some(existing) = self.operations.iter_mut().find(|op| op.key == key) {
            debug!(key = %key, kind = ?kind, "Coalesced pending operation");
            existing.kind = kind;
            existing.payload = payload;
            existing.attempts = 0;
            return false;
        }

        debug!(key = %key, kind = ?kind, "Queued operation");
        self.operations.push(PendingOperation {
            key,
            kind,
            payload,
            enqueued_at: Utc::now(),
            attempts: 0,
        });
        true
    }

    /// Drops a pending operation. Returns false when the key is not queued.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.operations.len();
        self.operations.retain(|op| op.key != key);
        self.operations.len() < before
    }

    /// Applies pending operations in order.
    ///
    /// Each success removes its operation. The first failure increments that
    /// operation's attempts and stops the replay, so later operations are
    /// never applied ahead of an earlier one.
    pub fn replay<F, E>(&mut self, mut apply: F) -> ReplayReport
    where
        F: FnMut(&PendingOperation<T>) -> Result<(), E>,
        E: Display,
    {
        let mut applied = 0;
        let mut failed = None;

        while let Some(op) = self.operations.first_mut() {
            match apply(op) {
                Ok(()) => {
                    self.operations.remove(0);
                    applied += 1;
                }
                Err(e) => {
                    op.attempts += 1;
                    warn!(
                        key = %op.key,
                        kind = ?op.kind,
                        attempts = op.attempts,
                        error = %e,
                        "Replay stopped at failed operation"
                    );
                    failed = Some(op.key.clone());
                    break;
                }
            }
        }

        info!(
            applied,
            remaining = self.operations.len(),
            "Outbox replay finished"
        );

        ReplayReport {
            applied,
            failed,
            remaining: self.operations.len(),
        }
    }
}

impl<T: Serialize> Outbox<T> {
    /// Writes the outbox to `path` as JSON.
    ///
    /// The file is written to a sibling temporary path and renamed over the
    /// target so a crash never leaves a truncated outbox behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> EngineResult<()> {
        let path = path.as_ref();
        let storage_error = |message: String| EngineError::StorageError {
            path: path.display().to_string(),
            message,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| storage_error(e.to_string()))?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| storage_error(e.to_string()))?;
        fs::rename(&tmp_path, path).map_err(|e| storage_error(e.to_string()))?;

        debug!(path = %path.display(), pending = self.len(), "Saved outbox");
        Ok(())
    }
}

impl<T: DeserializeOwned> Outbox<T> {
    /// Reads an outbox from `path`. A missing file is an empty outbox.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let storage_error = |message: String| EngineError::StorageError {
            path: path.display().to_string(),
            message,
        };
        let content = fs::read_to_string(path).map_err(|e| storage_error(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| storage_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outbox_with(keys: &[&str]) -> Outbox<String> {
        let mut outbox = Outbox::new();
        for key in keys {
            outbox.enqueue(*key, OperationKind::Attendance, format!("payload-{}", key));
        }
        outbox
    }

    fn keys(outbox: &Outbox<String>) -> Vec<&str> {
        outbox.iter().map(|op| op.key.as_str()).collect()
    }

    // ==========================================================================
    // Enqueue and coalescing
    // ==========================================================================

    #[test]
    fn test_enqueue_preserves_order() {
        let outbox = outbox_with(&["a", "b", "c"]);
        assert_eq!(keys(&outbox), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_enqueue_same_key_coalesces_in_place() {
        let mut outbox = outbox_with(&["a", "b", "c"]);
        let added = outbox.enqueue("a", OperationKind::Holiday, "updated".to_string());

        assert!(!added);
        assert_eq!(keys(&outbox), vec!["a", "b", "c"]);
        let op = outbox.get("a").unwrap();
        assert_eq!(op.payload, "updated");
        assert_eq!(op.kind, OperationKind::Holiday);
    }

    #[test]
    fn test_coalescing_resets_attempts() {
        let mut outbox = outbox_with(&["a"]);
        outbox.replay(|_| -> Result<(), String> { Err("offline".to_string()) });
        assert_eq!(outbox.get("a").unwrap().attempts, 1);

        outbox.enqueue("a", OperationKind::Attendance, "retry".to_string());
        assert_eq!(outbox.get("a").unwrap().attempts, 0);
    }

    #[test]
    fn test_remove() {
        let mut outbox = outbox_with(&["a", "b"]);
        assert!(outbox.remove("a"));
        assert!(!outbox.remove("a"));
        assert_eq!(keys(&outbox), vec!["b"]);
    }

    // ==========================================================================
    // Replay
    // ==========================================================================

    #[test]
    fn test_replay_all_succeed() {
        let mut outbox = outbox_with(&["a", "b", "c"]);
        let mut seen = Vec::new();
        let report = outbox.replay(|op| -> Result<(), String> {
            seen.push(op.key.clone());
            Ok(())
        });

        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(
            report,
            ReplayReport {
                applied: 3,
                failed: None,
                remaining: 0,
            }
        );
    }

    #[test]
    fn test_replay_stops_at_first_failure() {
        let mut outbox = outbox_with(&["a", "b", "c"]);
        let report = outbox.replay(|op| {
            if op.key == "b" {
                Err("remote rejected")
            } else {
                Ok(())
            }
        });

        assert_eq!(report.applied, 1);
        assert_eq!(report.failed.as_deref(), Some("b"));
        assert_eq!(report.remaining, 2);
        assert_eq!(keys(&outbox), vec!["b", "c"]);
        assert_eq!(outbox.get("b").unwrap().attempts, 1);
        assert_eq!(outbox.get("c").unwrap().attempts, 0);
    }

    #[test]
    fn test_replay_after_partial_success_does_not_duplicate() {
        let mut outbox = outbox_with(&["a", "b"]);
        let mut remote: Vec<String> = Vec::new();
        let mut online = false;

        // First pass: "a" lands, then the connection drops
        outbox.replay(|op| {
            if op.key == "a" || online {
                remote.push(op.key.clone());
                Ok(())
            } else {
                Err("offline")
            }
        });
        online = true;
        outbox.enqueue("b", OperationKind::Attendance, "edited".to_string());
        outbox.replay(|op| {
            if online {
                remote.push(op.key.clone());
                Ok(())
            } else {
                Err("offline")
            }
        });

        assert_eq!(remote, vec!["a", "b"]);
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_replay_empty_outbox() {
        let mut outbox: Outbox<String> = Outbox::new();
        let report = outbox.replay(|_| -> Result<(), String> { Ok(()) });
        assert_eq!(report.applied, 0);
        assert_eq!(report.failed, None);
    }

    // ==========================================================================
    // Persistence
    // ==========================================================================

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outbox.json");

        let mut outbox = outbox_with(&["a", "b"]);
        outbox.replay(|_| -> Result<(), String> { Err("offline".to_string()) });
        outbox.save(&path).unwrap();

        let loaded: Outbox<String> = Outbox::load(&path).unwrap();
        assert_eq!(loaded, outbox);
        assert_eq!(loaded.get("a").unwrap().attempts, 1);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Outbox<String> = Outbox::load(dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outbox.json");
        fs::write(&path, "{not json").unwrap();

        let result: EngineResult<Outbox<String>> = Outbox::load(&path);
        assert!(matches!(result, Err(EngineError::StorageError { .. })));
    }

    #[test]
    fn test_save_into_missing_directory_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("outbox.json");
        let outbox = outbox_with(&["a"]);
        assert!(matches!(
            outbox.save(&path),
            Err(EngineError::StorageError { .. })
        ));
    }
}

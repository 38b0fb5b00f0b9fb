//! The flag ledger: a local, TTL-bounded record of user-submitted
//! "this shop is actually closed" reports.
//!
//! Entries live as a `place_id → epoch millis` mapping serialized under one
//! namespace key in a [`KeyValueStore`]. Every read garbage-collects expired
//! entries and persists the cleaned mapping back. Storage failures never
//! surface: a broken or corrupt store degrades to an empty ledger, and a
//! failed write drops the mutation, both with a warning.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use thiserror::Error;

use crate::config::SearchConfig;

/// Errors a [`KeyValueStore`] binding may report. The ledger absorbs them;
/// they exist so bindings can be tested in isolation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Minimal string key-value persistence port.
///
/// Production binds a file on disk; tests bind an in-memory map. The ledger
/// is the only writer, and a load→mutate→persist pass is the unit of
/// atomicity (callers must not interleave two mutations on one ledger).
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying storage cannot be written.
    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }
}

/// In-memory store binding, used by tests and available to embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// The time-expiring flag store.
pub struct FlagLedger<S> {
    store: S,
    retention: Duration,
    storage_key: String,
}

impl<S: KeyValueStore> FlagLedger<S> {
    pub fn new(store: S, config: &SearchConfig) -> Self {
        Self {
            store,
            retention: config.flag_retention,
            storage_key: config.flag_storage_key.clone(),
        }
    }

    /// Returns the current mapping of flagged place ids to flag timestamps,
    /// after expiring entries older than the retention window and persisting
    /// the cleaned mapping back.
    pub fn read(&mut self) -> HashMap<String, i64> {
        self.read_at(Utc::now().timestamp_millis())
    }

    /// Whether an unexpired flag exists for `place_id`.
    pub fn is_flagged(&mut self, place_id: &str) -> bool {
        self.read().contains_key(place_id)
    }

    /// Records a "reported closed" flag for `place_id` at the current time.
    /// Re-flagging refreshes the timestamp.
    pub fn flag(&mut self, place_id: &str) {
        self.flag_at(place_id, Utc::now().timestamp_millis());
    }

    /// Removes the flag for `place_id` ("mark as actually open"). Silent when
    /// no flag exists.
    pub fn unflag(&mut self, place_id: &str) {
        self.unflag_at(place_id, Utc::now().timestamp_millis());
    }

    fn read_at(&mut self, now_millis: i64) -> HashMap<String, i64> {
        let cleaned = self.load_at(now_millis);
        self.persist(&cleaned);
        cleaned
    }

    fn flag_at(&mut self, place_id: &str, now_millis: i64) {
        let mut mapping = self.load_at(now_millis);
        mapping.insert(place_id.to_owned(), now_millis);
        self.persist(&mapping);
    }

    fn unflag_at(&mut self, place_id: &str, now_millis: i64) {
        let mut mapping = self.load_at(now_millis);
        mapping.remove(place_id);
        self.persist(&mapping);
    }

    /// Loads and expires. Absent or malformed storage reads as empty; an
    /// entry is kept while `now - ts < retention` (an entry exactly at the
    /// window is discarded).
    fn load_at(&self, now_millis: i64) -> HashMap<String, i64> {
        let raw = match self.store.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HashMap::new(),
            Err(error) => {
                tracing::warn!(%error, "flag store read failed — treating ledger as empty");
                return HashMap::new();
            }
        };

        let mapping: HashMap<String, i64> = match serde_json::from_str(&raw) {
            Ok(mapping) => mapping,
            Err(error) => {
                tracing::warn!(%error, "flag store corrupt — treating ledger as empty");
                return HashMap::new();
            }
        };

        let retention_millis = self.retention.num_milliseconds();
        mapping
            .into_iter()
            .filter(|(_, ts)| now_millis - ts < retention_millis)
            .collect()
    }

    fn persist(&mut self, mapping: &HashMap<String, i64>) {
        let json = match serde_json::to_string(mapping) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "flag mapping serialization failed — dropping write");
                return;
            }
        };
        if let Err(error) = self.store.put(&self.storage_key, &json) {
            tracing::warn!(%error, "flag store write failed — dropping write");
        }
    }
}

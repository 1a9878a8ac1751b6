//! Item store: the in-memory collection mirrored to a durable JSON file.
//!
//! The file holds the whole collection as a flat array of records and is
//! rewritten after every mutation. The in-memory collection stays
//! authoritative for the session even when a save fails.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{error::AppResult, models::InventoryRecord};

/// Ordered collection of inventory records, persisted wholesale.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    records: Vec<InventoryRecord>,
    load_warning: Option<String>,
    save_warning: Option<String>,
}

impl Store {
    /// Open the store at the given file path.
    ///
    /// An absent file is an empty collection. A file that fails to read or
    /// parse also yields an empty collection, with a warning kept for the
    /// caller to surface; opening never fails.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (records, load_warning) = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<InventoryRecord>>(&bytes) {
                Ok(records) => (records, None),
                Err(e) => {
                    tracing::warn!("Stored collection at {} is malformed: {}", path.display(), e);
                    (
                        Vec::new(),
                        Some("saved data could not be loaded and may be corrupt".to_string()),
                    )
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (Vec::new(), None),
            Err(e) => {
                tracing::warn!("Failed to read stored collection at {}: {}", path.display(), e);
                (
                    Vec::new(),
                    Some("saved data could not be loaded".to_string()),
                )
            }
        };

        Self {
            path,
            records,
            load_warning,
            save_warning: None,
        }
    }

    /// Path of the durable file backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full collection, in insertion order
    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    /// Look up one record by identifier
    pub fn get(&self, id: &str) -> Option<&InventoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Insert or replace a record.
    ///
    /// A record whose id is already present replaces the existing entry in
    /// place (position kept); otherwise the record is appended. The editor
    /// is responsible for carrying id and creation date over on edits.
    pub fn upsert(&mut self, record: InventoryRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.persist_or_warn();
    }

    /// Remove the record with the given identifier; a no-op when absent
    pub fn remove(&mut self, id: &str) {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() != before {
            self.persist_or_warn();
        }
    }

    /// Warning from the load at open time, if any
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Warning from the most recent save attempt, if it failed
    pub fn save_warning(&self) -> Option<&str> {
        self.save_warning.as_deref()
    }

    fn persist(&self) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.records)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    // Save failure is non-fatal: the session keeps the in-memory state and
    // the warning is surfaced to the user instead.
    fn persist_or_warn(&mut self) {
        match self.persist() {
            Ok(()) => self.save_warning = None,
            Err(e) => {
                tracing::warn!("Failed to persist collection to {}: {}", self.path.display(), e);
                self.save_warning =
                    Some("changes could not be saved; storage may be full".to_string());
            }
        }
    }
}

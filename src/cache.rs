// src/cache.rs
//! Concurrent keyed stores shared by scan workers.
//!
//! Both stores are keyed by class name. When two files declare the same
//! class name, the record from the lexicographically lowest path wins, no
//! matter which batch finishes first.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::SystemTime;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::types::ClassRecord;

/// Last known record of a class and the scan that produced or confirmed it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub record: ClassRecord,
    pub last_modified: SystemTime,
    pub scan_id: u64,
}

/// Records kept across scans of one [`crate::analysis::Scanner`].
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: DashMap<String, CacheEntry>,
}

impl MetadataCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached record when it came from `path` and is at least as
    /// new as `modified`. A hit is claimed for `scan_id`.
    #[must_use]
    pub fn unchanged(
        &self,
        class_name: &str,
        path: &Path,
        modified: SystemTime,
        scan_id: u64,
    ) -> Option<ClassRecord> {
        let mut entry = self.entries.get_mut(class_name)?;
        if entry.record.file_path != path || entry.last_modified < modified {
            return None;
        }
        entry.scan_id = scan_id;
        Some(entry.record.clone())
    }

    /// Stores a freshly built record. Returns false if the existing entry
    /// was kept instead.
    pub fn store(&self, record: &ClassRecord, scan_id: u64) -> bool {
        let fresh = || CacheEntry {
            record: record.clone(),
            last_modified: record.last_modified,
            scan_id,
        };
        match self.entries.entry(record.class_name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(fresh());
                true
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get();
                let stale = current.scan_id < scan_id;
                if stale || record.file_path <= current.record.file_path {
                    slot.insert(fresh());
                    true
                } else {
                    false
                }
            }
        }
    }

    #[must_use]
    pub fn get(&self, class_name: &str) -> Option<CacheEntry> {
        self.entries.get(class_name).map(|e| e.value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A summary record and whether it came from the metadata cache.
#[derive(Debug)]
struct Slot {
    record: ClassRecord,
    reused: bool,
}

/// Class records of the scan in progress.
#[derive(Debug, Default)]
pub struct SummaryStore {
    records: DashMap<String, Slot>,
}

impl SummaryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a freshly built record unless a record from a lower path
    /// already holds the name.
    pub fn insert(&self, record: ClassRecord) -> bool {
        self.place(record, false)
    }

    /// Like [`SummaryStore::insert`], for a record taken from the cache.
    pub fn insert_reused(&self, record: ClassRecord) -> bool {
        self.place(record, true)
    }

    fn place(&self, record: ClassRecord, reused: bool) -> bool {
        match self.records.entry(record.class_name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Slot { record, reused });
                true
            }
            Entry::Occupied(mut slot) => {
                if record.file_path < slot.get().record.file_path {
                    slot.insert(Slot { record, reused });
                    true
                } else {
                    false
                }
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of kept records that came from the cache.
    #[must_use]
    pub fn reused_count(&self) -> usize {
        self.records.iter().filter(|e| e.value().reused).count()
    }

    /// Moves every record out into an ordered map for the post-pass.
    #[must_use]
    pub fn drain_sorted(&self) -> BTreeMap<String, ClassRecord> {
        let keys: Vec<String> = self.records.iter().map(|e| e.key().clone()).collect();
        keys.into_iter()
            .filter_map(|k| self.records.remove(&k))
            .map(|(name, slot)| (name, slot.record))
            .collect()
    }
}

use super::StorageBackend;
use crate::error::{CatalogError, Result};
use crate::model::is_record_file_name;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// Exports work on a cloned snapshot, so the backend never crosses threads.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<BTreeMap<String, Vec<u8>>>,
    fail_writes: Cell<bool>,
    fail_reads: Cell<bool>,
    fail_deletes: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.set(fail);
    }

    /// Store raw bytes under `name`, bypassing failure simulation.
    pub fn insert_raw(&self, name: &str, bytes: impl Into<Vec<u8>>) {
        self.entries
            .borrow_mut()
            .insert(name.to_string(), bytes.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.borrow().contains_key(name)
    }

    pub fn entry_names(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    fn simulated(&self, name: &str, what: &str) -> CatalogError {
        CatalogError::persistence(
            self.entry_path(name),
            io::Error::other(format!("simulated {} error", what)),
        )
    }
}

impl StorageBackend for MemBackend {
    fn list_entries(&self) -> Result<Vec<String>> {
        Ok(self
            .entries
            .borrow()
            .keys()
            .filter(|name| is_record_file_name(name))
            .cloned()
            .collect())
    }

    fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        if self.fail_reads.get() {
            return Err(self.simulated(name, "read"));
        }
        self.entries.borrow().get(name).cloned().ok_or_else(|| {
            CatalogError::persistence(
                self.entry_path(name),
                io::Error::from(io::ErrorKind::NotFound),
            )
        })
    }

    fn write_entry(&self, name: &str, bytes: &[u8]) -> Result<()> {
        if self.fail_writes.get() {
            return Err(self.simulated(name, "write"));
        }
        self.insert_raw(name, bytes);
        Ok(())
    }

    fn delete_entry(&self, name: &str) -> Result<()> {
        if self.fail_deletes.get() {
            return Err(self.simulated(name, "delete"));
        }
        match self.entries.borrow_mut().remove(name) {
            Some(_) => Ok(()),
            None => Err(CatalogError::persistence(
                self.entry_path(name),
                io::Error::from(io::ErrorKind::NotFound),
            )),
        }
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", name))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::codec;
    use crate::model::{Record, RecordFields};

    pub fn record(id: &str, title: &str) -> Record {
        Record::new(
            id,
            RecordFields::new(
                title,
                format!("Author of {}", title),
                "Ace Books",
                format!("About {}", title),
            ),
        )
    }

    /// A backend pre-populated with encoded records.
    pub fn backend_with(records: &[Record]) -> MemBackend {
        let backend = MemBackend::new();
        for r in records {
            let bytes = codec::encode(r).expect("encode fixture record");
            backend.insert_raw(&r.file_name(), bytes);
        }
        backend
    }
}

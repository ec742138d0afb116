use super::StorageBackend;
use crate::codec;
use crate::error::{CatalogError, Result};
use crate::model::{record_file_name, Record, RecordFields};
use log::{debug, info, warn};

/// Outcome of scanning the records directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    /// One entry per file that was skipped, in scan order.
    pub skipped: Vec<CatalogError>,
}

/// The in-memory catalog, mirrored entry-for-entry to a [`StorageBackend`].
///
/// Every mutating call persists first and changes memory only once the
/// backend has accepted the change.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
    records: Vec<Record>,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Builds the store from every record file the backend lists.
    ///
    /// Files that cannot be read or decoded are skipped and reported; only a
    /// failure to list the backend itself is an error.
    pub fn load(backend: B) -> Result<(Self, LoadReport)> {
        let names = backend.list_entries()?;
        let mut report = LoadReport::default();
        let mut records: Vec<Record> = Vec::with_capacity(names.len());

        for name in names {
            match read_record(&backend, &name) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("skipping {}: {}", name, e);
                    report.skipped.push(e);
                }
            }
        }

        report.loaded = records.len();
        info!(
            "loaded {} record(s), skipped {}",
            report.loaded,
            report.skipped.len()
        );
        Ok((Self { backend, records }, report))
    }

    /// An empty store over `backend`, ignoring anything it already holds.
    pub fn empty(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
        }
    }

    pub fn add(&mut self, record: Record) -> Result<()> {
        if self.contains(&record.id) {
            return Err(CatalogError::DuplicateId(record.id));
        }
        self.persist(&record)?;
        debug!("added record {}", record.id);
        self.records.push(record);
        Ok(())
    }

    pub fn update(&mut self, id: &str, fields: RecordFields) -> Result<&Record> {
        let pos = self.position(id)?;

        let mut updated = self.records[pos].clone();
        updated.apply(fields);
        self.persist(&updated)?;

        self.records[pos] = updated;
        debug!("updated record {}", id);
        Ok(&self.records[pos])
    }

    /// Deletes the backing file, then the in-memory entry. If the file cannot
    /// be deleted the record stays.
    pub fn remove(&mut self, id: &str) -> Result<Record> {
        let pos = self.position(id)?;

        let name = self.records[pos].file_name();
        self.backend.delete_entry(&name)?;

        let removed = self.records.remove(pos);
        debug!("removed record {}", id);
        Ok(removed)
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    /// An owned copy of the catalog, safe to hand to other threads.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    fn persist(&self, record: &Record) -> Result<()> {
        let bytes = codec::encode(record)?;
        self.backend.write_entry(&record.file_name(), &bytes)
    }
}

fn read_record<B: StorageBackend>(backend: &B, name: &str) -> Result<Record> {
    let bytes = backend.read_entry(name)?;
    let record = codec::decode(&bytes).map_err(|e| CatalogError::MalformedRecord {
        file: name.to_string(),
        reason: e.to_string(),
    })?;

    // The code in the body must match the id in the file name.
    if record.id.is_empty() || record_file_name(&record.id) != name {
        return Err(CatalogError::MalformedRecord {
            file: name.to_string(),
            reason: format!("code {:?} does not match file name", record.id),
        });
    }
    Ok(record)
}

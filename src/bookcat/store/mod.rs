//! # Storage Layer
//!
//! Storage is split in two:
//!
//! - [`StorageBackend`] handles the "how": raw bytes in and out of named
//!   entries. [`fs_backend::FsBackend`] maps entries to files in the records
//!   directory, [`mem_backend::MemBackend`] keeps them in a map for tests.
//! - [`record_store::RecordStore`] handles the "what": the ordered in-memory
//!   catalog, id uniqueness, and keeping every record mirrored to exactly one
//!   entry.
//!
//! ## Storage Format
//!
//! ```text
//! records/
//! ├── record-a1b2c3.json
//! ├── record-9f00de.json
//! └── ...
//! ```
//!
//! Each file holds one record (see [`crate::codec`]). There is no index file:
//! the directory listing is the index.

use crate::error::Result;
use std::path::PathBuf;

pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use record_store::{LoadReport, RecordStore};

/// Raw entry storage for record files.
pub trait StorageBackend {
    /// Names of all entries that follow the record file naming convention,
    /// sorted by name.
    fn list_entries(&self) -> Result<Vec<String>>;

    fn read_entry(&self, name: &str) -> Result<Vec<u8>>;

    /// Create or replace an entry. Must not leave a partially written entry
    /// behind on failure.
    fn write_entry(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Delete an entry. Deleting a missing entry is an error.
    fn delete_entry(&self, name: &str) -> Result<()>;

    /// Where the entry lives. For `MemBackend` this is a virtual path.
    fn entry_path(&self, name: &str) -> PathBuf;
}

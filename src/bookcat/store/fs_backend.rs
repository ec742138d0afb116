use super::StorageBackend;
use crate::error::{CatalogError, Result};
use crate::model::is_record_file_name;
use log::debug;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Opens the records directory, creating it if needed.
    ///
    /// Fails if the directory can neither be found nor created, or exists
    /// but cannot be listed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        fs::read_dir(&root).map_err(|e| {
            CatalogError::Store(format!(
                "Records directory {} is not readable: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| {
        CatalogError::Store(format!(
            "Could not create records directory {}: {}",
            path.display(),
            e
        ))
    })
}

/// Writes `bytes` to a hidden temp file next to `target`, then renames it
/// into place. On failure `target` is untouched and the temp file is gone.
pub(crate) fn write_atomically(target: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("entry");
    let tmp = dir.join(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()));

    let written = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, target));

    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

impl StorageBackend for FsBackend {
    fn list_entries(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| CatalogError::persistence(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::persistence(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                if is_record_file_name(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(name);
        fs::read(&path).map_err(|e| CatalogError::persistence(path, e))
    }

    fn write_entry(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let target = self.entry_path(name);
        write_atomically(&target, bytes).map_err(|e| CatalogError::persistence(&target, e))?;
        debug!("wrote {}", target.display());
        Ok(())
    }

    fn delete_entry(&self, name: &str) -> Result<()> {
        let path = self.entry_path(name);
        fs::remove_file(&path).map_err(|e| CatalogError::persistence(&path, e))?;
        debug!("deleted {}", path.display());
        Ok(())
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

use crate::commands::{not_found, CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, id: &str) -> Result<CmdResult> {
    match store.remove(id) {
        Ok(record) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!(
                "Record deleted ({}): {}",
                record.id, record.title
            )));
            Ok(result.with_affected_records(vec![record]))
        }
        Err(CatalogError::NotFound(_)) => Ok(not_found(id)),
        Err(e) => Err(e),
    }
}

use crate::commands::{not_found, CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::model::RecordFields;
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: &str,
    fields: RecordFields,
) -> Result<CmdResult> {
    match store.update(id, fields) {
        Ok(record) => {
            let record = record.clone();
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!(
                "Record updated ({}): {}",
                record.id, record.title
            )));
            Ok(result.with_affected_records(vec![record]))
        }
        Err(CatalogError::NotFound(_)) => Ok(not_found(id)),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::store::mem_backend::fixtures::record;
    use crate::store::{MemBackend, StorageBackend};

    #[test]
    fn updates_fields_and_file() {
        let mut store = RecordStore::empty(MemBackend::new());
        store.add(record("aaaaaa", "Old")).unwrap();

        let fields = RecordFields::new("New", "Writer", "House", "Blurb");
        let result = run(&mut store, "aaaaaa", fields.clone()).unwrap();

        assert_eq!(result.affected_records[0].fields(), fields);
        let bytes = store.backend().read_entry("record-aaaaaa.json").unwrap();
        assert_eq!(codec::decode(&bytes).unwrap().fields(), fields);
    }

    #[test]
    fn missing_id_is_reported() {
        let mut store = RecordStore::empty(MemBackend::new());
        let result = run(&mut store, "zzzzzz", RecordFields::default()).unwrap();
        assert!(result.has_errors());
        assert!(result.messages[0].content.contains("zzzzzz"));
    }
}

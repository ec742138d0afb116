use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::id::{unique_id, IdGenerator};
use crate::model::{Record, RecordFields};
use crate::store::{RecordStore, StorageBackend};

pub fn run<B, G>(store: &mut RecordStore<B>, ids: &mut G, fields: RecordFields) -> Result<CmdResult>
where
    B: StorageBackend,
    G: IdGenerator + ?Sized,
{
    let id = unique_id(ids, |candidate| store.contains(candidate));
    let record = Record::new(id, fields);
    store.add(record.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record added ({}): {}",
        record.id, record.title
    )));
    Ok(result.with_affected_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::id::{ScriptedGenerator, UuidGenerator};
    use crate::store::MemBackend;

    fn fields(title: &str) -> RecordFields {
        RecordFields::new(title, "Author", "Publisher", "Description")
    }

    #[test]
    fn adds_and_persists() {
        let mut store = RecordStore::empty(MemBackend::new());
        let result = run(&mut store, &mut UuidGenerator, fields("Dune")).unwrap();

        let added = &result.affected_records[0];
        assert_eq!(added.title, "Dune");
        assert_eq!(added.id.len(), 6);
        assert!(store.backend().contains(&added.file_name()));
    }

    #[test]
    fn repeated_raw_id_still_yields_distinct_records() {
        let mut store = RecordStore::empty(MemBackend::new());
        let mut ids = ScriptedGenerator::new(["abcdef", "abcdef", "abcdef", "123456"]);

        let first = run(&mut store, &mut ids, fields("One")).unwrap();
        let second = run(&mut store, &mut ids, fields("Two")).unwrap();

        assert_eq!(first.affected_records[0].id, "abcdef");
        assert_eq!(second.affected_records[0].id, "123456");
        assert_eq!(store.len(), 2);
        assert_eq!(ids.calls, 4);
    }

    #[test]
    fn write_failure_propagates() {
        let mut store = RecordStore::empty(MemBackend::new());
        store.backend().set_fail_writes(true);

        let err = run(&mut store, &mut UuidGenerator, fields("Dune")).unwrap_err();

        assert!(matches!(err, CatalogError::Persistence { .. }));
        assert!(store.is_empty());
    }
}

use crate::commands::{CmdMessage, CmdResult};
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> CmdResult {
    let mut result = CmdResult::default().with_listed_records(store.snapshot());
    if result.listed_records.is_empty() {
        result.add_message(CmdMessage::info("No records available."));
    }
    result
}

//! # API Facade
//!
//! [`CatalogApi`] is the single entry point for catalog operations. It owns
//! the record store, the id generator and the exporter, and dispatches each
//! call to the matching function in [`crate::commands`].
//!
//! The API does no I/O of its own beyond what the store and exporter do, and
//! returns structured [`CmdResult`]s for the client to present.
//!
//! ## Generic Over Backend and Renderer
//!
//! - Production: `CatalogApi<FsBackend, PdfRenderer>`
//! - Testing: `CatalogApi<MemBackend, _>` with any test renderer

use crate::commands;
use crate::error::Result;
use crate::export::{ExportSelector, Exporter};
use crate::id::{IdGenerator, UuidGenerator};
use crate::model::{Record, RecordFields};
use crate::render::Renderer;
use crate::store::{RecordStore, StorageBackend};

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct CatalogApi<B: StorageBackend, R: Renderer + 'static> {
    store: RecordStore<B>,
    ids: Box<dyn IdGenerator>,
    exporter: Exporter<R>,
}

impl<B: StorageBackend, R: Renderer + 'static> CatalogApi<B, R> {
    pub fn new(store: RecordStore<B>, exporter: Exporter<R>) -> Self {
        Self {
            store,
            ids: Box::new(UuidGenerator),
            exporter,
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn add_record(&mut self, fields: RecordFields) -> Result<CmdResult> {
        commands::add::run(&mut self.store, self.ids.as_mut(), fields)
    }

    pub fn list_records(&self) -> CmdResult {
        commands::list::run(&self.store)
    }

    pub fn get_record(&self, id: &str) -> Option<&Record> {
        self.store.get(id)
    }

    pub fn delete_record(&mut self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn edit_record(&mut self, id: &str, fields: RecordFields) -> Result<CmdResult> {
        commands::edit::run(&mut self.store, id, fields)
    }

    pub fn export(&self, selector: &ExportSelector) -> Result<CmdResult> {
        commands::export::run(&self.store, &self.exporter, selector)
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ScriptedGenerator;
    use crate::render::PdfRenderer;
    use crate::store::MemBackend;
    use tempfile::{tempdir, TempDir};

    fn api() -> (CatalogApi<MemBackend, PdfRenderer>, TempDir) {
        let dir = tempdir().unwrap();
        let store = RecordStore::empty(MemBackend::new());
        let exporter = Exporter::new(PdfRenderer::new(), dir.path());
        (CatalogApi::new(store, exporter), dir)
    }

    fn fields(title: &str) -> RecordFields {
        RecordFields::new(title, "A", "P", "D")
    }

    #[test]
    fn add_then_list() {
        let (mut api, _dir) = api();
        api.add_record(fields("Dune")).unwrap();

        let listed = api.list_records().listed_records;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Dune");
    }

    #[test]
    fn uses_injected_generator() {
        let (api, _dir) = api();
        let mut api = api.with_id_generator(ScriptedGenerator::new(["A1B2C3"]));

        api.add_record(fields("Dune")).unwrap();

        assert!(api.get_record("A1B2C3").is_some());
    }

    #[test]
    fn edit_and_delete_dispatch() {
        let (api, _dir) = api();
        let mut api = api.with_id_generator(ScriptedGenerator::new(["aaaaaa"]));
        api.add_record(fields("Dune")).unwrap();

        api.edit_record("aaaaaa", fields("Dune Messiah")).unwrap();
        assert_eq!(api.get_record("aaaaaa").unwrap().title, "Dune Messiah");

        api.delete_record("aaaaaa").unwrap();
        assert!(api.store().is_empty());
    }

    #[test]
    fn export_dispatch_writes_documents() {
        let (api, dir) = api();
        let mut api = api.with_id_generator(ScriptedGenerator::new(["aaaaaa", "bbbbbb"]));
        api.add_record(fields("One")).unwrap();
        api.add_record(fields("Two")).unwrap();

        let result = api.export(&ExportSelector::All).unwrap();

        assert_eq!(result.document_paths.len(), 2);
        assert!(dir.path().join("record-aaaaaa.pdf").exists());
        assert!(dir.path().join("record-bbbbbb.pdf").exists());
    }
}

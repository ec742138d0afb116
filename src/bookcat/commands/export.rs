use crate::commands::{not_found, CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::export::{ExportSelector, Exporter};
use crate::render::Renderer;
use crate::store::{RecordStore, StorageBackend};

pub fn run<B, R>(
    store: &RecordStore<B>,
    exporter: &Exporter<R>,
    selector: &ExportSelector,
) -> Result<CmdResult>
where
    B: StorageBackend,
    R: Renderer + 'static,
{
    if store.is_empty() && *selector == ExportSelector::All {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No records to export."));
        return Ok(res);
    }

    let snapshot = store.snapshot();
    let report = match exporter.export(&snapshot, selector) {
        Ok(report) => report,
        Err(CatalogError::NotFound(id)) => return Ok(not_found(&id)),
        Err(e) => return Err(e),
    };

    let mut result = CmdResult::default();
    for (id, path) in &report.exported {
        let title = store.get(id).map(|r| r.title.as_str()).unwrap_or_default();
        result.add_message(CmdMessage::success(format!(
            "Exported {} ({}) to {}",
            title,
            id,
            path.display()
        )));
    }
    for (id, err) in &report.failed {
        result.add_message(CmdMessage::error(format!(
            "Failed to export {}: {}",
            id, err
        )));
    }

    let total = report.completed();
    if report.all_succeeded() {
        if *selector == ExportSelector::All {
            result.add_message(CmdMessage::success(format!(
                "All {} record(s) exported.",
                total
            )));
        }
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} of {} export(s) failed.",
            report.failed.len(),
            total
        )));
    }

    let paths = report.exported.into_iter().map(|(_, p)| p).collect();
    Ok(result.with_document_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Record;
    use crate::render::PdfRenderer;
    use crate::store::mem_backend::fixtures::record;
    use crate::store::MemBackend;
    use tempfile::tempdir;

    struct FailFor(&'static str);

    impl Renderer for FailFor {
        fn render(&self, record: &Record) -> Result<Vec<u8>> {
            if record.id == self.0 {
                return Err(CatalogError::Render {
                    id: record.id.clone(),
                    reason: "boom".into(),
                });
            }
            Ok(b"%PDF-stub".to_vec())
        }
    }

    fn store_with(ids: &[&str]) -> RecordStore<MemBackend> {
        let mut store = RecordStore::empty(MemBackend::new());
        for id in ids {
            store.add(record(id, &format!("Book {}", id))).unwrap();
        }
        store
    }

    #[test]
    fn exports_one() {
        let dir = tempdir().unwrap();
        let store = store_with(&["A1B2C3", "bbbbbb"]);
        let exporter = Exporter::new(PdfRenderer::new(), dir.path());

        let result = run(&store, &exporter, &ExportSelector::One("A1B2C3".into())).unwrap();

        assert_eq!(result.document_paths, vec![dir.path().join("record-A1B2C3.pdf")]);
        assert!(!result.has_errors());
    }

    #[test]
    fn missing_id_is_reported() {
        let dir = tempdir().unwrap();
        let store = store_with(&["aaaaaa"]);
        let exporter = Exporter::new(PdfRenderer::new(), dir.path());

        let result = run(&store, &exporter, &ExportSelector::One("zzzzzz".into())).unwrap();

        assert!(result.has_errors());
        assert!(result.document_paths.is_empty());
    }

    #[test]
    fn empty_catalog_exports_nothing() {
        let dir = tempdir().unwrap();
        let store = store_with(&[]);
        let exporter = Exporter::new(PdfRenderer::new(), dir.path().join("pdf"));

        let result = run(&store, &exporter, &ExportSelector::All).unwrap();

        assert_eq!(result.messages[0].content, "No records to export.");
        assert!(!dir.path().join("pdf").exists());
    }

    #[test]
    fn partial_failure_reports_each_record() {
        let dir = tempdir().unwrap();
        let store = store_with(&["aaaaaa", "bbbbbb", "cccccc"]);
        let exporter = Exporter::new(FailFor("bbbbbb"), dir.path());

        let result = run(&store, &exporter, &ExportSelector::All).unwrap();

        assert_eq!(result.document_paths.len(), 2);
        let errors = result
            .messages
            .iter()
            .filter(|m| m.level == MessageLevel::Error)
            .count();
        assert_eq!(errors, 1);
        assert_eq!(
            result.messages.last().unwrap().content,
            "1 of 3 export(s) failed."
        );
    }
}

//! # Export Pipeline
//!
//! Renders records to `<output_dir>/record-<id>.pdf`, one worker thread per
//! record.
//!
//! ```text
//! export()
//!   │  spawn one worker per record (own clone of the record)
//!   ├──► worker ─ render ─ write ─┐
//!   ├──► worker ─ render ─ write ─┤  Completion (mpsc)
//!   └──► worker ─ render ─ write ─┤
//!                                 ▼
//!   caller: recv() exactly N times ──► ExportReport
//!
//! coordinator: join every worker, stand in for any that died
//!              without signalling, then drop the last sender
//! ```
//!
//! A failed render is still a completion: it is counted, logged and reported,
//! and never stops its siblings. There is no cancellation.

use crate::error::{CatalogError, Result};
use crate::model::Record;
use crate::render::Renderer;
use crate::store::fs_backend::write_atomically;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// Which records to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSelector {
    One(String),
    All,
}

impl FromStr for ExportSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            Ok(ExportSelector::All)
        } else {
            Ok(ExportSelector::One(s.to_string()))
        }
    }
}

/// Signal sent once per record, whatever the outcome.
#[derive(Debug)]
pub struct Completion {
    pub id: String,
    pub outcome: Result<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub exported: Vec<(String, PathBuf)>,
    pub failed: Vec<(String, CatalogError)>,
}

impl ExportReport {
    /// Number of completion signals received.
    pub fn completed(&self) -> usize {
        self.exported.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    fn push(&mut self, completion: Completion) {
        match completion.outcome {
            Ok(path) => self.exported.push((completion.id, path)),
            Err(e) => {
                warn!("export of {} failed: {}", completion.id, e);
                self.failed.push((completion.id, e));
            }
        }
    }
}

pub struct Exporter<R: Renderer + 'static> {
    renderer: Arc<R>,
    output_dir: PathBuf,
}

impl<R: Renderer + 'static> Exporter<R> {
    pub fn new(renderer: R, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer: Arc::new(renderer),
            output_dir: output_dir.into(),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Exports from `snapshot` and blocks until every selected record has
    /// signalled completion.
    ///
    /// Fails only if the selected id is not in the snapshot or the output
    /// directory cannot be created. Per-record failures land in the report.
    pub fn export(&self, snapshot: &[Record], selector: &ExportSelector) -> Result<ExportReport> {
        let targets = match selector {
            ExportSelector::One(id) => {
                let record = snapshot
                    .iter()
                    .find(|r| &r.id == id)
                    .cloned()
                    .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
                vec![record]
            }
            ExportSelector::All => snapshot.to_vec(),
        };

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| CatalogError::persistence(&self.output_dir, e))?;

        let report = self.run(targets)?;
        info!(
            "export finished: {} written, {} failed",
            report.exported.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn run(&self, records: Vec<Record>) -> Result<ExportReport> {
        let expected = records.len();
        let (tx, rx) = mpsc::channel::<Completion>();

        let mut workers = Vec::with_capacity(expected);
        for record in records {
            let id = record.id.clone();
            let worker_tx = tx.clone();
            let renderer = Arc::clone(&self.renderer);
            let dir = self.output_dir.clone();

            let spawned = thread::Builder::new()
                .name(format!("export-{}", id))
                .spawn(move || {
                    let outcome = export_one(renderer.as_ref(), &record, &dir);
                    let _ = worker_tx.send(Completion {
                        id: record.id,
                        outcome,
                    });
                });

            match spawned {
                Ok(handle) => workers.push((id, handle)),
                Err(e) => {
                    let _ = tx.send(Completion {
                        id,
                        outcome: Err(CatalogError::Io(e)),
                    });
                }
            }
        }

        let coordinator = thread::Builder::new()
            .name("export-coordinator".to_string())
            .spawn(move || {
                for (id, handle) in workers {
                    if handle.join().is_err() {
                        let _ = tx.send(Completion {
                            id: id.clone(),
                            outcome: Err(CatalogError::Render {
                                id,
                                reason: "worker panicked".to_string(),
                            }),
                        });
                    }
                }
                debug!("all export workers joined");
            })?;

        let mut report = ExportReport::default();
        for _ in 0..expected {
            match rx.recv() {
                Ok(completion) => report.push(completion),
                // Every sender is gone; nothing more can arrive.
                Err(_) => break,
            }
        }
        let _ = coordinator.join();
        Ok(report)
    }
}

fn export_one<R: Renderer + ?Sized>(renderer: &R, record: &Record, dir: &Path) -> Result<PathBuf> {
    let bytes = renderer.render(record)?;
    let path = dir.join(record.document_name());
    write_atomically(&path, &bytes).map_err(|e| CatalogError::persistence(&path, e))?;
    debug!("rendered {} to {}", record.id, path.display());
    Ok(path)
}

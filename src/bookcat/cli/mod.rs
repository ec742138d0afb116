//! # CLI Layer
//!
//! This module is **one possible UI client** for bookcat. It is the only place
//! in the codebase that:
//! - Parses arguments
//! - Reads from stdin and writes to stdout
//! - Initializes logging
//! - Decides exit codes
//!
//! ## Structure
//!
//! - `setup`: clap argument definitions and version string
//! - `menu`: the numbered interactive menu, generic over input and output
//! - `render`: message and record table formatting

mod menu;
mod render;
mod setup;

use bookcat::api::CatalogApi;
use bookcat::config::CatalogConfig;
use bookcat::error::Result;
use bookcat::export::Exporter;
use bookcat::logging::init_logger;
use bookcat::render::PdfRenderer;
use bookcat::store::{FsBackend, RecordStore};
use clap::Parser;
use colored::Colorize;
use log::debug;
use menu::Console;
use setup::Cli;
use std::io::{self, Write};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = init_logger(cli.verbose) {
        eprintln!("Warning: logger already initialized: {}", e);
    }

    let config = CatalogConfig::load(&cli.root)?;
    let records_dir = config.records_path(&cli.root);
    let output_dir = config.output_path(&cli.root);
    debug!(
        "records in {}, documents to {}",
        records_dir.display(),
        output_dir.display()
    );

    let backend = FsBackend::open(records_dir)?;
    let (store, report) = RecordStore::load(backend)?;
    let exporter = Exporter::new(PdfRenderer::new(), output_dir);
    let mut api = CatalogApi::new(store, exporter);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    for skipped in &report.skipped {
        writeln!(
            console.out(),
            "{}",
            format!("Skipped record file: {}", skipped).yellow()
        )?;
    }

    menu::run(&mut api, &mut console)?;
    Ok(())
}

//! # Bookcat Architecture
//!
//! Bookcat is a **UI-agnostic book catalog library**. The interactive menu in
//! `main.rs` is one client of it; nothing below the CLI layer writes to the
//! terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, runs the numbered menu, prints output  │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the record store, id generator and exporter         │
//! │  - Dispatches to commands, returns `Result<CmdResult>`      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add / list / delete / edit / export sequencing           │
//! │  - "Not found" becomes a message, not an error              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                 ┌────────────┴─────────────┐
//!                 ▼                          ▼
//! ┌───────────────────────────┐  ┌──────────────────────────────┐
//! │  Storage (store/)         │  │  Export (export.rs)          │
//! │  RecordStore over a       │  │  one worker thread per       │
//! │  StorageBackend           │  │  record, counted completions │
//! └───────────────────────────┘  └──────────────────────────────┘
//! ```
//!
//! ## Consistency
//!
//! The [`store::RecordStore`] is the only owner of the in-memory catalog. Every
//! mutating call writes (or deletes) the backing `record-<id>.json` file before
//! it touches memory, so a failed write never leaves the two out of step.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each menu action
//! - [`store`]: Record store and storage backends
//! - [`export`]: Concurrent export pipeline
//! - [`render`]: Record to PDF rendering
//! - [`codec`]: JSON encoding of records
//! - [`id`]: Short identifier generation
//! - [`model`]: Core data types (`Record`, `RecordFields`)
//! - [`config`]: Catalog directory configuration
//! - [`logging`]: Logger setup for binaries
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod id;
pub mod logging;
pub mod model;
pub mod render;
pub mod store;

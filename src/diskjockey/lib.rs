//! # DiskJockey Architecture
//!
//! DiskJockey catalogs removable media (optical disks, external drives): it
//! records every file and directory found on a medium under a durable,
//! never-reused id, so you can later find which disk holds a file without
//! mounting any of them.
//!
//! Like the rest of the code base, it is a library that happens to have a CLI
//! client (`dj`), not the other way around.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (id strings → MediumId)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Catalog service: catalog, rescan, tag, search, stats     │
//! │  - Uses scanner, allocator and query engine                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CatalogStore trait                                       │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ids
//!
//! Every medium gets the next value of a persisted counter, rendered as a
//! zero-padded decimal (`001`, `002`, ...). The counter is saved in the same
//! write that appends the record, and all database writes in a process go
//! through one lock in [`allocator::IdAllocator`], so ids are unique and never
//! reused even if a catalog run fails half way.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Catalog service operations
//! - [`scanner`]: Recursive listing of a medium's contents
//! - [`allocator`]: Durable id allocation and serialized database writes
//! - [`query`]: Tag, label and path queries plus statistics
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Records, ids, dates and the catalog document
//! - [`tags`]: Tag validation
//! - [`config`]: User settings
//! - [`init`]: Locating the data directory and opening the catalog
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod allocator;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod query;
pub mod scanner;
pub mod store;
pub mod tags;

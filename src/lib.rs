//! lectern: personal research library CLI
//!
//! Three functional areas:
//! - a collections data-access layer over SQLite (the `store` module),
//! - a thin client for the external ingestion/search API (the `api` module),
//! - a synthetic EPUB/PDF/Markdown fixture-corpus generator (the `fixtures`
//!   module) used to exercise the ingestion pipeline's edge cases.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod progress;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use store::CollectionStore;

//! Core of the pivot data explorer.
//!
//! Everything in this crate is browser-independent so it can be exercised by
//! plain unit tests: the data model, the filter store, the reconciliation
//! controller that keeps the pivot widget in step with filters and saved
//! configurations, and the file ingestion used by the upload control.

pub mod analysis;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter_editor;
pub mod filter_store;
pub mod gesture;
pub mod ingest;
pub mod model;
pub mod pivot;
pub mod requests;
pub mod sample;

pub use error::{ExplorerError, Result};

//! Shared data model: rows and cell values, column filters, the pivot
//! configuration and saved configuration snapshots.

pub mod configuration;
pub mod filter;
pub mod pivot;
pub mod row;

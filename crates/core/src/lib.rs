//! Trade Ledger Core - Domain entities, services, and traits.
//!
//! This crate holds the project ledger business logic: the supplier, buyer
//! and costing calculators, the project service and status-grouped reporting.
//! It is database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod projects;
pub mod reports;

// Re-export common types from the projects module
pub use projects::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

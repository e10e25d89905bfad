//! SQLite storage implementation for the trade ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `tradeledger-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for the domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod projects;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, open_database, run_migrations, spawn_writer,
    DbConnection, DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use projects::ProjectRepository;

// Re-export from tradeledger-core for convenience
pub use tradeledger_core::errors::{DatabaseError, Error, Result};

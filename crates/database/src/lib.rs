//! bookden persistence layer
//!
//! SQLite via sqlx. This crate is the storage collaborator the import
//! pipeline talks to: book CRUD, indexed duplicate lookups, and the
//! atomic find-or-create operations for authors and genres.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::{connect, DatabaseConfig, DbPool};
pub use migrations::{current_version, run_migrations, verify_integrity};

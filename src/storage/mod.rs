//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with a single table:
//! - Pets(_id, name, breed, gender, weight)
//!
//! The schema version lives in `PRAGMA user_version`; any version bump
//! drops and recreates the table.

pub mod schema;
pub mod sqlite;

pub use sqlite::{PetDbHelper, DbStats};

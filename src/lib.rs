//! # Pets - shelter record store
//!
//! A content-provider style gateway over a single SQLite table of pets.
//!
//! Pets provides:
//! - A static contract naming the table, its columns and the content URIs
//! - Structural routing of `content://` identifiers to the collection or one row
//! - A storage helper that owns the SQLite connection and its schema version
//! - Validated insert/update/delete with synchronous change notification
//! - Restartable cursors that watch the URI they were queried from

pub mod contract;
pub mod uri;
pub mod values;
pub mod storage;
pub mod notify;
pub mod cursor;
pub mod provider;
pub mod record;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use contract::{Gender, PetEntry};
pub use uri::{ContentUri, Resource};
pub use values::ContentValues;
pub use storage::PetDbHelper;
pub use notify::{ChangeNotifier, ChangeObserver, ObserverId, Subscription};
pub use cursor::{Cursor, CursorRow};
pub use provider::PetProvider;
pub use record::{Pet, PetForm};

/// Result type alias for Pets operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Pets operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported resource: {0}")]
    UnsupportedResource(String),

    #[error("{operation} is not supported for {uri}")]
    UnsupportedOperation { operation: &'static str, uri: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to insert row for {0}")]
    InsertFailed(String),

    #[error("Can't downgrade database from version {found} to {requested}")]
    SchemaDowngrade { found: i64, requested: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

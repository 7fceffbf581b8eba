//! SQLite storage implementation

use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use super::schema;
use crate::contract::PetEntry;
use crate::{Error, Result};

/// How long a writer waits on SQLite's lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_millis(500);

/// Owns the single SQLite connection behind the pets provider.
///
/// The connection is opened lazily on the first `readable()` or
/// `writable()` call. Opening compares `PRAGMA user_version` with the
/// requested version: a fresh database gets the table created, an older
/// one is upgraded (drop and recreate), a newer one is refused.
pub struct PetDbHelper {
    path: Option<PathBuf>,
    version: i64,
    conn: OnceCell<Connection>,
}

impl PetDbHelper {
    /// Helper for a database file (created if it doesn't exist)
    pub fn new(path: impl Into<PathBuf>, version: i64) -> Self {
        Self {
            path: Some(path.into()),
            version,
            conn: OnceCell::new(),
        }
    }

    /// Helper for a private in-memory database (for testing)
    pub fn in_memory(version: i64) -> Self {
        Self {
            path: None,
            version,
            conn: OnceCell::new(),
        }
    }

    /// Backing file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Schema version this helper opens the database at
    pub fn requested_version(&self) -> i64 {
        self.version
    }

    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Connection for queries
    pub fn readable(&self) -> Result<&Connection> {
        self.connection()
    }

    /// Connection for inserts, updates and deletes. SQLite serializes
    /// concurrent writers on its own lock.
    pub fn writable(&self) -> Result<&Connection> {
        self.connection()
    }

    /// Close the connection. The next access reopens it.
    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            tracing::debug!("Closed database {:?}", self.path);
        }
    }

    /// Create the pets table if it is absent
    pub fn ensure_schema(&self) -> Result<()> {
        Self::on_create(self.writable()?)
    }

    /// Drop the pets table and recreate it empty, recording `new_version`.
    /// No rows survive. The helper's requested version follows, so later
    /// opens through it match the stored one.
    pub fn upgrade(&mut self, old_version: i64, new_version: i64) -> Result<()> {
        if new_version < old_version {
            return Err(Error::SchemaDowngrade {
                found: old_version,
                requested: new_version,
            });
        }

        let conn = self.writable()?;
        let tx = conn.unchecked_transaction()?;
        Self::on_upgrade(&tx, old_version, new_version)?;
        set_user_version(&tx, new_version)?;
        tx.commit()?;

        self.version = new_version;
        Ok(())
    }

    /// Schema version currently stored in the database
    pub fn version(&self) -> Result<i64> {
        user_version(self.readable()?)
    }

    /// Count all pets
    pub fn count_pets(&self) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", PetEntry::TABLE_NAME);
        let count: i64 = self.readable()?.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            path: self.path.clone(),
            version: self.version()?,
            pets: self.count_pets()?,
        })
    }

    fn connection(&self) -> Result<&Connection> {
        if let Some(conn) = self.conn.get() {
            return Ok(conn);
        }

        let conn = match &self.path {
            Some(path) => Connection::open(path)?,
            None => Connection::open_in_memory()?,
        };
        conn.busy_timeout(BUSY_TIMEOUT)?;
        self.migrate(&conn)?;

        Ok(self.conn.get_or_init(|| conn))
    }

    fn migrate(&self, conn: &Connection) -> Result<()> {
        let found = user_version(conn)?;

        if found == self.version {
            return Ok(());
        }

        if found > self.version {
            return Err(Error::SchemaDowngrade {
                found,
                requested: self.version,
            });
        }

        let tx = conn.unchecked_transaction()?;
        if found == 0 {
            tracing::info!("Creating {} schema at version {}", PetEntry::TABLE_NAME, self.version);
            Self::on_create(&tx)?;
        } else {
            Self::on_upgrade(&tx, found, self.version)?;
        }
        set_user_version(&tx, self.version)?;
        tx.commit()?;
        Ok(())
    }

    fn on_create(conn: &Connection) -> Result<()> {
        conn.execute(&schema::create_pets_table(), [])?;
        Ok(())
    }

    fn on_upgrade(conn: &Connection, old_version: i64, new_version: i64) -> Result<()> {
        tracing::info!(
            "Upgrading {} schema {} -> {}, dropping all rows",
            PetEntry::TABLE_NAME,
            old_version,
            new_version
        );
        conn.execute(&schema::drop_pets_table(), [])?;
        Self::on_create(conn)
    }
}

fn user_version(conn: &Connection) -> Result<i64> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

fn set_user_version(conn: &Connection, version: i64) -> Result<()> {
    conn.pragma_update(None, "user_version", version)?;
    Ok(())
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub path: Option<PathBuf>,
    pub version: i64,
    pub pets: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        match &self.path {
            Some(path) => writeln!(f, "  Path: {}", path.display())?,
            None => writeln!(f, "  Path: (in memory)")?,
        }
        writeln!(f, "  Schema version: {}", self.version)?;
        writeln!(f, "  Pets: {}", self.pets)
    }
}

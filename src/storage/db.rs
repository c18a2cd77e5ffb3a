use redb::{Database as RedbDatabase, ReadTransaction, ReadableTable, WriteTransaction};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::tables::*;

/// File name of the store inside the data directory.
pub const DATABASE_FILE: &str = "site-cache.redb";

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Commit error: {0}")]
    Commit(Box<redb::CommitError>),
    #[error("Database error: {0}")]
    Redb(Box<redb::Error>),
    #[error("Database error: {0}")]
    RedbDatabase(Box<redb::DatabaseError>),
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: u64, supported: u64 },
    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),
    #[error("Storage error: {0}")]
    Storage(Box<redb::StorageError>),
    #[error("Table error: {0}")]
    Table(Box<redb::TableError>),
    #[error("Transaction error: {0}")]
    Transaction(Box<redb::TransactionError>),
}

impl From<redb::CommitError> for DatabaseError {
    fn from(e: redb::CommitError) -> Self {
        DatabaseError::Commit(Box::new(e))
    }
}

impl From<redb::DatabaseError> for DatabaseError {
    fn from(e: redb::DatabaseError) -> Self {
        DatabaseError::RedbDatabase(Box::new(e))
    }
}

impl From<redb::Error> for DatabaseError {
    fn from(e: redb::Error) -> Self {
        DatabaseError::Redb(Box::new(e))
    }
}

impl From<redb::StorageError> for DatabaseError {
    fn from(e: redb::StorageError) -> Self {
        DatabaseError::Storage(Box::new(e))
    }
}

impl From<redb::TableError> for DatabaseError {
    fn from(e: redb::TableError) -> Self {
        DatabaseError::Table(Box::new(e))
    }
}

impl From<redb::TransactionError> for DatabaseError {
    fn from(e: redb::TransactionError) -> Self {
        DatabaseError::Transaction(Box::new(e))
    }
}

pub struct Database {
    db: Arc<RedbDatabase>,
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl Database {
    /// Open or create the store in the given directory and bring the schema up to date.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(data_dir.as_ref())?;
        let db_path = data_dir.as_ref().join(DATABASE_FILE);
        let db = Arc::new(RedbDatabase::create(db_path)?);

        let database = Self { db };
        database.migrate()?;
        Ok(database)
    }

    /// Create missing tables and record the schema version. Runs on every open;
    /// only writes when the store is fresh or older than this build.
    fn migrate(&self) -> Result<(), DatabaseError> {
        let write_txn = self.begin_write()?;
        {
            let mut meta = write_txn.open_table(SCHEMA_META)?;
            let found = meta.get(SCHEMA_VERSION_KEY)?.map(|v| v.value());

            match found {
                Some(version) if version > SCHEMA_VERSION => {
                    return Err(DatabaseError::SchemaTooNew {
                        found: version,
                        supported: SCHEMA_VERSION,
                    });
                }
                Some(version) if version == SCHEMA_VERSION => {}
                previous => {
                    let _ = write_txn.open_table(SITES)?;
                    let _ = write_txn.open_table(FILES)?;
                    let _ = write_txn.open_table(SITE_FILES)?;
                    meta.insert(SCHEMA_VERSION_KEY, SCHEMA_VERSION)?;
                    tracing::info!(
                        from = ?previous,
                        to = SCHEMA_VERSION,
                        "Initialized store schema"
                    );
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Schema version recorded in the store.
    pub fn schema_version(&self) -> Result<Option<u64>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let meta = read_txn.open_table(SCHEMA_META)?;
        Ok(meta.get(SCHEMA_VERSION_KEY)?.map(|v| v.value()))
    }

    /// Begin a read transaction
    pub fn begin_read(&self) -> Result<ReadTransaction, DatabaseError> {
        Ok(self.db.begin_read()?)
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> Result<WriteTransaction, DatabaseError> {
        Ok(self.db.begin_write()?)
    }
}

//! Lazily opened, shared handle to the site store.
//!
//! The store is opened at most once per [`StoreAccessor`]. Concurrent first
//! callers wait on the same initialization, and a failed open is remembered so
//! every caller sees the same error instead of retrying.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::storage::{Database, DatabaseError, FileRecord, SiteRecord};

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(Arc<DatabaseError>),
    #[error("Store read failed: {0}")]
    Read(Arc<DatabaseError>),
    #[error("Store task failed: {0}")]
    Task(String),
}

impl From<DatabaseError> for StoreError {
    fn from(e: DatabaseError) -> Self {
        StoreError::Read(Arc::new(e))
    }
}

/// Read access to imported sites.
///
/// `Ok(None)` means the record does not exist; `Err` means the lookup itself failed.
#[async_trait]
pub trait SiteReader: Send + Sync {
    async fn get_site(&self, site_id: &str) -> Result<Option<SiteRecord>, StoreError>;
    async fn get_file(&self, site_id: &str, path: &str) -> Result<Option<FileRecord>, StoreError>;
}

pub struct StoreAccessor {
    data_dir: PathBuf,
    db: OnceCell<Result<Database, StoreError>>,
}

impl StoreAccessor {
    /// Create an accessor for the store in `data_dir`. Nothing is opened until first use.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db: OnceCell::new(),
        }
    }

    /// Wrap a database that is already open.
    pub fn from_database(db: Database) -> Self {
        Self {
            data_dir: PathBuf::new(),
            db: OnceCell::new_with(Some(Ok(db))),
        }
    }

    /// Open the store, or return the handle from the first successful open.
    pub async fn open(&self) -> Result<&Database, StoreError> {
        let result = self
            .db
            .get_or_init(|| async {
                let data_dir = self.data_dir.clone();
                tracing::debug!(data_dir = %data_dir.display(), "Opening site store");

                match tokio::task::spawn_blocking(move || Database::open(data_dir)).await {
                    Ok(Ok(db)) => Ok(db),
                    Ok(Err(e)) => {
                        tracing::error!(error = %e, "Failed to open site store");
                        Err(StoreError::Open(Arc::new(e)))
                    }
                    Err(e) => Err(StoreError::Task(e.to_string())),
                }
            })
            .await;

        result.as_ref().map_err(Clone::clone)
    }
}

#[async_trait]
impl SiteReader for StoreAccessor {
    async fn get_site(&self, site_id: &str) -> Result<Option<SiteRecord>, StoreError> {
        let db = self.open().await?;
        Ok(db.get_site(site_id)?)
    }

    async fn get_file(&self, site_id: &str, path: &str) -> Result<Option<FileRecord>, StoreError> {
        let db = self.open().await?;
        Ok(db.get_file(site_id, path)?)
    }
}

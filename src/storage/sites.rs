use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::SiteRecord;
use super::tables::*;

impl Database {
    // ========================================================================
    // Site operations
    // ========================================================================

    /// Store a site record. Write side of the import contract.
    pub fn put_site(&self, site: &SiteRecord) -> Result<(), DatabaseError> {
        debug_assert!(!site.id.is_empty(), "site id must not be empty");

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(SITES)?;
            let data = rmp_serde::to_vec_named(site)?;
            table.insert(site.id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get a site by its id
    pub fn get_site(&self, id: &str) -> Result<Option<SiteRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(SITES)?;

        match table.get(id)? {
            Some(data) => {
                let site: SiteRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(site))
            }
            None => Ok(None),
        }
    }
}

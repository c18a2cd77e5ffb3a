use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::{file_key, FileRecord};
use super::tables::*;

impl Database {
    // ========================================================================
    // File operations
    // ========================================================================

    /// Store a file record and update the site index.
    ///
    /// Write side of the import contract; the serving path never calls this.
    pub fn put_file(&self, file: &FileRecord) -> Result<(), DatabaseError> {
        debug_assert!(!file.site_id.is_empty(), "file site_id must not be empty");
        debug_assert_eq!(
            file.key,
            file_key(&file.site_id, &file.path),
            "file key must be derived from site_id and path"
        );

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(FILES)?;
            let data = rmp_serde::to_vec_named(file)?;
            table.insert(file.key.as_str(), data.as_slice())?;

            let mut index = write_txn.open_table(SITE_FILES)?;
            let mut keys: Vec<String> = match index.get(file.site_id.as_str())? {
                Some(v) => rmp_serde::from_slice(v.value())?,
                None => Vec::new(),
            };

            if !keys.contains(&file.key) {
                keys.push(file.key.clone());
                let index_data = rmp_serde::to_vec_named(&keys)?;
                index.insert(file.site_id.as_str(), index_data.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get a file by site id and relative path
    pub fn get_file(&self, site_id: &str, path: &str) -> Result<Option<FileRecord>, DatabaseError> {
        self.get_file_by_key(&file_key(site_id, path))
    }

    /// Get a file by its composite key
    pub fn get_file_by_key(&self, key: &str) -> Result<Option<FileRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(FILES)?;

        match table.get(key)? {
            Some(data) => {
                let file: FileRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    /// Get all files of a site through the site index
    pub fn get_files_by_site(&self, site_id: &str) -> Result<Vec<FileRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let index = read_txn.open_table(SITE_FILES)?;
        let files_table = read_txn.open_table(FILES)?;

        let keys: Vec<String> = match index.get(site_id)? {
            Some(data) => rmp_serde::from_slice(data.value())?,
            None => return Ok(Vec::new()),
        };

        let mut files = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(data) = files_table.get(key.as_str())? {
                let file: FileRecord = rmp_serde::from_slice(data.value())?;
                files.push(file);
            }
        }

        Ok(files)
    }
}

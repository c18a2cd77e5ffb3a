pub mod db;
mod files;
pub mod models;
mod sites;
mod tables;

pub use db::{Database, DatabaseError};
pub use models::{file_key, FileRecord, SiteRecord};
pub use tables::*;

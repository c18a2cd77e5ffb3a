//! site-cache - Serves imported static site bundles from a local store
//!
//! Requests under `<scope>/site/<site_id>/...` are answered by a middleware
//! straight from the store, emulating a static web server:
//! - Sites and files live in a redb embedded database (ACID, MVCC)
//! - Directory requests fall back to index documents
//! - Content types come from the stored record or the file extension

pub mod api;
pub mod config;
pub mod mime;
pub mod resolve;
pub mod storage;
pub mod store;
#[cfg(test)]
pub mod testutil;

use std::sync::Arc;

use config::Config;
use store::StoreAccessor;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub store: Arc<StoreAccessor>,
}

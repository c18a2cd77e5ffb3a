//! Shared test helpers for site-cache unit tests.

use std::sync::Arc;

use crate::config::Config;
use crate::storage::Database;
use crate::store::StoreAccessor;
use crate::AppState;

/// Create a test AppState backed by a temporary database.
pub fn test_state(temp_dir: &tempfile::TempDir, scope: &str) -> (Arc<AppState>, Database) {
    let data_dir = temp_dir.path().join("data");

    let config = Config {
        bind_address: "127.0.0.1:0".to_string(),
        data_dir: data_dir.to_string_lossy().to_string(),
        scope: scope.to_string(),
    };

    let db = Database::open(&data_dir).expect("Failed to open test database");
    let store = Arc::new(StoreAccessor::from_database(db.clone()));

    (Arc::new(AppState { config, store }), db)
}

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator between the site id and the path in a file key.
pub const KEY_SEPARATOR: &str = "::";

/// Build the composite `files` key for a site and a relative path.
pub fn file_key(site_id: &str, path: &str) -> String {
    format!("{site_id}{KEY_SEPARATOR}{path}")
}

/// An imported site bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: String,
    /// Root document override, relative to the site root. Defaults to `index.html`.
    #[serde(default)]
    pub index_path: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub imported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// A single stored file of a site bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub key: String,
    pub site_id: String,
    /// POSIX-style path relative to the site root, no leading slash.
    pub path: String,
    #[serde(default)]
    pub blob: Option<Bytes>,
    /// Overrides extension-based MIME inference when set.
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl FileRecord {
    pub fn new(site_id: &str, path: &str, blob: impl Into<Bytes>) -> Self {
        Self {
            key: file_key(site_id, path),
            site_id: site_id.to_string(),
            path: path.to_string(),
            blob: Some(blob.into()),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

//! Maps an intercepted request path onto a storage lookup.
//!
//! Paths arrive with the interception scope already stripped, e.g.
//! `site/<site_id>/<path...>`.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::storage::FileRecord;
use crate::store::{SiteReader, StoreError};

/// First path segment claimed by the interceptor.
pub const SITE_SEGMENT: &str = "site";

/// Root document used when a site has no `index_path` override.
pub const DEFAULT_INDEX: &str = "index.html";

/// Index documents tried for nested directories, in order.
pub const DIRECTORY_INDEXES: [&str; 2] = ["index.html", "index.htm"];

/// Outcome of parsing a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not ours; hand the request to the next handler untouched.
    PassThrough,
    /// Malformed path; answered without touching storage.
    BadRequest,
    Lookup(Target),
}

/// What to look up in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File { site_id: String, path: String },
    /// Site root; resolved through the site's `index_path`.
    Root { site_id: String },
    /// Nested directory; `dir` keeps its trailing slash.
    Directory { site_id: String, dir: String },
}

/// Result of a storage lookup: the path that was finally tried and the record, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub path: String,
    pub record: Option<FileRecord>,
}

/// Classify a scope-relative request path.
pub fn parse_request(relative: &str) -> Resolution {
    let relative = relative.strip_prefix('/').unwrap_or(relative);
    let mut segments = relative.splitn(3, '/');

    if segments.next() != Some(SITE_SEGMENT) {
        return Resolution::PassThrough;
    }

    let site_id = match segments.next() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Resolution::PassThrough,
    };

    let rest = segments.next().unwrap_or("");
    if rest.is_empty() {
        return Resolution::Lookup(Target::Root { site_id });
    }
    let is_directory = rest.ends_with('/');

    let Some(decoded) = decode_path(rest) else {
        return Resolution::BadRequest;
    };

    if is_directory {
        return Resolution::Lookup(Target::Directory {
            site_id,
            dir: decoded,
        });
    }

    if decoded.is_empty() {
        return Resolution::BadRequest;
    }

    Resolution::Lookup(Target::File {
        site_id,
        path: decoded,
    })
}

/// Strict percent-decoding: every `%` must start a two-digit hex escape and
/// the decoded bytes must be UTF-8.
fn decode_path(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

/// Perform the lookups for `target`.
///
/// Directory candidates are tried one after another; the first existing record wins.
pub async fn resolve(reader: &dyn SiteReader, target: &Target) -> Result<Lookup, StoreError> {
    match target {
        Target::File { site_id, path } => {
            let record = reader.get_file(site_id, path).await?;
            Ok(Lookup {
                path: path.clone(),
                record,
            })
        }
        Target::Root { site_id } => {
            let path = reader
                .get_site(site_id)
                .await?
                .and_then(|site| site.index_path)
                .map(|p| p.trim_start_matches('/').to_string())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_INDEX.to_string());

            let record = reader.get_file(site_id, &path).await?;
            Ok(Lookup { path, record })
        }
        Target::Directory { site_id, dir } => {
            for index in DIRECTORY_INDEXES {
                let path = format!("{dir}{index}");
                if let Some(record) = reader.get_file(site_id, &path).await? {
                    return Ok(Lookup {
                        path,
                        record: Some(record),
                    });
                }
            }

            Ok(Lookup {
                path: format!("{dir}{DEFAULT_INDEX}"),
                record: None,
            })
        }
    }
}

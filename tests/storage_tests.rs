use std::collections::HashMap;

use chrono::Utc;
use site_cache::storage::{file_key, Database, DatabaseError, FileRecord, SiteRecord, SCHEMA_VERSION};

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    (dir, db)
}

fn sample_site(id: &str) -> SiteRecord {
    let mut metadata = HashMap::new();
    metadata.insert("source".to_string(), serde_json::json!("upload"));
    SiteRecord {
        id: id.to_string(),
        index_path: Some("home.html".to_string()),
        name: Some("Docs".to_string()),
        imported_at: Some(Utc::now()),
        metadata: Some(metadata),
    }
}

#[test]
fn test_put_and_get_site() {
    let (_dir, db) = test_db();
    let site = sample_site("site-1");
    db.put_site(&site).unwrap();

    let retrieved = db.get_site("site-1").unwrap().expect("site should exist");
    assert_eq!(retrieved, site);
}

#[test]
fn test_get_site_not_found() {
    let (_dir, db) = test_db();
    assert!(db.get_site("nonexistent").unwrap().is_none());
}

#[test]
fn test_put_and_get_file() {
    let (_dir, db) = test_db();
    let file = FileRecord::new("site-1", "assets/app.js", vec![0u8, 159, 146, 150])
        .with_mime_type("text/javascript");
    db.put_file(&file).unwrap();

    let retrieved = db
        .get_file("site-1", "assets/app.js")
        .unwrap()
        .expect("file should exist");
    assert_eq!(retrieved.key, "site-1::assets/app.js");
    assert_eq!(retrieved.site_id, "site-1");
    assert_eq!(retrieved.path, "assets/app.js");
    assert_eq!(retrieved.blob.as_deref(), Some(&[0u8, 159, 146, 150][..]));
    assert_eq!(retrieved.mime_type.as_deref(), Some("text/javascript"));

    let by_key = db
        .get_file_by_key(&file_key("site-1", "assets/app.js"))
        .unwrap();
    assert_eq!(by_key, Some(retrieved));
}

#[test]
fn test_get_file_not_found() {
    let (_dir, db) = test_db();
    db.put_file(&FileRecord::new("site-1", "index.html", "x"))
        .unwrap();

    assert!(db.get_file("site-1", "other.html").unwrap().is_none());
    assert!(db.get_file("site-2", "index.html").unwrap().is_none());
}

#[test]
fn test_same_path_in_different_sites() {
    let (_dir, db) = test_db();
    db.put_file(&FileRecord::new("a", "index.html", "from a"))
        .unwrap();
    db.put_file(&FileRecord::new("b", "index.html", "from b"))
        .unwrap();

    let a = db.get_file("a", "index.html").unwrap().unwrap();
    let b = db.get_file("b", "index.html").unwrap().unwrap();
    assert_eq!(a.blob.as_deref(), Some(&b"from a"[..]));
    assert_eq!(b.blob.as_deref(), Some(&b"from b"[..]));
}

#[test]
fn test_overwrite_file_keeps_single_index_entry() {
    let (_dir, db) = test_db();
    db.put_file(&FileRecord::new("site-1", "index.html", "first"))
        .unwrap();
    db.put_file(&FileRecord::new("site-1", "index.html", "second"))
        .unwrap();

    let files = db.get_files_by_site("site-1").unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].blob.as_deref(), Some(&b"second"[..]));
}

#[test]
fn test_get_files_by_site() {
    let (_dir, db) = test_db();
    db.put_file(&FileRecord::new("site-1", "index.html", "a"))
        .unwrap();
    db.put_file(&FileRecord::new("site-1", "blog/index.htm", "b"))
        .unwrap();
    db.put_file(&FileRecord::new("site-2", "index.html", "c"))
        .unwrap();

    let mut paths: Vec<String> = db
        .get_files_by_site("site-1")
        .unwrap()
        .into_iter()
        .map(|f| f.path)
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["blog/index.htm", "index.html"]);

    assert!(db.get_files_by_site("site-3").unwrap().is_empty());
}

#[test]
fn test_schema_version_recorded() {
    let (_dir, db) = test_db();
    assert_eq!(db.schema_version().unwrap(), Some(SCHEMA_VERSION));
}

#[test]
fn test_reopen_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    {
        let db = Database::open(dir.path()).unwrap();
        db.put_file(&FileRecord::new("site-1", "index.html", "persisted"))
            .unwrap();
    }

    let db = Database::open(dir.path()).unwrap();
    assert_eq!(db.schema_version().unwrap(), Some(SCHEMA_VERSION));
    let file = db.get_file("site-1", "index.html").unwrap().unwrap();
    assert_eq!(file.blob.as_deref(), Some(&b"persisted"[..]));
}

#[test]
fn test_newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    {
        let db = Database::open(dir.path()).unwrap();
        let write_txn = db.begin_write().unwrap();
        {
            let mut meta = write_txn.open_table(site_cache::storage::SCHEMA_META).unwrap();
            meta.insert(site_cache::storage::SCHEMA_VERSION_KEY, SCHEMA_VERSION + 1)
                .unwrap();
        }
        write_txn.commit().unwrap();
    }

    let result = Database::open(dir.path());
    assert!(matches!(result, Err(DatabaseError::SchemaTooNew { .. })));
}

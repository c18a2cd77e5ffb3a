use redb::TableDefinition;

/// Site records: site id -> SiteRecord (msgpack)
pub const SITES: TableDefinition<&str, &[u8]> = TableDefinition::new("sites");

/// File records: "siteId::path" -> FileRecord (msgpack)
pub const FILES: TableDefinition<&str, &[u8]> = TableDefinition::new("files");

/// Site index: site id -> msgpack Vec of file keys
pub const SITE_FILES: TableDefinition<&str, &[u8]> = TableDefinition::new("site_files");

/// Schema bookkeeping: name -> value
pub const SCHEMA_META: TableDefinition<&str, u64> = TableDefinition::new("schema_meta");

pub const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Bump when the table layout changes.
pub const SCHEMA_VERSION: u64 = 1;

use std::collections::HashMap;

use rusqlite::{params, Connection, OpenFlags};

use crate::{domain::entities::purchase_key::PurchaseKey, errors::StorageError};

use super::purchase_storage_datasource::{PurchaseStorageDatasource, PurchaseStorageHandle};

const ACTIVE_QUERY: &str =
    "SELECT status FROM requests WHERE productid = ?1 AND udid = ?2 AND status = 1 LIMIT 1";

/// Purchase records kept as rows of a `requests(productid, udid, status)`
/// table.
pub(crate) struct TableStorageDatasourceImpl {
    dsn: String,
}

pub(crate) struct TableStorageHandle {
    connection: Connection,
}

impl TableStorageDatasourceImpl {
    pub(crate) fn new(dsn: String) -> Self {
        Self { dsn }
    }
}

impl PurchaseStorageDatasource for TableStorageDatasourceImpl {
    type Handle = TableStorageHandle;

    fn open(&self) -> Result<TableStorageHandle, StorageError> {
        let dsn = parse_dsn(&self.dsn);
        let database = dsn
            .get("database")
            .filter(|d| !d.is_empty())
            .ok_or(StorageError::MissingDatabase)?;
        // Read-only also refuses to create a missing database file.
        let connection = Connection::open_with_flags(
            database,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StorageError::Connect {
            path: database.clone(),
            source,
        })?;
        Ok(TableStorageHandle { connection })
    }
}

impl PurchaseStorageHandle for TableStorageHandle {
    fn active(&self, key: &PurchaseKey) -> Result<bool, StorageError> {
        let mut statement = self
            .connection
            .prepare_cached(ACTIVE_QUERY)
            .map_err(StorageError::Query)?;
        statement
            .exists(params![key.product_id, key.device_id])
            .map_err(StorageError::Query)
    }

    fn close(self) -> Result<(), StorageError> {
        self.connection
            .close()
            .map_err(|(_, e)| StorageError::Close(e))
    }
}

/// Splits a `key=value&key=value` connection string, URL-decoding keys and
/// values. Later keys win; pairs without `=` map to an empty value.
fn parse_dsn(dsn: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(dsn.as_bytes())
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn seeded_database() -> (TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inaphp.db");
        let connection = Connection::open(&path).unwrap();
        connection
            .execute_batch(
                "CREATE TABLE requests (productid TEXT NOT NULL, udid TEXT NOT NULL, status INTEGER NOT NULL);
                 INSERT INTO requests VALUES ('com.app.pro', 'device123', 1);
                 INSERT INTO requests VALUES ('com.app.pro', 'device456', 0);
                 INSERT INTO requests VALUES ('com.app.lite', 'device123', 2);",
            )
            .unwrap();
        connection.close().unwrap();
        let dsn = format!("username=root&password=root&database={}", path.display());
        (dir, dsn)
    }

    #[test]
    fn parses_dsn_pairs() {
        let dsn = parse_dsn("host=localhost&port=3306&database=inaphp&flag");
        assert_eq!(dsn.get("host").map(String::as_str), Some("localhost"));
        assert_eq!(dsn.get("database").map(String::as_str), Some("inaphp"));
        assert_eq!(dsn.get("flag").map(String::as_str), Some(""));
        assert!(parse_dsn("").is_empty());

        let dsn = parse_dsn("database=%2Fvar%2Flib%2Fmy+app%2Bpro.db&database=%7Elast");
        assert_eq!(dsn.get("database").map(String::as_str), Some("~last"));
        let dsn = parse_dsn("database=%2Fvar%2Flib%2Fmy+app%2Bpro.db");
        assert_eq!(
            dsn.get("database").map(String::as_str),
            Some("/var/lib/my app+pro.db")
        );
    }

    #[test]
    fn only_status_one_rows_are_active() {
        let (_dir, dsn) = seeded_database();
        let handle = TableStorageDatasourceImpl::new(dsn).open().unwrap();
        let active = |p: &str, d: &str| handle.active(&PurchaseKey::new(p, d)).unwrap();

        assert!(active("com.app.pro", "device123"));
        assert!(!active("com.app.pro", "device456"));
        assert!(!active("com.app.lite", "device123"));
        assert!(!active("com.app.pro", "deviceXYZ"));
        handle.close().unwrap();
    }

    #[test]
    fn quoted_input_does_not_widen_the_match() {
        let (_dir, dsn) = seeded_database();
        let handle = TableStorageDatasourceImpl::new(dsn).open().unwrap();

        for hostile in [
            r#"" OR "1"="1"#,
            "' OR '1'='1",
            "com.app.pro' --",
            "com.app.pro\\",
            "x'; DROP TABLE requests; --",
        ] {
            assert!(!handle
                .active(&PurchaseKey::new(hostile, "device123"))
                .unwrap());
            assert!(!handle
                .active(&PurchaseKey::new("com.app.pro", hostile))
                .unwrap());
        }
        assert!(handle
            .active(&PurchaseKey::new("com.app.pro", "device123"))
            .unwrap());
    }

    #[test]
    fn missing_database_key_fails_to_open() {
        let storage = TableStorageDatasourceImpl::new("username=root&database=".to_owned());
        assert!(matches!(storage.open(), Err(StorageError::MissingDatabase)));
    }

    #[test]
    fn missing_database_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let dsn = format!("database={}", dir.path().join("absent.db").display());
        let storage = TableStorageDatasourceImpl::new(dsn);
        assert!(matches!(storage.open(), Err(StorageError::Connect { .. })));
        assert!(!dir.path().join("absent.db").exists());
    }

    #[test]
    fn missing_table_is_a_query_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE other (id INTEGER);")
            .unwrap();
        let handle = TableStorageDatasourceImpl::new(format!("database={}", path.display()))
            .open()
            .unwrap();
        assert!(matches!(
            handle.active(&PurchaseKey::new("p", "d")),
            Err(StorageError::Query(_))
        ));
    }
}

use std::path::PathBuf;

use crate::{
    data::models::storage_document::storage_document_model::{
        is_active_status, StorageDocumentModel,
    },
    domain::entities::purchase_key::PurchaseKey,
    errors::StorageError,
};

use super::purchase_storage_datasource::{PurchaseStorageDatasource, PurchaseStorageHandle};

/// Purchase records kept in a JSON file. The file is re-read in full on every
/// open.
pub(crate) struct DocumentStorageDatasourceImpl {
    path: PathBuf,
}

pub(crate) struct DocumentStorageHandle {
    document: StorageDocumentModel,
}

impl DocumentStorageDatasourceImpl {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PurchaseStorageDatasource for DocumentStorageDatasourceImpl {
    type Handle = DocumentStorageHandle;

    fn open(&self) -> Result<DocumentStorageHandle, StorageError> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| StorageError::ReadDocument {
                path: self.path.clone(),
                source,
            })?;
        let root: serde_json::Value = serde_json::from_str(&contents)?;
        if !root.is_object() {
            return Err(StorageError::UnexpectedDocumentShape);
        }
        Ok(DocumentStorageHandle {
            document: serde_json::from_value(root)?,
        })
    }
}

impl PurchaseStorageHandle for DocumentStorageHandle {
    fn active(&self, key: &PurchaseKey) -> Result<bool, StorageError> {
        Ok(self
            .document
            .status(&key.product_id, &key.device_id)
            .is_some_and(is_active_status))
    }

    fn close(self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn storage_with(contents: &str) -> (NamedTempFile, DocumentStorageDatasourceImpl) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let storage = DocumentStorageDatasourceImpl::new(file.path().to_owned());
        (file, storage)
    }

    #[test]
    fn looks_up_status_per_product_and_device() {
        let (_file, storage) = storage_with(
            r#"{
                "com.app.pro": {
                    "device123": {"status": 1},
                    "device456": {"status": 0}
                },
                "com.app.lite": {"device123": {}}
            }"#,
        );
        let handle = storage.open().unwrap();
        let active = |p: &str, d: &str| handle.active(&PurchaseKey::new(p, d)).unwrap();

        assert!(active("com.app.pro", "device123"));
        assert!(!active("com.app.pro", "device456"));
        assert!(!active("com.app.pro", "deviceXYZ"));
        assert!(!active("com.app.lite", "device123"));
        assert!(!active("com.app.none", "device123"));
        assert!(!active("", ""));
        handle.close().unwrap();
    }

    #[test]
    fn missing_file_fails_to_open() {
        let storage = DocumentStorageDatasourceImpl::new(PathBuf::from(
            "/nonexistent/dir/requests.json",
        ));
        assert!(matches!(
            storage.open(),
            Err(StorageError::ReadDocument { .. })
        ));
    }

    #[test]
    fn malformed_json_fails_to_open() {
        let (_file, storage) = storage_with(r#"{"com.app.pro": {"device123": "#);
        assert!(matches!(
            storage.open(),
            Err(StorageError::MalformedDocument(_))
        ));
    }

    #[test]
    fn non_object_root_fails_to_open() {
        let (_file, storage) = storage_with("[]");
        assert!(matches!(
            storage.open(),
            Err(StorageError::UnexpectedDocumentShape)
        ));
    }

    #[test]
    fn every_open_rereads_the_file() {
        let (file, storage) = storage_with(r#"{"p":{"d":{"status":0}}}"#);
        let key = PurchaseKey::new("p", "d");
        assert!(!storage.open().unwrap().active(&key).unwrap());

        std::fs::write(file.path(), r#"{"p":{"d":{"status":1}}}"#).unwrap();
        assert!(storage.open().unwrap().active(&key).unwrap());
    }
}

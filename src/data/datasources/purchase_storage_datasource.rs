use crate::{
    config::{IapConfig, StorageBackend},
    domain::entities::purchase_key::PurchaseKey,
    errors::StorageError,
};

use super::{
    document_storage_datasource::{DocumentStorageDatasourceImpl, DocumentStorageHandle},
    table_storage_datasource::{TableStorageDatasourceImpl, TableStorageHandle},
};

/// A source of purchase records. Each request opens its own handle and
/// closes it when done; nothing is pooled or shared between requests.
pub(crate) trait PurchaseStorageDatasource: Send + Sync {
    type Handle: PurchaseStorageHandle;

    /// Acquires the underlying resource (connection or document contents).
    fn open(&self) -> Result<Self::Handle, StorageError>;
}

/// An open storage resource.
pub(crate) trait PurchaseStorageHandle {
    /// Whether the pair is stored with an active status. Absent records are
    /// inactive, not errors.
    fn active(&self, key: &PurchaseKey) -> Result<bool, StorageError>;

    /// Releases the resource. Consuming `self` rules out double release.
    fn close(self) -> Result<(), StorageError>;
}

/// Storage variant chosen from [`IapConfig::storage`].
pub(crate) enum PurchaseStorageDatasourceImpl {
    Table(TableStorageDatasourceImpl),
    Document(DocumentStorageDatasourceImpl),
}

pub(crate) enum PurchaseStorageHandleImpl {
    Table(TableStorageHandle),
    Document(DocumentStorageHandle),
}

impl PurchaseStorageDatasourceImpl {
    pub(crate) fn from_config(config: &IapConfig) -> Self {
        match config.storage {
            StorageBackend::Table => {
                Self::Table(TableStorageDatasourceImpl::new(config.table_dsn.clone()))
            }
            StorageBackend::Document => Self::Document(DocumentStorageDatasourceImpl::new(
                config.document_path.clone(),
            )),
        }
    }
}

impl PurchaseStorageDatasource for PurchaseStorageDatasourceImpl {
    type Handle = PurchaseStorageHandleImpl;

    fn open(&self) -> Result<Self::Handle, StorageError> {
        Ok(match self {
            Self::Table(t) => PurchaseStorageHandleImpl::Table(t.open()?),
            Self::Document(d) => PurchaseStorageHandleImpl::Document(d.open()?),
        })
    }
}

impl PurchaseStorageHandle for PurchaseStorageHandleImpl {
    fn active(&self, key: &PurchaseKey) -> Result<bool, StorageError> {
        match self {
            Self::Table(t) => t.active(key),
            Self::Document(d) => d.active(key),
        }
    }

    fn close(self) -> Result<(), StorageError> {
        match self {
            Self::Table(t) => t.close(),
            Self::Document(d) => d.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn document_backend_is_selected_from_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"com.app.pro":{{"device123":{{"status":1}}}}}}"#).unwrap();
        let config = IapConfig {
            storage: StorageBackend::Document,
            document_path: file.path().to_owned(),
            ..Default::default()
        };

        let storage = PurchaseStorageDatasourceImpl::from_config(&config);
        assert!(matches!(storage, PurchaseStorageDatasourceImpl::Document(_)));
        let handle = storage.open().unwrap();
        assert!(handle
            .active(&PurchaseKey::new("com.app.pro", "device123"))
            .unwrap());
        handle.close().unwrap();
    }

    #[test]
    fn table_backend_is_the_default() {
        let storage = PurchaseStorageDatasourceImpl::from_config(&IapConfig::default());
        assert!(matches!(storage, PurchaseStorageDatasourceImpl::Table(_)));
    }
}

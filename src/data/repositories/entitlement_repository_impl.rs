use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    config::IapConfig,
    data::datasources::{
        purchase_storage_datasource::{
            PurchaseStorageDatasource, PurchaseStorageDatasourceImpl, PurchaseStorageHandle,
        },
        receipt_verification_datasource::{
            ReceiptVerificationDatasource, ReceiptVerificationDatasourceImpl,
        },
    },
    domain::{
        entities::{purchase_key::PurchaseKey, receipt_data::ReceiptData},
        repositories::entitlement_repository::EntitlementRepository,
    },
    errors::{StorageError, VerifierError},
};

/// Collapses storage and verifier errors to `false` after logging them.
pub(crate) struct EntitlementRepositoryImpl<
    S: PurchaseStorageDatasource,
    V: ReceiptVerificationDatasource,
> {
    purchase_storage_datasource: S,
    receipt_verification_datasource: V,
}

#[async_trait]
impl<S: PurchaseStorageDatasource, V: ReceiptVerificationDatasource> EntitlementRepository
    for EntitlementRepositoryImpl<S, V>
{
    fn is_active(&self, key: &PurchaseKey) -> bool {
        match self.lookup(key) {
            Ok(active) => {
                debug!(
                    product_id = %key.product_id,
                    device_id = %key.device_id,
                    active,
                    "purchase status checked"
                );
                active
            }
            Err(error) => {
                warn!(
                    product_id = %key.product_id,
                    device_id = %key.device_id,
                    %error,
                    "purchase storage unavailable, treating as inactive"
                );
                false
            }
        }
    }

    async fn verify_receipt(&self, receipt: &ReceiptData) -> bool {
        match self
            .receipt_verification_datasource
            .verify_receipt(receipt)
            .await
        {
            Ok(status) if status.is_valid() => {
                debug!("receipt accepted");
                true
            }
            Ok(status) => {
                debug!(?status, "receipt rejected");
                false
            }
            Err(error) => {
                log_verifier_error(&error);
                false
            }
        }
    }
}

impl<S: PurchaseStorageDatasource, V: ReceiptVerificationDatasource> EntitlementRepositoryImpl<S, V> {
    pub(crate) fn with_datasources(
        purchase_storage_datasource: S,
        receipt_verification_datasource: V,
    ) -> Self {
        Self {
            purchase_storage_datasource,
            receipt_verification_datasource,
        }
    }

    fn lookup(&self, key: &PurchaseKey) -> Result<bool, StorageError> {
        let handle = self.purchase_storage_datasource.open()?;
        let result = handle.active(key);
        // A failed close does not change the answer already read.
        if let Err(error) = handle.close() {
            warn!(%error, "failed to close purchase storage");
        }
        result
    }
}

impl EntitlementRepositoryImpl<PurchaseStorageDatasourceImpl, ReceiptVerificationDatasourceImpl> {
    pub(crate) fn new(config: &IapConfig) -> Result<Self, VerifierError> {
        Ok(Self::with_datasources(
            PurchaseStorageDatasourceImpl::from_config(config),
            ReceiptVerificationDatasourceImpl::new(config)?,
        ))
    }
}

fn log_verifier_error(error: &VerifierError) {
    match error {
        VerifierError::Timeout => warn!("receipt verification timed out"),
        _ => warn!(%error, "receipt verification failed"),
    }
}

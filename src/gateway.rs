use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::IapConfig,
    constants::{PARAM_DEVICE_ID, PARAM_PRODUCT_ID, PARAM_RECEIPT_DATA},
    data::{
        datasources::{
            purchase_storage_datasource::PurchaseStorageDatasourceImpl,
            receipt_verification_datasource::ReceiptVerificationDatasourceImpl,
        },
        repositories::entitlement_repository_impl::EntitlementRepositoryImpl,
    },
    domain::{
        entities::{purchase_key::PurchaseKey, receipt_data::ReceiptData, verdict::Verdict},
        repositories::entitlement_repository::EntitlementRepository,
    },
    errors::IapError,
};

/// Request parameters as received from the host transport. Missing keys are
/// read as empty strings.
pub type RequestParams = HashMap<String, String>;

/// Repository wired from an [`IapConfig`]: the configured storage backend and
/// the vendor endpoint for the configured environment.
pub struct DefaultEntitlementRepository(
    EntitlementRepositoryImpl<PurchaseStorageDatasourceImpl, ReceiptVerificationDatasourceImpl>,
);

impl DefaultEntitlementRepository {
    pub fn new(config: &IapConfig) -> Result<Self, IapError> {
        Ok(Self(EntitlementRepositoryImpl::new(config)?))
    }
}

#[async_trait]
impl EntitlementRepository for DefaultEntitlementRepository {
    fn is_active(&self, key: &PurchaseKey) -> bool {
        self.0.is_active(key)
    }

    async fn verify_receipt(&self, receipt: &ReceiptData) -> bool {
        self.0.verify_receipt(receipt).await
    }
}

/// Entry point for the two entitlement requests. Both always answer with a
/// [`Verdict`]; failures are logged and reported as [`Verdict::No`].
pub struct IapGateway<R: EntitlementRepository> {
    entitlement_repository: R,
}

impl<R: EntitlementRepository> IapGateway<R> {
    pub fn with_repository(entitlement_repository: R) -> Self {
        Self {
            entitlement_repository,
        }
    }

    /// Whether `productid` is recorded as active for `udid`. Runs to
    /// completion on the calling thread.
    pub fn check(&self, params: &RequestParams) -> Verdict {
        let key = PurchaseKey::new(
            param(params, PARAM_PRODUCT_ID),
            param(params, PARAM_DEVICE_ID),
        );
        let verdict = Verdict::from(self.entitlement_repository.is_active(&key));
        debug!(product_id = %key.product_id, device_id = %key.device_id, %verdict, "check");
        verdict
    }

    /// Whether the vendor accepts `receiptdata`.
    pub async fn verify_receipt(&self, params: &RequestParams) -> Verdict {
        let receipt = ReceiptData(param(params, PARAM_RECEIPT_DATA).to_owned());
        let verdict = Verdict::from(self.entitlement_repository.verify_receipt(&receipt).await);
        debug!(receipt_len = receipt.as_str().len(), %verdict, "verify_receipt");
        verdict
    }
}

impl IapGateway<DefaultEntitlementRepository> {
    pub fn new(config: &IapConfig) -> Result<Self, IapError> {
        Ok(Self::with_repository(DefaultEntitlementRepository::new(config)?))
    }

    /// Builds the gateway from `IAP_*` environment variables.
    pub fn from_env() -> Result<Self, IapError> {
        Self::new(&IapConfig::from_env()?)
    }
}

fn param<'a>(params: &'a RequestParams, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or_default()
}

use async_trait::async_trait;

use crate::domain::entities::{purchase_key::PurchaseKey, receipt_data::ReceiptData};

/// Answers entitlement questions. Implementations never fail: every internal
/// error resolves to `false`.
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// Whether the product is recorded as active for the device in local
    /// storage. Blocks on file or database I/O, so it is not `async`.
    fn is_active(&self, key: &PurchaseKey) -> bool;

    /// Whether the vendor accepts the receipt.
    async fn verify_receipt(&self, receipt: &ReceiptData) -> bool;
}

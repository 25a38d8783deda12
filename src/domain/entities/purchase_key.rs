/// Identifies one purchase record: a product bought on a device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PurchaseKey {
    pub product_id: String,
    pub device_id: String,
}

impl PurchaseKey {
    pub fn new(product_id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            device_id: device_id.into(),
        }
    }
}

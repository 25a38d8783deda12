/// Opaque receipt blob issued by the vendor's purchase system. Submitted to
/// the verification endpoint as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReceiptData(pub String);

impl ReceiptData {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

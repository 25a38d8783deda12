/// Classification of the `status` code returned by the receipt verification
/// endpoint. Only [`ReceiptStatus::Valid`] means the receipt is accepted.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Valid,
    /// 21000: The request to the App Store was not made using HTTP POST.
    BadMethod,
    /// 21002: The data in the receipt-data property was malformed or missing.
    MalformedReceipt,
    /// 21003: The receipt could not be authenticated.
    NotAuthenticated,
    /// 21004: The shared secret does not match the one on file.
    SharedSecretMismatch,
    /// 21005: The receipt server was temporarily unable to provide the receipt.
    ServerUnavailable,
    /// 21006: The receipt is valid, but the subscription has expired.
    SubscriptionExpired,
    /// 21007: The receipt is from the test environment but was sent to
    /// production.
    SandboxReceiptInProduction,
    /// 21008: The receipt is from the production environment but was sent to
    /// the test environment.
    ProductionReceiptInSandbox,
    /// 21009: Internal data access error.
    InternalDataAccessError,
    /// 21010: The user account cannot be found or has been deleted.
    AccountNotFound,
    Other(i64),
}

impl ReceiptStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ReceiptStatus::Valid)
    }
}

impl From<i64> for ReceiptStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Valid,
            21000 => Self::BadMethod,
            21002 => Self::MalformedReceipt,
            21003 => Self::NotAuthenticated,
            21004 => Self::SharedSecretMismatch,
            21005 => Self::ServerUnavailable,
            21006 => Self::SubscriptionExpired,
            21007 => Self::SandboxReceiptInProduction,
            21008 => Self::ProductionReceiptInSandbox,
            21009 => Self::InternalDataAccessError,
            21010 => Self::AccountNotFound,
            other => Self::Other(other),
        }
    }
}

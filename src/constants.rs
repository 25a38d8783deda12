pub const PRODUCTION_VERIFY_RECEIPT_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";
pub const SANDBOX_VERIFY_RECEIPT_URL: &str = "https://sandbox.itunes.apple.com/verifyReceipt";

pub const DEFAULT_USER_AGENT: &str = "inAphp";
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_TABLE_DSN: &str = "database=inaphp.db";
pub const DEFAULT_DOCUMENT_PATH: &str = "./requests.json";

// Request parameter names.
pub const PARAM_PRODUCT_ID: &str = "productid";
pub const PARAM_DEVICE_ID: &str = "udid";
pub const PARAM_RECEIPT_DATA: &str = "receiptdata";

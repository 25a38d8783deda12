use serde::Serialize;

/// Body POSTed to the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Serialize)]
pub(crate) struct VerifyReceiptRequestModel<'a> {
    /// The Base64-encoded receipt data, passed through untouched.
    #[serde(rename = "receipt-data")]
    pub(crate) receipt_data: &'a str,
}

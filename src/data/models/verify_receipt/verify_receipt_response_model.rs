#![allow(dead_code)]

use serde::Deserialize;

/// Data structure returned by the verifyReceipt endpoint. Only the status is
/// consulted; the decoded receipt is ignored.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyReceiptResponseModel {
    /// Either 0 if the receipt is valid, or a status code if there is an
    /// error. Some proxies return it as a string.
    pub(crate) status: Option<StatusCodeModel>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StatusCodeModel {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl StatusCodeModel {
    /// The status as an integer code, if it can be read as one.
    pub(crate) fn code(&self) -> Option<i64> {
        match self {
            StatusCodeModel::Integer(code) => Some(*code),
            StatusCodeModel::Float(f) => integral(*f),
            StatusCodeModel::Text(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            StatusCodeModel::Other(_) => None,
        }
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

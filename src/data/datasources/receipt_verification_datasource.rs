use async_trait::async_trait;

use crate::{
    config::IapConfig,
    data::models::verify_receipt::{
        verify_receipt_request_model::VerifyReceiptRequestModel,
        verify_receipt_response_model::{StatusCodeModel, VerifyReceiptResponseModel},
    },
    domain::entities::{receipt_data::ReceiptData, receipt_status::ReceiptStatus},
    errors::VerifierError,
};

#[async_trait]
pub(crate) trait ReceiptVerificationDatasource: Send + Sync {
    /// verifyReceipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// receipt:
    ///   The receipt blob received from the device, submitted as-is.
    ///
    /// Makes a single attempt. Any status the vendor returns is `Ok`; only
    /// transport and response-format problems are errors.
    async fn verify_receipt(&self, receipt: &ReceiptData) -> Result<ReceiptStatus, VerifierError>;
}

pub(crate) struct ReceiptVerificationDatasourceImpl {
    client: reqwest::Client,
    url: String,
}

#[async_trait]
impl ReceiptVerificationDatasource for ReceiptVerificationDatasourceImpl {
    async fn verify_receipt(&self, receipt: &ReceiptData) -> Result<ReceiptStatus, VerifierError> {
        let response = self
            .client
            .post(&self.url)
            .json(&VerifyReceiptRequestModel {
                receipt_data: receipt.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VerifierError::Timeout
                } else {
                    VerifierError::Send(e)
                }
            })?;

        if !response.status().is_success() {
            return Err(VerifierError::HttpStatus(response.status()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                VerifierError::Timeout
            } else {
                VerifierError::ReadBody(e)
            }
        })?;
        if body.trim().is_empty() {
            return Err(VerifierError::EmptyBody);
        }

        let model: VerifyReceiptResponseModel = serde_json::from_str(&body)?;
        model
            .status
            .as_ref()
            .and_then(StatusCodeModel::code)
            .map(ReceiptStatus::from)
            .ok_or(VerifierError::MissingStatus)
    }
}

impl ReceiptVerificationDatasourceImpl {
    /// The endpoint is fixed here from [`IapConfig::verify_url`]; it is not
    /// chosen per request.
    pub(crate) fn new(config: &IapConfig) -> Result<Self, VerifierError> {
        let client = reqwest::Client::builder()
            .timeout(config.verify_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(VerifierError::ClientBuild)?;
        Ok(Self {
            client,
            url: config.verify_url().to_owned(),
        })
    }
}

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while opening or querying purchase storage.
///
/// These never reach callers of the gateway; they are logged and collapsed
/// to an inactive result.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("table storage DSN is missing the 'database' key")]
    MissingDatabase,

    #[error("failed to open table storage '{path}': {source}")]
    Connect {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("table storage query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("failed to close table storage: {0}")]
    Close(#[source] rusqlite::Error),

    #[error("failed to read storage document '{}': {source}", .path.display())]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage document is not valid JSON: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    #[error("storage document root is not a JSON object")]
    UnexpectedDocumentShape,
}

/// Failures while verifying a receipt with the vendor endpoint.
#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("verification callout timed out")]
    Timeout,

    #[error("verification callout failed to send: {0}")]
    Send(#[source] reqwest::Error),

    #[error("verification callout returned with {0} status code")]
    HttpStatus(reqwest::StatusCode),

    #[error("failed to read verification response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("verification response body is empty")]
    EmptyBody,

    #[error("failed to parse verification response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("verification response is missing a usable status")]
    MissingStatus,
}

/// Failures while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Errors that can occur while constructing the gateway.
#[derive(Debug, Error)]
pub enum IapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Verifier(#[from] VerifierError),
}

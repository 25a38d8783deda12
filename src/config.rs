use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use serde::Deserialize;

use crate::{
    constants::{
        DEFAULT_DOCUMENT_PATH, DEFAULT_TABLE_DSN, DEFAULT_USER_AGENT, DEFAULT_VERIFY_TIMEOUT_SECS,
        PRODUCTION_VERIFY_RECEIPT_URL, SANDBOX_VERIFY_RECEIPT_URL,
    },
    errors::ConfigError,
};

/// Which vendor endpoint receipts are verified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IapEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl FromStr for IapEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidValue {
                key: "environment",
                value: s.to_owned(),
            }),
        }
    }
}

/// Which storage variant backs the active-status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Rows in a `requests` table.
    #[default]
    Table,
    /// A JSON document mapping productId -> deviceId -> {status}.
    Document,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "document" => Ok(Self::Document),
            _ => Err(ConfigError::InvalidValue {
                key: "storage",
                value: s.to_owned(),
            }),
        }
    }
}

/// Static settings, immutable for the lifetime of a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IapConfig {
    pub environment: IapEnvironment,
    pub storage: StorageBackend,
    /// `key=value&key=value` connection string for table storage. The
    /// `database` key names the database file.
    pub table_dsn: String,
    pub document_path: PathBuf,
    pub production_url: String,
    pub sandbox_url: String,
    pub user_agent: String,
    pub verify_timeout_secs: u64,
}

impl Default for IapConfig {
    fn default() -> Self {
        Self {
            environment: IapEnvironment::default(),
            storage: StorageBackend::default(),
            table_dsn: DEFAULT_TABLE_DSN.to_owned(),
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            production_url: PRODUCTION_VERIFY_RECEIPT_URL.to_owned(),
            sandbox_url: SANDBOX_VERIFY_RECEIPT_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            verify_timeout_secs: DEFAULT_VERIFY_TIMEOUT_SECS,
        }
    }
}

impl IapConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reads `IAP_*` environment variables; unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`IapConfig::from_env`], with variables resolved by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(v) = lookup("IAP_ENVIRONMENT") {
            config.environment = v.parse()?;
        }
        if let Some(v) = lookup("IAP_STORAGE") {
            config.storage = v.parse()?;
        }
        if let Some(v) = lookup("IAP_TABLE_DSN") {
            config.table_dsn = v;
        }
        if let Some(v) = lookup("IAP_DOCUMENT_PATH") {
            config.document_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("IAP_PRODUCTION_URL") {
            config.production_url = v;
        }
        if let Some(v) = lookup("IAP_SANDBOX_URL") {
            config.sandbox_url = v;
        }
        if let Some(v) = lookup("IAP_USER_AGENT") {
            config.user_agent = v;
        }
        if let Some(v) = lookup("IAP_VERIFY_TIMEOUT_SECS") {
            config.verify_timeout_secs = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "verify_timeout_secs",
                value: v.clone(),
            })?;
        }
        config.validated()
    }

    /// The endpoint selected by [`IapConfig::environment`].
    pub fn verify_url(&self) -> &str {
        match self.environment {
            IapEnvironment::Sandbox => &self.sandbox_url,
            IapEnvironment::Production => &self.production_url,
        }
    }

    pub fn verify_timeout(&self) -> Duration {
        Duration::from_secs(self.verify_timeout_secs)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.verify_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "verify_timeout_secs",
                value: "0".to_owned(),
            });
        }
        Ok(self)
    }
}

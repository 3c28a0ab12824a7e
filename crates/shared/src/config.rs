//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Artifact storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Renderer configuration.
    #[serde(default)]
    pub render: RenderSettings,
    /// Defaults applied to invoice requests that omit optional fields.
    #[serde(default)]
    pub invoice: InvoiceDefaults,
}

/// Artifact storage configuration.
///
/// `backend` selects the provider; the remaining fields are read depending
/// on the backend ("local", "s3", or "azblob").
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage backend: "local", "s3", or "azblob".
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Root directory for the local backend.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// S3 endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: Option<String>,
    /// S3 access key ID.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// S3 secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// S3 region.
    #[serde(default)]
    pub region: Option<String>,
    /// Azure storage account name.
    #[serde(default)]
    pub account: Option<String>,
    /// Azure storage access key.
    #[serde(default)]
    pub access_key: Option<String>,
    /// Azure container name.
    #[serde(default)]
    pub container: Option<String>,
    /// Presigned download URL TTL in seconds (remote backends).
    #[serde(default = "default_presign_ttl")]
    pub presign_ttl_secs: u64,
}

fn default_backend() -> String {
    "local".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from("./artifacts")
}

fn default_presign_ttl() -> u64 {
    3600 // 1 hour
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            root: default_root(),
            endpoint: None,
            bucket: None,
            access_key_id: None,
            secret_access_key: None,
            region: None,
            account: None,
            access_key: None,
            container: None,
            presign_ttl_secs: default_presign_ttl(),
        }
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettings {
    /// Timeout for fetching the business logo, in seconds.
    #[serde(default = "default_logo_timeout")]
    pub logo_timeout_secs: u64,
    /// Maximum accepted logo size in bytes.
    #[serde(default = "default_logo_max_bytes")]
    pub logo_max_bytes: u64,
}

fn default_logo_timeout() -> u64 {
    5
}

fn default_logo_max_bytes() -> u64 {
    2 * 1024 * 1024 // 2MB
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            logo_timeout_secs: default_logo_timeout(),
            logo_max_bytes: default_logo_max_bytes(),
        }
    }
}

/// Defaults applied to invoice requests that omit optional fields.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceDefaults {
    /// Default currency code when the request omits one.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Default VAT rate as a fraction (0.20 = 20%).
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,
    /// Days between the issue date and the default due date.
    #[serde(default = "default_due_in_days")]
    pub due_in_days: i64,
}

fn default_currency() -> String {
    "GBP".to_string()
}

fn default_vat_rate() -> Decimal {
    Decimal::new(20, 2) // 0.20
}

fn default_due_in_days() -> i64 {
    30
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            vat_rate: default_vat_rate(),
            due_in_days: default_due_in_days(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("REMIT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

//! Remit invoice generator
//!
//! Reads invoice request JSON files, runs the generation pipeline, and
//! prints a receipt per invoice with the stored artifact's locator.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remit_core::generation::{GenerationError, GenerationService};
use remit_core::invoice::InvoiceRequest;
use remit_core::render::LogoFetcher;
use remit_core::storage::{StorageConfig, StorageProvider, StorageService};
use remit_shared::config::StorageSettings;
use remit_shared::{AppConfig, AppError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let requests: Vec<String> = std::env::args().skip(1).collect();
    if requests.is_empty() {
        anyhow::bail!("usage: remit <request.json>...");
    }

    // Load configuration
    let config = AppConfig::load().map_err(|e| AppError::Configuration(e.to_string()))?;

    let storage = StorageService::from_config(storage_config(&config.storage)?)
        .context("Failed to initialize storage")?;
    info!(provider = storage.provider_name(), "storage initialized");

    let fetcher = LogoFetcher::new(&config.render).context("Failed to build HTTP client")?;
    let service = GenerationService::new(Arc::new(storage), fetcher, config.invoice.clone());

    let mut failures = 0usize;
    for path in &requests {
        if let Err(error) = process(&service, Path::new(path)).await {
            eprintln!("{path}: {error:#}");
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} request(s) failed", requests.len());
    }
    Ok(())
}

/// Generate one invoice from a request file and print its receipt.
async fn process(service: &GenerationService, path: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let request: InvoiceRequest =
        serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))?;

    match service.generate(&request).await {
        Ok(receipt) => {
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            Ok(())
        }
        Err(GenerationError::Validation(error)) => {
            for violation in error.violations() {
                eprintln!("  {violation}");
            }
            anyhow::bail!("request rejected with {} violation(s)", error.violations().len())
        }
        Err(error) => Err(error.into()),
    }
}

/// Map file/env storage settings onto a concrete provider.
fn storage_config(settings: &StorageSettings) -> anyhow::Result<StorageConfig> {
    let provider = match settings.backend.as_str() {
        "local" => StorageProvider::local_fs(&settings.root),
        "s3" => StorageProvider::s3(
            required(&settings.endpoint, "storage.endpoint")?,
            required(&settings.bucket, "storage.bucket")?,
            required(&settings.access_key_id, "storage.access_key_id")?,
            required(&settings.secret_access_key, "storage.secret_access_key")?,
            required(&settings.region, "storage.region")?,
        ),
        "azblob" => StorageProvider::azure_blob(
            required(&settings.account, "storage.account")?,
            required(&settings.access_key, "storage.access_key")?,
            required(&settings.container, "storage.container")?,
        ),
        other => anyhow::bail!("unknown storage backend: {other}"),
    };
    Ok(StorageConfig::new(provider).with_presign_ttl(settings.presign_ttl_secs))
}

fn required<'a>(value: &'a Option<String>, key: &str) -> anyhow::Result<&'a str> {
    value
        .as_deref()
        .with_context(|| format!("{key} is required for this backend"))
}

//! Artifact storage service implementation using Apache OpenDAL.

use std::path::Path;
use std::time::Duration;

use opendal::{ErrorKind, Operator, services};
use tracing::debug;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Opaque reference to a stored artifact.
///
/// Local backend: a filesystem path. Remote backends: a presigned GET URL
/// with the configured TTL. Callers forward it as-is and never parse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator(String);

impl Locator {
    /// The locator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage service for generated invoice artifacts.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Store bytes under a name and return a locator for them.
    ///
    /// Writing the same name again overwrites the previous artifact;
    /// regeneration of an invoice number replaces its PDF.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or locator resolution fails.
    pub async fn store(&self, name: &str, bytes: Vec<u8>) -> Result<Locator, StorageError> {
        let size = bytes.len();
        self.operator
            .write(name, bytes)
            .await
            .map_err(StorageError::from)?;
        debug!(name, size, provider = self.provider_name(), "artifact stored");
        self.resolve(name).await
    }

    /// Resolve a locator for a stored name without writing.
    ///
    /// # Errors
    ///
    /// Returns an error if presigning fails on a remote backend.
    pub async fn resolve(&self, name: &str) -> Result<Locator, StorageError> {
        match &self.config.provider {
            StorageProvider::LocalFs { root } => {
                Ok(Locator(Path::new(root).join(name).display().to_string()))
            }
            StorageProvider::S3 { .. } | StorageProvider::AzureBlob { .. } => {
                let ttl = Duration::from_secs(self.config.presign_ttl_secs);
                let presigned = self
                    .operator
                    .presign_read(name, ttl)
                    .await
                    .map_err(StorageError::from)?;
                Ok(Locator(presigned.uri().to_string()))
            }
        }
    }

    /// Delete a stored artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.operator.delete(name).await.map_err(StorageError::from)
    }

    /// Check if an artifact exists in storage.
    pub async fn exists(&self, name: &str) -> bool {
        match self.operator.stat(name).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

//! Invoice generation orchestration.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use remit_shared::config::InvoiceDefaults;

use crate::invoice::{InvoiceRequest, build_invoice};
use crate::render::{LogoFetcher, render};
use crate::storage::StorageService;

use super::error::GenerationError;
use super::types::GenerationReceipt;

/// Runs the validate, render, store pipeline for invoice requests.
pub struct GenerationService {
    storage: Arc<StorageService>,
    logo_fetcher: LogoFetcher,
    defaults: InvoiceDefaults,
}

impl GenerationService {
    /// Create a new generation service.
    #[must_use]
    pub fn new(
        storage: Arc<StorageService>,
        logo_fetcher: LogoFetcher,
        defaults: InvoiceDefaults,
    ) -> Self {
        Self {
            storage,
            logo_fetcher,
            defaults,
        }
    }

    /// Generate an invoice PDF from a raw request and store it.
    ///
    /// The pipeline halts on validation so no artifact exists for a
    /// rejected request. A failed logo fetch degrades to rendering
    /// without the logo rather than failing the invoice.
    ///
    /// # Errors
    ///
    /// Returns an error when validation rejects the request, the PDF
    /// cannot be composed, or the artifact cannot be stored.
    pub async fn generate(
        &self,
        request: &InvoiceRequest,
    ) -> Result<GenerationReceipt, GenerationError> {
        let request_id = Uuid::new_v4();
        info!(%request_id, "invoice generation started");

        let invoice = build_invoice(request, &self.defaults).inspect_err(|error| {
            warn!(%request_id, %error, "invoice request rejected");
        })?;

        let logo = match &invoice.business.logo_url {
            Some(url) => self.logo_fetcher.fetch(url).await,
            None => None,
        };

        let bytes = render(&invoice, logo.as_deref())?;
        let filename = invoice.filename();
        let locator = self.storage.store(&filename, bytes).await?;

        info!(
            %request_id,
            invoice_number = %invoice.invoice_number,
            %filename,
            provider = self.storage.provider_name(),
            "invoice generation complete"
        );

        Ok(GenerationReceipt::new(&invoice, &locator))
    }
}

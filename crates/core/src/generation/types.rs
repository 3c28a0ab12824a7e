//! Generation receipt returned to callers.

use serde::Serialize;

use crate::invoice::Invoice;
use crate::storage::Locator;

/// Summary of a completed generation, returned once the artifact is stored.
///
/// The monetary total is already formatted for display; callers that need
/// the exact amounts re-read them from the rendered invoice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReceipt {
    /// Invoice number, caller-supplied or generated.
    pub invoice_number: String,
    /// Name of the billed customer.
    pub customer_name: String,
    /// Grand total with currency prefix, e.g. `GBP 1,260.00`.
    pub total: String,
    /// Artifact filename derived from the invoice number.
    pub filename: String,
    /// Opaque storage locator for the artifact.
    pub locator: String,
}

impl GenerationReceipt {
    pub(super) fn new(invoice: &Invoice, locator: &Locator) -> Self {
        Self {
            invoice_number: invoice.invoice_number.clone(),
            customer_name: invoice.customer.name.clone(),
            total: invoice.total_money().to_string(),
            filename: invoice.filename(),
            locator: locator.as_str().to_string(),
        }
    }
}

//! Invoice domain types and the raw request shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use remit_shared::types::{Currency, Money};

/// Raw invoice request as submitted by a caller.
///
/// Everything is optional at this boundary so that a malformed request
/// produces a full list of violations instead of a deserialization error.
/// Caller-supplied aggregates (item totals and the like) are accepted here
/// and then discarded; the calculator always recomputes them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    /// Identifying invoice number; generated when omitted.
    #[serde(default)]
    pub invoice_number: Option<String>,
    /// Issue date, ISO-8601 (`YYYY-MM-DD`). Defaults to today (UTC).
    #[serde(default)]
    pub date: Option<String>,
    /// Due date, ISO-8601. Defaults to the issue date plus the configured
    /// payment term.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Issuing business details.
    #[serde(default)]
    pub business: BusinessRequest,
    /// Customer being billed.
    #[serde(default)]
    pub customer: CustomerRequest,
    /// Billable line items, in display order.
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
    /// Currency code. Defaults to the configured currency (GBP).
    #[serde(default)]
    pub currency: Option<String>,
    /// VAT rate as a fraction (0.20 = 20%). Defaults to the configured rate.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// Free-text notes printed in the footer.
    #[serde(default)]
    pub notes: Option<String>,
    /// Payment terms printed in the footer.
    #[serde(default)]
    pub terms: Option<String>,
}

/// Issuing business details as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRequest {
    /// Business name.
    #[serde(default)]
    pub name: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// URL of a logo image for the letterhead.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Bank account holder name.
    #[serde(default)]
    pub account_name: Option<String>,
    /// Bank account number.
    #[serde(default)]
    pub account_number: Option<String>,
    /// Bank sort code.
    #[serde(default)]
    pub sort_code: Option<String>,
}

/// Customer details as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    /// Customer name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
}

/// One billable entry as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    /// What is being billed.
    #[serde(default)]
    pub description: Option<String>,
    /// Quantity; must be positive.
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Price per unit; must be non-negative.
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    /// Caller-supplied line total. Always ignored and recomputed.
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// Validated issuing business details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// Business name.
    pub name: String,
    /// Postal address.
    pub address: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// URL of a logo image for the letterhead.
    pub logo_url: Option<String>,
    /// Bank account holder name.
    pub account_name: Option<String>,
    /// Bank account number.
    pub account_number: Option<String>,
    /// Bank sort code.
    pub sort_code: Option<String>,
}

impl Business {
    /// True when at least one bank detail is present, in which case the
    /// renderer emits a payment details block.
    #[must_use]
    pub fn has_bank_details(&self) -> bool {
        self.account_name.is_some() || self.account_number.is_some() || self.sort_code.is_some()
    }
}

/// Validated customer details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// One validated billable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// What is being billed.
    pub description: String,
    /// Quantity; positive.
    pub quantity: Decimal,
    /// Price per unit; non-negative.
    pub unit_price: Decimal,
    /// Derived: quantity x unit price, full precision.
    pub total: Decimal,
}

/// A validated invoice, immutable after construction.
///
/// All aggregates are derived by the calculator; none come from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Identifying invoice number.
    pub invoice_number: String,
    /// Issue date.
    pub date: NaiveDate,
    /// Due date; never earlier than the issue date.
    pub due_date: NaiveDate,
    /// Issuing business.
    pub business: Business,
    /// Customer being billed.
    pub customer: Customer,
    /// Line items in caller-supplied order.
    pub items: Vec<LineItem>,
    /// Derived: sum of line item totals.
    pub subtotal: Decimal,
    /// VAT rate as a fraction.
    pub vat_rate: Decimal,
    /// Derived: subtotal x vat_rate.
    pub vat_amount: Decimal,
    /// Derived: subtotal + vat_amount.
    pub total: Decimal,
    /// Invoice currency.
    pub currency: Currency,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Payment terms.
    pub terms: Option<String>,
}

impl Invoice {
    /// The artifact filename for this invoice: `invoice-<number>.pdf`,
    /// sanitized for storage keys. Regenerating the same invoice number
    /// overwrites the previous artifact.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("invoice-{}.pdf", sanitize(&self.invoice_number))
    }

    /// Grand total as money in the invoice currency.
    #[must_use]
    pub fn total_money(&self) -> Money {
        Money::new(self.total, self.currency)
    }

    /// Subtotal as money in the invoice currency.
    #[must_use]
    pub fn subtotal_money(&self) -> Money {
        Money::new(self.subtotal, self.currency)
    }

    /// VAT amount as money in the invoice currency.
    #[must_use]
    pub fn vat_money(&self) -> Money {
        Money::new(self.vat_amount, self.currency)
    }
}

/// Sanitize a value for use in storage keys and filenames.
///
/// Only ASCII alphanumeric characters, dots, hyphens, and underscores
/// survive; everything else becomes an underscore.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

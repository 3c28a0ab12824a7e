//! Monetary calculation for invoices.
//!
//! All arithmetic is full-precision `Decimal`; rounding to 2 decimal
//! places happens only at presentation time. The same input always
//! produces the same aggregates. Arithmetic is checked: amounts that
//! exceed `Decimal` range become a violation, never a panic.

use rust_decimal::Decimal;

use remit_shared::config::InvoiceDefaults;

use super::error::{InvoiceError, Violation};
use super::types::{Invoice, InvoiceRequest, LineItem};
use super::validation;

/// Line total: quantity x unit price. `None` on overflow.
#[must_use]
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Option<Decimal> {
    quantity.checked_mul(unit_price)
}

/// Subtotal: sum of line item totals, in input order. `None` on overflow.
#[must_use]
pub fn subtotal(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.total))
}

/// VAT amount: subtotal x rate. `None` on overflow.
#[must_use]
pub fn vat_amount(subtotal: Decimal, vat_rate: Decimal) -> Option<Decimal> {
    subtotal.checked_mul(vat_rate)
}

/// Builds a validated [`Invoice`] from a raw request.
///
/// Validates the request (reporting every violation at once), then derives
/// all monetary aggregates server-side. Caller-supplied totals are never
/// trusted, even when present.
///
/// # Errors
///
/// Returns [`InvoiceError::Invalid`] with the full violation list when any
/// rule fails; nothing is rendered in that case. Aggregates that overflow
/// the decimal range are reported as a `total` violation.
pub fn build_invoice(
    request: &InvoiceRequest,
    defaults: &InvoiceDefaults,
) -> Result<Invoice, InvoiceError> {
    let checked = validation::check(request, defaults).map_err(InvoiceError::Invalid)?;

    let mut items = Vec::with_capacity(checked.items.len());
    for item in checked.items {
        let total = line_total(item.quantity, item.unit_price).ok_or_else(overflow)?;
        items.push(LineItem {
            description: item.description,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total,
        });
    }

    let subtotal = subtotal(&items).ok_or_else(overflow)?;
    let vat_amount = vat_amount(subtotal, checked.vat_rate).ok_or_else(overflow)?;
    let total = subtotal.checked_add(vat_amount).ok_or_else(overflow)?;

    Ok(Invoice {
        invoice_number: checked.invoice_number,
        date: checked.date,
        due_date: checked.due_date,
        business: checked.business,
        customer: checked.customer,
        items,
        subtotal,
        vat_rate: checked.vat_rate,
        vat_amount,
        total,
        currency: checked.currency,
        notes: checked.notes,
        terms: checked.terms,
    })
}

fn overflow() -> InvoiceError {
    InvoiceError::Invalid(vec![Violation::new(
        "total",
        "computed amounts exceed the supported range",
    )])
}

//! Invoice calculation and validation.
//!
//! The calculator takes a raw, untrusted request and produces a validated
//! [`Invoice`] with all monetary aggregates recomputed server-side. A
//! partially valid invoice never leaves this module: validation reports
//! every violation at once and halts generation before rendering.

mod calculator;
mod error;
mod types;
mod validation;


#[cfg(test)]
mod props;

pub use calculator::{build_invoice, line_total, subtotal, vat_amount};
pub use error::{InvoiceError, Violation};
pub use types::{
    Business, BusinessRequest, Customer, CustomerRequest, Invoice, InvoiceRequest, LineItem,
    LineItemRequest,
};

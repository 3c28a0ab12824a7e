//! Request validation for invoice generation.
//!
//! Validation is all-or-nothing: either every rule passes and a fully
//! parsed [`Checked`] request comes out, or the complete list of
//! violations is returned. Nothing here computes money; that is the
//! calculator's job.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use remit_shared::config::InvoiceDefaults;
use remit_shared::types::Currency;

use super::error::Violation;
use super::types::{Business, Customer, InvoiceRequest};

/// ISO-8601 date pattern accepted at the input boundary.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A request that passed validation, with all optional fields resolved.
#[derive(Debug, Clone)]
pub(super) struct Checked {
    pub invoice_number: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub business: Business,
    pub customer: Customer,
    pub items: Vec<CheckedItem>,
    pub currency: Currency,
    pub vat_rate: Decimal,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

/// A line item that passed validation.
#[derive(Debug, Clone)]
pub(super) struct CheckedItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Validates a raw request against the invoice rules.
///
/// # Errors
///
/// Returns every violated field, never just the first.
pub(super) fn check(
    request: &InvoiceRequest,
    defaults: &InvoiceDefaults,
) -> Result<Checked, Vec<Violation>> {
    let mut violations = Vec::new();

    let business_name = required_text(
        request.business.name.as_deref(),
        "business.name",
        &mut violations,
    );
    let customer_name = required_text(
        request.customer.name.as_deref(),
        "customer.name",
        &mut violations,
    );

    let items = check_items(request, &mut violations);
    let currency = check_currency(request, defaults, &mut violations);
    let vat_rate = check_vat_rate(request, defaults, &mut violations);
    let (date, due_date) = check_dates(request, defaults, &mut violations);

    if !violations.is_empty() {
        return Err(violations);
    }

    // All individual parses succeeded past this point.
    let date = date.unwrap_or_default();
    let due_date = due_date.unwrap_or_default();

    Ok(Checked {
        invoice_number: resolve_invoice_number(request.invoice_number.as_deref()),
        date,
        due_date,
        business: Business {
            name: business_name.unwrap_or_default(),
            address: non_empty(request.business.address.as_deref()),
            email: non_empty(request.business.email.as_deref()),
            logo_url: non_empty(request.business.logo_url.as_deref()),
            account_name: non_empty(request.business.account_name.as_deref()),
            account_number: non_empty(request.business.account_number.as_deref()),
            sort_code: non_empty(request.business.sort_code.as_deref()),
        },
        customer: Customer {
            name: customer_name.unwrap_or_default(),
            email: non_empty(request.customer.email.as_deref()),
            address: non_empty(request.customer.address.as_deref()),
        },
        items,
        currency,
        vat_rate,
        notes: non_empty(request.notes.as_deref()),
        terms: non_empty(request.terms.as_deref()),
    })
}

fn check_items(request: &InvoiceRequest, violations: &mut Vec<Violation>) -> Vec<CheckedItem> {
    if request.items.is_empty() {
        violations.push(Violation::new("items", "must contain at least one item"));
        return Vec::new();
    }

    let mut checked = Vec::with_capacity(request.items.len());
    for (index, item) in request.items.iter().enumerate() {
        let description = required_text(
            item.description.as_deref(),
            format!("items[{index}].description"),
            violations,
        );

        let quantity = match item.quantity {
            Some(quantity) if quantity > Decimal::ZERO => Some(quantity),
            Some(_) => {
                violations.push(Violation::new(
                    format!("items[{index}].quantity"),
                    "must be greater than zero",
                ));
                None
            }
            None => {
                violations.push(Violation::new(
                    format!("items[{index}].quantity"),
                    "is required",
                ));
                None
            }
        };

        let unit_price = match item.unit_price {
            Some(price) if price >= Decimal::ZERO => Some(price),
            Some(_) => {
                violations.push(Violation::new(
                    format!("items[{index}].unitPrice"),
                    "must not be negative",
                ));
                None
            }
            None => {
                violations.push(Violation::new(
                    format!("items[{index}].unitPrice"),
                    "is required",
                ));
                None
            }
        };

        // Any caller-supplied item.total is intentionally dropped here;
        // the calculator recomputes it from quantity and unit price.
        if let (Some(description), Some(quantity), Some(unit_price)) =
            (description, quantity, unit_price)
        {
            checked.push(CheckedItem {
                description,
                quantity,
                unit_price,
            });
        }
    }

    checked
}

fn check_currency(
    request: &InvoiceRequest,
    defaults: &InvoiceDefaults,
    violations: &mut Vec<Violation>,
) -> Currency {
    let code = request
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(&defaults.currency);

    match code.parse() {
        Ok(currency) => currency,
        Err(_) => {
            violations.push(Violation::new(
                "currency",
                format!(
                    "unsupported currency '{code}' (expected one of {})",
                    Currency::ALL.map(|c| c.code()).join(", ")
                ),
            ));
            Currency::default()
        }
    }
}

fn check_vat_rate(
    request: &InvoiceRequest,
    defaults: &InvoiceDefaults,
    violations: &mut Vec<Violation>,
) -> Decimal {
    let rate = request.vat_rate.unwrap_or(defaults.vat_rate);
    if rate < Decimal::ZERO {
        violations.push(Violation::new("vatRate", "must not be negative"));
    }
    rate
}

fn check_dates(
    request: &InvoiceRequest,
    defaults: &InvoiceDefaults,
    violations: &mut Vec<Violation>,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let date = match request.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => parse_date(raw, "date", violations),
        None => Some(Utc::now().date_naive()),
    };

    let due_date = match request
        .due_date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        Some(raw) => parse_date(raw, "dueDate", violations),
        None => date.map(|d| {
            d.checked_add_signed(chrono::Duration::days(defaults.due_in_days))
                .unwrap_or(d)
        }),
    };

    // Inverted ranges are rejected; only checked when both dates parsed.
    if let (Some(date), Some(due_date)) = (date, due_date)
        && due_date < date
    {
        violations.push(Violation::new(
            "dueDate",
            format!("must not be earlier than the issue date ({date})"),
        ));
    }

    (date, due_date)
}

fn parse_date(raw: &str, field: &str, violations: &mut Vec<Violation>) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(Violation::new(
                field,
                format!("'{raw}' is not a valid date (expected YYYY-MM-DD)"),
            ));
            None
        }
    }
}

fn required_text(
    value: Option<&str>,
    field: impl Into<String>,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(text) => Some(text.to_string()),
        None => {
            violations.push(Violation::new(field, "is required"));
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn resolve_invoice_number(supplied: Option<&str>) -> String {
    match supplied.map(str::trim).filter(|n| !n.is_empty()) {
        Some(number) => number.to_string(),
        None => {
            let id = uuid::Uuid::new_v4().simple().to_string();
            format!("INV-{}", id[..8].to_uppercase())
        }
    }
}

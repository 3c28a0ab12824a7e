//! Unit tests for the PDF renderer.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use remit_shared::types::Currency;

use crate::invoice::{Business, Customer, Invoice, LineItem};

use super::*;

/// 1x1 transparent PNG.
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn item(description: &str, quantity: rust_decimal::Decimal, price: rust_decimal::Decimal) -> LineItem {
    LineItem {
        description: description.to_string(),
        quantity,
        unit_price: price,
        total: quantity * price,
    }
}

fn sample_invoice() -> Invoice {
    let items = vec![
        item("Web development", dec!(10), dec!(75)),
        item("Logo design", dec!(5), dec!(60)),
    ];
    Invoice {
        invoice_number: "INV-0042".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
        business: Business {
            name: "Acme Consulting Ltd".to_string(),
            address: Some("1 High Street\nLondon".to_string()),
            email: Some("billing@acme.example".to_string()),
            logo_url: None,
            account_name: Some("Acme Consulting Ltd".to_string()),
            account_number: Some("12345678".to_string()),
            sort_code: Some("12-34-56".to_string()),
        },
        customer: Customer {
            name: "Globex Corp".to_string(),
            email: Some("accounts@globex.example".to_string()),
            address: Some("9 Long Road, Leeds".to_string()),
        },
        subtotal: dec!(1050),
        vat_rate: dec!(0.20),
        vat_amount: dec!(210),
        total: dec!(1260),
        items,
        currency: Currency::Gbp,
        notes: Some("Thank you for your business.".to_string()),
        terms: Some("Payment due within 30 days.".to_string()),
    }
}

fn minimal_invoice() -> Invoice {
    Invoice {
        invoice_number: "INV-1".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        business: Business {
            name: "Solo Trader".to_string(),
            address: None,
            email: None,
            logo_url: None,
            account_name: None,
            account_number: None,
            sort_code: None,
        },
        customer: Customer {
            name: "Client".to_string(),
            email: None,
            address: None,
        },
        items: vec![item("Consulting", dec!(1), dec!(500))],
        subtotal: dec!(500),
        vat_rate: dec!(0),
        vat_amount: dec!(0),
        total: dec!(500),
        currency: Currency::Usd,
        notes: None,
        terms: None,
    }
}

#[test]
fn test_render_produces_pdf_bytes() {
    let bytes = render(&sample_invoice(), None).expect("render succeeds");
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 500);
}

#[test]
fn test_render_is_byte_deterministic() {
    let invoice = sample_invoice();
    let first = render(&invoice, None).expect("render succeeds");
    let second = render(&invoice, None).expect("render succeeds");
    assert_eq!(first, second);
}

#[test]
fn test_render_with_logo_is_byte_deterministic() {
    let invoice = sample_invoice();
    let first = render(&invoice, Some(TINY_PNG)).expect("render succeeds");
    let second = render(&invoice, Some(TINY_PNG)).expect("render succeeds");
    assert_eq!(first, second);
}

#[test]
fn test_trailer_id_is_stable_across_renders() {
    let invoice = sample_invoice();
    let first = render(&invoice, None).expect("render succeeds");
    let second = render(&invoice, None).expect("render succeeds");

    let id_region = |bytes: &[u8]| {
        let at = bytes
            .windows(3)
            .rposition(|w| w == b"/ID")
            .expect("trailer carries an /ID");
        bytes[at..(at + 80).min(bytes.len())].to_vec()
    };
    assert_eq!(id_region(&first), id_region(&second));
    // In-place rewrite must not disturb the document structure.
    assert!(first.trim_ascii_end().ends_with(b"%%EOF"));
}

#[test]
fn test_missing_optional_blocks_degrade_gracefully() {
    let bytes = render(&minimal_invoice(), None).expect("render succeeds");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_undecodable_logo_is_omitted_not_fatal() {
    let invoice = sample_invoice();
    let bytes = render(&invoice, Some(b"definitely not an image")).expect("render succeeds");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_long_item_list_paginates() {
    let mut invoice = sample_invoice();
    invoice.items = (0..120)
        .map(|i| item(&format!("Line item number {i}"), dec!(1), dec!(10)))
        .collect();
    invoice.subtotal = dec!(1200);
    invoice.vat_amount = dec!(240);
    invoice.total = dec!(1440);

    let bytes = render(&invoice, None).expect("render succeeds");
    assert!(bytes.starts_with(b"%PDF"));

    let single_page = render(&sample_invoice(), None).expect("render succeeds");
    assert!(bytes.len() > single_page.len());
}

#[test]
fn test_render_to_path_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("nested").join("out").join("invoice.pdf");

    render_to_path(&sample_invoice(), None, &target).expect("render succeeds");

    let written = std::fs::read(&target).expect("file exists");
    assert!(written.starts_with(b"%PDF"));
    // No temporary sibling left behind.
    assert!(!target.with_extension("pdf.tmp").exists());
}

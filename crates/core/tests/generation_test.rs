//! End-to-end generation pipeline tests against local filesystem storage.

use std::sync::Arc;

use remit_core::generation::{GenerationError, GenerationService};
use remit_core::invoice::{
    BusinessRequest, CustomerRequest, InvoiceRequest, LineItemRequest,
};
use remit_core::render::LogoFetcher;
use remit_core::storage::{StorageConfig, StorageProvider, StorageService};
use remit_shared::config::{InvoiceDefaults, RenderSettings};
use rust_decimal_macros::dec;

fn service_at(root: &std::path::Path) -> GenerationService {
    let storage = StorageService::from_config(StorageConfig::new(StorageProvider::local_fs(root)))
        .expect("local storage initializes");
    let fetcher = LogoFetcher::new(&RenderSettings {
        logo_timeout_secs: 1,
        ..RenderSettings::default()
    })
    .expect("fetcher builds");
    GenerationService::new(Arc::new(storage), fetcher, InvoiceDefaults::default())
}

fn item(description: &str, quantity: rust_decimal::Decimal, price: rust_decimal::Decimal) -> LineItemRequest {
    LineItemRequest {
        description: Some(description.to_string()),
        quantity: Some(quantity),
        unit_price: Some(price),
        total: None,
    }
}

fn consulting_request() -> InvoiceRequest {
    InvoiceRequest {
        invoice_number: Some("INV-0042".to_string()),
        date: Some("2026-01-15".to_string()),
        due_date: Some("2026-02-14".to_string()),
        business: BusinessRequest {
            name: Some("Acme Consulting Ltd".to_string()),
            email: Some("billing@acme.example".to_string()),
            account_name: Some("Acme Consulting Ltd".to_string()),
            account_number: Some("12345678".to_string()),
            sort_code: Some("12-34-56".to_string()),
            ..BusinessRequest::default()
        },
        customer: CustomerRequest {
            name: Some("Globex Corp".to_string()),
            ..CustomerRequest::default()
        },
        items: vec![
            item("Web development", dec!(10), dec!(75)),
            item("Logo design", dec!(5), dec!(60)),
        ],
        vat_rate: Some(dec!(0.20)),
        ..InvoiceRequest::default()
    }
}

#[tokio::test]
async fn test_generate_stores_pdf_and_returns_receipt() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service_at(dir.path());

    let receipt = service
        .generate(&consulting_request())
        .await
        .expect("generation succeeds");

    assert_eq!(receipt.invoice_number, "INV-0042");
    assert_eq!(receipt.customer_name, "Globex Corp");
    assert_eq!(receipt.total, "GBP 1,260.00");
    assert_eq!(receipt.filename, "invoice-INV-0042.pdf");
    assert!(receipt.locator.ends_with("invoice-INV-0042.pdf"));

    let bytes = std::fs::read(dir.path().join("invoice-INV-0042.pdf")).expect("artifact exists");
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_rejected_request_produces_no_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service_at(dir.path());

    let mut request = consulting_request();
    request.items.clear();

    let err = service
        .generate(&request)
        .await
        .expect_err("empty items are rejected");
    assert!(matches!(err, GenerationError::Validation(_)));

    let leftovers = std::fs::read_dir(dir.path())
        .expect("dir readable")
        .count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_currency_prefix_follows_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service_at(dir.path());

    let mut request = consulting_request();
    request.currency = Some("USD".to_string());

    let receipt = service
        .generate(&request)
        .await
        .expect("generation succeeds");
    assert!(receipt.total.starts_with("USD "));
}

#[tokio::test]
async fn test_unreachable_logo_degrades_to_no_logo() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service_at(dir.path());

    let mut request = consulting_request();
    request.business.logo_url = Some("http://127.0.0.1:9/logo.png".to_string());

    let receipt = service
        .generate(&request)
        .await
        .expect("generation still succeeds");

    let bytes = std::fs::read(dir.path().join(&receipt.filename)).expect("artifact exists");
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_regeneration_overwrites_previous_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service_at(dir.path());

    let first = service
        .generate(&consulting_request())
        .await
        .expect("first generation succeeds");

    let mut request = consulting_request();
    request.items = vec![item("Web development", dec!(20), dec!(75))];

    let second = service
        .generate(&request)
        .await
        .expect("second generation succeeds");

    assert_eq!(first.filename, second.filename);
    let artifacts = std::fs::read_dir(dir.path())
        .expect("dir readable")
        .count();
    assert_eq!(artifacts, 1);
    assert_eq!(second.total, "GBP 1,800.00");
}

#[tokio::test]
async fn test_generated_invoice_number_when_omitted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service_at(dir.path());

    let mut request = consulting_request();
    request.invoice_number = None;

    let receipt = service
        .generate(&request)
        .await
        .expect("generation succeeds");

    assert!(receipt.invoice_number.starts_with("INV-"));
    assert_eq!(receipt.invoice_number.len(), "INV-".len() + 8);
    assert!(dir.path().join(&receipt.filename).exists());
}

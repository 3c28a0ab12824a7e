//! Invoice PDF composition.
//!
//! Fixed A4 template: business letterhead with optional logo, invoice
//! metadata, customer block, items table (caller order, paginated), totals
//! block, and a footer with notes, terms, and bank details when present.
//!
//! Millimetre page geometry is `f32`, exempt from the monetary float ban.
#![allow(clippy::float_arithmetic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use printpdf::image_crate::GenericImageView;
use printpdf::{
    BuiltinFont, CustomPdfConformance, Image, ImageTransform, IndirectFontRef, Line, Mm,
    PdfConformance, PdfDocument, PdfDocumentReference, PdfLayerReference, Point,
};
use tracing::warn;

use remit_shared::types::Money;

use crate::invoice::Invoice;

use super::error::RenderError;
use super::layout::{
    COL_DESCRIPTION, COL_LINE_TOTAL, COL_QUANTITY, COL_UNIT_PRICE, FOOTER_Y, LOGO_MAX_HEIGHT,
    LOGO_MAX_WIDTH, MARGIN_LEFT, MARGIN_RIGHT, MAX_DESCRIPTION_CHARS, PAGE_HEIGHT, PAGE_WIDTH,
    SIZE_BODY, SIZE_HEADING, SIZE_LETTERHEAD, SIZE_TITLE, TABLE_FLOOR, TOP_BASELINE, clip_cell,
    format_date, format_quantity,
};

/// Renders a validated invoice to PDF bytes.
///
/// Output is deterministic: the same invoice and logo bytes always produce
/// byte-identical output, because document metadata is derived from the
/// invoice rather than the clock.
///
/// # Errors
///
/// Returns [`RenderError::Pdf`] if the PDF engine rejects the document.
/// An undecodable logo is not an error; the logo block is omitted.
pub fn render(invoice: &Invoice, logo: Option<&[u8]>) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Invoice {}", invoice.invoice_number),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let doc = pin_metadata(doc, invoice);

    let regular = builtin_font(&doc, BuiltinFont::Helvetica)?;
    let bold = builtin_font(&doc, BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = TOP_BASELINE;

    y = draw_letterhead(&layer, &regular, &bold, invoice, y);
    if let Some(bytes) = logo {
        embed_logo(&layer, bytes);
    }

    // Divider between letterhead and body.
    y -= 4.0;
    draw_rule(&layer, y);
    y -= 10.0;

    y = draw_title_and_parties(&layer, &regular, &bold, invoice, y);
    y = draw_items_table(&doc, &mut layer, &regular, &bold, invoice, y);
    y = draw_totals(&doc, &mut layer, &regular, &bold, invoice, y);
    draw_footer(&doc, &mut layer, &regular, &bold, invoice, y);

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| RenderError::pdf(e.to_string()))?;
    let mut bytes = writer
        .into_inner()
        .map_err(|e| RenderError::pdf(e.to_string()))?;
    pin_trailer_id(&mut bytes, &invoice.invoice_number);
    Ok(bytes)
}

/// Renders a validated invoice to a file, creating parent directories.
///
/// The document is written to a temporary sibling and renamed into place,
/// so a failed render never leaves a complete-looking file behind.
///
/// # Errors
///
/// Returns a render error for composition failures or an IO error for
/// filesystem failures.
pub fn render_to_path(
    invoice: &Invoice,
    logo: Option<&[u8]>,
    path: &Path,
) -> Result<(), RenderError> {
    let bytes = render(invoice, logo)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
    }

    let tmp = path.with_extension("pdf.tmp");
    fs::write(&tmp, &bytes).map_err(|e| RenderError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| RenderError::io(path, e))?;
    Ok(())
}

/// Rewrites the trailer `/ID` strings in place, derived from the invoice
/// number. The PDF engine regenerates them randomly on every save, which
/// would break byte-determinism. Same-length replacement keeps every xref
/// offset valid.
fn pin_trailer_id(bytes: &mut [u8], invoice_number: &str) {
    let Some(id_at) = bytes.windows(3).rposition(|w| w == b"/ID") else {
        return;
    };
    let Some(open) = bytes[id_at..].iter().position(|&b| b == b'[') else {
        return;
    };
    let open = id_at + open;
    let Some(close) = bytes[open..].iter().position(|&b| b == b']') else {
        return;
    };
    let close = open + close;

    // FNV-1a seed, then an LCG stream; plain uppercase letters keep the
    // strings valid without escaping.
    let mut state: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in invoice_number.as_bytes() {
        state ^= u64::from(b);
        state = state.wrapping_mul(0x0000_0100_0000_01b3);
    }
    for byte in &mut bytes[open + 1..close] {
        if byte.is_ascii_alphanumeric() {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            *byte = b'A' + ((state >> 33) % 26) as u8;
        }
    }
}

/// Pins document metadata so output depends only on the invoice.
fn pin_metadata(doc: PdfDocumentReference, invoice: &Invoice) -> PdfDocumentReference {
    doc.with_conformance(PdfConformance::Custom(CustomPdfConformance {
        requires_icc_profile: false,
        requires_xmp_metadata: false,
        ..CustomPdfConformance::default()
    }))
    .with_creation_date(time::OffsetDateTime::UNIX_EPOCH)
    .with_mod_date(time::OffsetDateTime::UNIX_EPOCH)
    .with_document_id(format!("remit-invoice-{}", invoice.invoice_number))
}

fn builtin_font(
    doc: &PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, RenderError> {
    doc.add_builtin_font(font)
        .map_err(|e| RenderError::pdf(e.to_string()))
}

fn text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    value: &str,
    size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(value, size, Mm(x), Mm(y), font);
}

fn draw_rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_LEFT), Mm(y)), false),
            (Point::new(Mm(MARGIN_RIGHT), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Business name, address, and email, top-left.
fn draw_letterhead(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    invoice: &Invoice,
    mut y: f32,
) -> f32 {
    text(
        layer,
        bold,
        &invoice.business.name,
        SIZE_LETTERHEAD,
        MARGIN_LEFT,
        y,
    );
    y -= 7.0;

    if let Some(address) = &invoice.business.address {
        for line in address.lines() {
            text(layer, regular, line, SIZE_BODY, MARGIN_LEFT, y);
            y -= 5.0;
        }
    }
    if let Some(email) = &invoice.business.email {
        text(layer, regular, email, SIZE_BODY, MARGIN_LEFT, y);
        y -= 5.0;
    }

    // Keep space for the logo box even when the letterhead text is short.
    y.min(TOP_BASELINE - LOGO_MAX_HEIGHT - 2.0)
}

/// "INVOICE" title, customer block (left), and invoice metadata (right).
fn draw_title_and_parties(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    invoice: &Invoice,
    mut y: f32,
) -> f32 {
    text(layer, bold, "INVOICE", SIZE_TITLE, MARGIN_LEFT, y);
    y -= 12.0;

    let block_top = y;
    text(layer, bold, "Billed To", SIZE_HEADING, MARGIN_LEFT, y);
    y -= 6.0;
    text(
        layer,
        regular,
        &invoice.customer.name,
        SIZE_BODY,
        MARGIN_LEFT,
        y,
    );
    y -= 5.0;
    if let Some(address) = &invoice.customer.address {
        for line in address.lines() {
            text(layer, regular, line, SIZE_BODY, MARGIN_LEFT, y);
            y -= 5.0;
        }
    }
    if let Some(email) = &invoice.customer.email {
        text(layer, regular, email, SIZE_BODY, MARGIN_LEFT, y);
        y -= 5.0;
    }

    // Metadata column, right of the customer block.
    let mut meta_y = block_top;
    text(layer, bold, "Details", SIZE_HEADING, COL_QUANTITY, meta_y);
    meta_y -= 6.0;
    text(
        layer,
        regular,
        &format!("Invoice #: {}", invoice.invoice_number),
        SIZE_BODY,
        COL_QUANTITY,
        meta_y,
    );
    meta_y -= 5.0;
    text(
        layer,
        regular,
        &format!("Issue date: {}", format_date(invoice.date)),
        SIZE_BODY,
        COL_QUANTITY,
        meta_y,
    );
    meta_y -= 5.0;
    text(
        layer,
        regular,
        &format!("Due date: {}", format_date(invoice.due_date)),
        SIZE_BODY,
        COL_QUANTITY,
        meta_y,
    );
    meta_y -= 5.0;

    y.min(meta_y) - 8.0
}

/// Items table with header, paginated when the page runs out.
fn draw_items_table(
    doc: &PdfDocumentReference,
    layer: &mut PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    invoice: &Invoice,
    mut y: f32,
) -> f32 {
    y = draw_table_header(layer, bold, y);

    for item in &invoice.items {
        if y < TABLE_FLOOR {
            *layer = new_page(doc);
            y = draw_table_header(layer, bold, TOP_BASELINE);
        }

        text(
            layer,
            regular,
            &clip_cell(&item.description, MAX_DESCRIPTION_CHARS),
            SIZE_BODY,
            COL_DESCRIPTION,
            y,
        );
        text(
            layer,
            regular,
            &format_quantity(item.quantity),
            SIZE_BODY,
            COL_QUANTITY,
            y,
        );
        text(
            layer,
            regular,
            &Money::new(item.unit_price, invoice.currency).to_string(),
            SIZE_BODY,
            COL_UNIT_PRICE,
            y,
        );
        text(
            layer,
            regular,
            &Money::new(item.total, invoice.currency).to_string(),
            SIZE_BODY,
            COL_LINE_TOTAL,
            y,
        );
        y -= 6.0;
    }

    y -= 2.0;
    draw_rule(layer, y);
    y - 8.0
}

fn draw_table_header(layer: &PdfLayerReference, bold: &IndirectFontRef, mut y: f32) -> f32 {
    text(layer, bold, "Description", SIZE_BODY, COL_DESCRIPTION, y);
    text(layer, bold, "Qty", SIZE_BODY, COL_QUANTITY, y);
    text(layer, bold, "Unit price", SIZE_BODY, COL_UNIT_PRICE, y);
    text(layer, bold, "Total", SIZE_BODY, COL_LINE_TOTAL, y);
    y -= 3.0;
    draw_rule(layer, y);
    y - 6.0
}

/// Subtotal, VAT at its rate, and grand total, right-aligned block.
fn draw_totals(
    doc: &PdfDocumentReference,
    layer: &mut PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    invoice: &Invoice,
    mut y: f32,
) -> f32 {
    if y < TABLE_FLOOR + 15.0 {
        *layer = new_page(doc);
        y = TOP_BASELINE;
    }

    let percent = (invoice.vat_rate * rust_decimal::Decimal::ONE_HUNDRED).normalize();

    text(layer, regular, "Subtotal:", SIZE_BODY + 1.0, COL_UNIT_PRICE, y);
    text(
        layer,
        regular,
        &invoice.subtotal_money().to_string(),
        SIZE_BODY + 1.0,
        COL_LINE_TOTAL,
        y,
    );
    y -= 6.0;

    text(
        layer,
        regular,
        &format!("VAT ({percent}%):"),
        SIZE_BODY + 1.0,
        COL_UNIT_PRICE,
        y,
    );
    text(
        layer,
        regular,
        &invoice.vat_money().to_string(),
        SIZE_BODY + 1.0,
        COL_LINE_TOTAL,
        y,
    );
    y -= 7.0;

    text(layer, bold, "TOTAL:", SIZE_HEADING + 1.0, COL_UNIT_PRICE, y);
    text(
        layer,
        bold,
        &invoice.total_money().to_string(),
        SIZE_HEADING + 1.0,
        COL_LINE_TOTAL,
        y,
    );

    y - 12.0
}

/// Notes, payment terms, and bank details; blocks absent from the invoice
/// are omitted entirely rather than rendered blank.
fn draw_footer(
    doc: &PdfDocumentReference,
    layer: &mut PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    invoice: &Invoice,
    mut y: f32,
) {
    let mut blocks: Vec<(&str, Vec<String>)> = Vec::new();

    if let Some(notes) = &invoice.notes {
        blocks.push(("Notes", notes.lines().map(ToString::to_string).collect()));
    }
    if let Some(terms) = &invoice.terms {
        blocks.push((
            "Payment terms",
            terms.lines().map(ToString::to_string).collect(),
        ));
    }
    if invoice.business.has_bank_details() {
        let mut lines = Vec::new();
        if let Some(account_name) = &invoice.business.account_name {
            lines.push(format!("Account name: {account_name}"));
        }
        if let Some(account_number) = &invoice.business.account_number {
            lines.push(format!("Account number: {account_number}"));
        }
        if let Some(sort_code) = &invoice.business.sort_code {
            lines.push(format!("Sort code: {sort_code}"));
        }
        blocks.push(("Payment details", lines));
    }

    for (heading, lines) in blocks {
        let needed = 8.0 + 5.0 * lines.len() as f32;
        if y - needed < FOOTER_Y {
            *layer = new_page(doc);
            y = TOP_BASELINE;
        }

        text(layer, bold, &format!("{heading}:"), SIZE_HEADING - 1.0, MARGIN_LEFT, y);
        y -= 6.0;
        for line in lines {
            text(layer, regular, &line, SIZE_BODY, MARGIN_LEFT, y);
            y -= 5.0;
        }
        y -= 4.0;
    }
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

/// Decodes and places the logo in the top-right letterhead box.
///
/// Undecodable bytes degrade to no logo; the render never fails here.
fn embed_logo(layer: &PdfLayerReference, bytes: &[u8]) {
    let decoded = match printpdf::image_crate::load_from_memory(bytes) {
        Ok(image) => image,
        Err(error) => {
            warn!(%error, "logo decode failed; rendering without logo");
            return;
        }
    };

    let (px_width, px_height) = decoded.dimensions();
    if px_width == 0 || px_height == 0 {
        warn!("logo has zero dimension; rendering without logo");
        return;
    }

    // Natural size at the embedding DPI, fitted into the logo box.
    const DPI: f32 = 300.0;
    const MM_PER_INCH: f32 = 25.4;
    let natural_width = px_width as f32 * MM_PER_INCH / DPI;
    let natural_height = px_height as f32 * MM_PER_INCH / DPI;
    let scale = (LOGO_MAX_WIDTH / natural_width)
        .min(LOGO_MAX_HEIGHT / natural_height)
        .min(1.0);

    let image = Image::from_dynamic_image(&decoded);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_RIGHT - natural_width * scale)),
            translate_y: Some(Mm(TOP_BASELINE - natural_height * scale)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(DPI),
            ..ImageTransform::default()
        },
    );
}

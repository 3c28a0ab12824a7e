//! Fixed page geometry and text formatting for the invoice template.
//!
//! Millimetre coordinates are plain `f32` geometry, not money; the
//! float-arithmetic lint is lifted for this module only.
#![allow(clippy::float_arithmetic)]

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A4 page width in millimetres.
pub(super) const PAGE_WIDTH: f32 = 210.0;
/// A4 page height in millimetres.
pub(super) const PAGE_HEIGHT: f32 = 297.0;

/// Left content edge.
pub(super) const MARGIN_LEFT: f32 = 15.0;
/// Right content edge.
pub(super) const MARGIN_RIGHT: f32 = 195.0;
/// First baseline on a page.
pub(super) const TOP_BASELINE: f32 = 285.0;
/// Table rows continue on a fresh page below this baseline.
pub(super) const TABLE_FLOOR: f32 = 30.0;
/// Footer baseline.
pub(super) const FOOTER_Y: f32 = 12.0;

/// Items table column x positions.
pub(super) const COL_DESCRIPTION: f32 = 15.0;
/// Quantity column.
pub(super) const COL_QUANTITY: f32 = 120.0;
/// Unit price column.
pub(super) const COL_UNIT_PRICE: f32 = 142.0;
/// Line total column.
pub(super) const COL_LINE_TOTAL: f32 = 170.0;

/// Logo bounding box, top-right of the letterhead.
pub(super) const LOGO_MAX_WIDTH: f32 = 40.0;
/// Logo box height.
pub(super) const LOGO_MAX_HEIGHT: f32 = 20.0;

/// Body font size in points.
pub(super) const SIZE_BODY: f32 = 10.0;
/// Section heading size.
pub(super) const SIZE_HEADING: f32 = 12.0;
/// Letterhead business name size.
pub(super) const SIZE_LETTERHEAD: f32 = 16.0;
/// "INVOICE" title size.
pub(super) const SIZE_TITLE: f32 = 24.0;

/// Longest description rendered before truncation with an ellipsis.
pub(super) const MAX_DESCRIPTION_CHARS: usize = 58;

/// Fixed, locale-stable date pattern, e.g. `15 Jan 2026`.
///
/// chrono's `%b` always renders English month abbreviations, so output
/// never depends on server locale or timezone configuration.
pub(super) fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Quantities render with trailing zeros trimmed: `10`, `2.5`.
pub(super) fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

/// Truncates a table cell to the column width, appending an ellipsis.
pub(super) fn clip_cell(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{clipped}...")
}

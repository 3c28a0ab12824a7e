//! Deterministic PDF composition for validated invoices.
//!
//! The renderer consumes a validated [`crate::invoice::Invoice`] and
//! produces PDF bytes with a fixed A4 layout. Rendering the same invoice
//! twice yields byte-identical output: document metadata dates and the
//! document ID are pinned rather than taken from the clock.
//!
//! The optional letterhead logo is fetched separately ([`LogoFetcher`])
//! with a hard timeout; a missing or broken logo never fails a render.

mod document;
mod error;
mod layout;
mod logo;

#[cfg(test)]
mod tests;

pub use document::{render, render_to_path};
pub use error::RenderError;
pub use logo::LogoFetcher;

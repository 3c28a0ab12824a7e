//! Artifact storage behind Apache OpenDAL.
//!
//! The core only needs "store bytes under a name, get back a locator".
//! Providers are vendor-agnostic through OpenDAL:
//! - S3-compatible: Cloudflare R2, Supabase, AWS S3, DigitalOcean Spaces
//! - Azure Blob Storage
//! - Local filesystem (development)
//!
//! A locator is an opaque reference: a filesystem path for the local
//! backend, a presigned GET URL for remote backends. The core never
//! assumes it is permanent or public.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{Locator, StorageService};

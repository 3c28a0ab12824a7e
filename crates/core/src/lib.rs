//! Core business logic for Remit.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `invoice` - Invoice calculation and validation
//! - `render` - Deterministic PDF composition
//! - `storage` - Artifact storage behind Apache OpenDAL
//! - `generation` - Per-request orchestration of the pipeline

pub mod generation;
pub mod invoice;
pub mod render;
pub mod storage;

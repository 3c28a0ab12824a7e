//! Shared domain types.

pub mod money;

pub use money::{Currency, Money};

//! The case catalogue, one module per backend capability.
//!
//! A case issues its HTTP calls through the shared [`ApiClient`] and returns
//! a [`checks::CaseResult`]; it never panics and never records anything
//! itself. Fixture values are literal and match the seeded demo dataset.
//!
//! [`ApiClient`]: crate::client::ApiClient

pub mod analytics;
pub mod auth;
pub mod bundles;
pub mod cash;
pub mod checks;
pub mod cors;
pub mod errors;
pub mod orders;
pub mod placeholder;
pub mod pricing;
pub mod products;
pub mod shop;
pub mod voice;

pub use checks::{CaseFailure, CaseResult, Verdict};

/// Identifier of the seeded demo shop every read/write case targets
pub const DEMO_SHOP_ID: &str = "demo-shop-123";

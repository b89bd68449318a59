//! SiteQuote Core - Domain models, configuration, and pricing catalogs
//!
//! This crate contains the core domain types shared by the quote engines,
//! the storage port, and the API/CLI adapters.

pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod registry;
pub mod units;

pub use error::{QuoteError, Result};

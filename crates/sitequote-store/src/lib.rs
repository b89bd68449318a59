//! SiteQuote Store - Storage ports and adapters
//!
//! This crate defines the measurement document port and an in-memory
//! adapter. Hosted databases implement the same trait outside this workspace.

pub mod memory;
pub mod ports;

pub use memory::MemoryMeasurementStore;
pub use ports::MeasurementStore;

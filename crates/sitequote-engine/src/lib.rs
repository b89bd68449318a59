//! SiteQuote Engine - Quote computation and measurement state
//!
//! The pricing functions here are pure. `GeometryStore` and `QuoteSession`
//! hold the mutable drawing state and recompute the quote after every event.

pub mod bridge;
pub mod concrete;
pub mod quote;
pub mod session;
pub mod store;

pub use bridge::{AggregateMeasurement, LiveMeasurementUpdate, MeasurementSyncBridge, ShapeUpdate};
pub use concrete::{
    build_concrete_quote_items, CategoryTotals, ConcreteCategory, ConcreteQuoteItem,
    ConcreteQuoteResult, ConcreteTakeoff,
};
pub use quote::compute_quote_lines;
pub use session::{QuoteObserver, QuoteSession};
pub use store::{GeometryStore, StoreAction};

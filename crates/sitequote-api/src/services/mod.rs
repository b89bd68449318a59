mod measurements;
mod quote;

pub use measurements::MeasurementService;
pub use quote::QuoteService;

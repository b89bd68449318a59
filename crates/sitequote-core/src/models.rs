pub mod concrete;
pub mod document;
pub mod geometry;
pub mod quote;
pub mod service;

pub use concrete::{
    AccessDifficulty, ConcreteLineMeasurement, ConcreteMeasurement, ConcreteSlabMeasurement,
    Finish, LineType, PricingTier, Reinforcement,
};
pub use document::{DocumentId, MeasurementDocument};
pub use geometry::{Geometry, GeometryKind, QuoteMode, ShapePayload};
pub use quote::{PricingOverrides, QuoteLine, QuoteSummary};
pub use service::{MeasurementType, ServiceTemplate, UnitLabel};

mod request;
mod response;

pub use request::{
    ComputeQuoteRequest, ConcreteQuoteRequest, CreateMeasurementRequest, FormatRequest,
    MeasureRequest, QuoteQuery, StallTicksRequest,
};
pub use response::{
    DeleteResponse, FormatResponse, HealthResponse, IndustryResponse, MeasureResponse,
    StallTicksResponse, TemplatesResponse,
};

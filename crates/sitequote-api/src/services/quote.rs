use sitequote_core::models::{MeasurementDocument, PricingOverrides, QuoteSummary};
use sitequote_core::registry::ServiceTemplateRegistry;
use sitequote_engine::{compute_quote_lines, QuoteSession};

use crate::dto::ComputeQuoteRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// Service for pricing geometries
pub struct QuoteService;

impl QuoteService {
    /// Price an ad-hoc set of geometries
    pub fn compute(state: &AppState, request: ComputeQuoteRequest) -> Result<QuoteSummary, ApiError> {
        let registry = match request.templates {
            Some(templates) => ServiceTemplateRegistry::new("custom", templates)?,
            None => state.registry_for(request.industry.as_deref())?,
        };

        for geometry in &request.geometries {
            geometry.validate()?;
        }

        Ok(compute_quote_lines(registry.templates(), &request.geometries, &request.overrides))
    }

    /// Replay a stored document into a quote
    pub fn replay(
        state: &AppState,
        document: &MeasurementDocument,
        industry: Option<&str>,
    ) -> Result<QuoteSummary, ApiError> {
        let registry = state.registry_for(industry)?;
        let session = QuoteSession::from_document(registry, PricingOverrides::default(), document)?;
        Ok(session.quote().clone())
    }
}

use std::sync::Arc;

use axum::{extract::State, Json};
use sitequote_engine::{build_concrete_quote_items, ConcreteQuoteResult};

use crate::dto::ConcreteQuoteRequest;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn quote_concrete(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConcreteQuoteRequest>,
) -> Result<Json<ConcreteQuoteResult>, ApiError> {
    tracing::info!(
        measurements = request.measurements.len(),
        custom_rules = request.rules.is_some(),
        "Pricing concrete takeoff"
    );

    let rules = match request.rules {
        Some(rules) => {
            rules.validate()?;
            rules
        }
        None => state.concrete_rules.clone(),
    };

    Ok(Json(build_concrete_quote_items(&request.measurements, &rules)))
}

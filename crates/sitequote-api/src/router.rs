use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Catalogs
        .route("/api/v1/industries", get(handlers::list_industries))
        .route("/api/v1/industries/{industry}/templates", get(handlers::list_templates))

        // Stateless pricing
        .route("/api/v1/quotes/compute", post(handlers::compute_quote))
        .route("/api/v1/concrete/quote", post(handlers::quote_concrete))
        .route("/api/v1/stall-ticks", post(handlers::build_stall_ticks))
        .route("/api/v1/measure", post(handlers::measure_shape))
        .route("/api/v1/format", post(handlers::format_measurement))

        // Measurement documents
        .route("/api/v1/measurements", post(handlers::create_measurement))
        .route(
            "/api/v1/measurements/{id}",
            get(handlers::get_measurement).delete(handlers::delete_measurement),
        )
        .route("/api/v1/measurements/{id}/quote", get(handlers::quote_measurement))
        .route("/api/v1/jobs/{job_id}/measurements", get(handlers::list_job_measurements))

        .with_state(state)
}

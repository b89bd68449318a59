use axum::{extract::Path, Json};
use sitequote_core::registry::{ServiceTemplateRegistry, BUILTIN_INDUSTRIES};

use crate::dto::{IndustryResponse, TemplatesResponse};
use crate::error::ApiError;

pub async fn list_industries() -> Result<Json<Vec<IndustryResponse>>, ApiError> {
    let industries = BUILTIN_INDUSTRIES
        .iter()
        .map(|name| {
            ServiceTemplateRegistry::builtin(name).map(|registry| IndustryResponse {
                name: registry.industry.clone(),
                template_count: registry.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(industries))
}

pub async fn list_templates(
    Path(industry): Path<String>,
) -> Result<Json<TemplatesResponse>, ApiError> {
    tracing::info!(industry = %industry, "Listing service templates");

    let registry = ServiceTemplateRegistry::builtin(&industry).map_err(|e| {
        ApiError::not_found(format!("Unknown industry: {}", industry)).with_details(e.to_string())
    })?;

    Ok(Json(TemplatesResponse {
        industry: registry.industry.clone(),
        templates: registry.templates().to_vec(),
    }))
}

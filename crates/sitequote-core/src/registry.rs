//! Service template registry.
//!
//! Templates come from an industry catalog, either one of the built-in
//! catalogs or a TOML file. Catalog order is meaningful: quote lines are
//! emitted in the order their templates appear here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{QuoteError, Result};
use crate::models::service::{MeasurementType, ServiceTemplate};

/// Names of the built-in industry catalogs
pub const BUILTIN_INDUSTRIES: &[&str] =
    &["paving", "striping", "concrete", "pressure_washing", "painting"];

/// Ordered, validated catalog of service templates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceTemplateRegistry {
    pub industry: String,
    templates: Vec<ServiceTemplate>,
}

/// Catalog file layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    industry: Option<String>,
    #[serde(alias = "services")]
    templates: Vec<ServiceTemplate>,
}

impl ServiceTemplateRegistry {
    /// Create a registry, rejecting missing ids, duplicate ids, and bad rates
    pub fn new(industry: impl Into<String>, templates: Vec<ServiceTemplate>) -> Result<Self> {
        let mut seen = HashSet::new();
        for template in &templates {
            template.validate()?;
            if !seen.insert(template.id.as_str()) {
                return Err(QuoteError::DuplicateTemplate { id: template.id.clone() });
            }
        }

        Ok(Self { industry: industry.into(), templates })
    }

    /// Load one of the built-in catalogs
    pub fn builtin(industry: &str) -> Result<Self> {
        let normalized = industry.trim().to_lowercase().replace([' ', '-'], "_");
        let templates = match normalized.as_str() {
            "paving" => paving_templates(),
            "striping" => striping_templates(),
            "concrete" => concrete_templates(),
            "pressure_washing" => pressure_washing_templates(),
            "painting" => painting_templates(),
            _ => {
                return Err(QuoteError::UnknownIndustry {
                    name: industry.to_string(),
                    available: BUILTIN_INDUSTRIES.join(", "),
                })
            }
        };

        Self::new(normalized, templates)
    }

    /// Parse a catalog from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| QuoteError::ConfigInvalid {
            key: "templates".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?;

        Self::new(file.industry.unwrap_or_else(|| "custom".to_string()), file.templates)
    }

    /// Parse a catalog from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::new(file.industry.unwrap_or_else(|| "custom".to_string()), file.templates)
    }

    /// Load a `.toml` or `.json` catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| QuoteError::FileRead { path: path.to_path_buf(), source })?;

        let registry = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        tracing::info!(
            path = %path.display(),
            industry = %registry.industry,
            templates = registry.templates.len(),
            "Loaded service template catalog"
        );
        Ok(registry)
    }

    /// Templates in catalog order
    pub fn templates(&self) -> &[ServiceTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&ServiceTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Like `get`, but a missing template is an error
    pub fn require(&self, id: &str) -> Result<&ServiceTemplate> {
        self.get(id).ok_or_else(|| QuoteError::TemplateNotFound { id: id.to_string() })
    }

    /// Catalog position of a template
    pub fn position(&self, id: &str) -> Option<usize> {
        self.templates.iter().position(|template| template.id == id)
    }

    /// The template a new session selects first
    pub fn first(&self) -> Option<&ServiceTemplate> {
        self.templates.first()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn paving_templates() -> Vec<ServiceTemplate> {
    vec![
        ServiceTemplate::new("sealcoating", "Sealcoating", MeasurementType::Area, 0.25)
            .with_minimum(350.0)
            .with_description("Two coats of asphalt emulsion sealer"),
        ServiceTemplate::new("crack_filling", "Crack Filling", MeasurementType::Length, 1.50)
            .with_minimum(250.0)
            .with_description("Hot-pour rubberized crack fill"),
        ServiceTemplate::new("asphalt_patching", "Asphalt Patching", MeasurementType::Area, 4.50)
            .with_minimum(500.0),
        ServiceTemplate::new("asphalt_overlay", "Asphalt Overlay", MeasurementType::Area, 2.75)
            .with_minimum(2500.0),
    ]
}

fn striping_templates() -> Vec<ServiceTemplate> {
    vec![
        ServiceTemplate::new("stall_striping", "Parking Stall Striping", MeasurementType::Length, 0.35)
            .with_minimum(250.0)
            .with_description("4 in. traffic paint, priced per painted lineal foot"),
        ServiceTemplate::new("fire_lane", "Fire Lane Marking", MeasurementType::Length, 0.75)
            .with_minimum(200.0),
        ServiceTemplate::new("ada_symbol", "ADA Symbol", MeasurementType::Count, 45.0),
        ServiceTemplate::new("directional_arrow", "Directional Arrow", MeasurementType::Count, 25.0),
        ServiceTemplate::new("wheel_stop", "Wheel Stop Install", MeasurementType::Count, 65.0),
    ]
}

fn concrete_templates() -> Vec<ServiceTemplate> {
    vec![
        ServiceTemplate::new("driveway", "Concrete Driveway", MeasurementType::Area, 8.00)
            .with_minimum(1500.0),
        ServiceTemplate::new("sidewalk", "Sidewalk", MeasurementType::Area, 7.00).with_minimum(800.0),
        ServiceTemplate::new("patio", "Patio Slab", MeasurementType::Area, 9.50).with_minimum(1200.0),
        ServiceTemplate::new("curb", "Curb and Gutter", MeasurementType::Length, 28.00)
            .with_minimum(900.0),
        ServiceTemplate::new("saw_cutting", "Saw Cutting", MeasurementType::Length, 2.00)
            .with_minimum(300.0),
    ]
}

fn pressure_washing_templates() -> Vec<ServiceTemplate> {
    vec![
        ServiceTemplate::new("flatwork_cleaning", "Flatwork Cleaning", MeasurementType::Area, 0.15)
            .with_minimum(150.0),
        ServiceTemplate::new("house_wash", "House Wash", MeasurementType::Area, 0.20)
            .with_minimum(250.0),
        ServiceTemplate::new("deck_cleaning", "Deck Cleaning", MeasurementType::Area, 0.45)
            .with_minimum(200.0),
        ServiceTemplate::new("fence_cleaning", "Fence Cleaning", MeasurementType::Length, 1.10),
    ]
}

fn painting_templates() -> Vec<ServiceTemplate> {
    vec![
        ServiceTemplate::new("paint", "Exterior Paint", MeasurementType::Area, 0.35)
            .with_minimum(350.0),
        ServiceTemplate::new("trim", "Trim Paint", MeasurementType::Length, 1.25),
        ServiceTemplate::new("doors", "Doors", MeasurementType::Count, 75.0),
    ]
}

use sitequote_core::error::Result;
use sitequote_core::pricing::ConcretePricingRules;
use sitequote_core::registry::ServiceTemplateRegistry;
use sitequote_store::ports::MeasurementStore;
use std::sync::Arc;

use crate::config::ApiConfig;

#[derive(Clone)]
pub struct AppState {
    pub measurement_store: Arc<dyn MeasurementStore>,
    /// Catalog used when a request does not name an industry
    pub default_registry: ServiceTemplateRegistry,
    /// Rule set used when a concrete request carries none
    pub concrete_rules: ConcretePricingRules,
}

impl AppState {
    pub fn new(
        measurement_store: Arc<dyn MeasurementStore>,
        default_registry: ServiceTemplateRegistry,
        concrete_rules: ConcretePricingRules,
    ) -> Self {
        Self { measurement_store, default_registry, concrete_rules }
    }

    /// Resolve the catalog and rule set named by the configuration
    pub fn from_config(
        measurement_store: Arc<dyn MeasurementStore>,
        config: &ApiConfig,
    ) -> Result<Self> {
        Ok(Self::new(
            measurement_store,
            config.quote.template_registry()?,
            config.quote.concrete_rules()?,
        ))
    }

    /// A named built-in catalog, or the default one
    pub fn registry_for(&self, industry: Option<&str>) -> Result<ServiceTemplateRegistry> {
        match industry {
            Some(name) => ServiceTemplateRegistry::builtin(name),
            None => Ok(self.default_registry.clone()),
        }
    }
}

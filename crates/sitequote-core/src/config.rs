use crate::error::{QuoteError, Result};
use crate::pricing::ConcretePricingRules;
use crate::registry::ServiceTemplateRegistry;
use crate::units::UnitSystem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for SiteQuote
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub industry: ConfigValue<String>,
    pub unit_system: ConfigValue<UnitSystem>,
    pub templates_file: ConfigValue<Option<PathBuf>>,
    pub concrete_rules_file: ConfigValue<Option<PathBuf>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            industry: ConfigValue::new("paving".to_string(), ConfigSource::Default),
            unit_system: ConfigValue::new(UnitSystem::Imperial, ConfigSource::Default),
            templates_file: ConfigValue::new(None, ConfigSource::Default),
            concrete_rules_file: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| QuoteError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| QuoteError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(industry) = file_config.industry {
            self.industry.update(industry, ConfigSource::File);
        }

        if let Some(unit_system) = file_config.unit_system {
            self.unit_system.update(unit_system, ConfigSource::File);
        }

        if let Some(templates_file) = file_config.templates_file {
            self.templates_file.update(Some(templates_file), ConfigSource::File);
        }

        if let Some(rules_file) = file_config.concrete_rules_file {
            self.concrete_rules_file.update(Some(rules_file), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // SITEQUOTE_INDUSTRY
        if let Ok(industry) = env::var("SITEQUOTE_INDUSTRY") {
            self.industry.update(industry, ConfigSource::Environment);
        }

        // SITEQUOTE_UNIT_SYSTEM
        if let Ok(unit_str) = env::var("SITEQUOTE_UNIT_SYSTEM") {
            match parse_unit_system(&unit_str) {
                Ok(unit_system) => self.unit_system.update(unit_system, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SITEQUOTE_UNIT_SYSTEM value '{}': expected imperial or metric",
                    unit_str
                ),
            }
        }

        // SITEQUOTE_TEMPLATES_FILE
        if let Ok(path) = env::var("SITEQUOTE_TEMPLATES_FILE") {
            self.templates_file.update(Some(PathBuf::from(path)), ConfigSource::Environment);
        }

        // SITEQUOTE_CONCRETE_RULES_FILE
        if let Ok(path) = env::var("SITEQUOTE_CONCRETE_RULES_FILE") {
            self.concrete_rules_file.update(Some(PathBuf::from(path)), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(industry) = overrides.industry {
            self.industry.update(industry, ConfigSource::Cli);
        }

        if let Some(unit_system) = overrides.unit_system {
            self.unit_system.update(unit_system, ConfigSource::Cli);
        }

        if let Some(templates_file) = overrides.templates_file {
            self.templates_file.update(Some(templates_file), ConfigSource::Cli);
        }

        if let Some(rules_file) = overrides.concrete_rules_file {
            self.concrete_rules_file.update(Some(rules_file), ConfigSource::Cli);
        }
    }

    /// Resolve the service catalog: a templates file wins over the industry name
    pub fn template_registry(&self) -> Result<ServiceTemplateRegistry> {
        match &self.templates_file.value {
            Some(path) => ServiceTemplateRegistry::load(path),
            None => ServiceTemplateRegistry::builtin(&self.industry.value),
        }
    }

    /// Resolve the concrete rule set, falling back to the built-in rules
    pub fn concrete_rules(&self) -> Result<ConcretePricingRules> {
        match &self.concrete_rules_file.value {
            Some(path) => ConcretePricingRules::load(path),
            None => Ok(ConcretePricingRules::default()),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("industry".to_string(), (self.industry.value.clone(), self.industry.source));

        map.insert(
            "unit_system".to_string(),
            (format!("{:?}", self.unit_system.value), self.unit_system.source),
        );

        map.insert(
            "templates_file".to_string(),
            (display_path(&self.templates_file.value), self.templates_file.source),
        );

        map.insert(
            "concrete_rules_file".to_string(),
            (display_path(&self.concrete_rules_file.value), self.concrete_rules_file.source),
        );

        map
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "(built-in)".to_string())
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    industry: Option<String>,
    unit_system: Option<UnitSystem>,
    templates_file: Option<PathBuf>,
    concrete_rules_file: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub industry: Option<String>,
    pub unit_system: Option<UnitSystem>,
    pub templates_file: Option<PathBuf>,
    pub concrete_rules_file: Option<PathBuf>,
}

/// Parse unit system from string
pub fn parse_unit_system(s: &str) -> Result<UnitSystem> {
    match s.to_lowercase().as_str() {
        "imperial" | "us" | "ft" => Ok(UnitSystem::Imperial),
        "metric" | "si" | "m" => Ok(UnitSystem::Metric),
        _ => Err(QuoteError::ConfigInvalid {
            key: "unit_system".to_string(),
            reason: format!("Invalid unit system: {}. Use imperial or metric", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.industry.value, "paving");
        assert_eq!(config.industry.source, ConfigSource::Default);
        assert_eq!(config.unit_system.value, UnitSystem::Imperial);
        assert!(config.templates_file.value.is_none());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
industry = "striping"
unit_system = "Metric"
concrete_rules_file = "/etc/sitequote/concrete.toml"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.industry.value, "striping");
        assert_eq!(config.industry.source, ConfigSource::File);
        assert_eq!(config.unit_system.value, UnitSystem::Metric);
        assert_eq!(
            config.concrete_rules_file.value,
            Some(PathBuf::from("/etc/sitequote/concrete.toml"))
        );
        assert_eq!(config.templates_file.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            industry: Some("concrete".to_string()),
            unit_system: None,
            templates_file: None,
            concrete_rules_file: None,
        };

        config.update_from_cli(overrides);

        assert_eq!(config.industry.value, "concrete");
        assert_eq!(config.industry.source, ConfigSource::Cli);
        assert_eq!(config.unit_system.source, ConfigSource::Default);
    }

    #[test]
    fn test_template_registry_resolution() {
        let config = LayeredConfig::with_defaults();
        let registry = config.template_registry().unwrap();
        assert_eq!(registry.industry, "paving");

        let mut unknown = LayeredConfig::with_defaults();
        unknown.update_from_cli(CliConfigOverrides {
            industry: Some("hvac".to_string()),
            ..Default::default()
        });
        assert!(unknown.template_registry().is_err());
    }

    #[test]
    fn test_parse_unit_system() {
        assert_eq!(parse_unit_system("imperial").unwrap(), UnitSystem::Imperial);
        assert_eq!(parse_unit_system("METRIC").unwrap(), UnitSystem::Metric);
        assert!(parse_unit_system("cubits").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("industry"));
        assert!(map.contains_key("unit_system"));

        let (rules, source) = &map["concrete_rules_file"];
        assert_eq!(rules, "(built-in)");
        assert_eq!(*source, ConfigSource::Default);
    }
}

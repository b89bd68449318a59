//! Concrete pricing rule sets.
//!
//! A rule set is a flat list of `{category, tier, rate}` entries supplied by
//! configuration. Lookups never fail: a tier missing from the rule set falls
//! back to the category's fallback tier, and a category with no usable rule
//! prices at zero (or a neutral 1.0 multiplier for access difficulty).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{QuoteError, Result};
use crate::models::concrete::{AccessDifficulty, Finish, LineType, PricingTier, Reinforcement};

/// Tier used for the single demolition rate
pub const DEMO_TIER: &str = "standard";

/// Rule category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingCategory {
    /// Base slab rate per sqft; tier is the thickness in inches
    Thickness,
    /// Demolition and haul-off per sqft
    Demo,
    /// Finish surcharge per sqft
    Finish,
    /// Reinforcement surcharge per sqft
    Reinforcement,
    /// Multiplier applied to labor-sensitive slab components
    Access,
    /// Rate per lineal foot
    LineType,
}

/// Slab cost component that the access multiplier may scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlabComponent {
    Base,
    Demo,
    Finish,
    Reinforcement,
}

/// A single priced rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    pub category: PricingCategory,
    pub tier: String,
    pub rate: f64,
}

impl PricingRule {
    pub fn new(category: PricingCategory, tier: impl Into<String>, rate: f64) -> Self {
        Self { category, tier: tier.into(), rate }
    }
}

/// Swappable concrete rule set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcretePricingRules {
    pub rules: Vec<PricingRule>,
    /// Components the access multiplier applies to
    #[serde(default = "default_labor_sensitive")]
    pub labor_sensitive: Vec<SlabComponent>,
}

fn default_labor_sensitive() -> Vec<SlabComponent> {
    vec![SlabComponent::Demo, SlabComponent::Finish]
}

impl Default for ConcretePricingRules {
    fn default() -> Self {
        use PricingCategory as C;

        let rules = vec![
            PricingRule::new(C::Thickness, "4", 6.50),
            PricingRule::new(C::Thickness, "5", 7.25),
            PricingRule::new(C::Thickness, "6", 8.00),
            PricingRule::new(C::Thickness, "8", 9.75),
            PricingRule::new(C::Demo, DEMO_TIER, 2.50),
            PricingRule::new(C::Finish, "broom", 0.0),
            PricingRule::new(C::Finish, "smooth", 0.35),
            PricingRule::new(C::Finish, "exposed_aggregate", 1.75),
            PricingRule::new(C::Finish, "stamped", 3.50),
            PricingRule::new(C::Reinforcement, "none", 0.0),
            PricingRule::new(C::Reinforcement, "fiber", 0.20),
            PricingRule::new(C::Reinforcement, "wire_mesh", 0.45),
            PricingRule::new(C::Reinforcement, "rebar", 0.85),
            PricingRule::new(C::Access, "easy", 1.0),
            PricingRule::new(C::Access, "moderate", 1.15),
            PricingRule::new(C::Access, "difficult", 1.30),
            PricingRule::new(C::LineType, "saw_cut", 1.75),
            PricingRule::new(C::LineType, "forming", 3.25),
            PricingRule::new(C::LineType, "thickened_edge", 6.00),
        ];

        Self { rules, labor_sensitive: default_labor_sensitive() }
    }
}

impl ConcretePricingRules {
    /// Create a rule set with the default labor partition
    pub fn new(rules: Vec<PricingRule>) -> Self {
        Self { rules, labor_sensitive: default_labor_sensitive() }
    }

    /// Replace the labor-sensitive partition
    pub fn with_labor_sensitive(mut self, components: Vec<SlabComponent>) -> Self {
        self.labor_sensitive = components;
        self
    }

    /// Parse a rule set from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rules: Self = toml::from_str(content).map_err(|e| QuoteError::ConfigInvalid {
            key: "concrete_rules".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?;
        rules.validate()?;
        Ok(rules)
    }

    /// Parse a rule set from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        let rules: Self = serde_json::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load a rule set from a `.toml` or `.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| QuoteError::FileRead { path: path.to_path_buf(), source })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Reject rates that cannot be priced
    pub fn validate(&self) -> Result<()> {
        for rule in &self.rules {
            if !rule.rate.is_finite() || rule.rate < 0.0 {
                return Err(QuoteError::InvalidRate {
                    id: format!("{:?}/{}", rule.category, rule.tier),
                    reason: format!("rate must be a non-negative number, got {}", rule.rate),
                });
            }
        }
        Ok(())
    }

    /// Exact rule lookup
    pub fn rate(&self, category: PricingCategory, tier: &str) -> Option<f64> {
        self.rules
            .iter()
            .find(|rule| rule.category == category && rule.tier.eq_ignore_ascii_case(tier))
            .map(|rule| rule.rate)
    }

    /// Base rate per sqft for a slab thickness.
    ///
    /// Uses the thinnest configured tier at least as thick as the slab; a slab
    /// thicker than every tier uses the thickest one.
    pub fn thickness_rate(&self, thickness_in: f64) -> f64 {
        let mut tiers: Vec<(f64, f64)> = self
            .rules
            .iter()
            .filter(|rule| rule.category == PricingCategory::Thickness)
            .filter_map(|rule| parse_thickness_tier(&rule.tier).map(|inches| (inches, rule.rate)))
            .collect();

        if tiers.is_empty() {
            tracing::warn!(thickness_in, "No thickness tiers configured, base rate is zero");
            return 0.0;
        }

        tiers.sort_by(|a, b| a.0.total_cmp(&b.0));

        tiers
            .iter()
            .find(|(inches, _)| *inches >= thickness_in)
            .or_else(|| tiers.last())
            .map(|(_, rate)| *rate)
            .unwrap_or(0.0)
    }

    pub fn demo_rate(&self) -> f64 {
        self.rate(PricingCategory::Demo, DEMO_TIER).unwrap_or(0.0)
    }

    pub fn finish_rate(&self, finish: Finish) -> f64 {
        self.tier_rate(PricingCategory::Finish, finish).unwrap_or(0.0)
    }

    pub fn reinforcement_rate(&self, reinforcement: Reinforcement) -> f64 {
        self.tier_rate(PricingCategory::Reinforcement, reinforcement).unwrap_or(0.0)
    }

    pub fn access_multiplier(&self, access: AccessDifficulty) -> f64 {
        self.tier_rate(PricingCategory::Access, access).unwrap_or(1.0)
    }

    pub fn line_rate(&self, line_type: LineType) -> f64 {
        self.tier_rate(PricingCategory::LineType, line_type).unwrap_or(0.0)
    }

    pub fn is_labor_sensitive(&self, component: SlabComponent) -> bool {
        self.labor_sensitive.contains(&component)
    }

    fn tier_rate<T: PricingTier>(&self, category: PricingCategory, tier: T) -> Option<f64> {
        match self.rate(category, tier.key()) {
            Some(rate) => Some(rate),
            None => {
                let fallback = T::fallback();
                tracing::debug!(
                    ?category,
                    tier = tier.key(),
                    fallback = fallback.key(),
                    "No rule for tier, using fallback tier"
                );
                self.rate(category, fallback.key())
            }
        }
    }
}

/// Parse "4", "4in", or "4.5 in" into inches
fn parse_thickness_tier(tier: &str) -> Option<f64> {
    let trimmed = tier.trim().trim_end_matches("in").trim_end_matches('"').trim();
    match trimmed.parse::<f64>() {
        Ok(inches) if inches.is_finite() && inches > 0.0 => Some(inches),
        _ => {
            tracing::warn!(tier, "Ignoring thickness tier that is not a number of inches");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thickness_tier_selection() {
        let rules = ConcretePricingRules::default();
        assert_eq!(rules.thickness_rate(4.0), 6.50);
        assert_eq!(rules.thickness_rate(3.5), 6.50);
        assert_eq!(rules.thickness_rate(4.5), 7.25);
        assert_eq!(rules.thickness_rate(7.0), 9.75);
        assert_eq!(rules.thickness_rate(12.0), 9.75);
    }

    #[test]
    fn test_thickness_tier_formats() {
        assert_eq!(parse_thickness_tier("6"), Some(6.0));
        assert_eq!(parse_thickness_tier("6in"), Some(6.0));
        assert_eq!(parse_thickness_tier("4.5 in"), Some(4.5));
        assert_eq!(parse_thickness_tier("thick"), None);
    }

    #[test]
    fn test_missing_tier_uses_fallback_tier() {
        let rules = ConcretePricingRules::new(vec![
            PricingRule::new(PricingCategory::Finish, "broom", 0.10),
            PricingRule::new(PricingCategory::Access, "easy", 1.0),
        ]);

        // No stamped rule, falls back to broom
        assert_eq!(rules.finish_rate(Finish::Stamped), 0.10);
        // No access rule for difficult, falls back to easy
        assert_eq!(rules.access_multiplier(AccessDifficulty::Difficult), 1.0);
        // Nothing configured at all
        assert_eq!(rules.reinforcement_rate(Reinforcement::Rebar), 0.0);
        assert_eq!(rules.line_rate(LineType::Forming), 0.0);
        assert_eq!(rules.thickness_rate(4.0), 0.0);
    }

    #[test]
    fn test_empty_access_category_is_neutral() {
        let rules = ConcretePricingRules::new(Vec::new());
        assert_eq!(rules.access_multiplier(AccessDifficulty::Difficult), 1.0);
    }

    #[test]
    fn test_from_toml() {
        let rules = ConcretePricingRules::from_toml_str(
            r#"
labor_sensitive = ["base", "demo"]

[[rules]]
category = "thickness"
tier = "4in"
rate = 7.0

[[rules]]
category = "line_type"
tier = "saw_cut"
rate = 2.0
"#,
        )
        .unwrap();

        assert_eq!(rules.thickness_rate(4.0), 7.0);
        assert_eq!(rules.line_rate(LineType::SawCut), 2.0);
        assert!(rules.is_labor_sensitive(SlabComponent::Base));
        assert!(!rules.is_labor_sensitive(SlabComponent::Finish));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = ConcretePricingRules::from_json_str(
            r#"{"rules": [{"category": "demo", "tier": "standard", "rate": -1.0}]}"#,
        );
        assert!(matches!(result, Err(QuoteError::InvalidRate { .. })));
    }

    #[test]
    fn test_default_partition() {
        let rules = ConcretePricingRules::default();
        assert!(rules.is_labor_sensitive(SlabComponent::Demo));
        assert!(rules.is_labor_sensitive(SlabComponent::Finish));
        assert!(!rules.is_labor_sensitive(SlabComponent::Base));
        assert!(!rules.is_labor_sensitive(SlabComponent::Reinforcement));
    }
}

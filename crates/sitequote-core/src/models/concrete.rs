//! Concrete takeoff measurements.
//!
//! Tier values (finish, reinforcement, access difficulty, line type) are
//! closed enums. Stored measurements may carry tier names from an older rule
//! set, so parsing never fails: an unrecognized name resolves to the tier's
//! fallback variant and is logged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named pricing tier with a fallback for unrecognized names
pub trait PricingTier: Sized + Copy + 'static {
    /// Every variant, in display order
    const ALL: &'static [Self];

    /// Kind of tier, used in log messages
    const KIND: &'static str;

    /// Key used in pricing rules and on the wire
    fn key(&self) -> &'static str;

    /// Tier used when a name is unrecognized
    fn fallback() -> Self;

    /// Exact lookup by key, case-insensitive
    fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL.iter().copied().find(|tier| tier.key() == normalized)
    }

    /// Lookup that resolves unknown names to the fallback tier
    fn parse_lenient(key: &str) -> Self {
        match Self::from_key(key) {
            Some(tier) => tier,
            None => {
                let fallback = Self::fallback();
                tracing::warn!(
                    tier = Self::KIND,
                    value = key,
                    fallback = fallback.key(),
                    "Unrecognized pricing tier, using fallback"
                );
                fallback
            }
        }
    }
}

macro_rules! lenient_tier_serde {
    ($tier:ty) => {
        impl From<String> for $tier {
            fn from(value: String) -> Self {
                <$tier as PricingTier>::parse_lenient(&value)
            }
        }

        impl From<$tier> for String {
            fn from(tier: $tier) -> Self {
                tier.key().to_string()
            }
        }

        impl Default for $tier {
            fn default() -> Self {
                <$tier as PricingTier>::fallback()
            }
        }

        impl std::fmt::Display for $tier {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

/// Surface finish applied to a slab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Finish {
    Broom,
    Smooth,
    ExposedAggregate,
    Stamped,
}

impl PricingTier for Finish {
    const ALL: &'static [Self] =
        &[Finish::Broom, Finish::Smooth, Finish::ExposedAggregate, Finish::Stamped];
    const KIND: &'static str = "finish";

    fn key(&self) -> &'static str {
        match self {
            Finish::Broom => "broom",
            Finish::Smooth => "smooth",
            Finish::ExposedAggregate => "exposed_aggregate",
            Finish::Stamped => "stamped",
        }
    }

    fn fallback() -> Self {
        Finish::Broom
    }
}

lenient_tier_serde!(Finish);

/// Steel or fiber reinforcement in a slab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Reinforcement {
    None,
    Fiber,
    WireMesh,
    Rebar,
}

impl PricingTier for Reinforcement {
    const ALL: &'static [Self] = &[
        Reinforcement::None,
        Reinforcement::Fiber,
        Reinforcement::WireMesh,
        Reinforcement::Rebar,
    ];
    const KIND: &'static str = "reinforcement";

    fn key(&self) -> &'static str {
        match self {
            Reinforcement::None => "none",
            Reinforcement::Fiber => "fiber",
            Reinforcement::WireMesh => "wire_mesh",
            Reinforcement::Rebar => "rebar",
        }
    }

    fn fallback() -> Self {
        Reinforcement::None
    }
}

lenient_tier_serde!(Reinforcement);

/// How hard the pour site is to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessDifficulty {
    Easy,
    Moderate,
    Difficult,
}

impl PricingTier for AccessDifficulty {
    const ALL: &'static [Self] =
        &[AccessDifficulty::Easy, AccessDifficulty::Moderate, AccessDifficulty::Difficult];
    const KIND: &'static str = "access_difficulty";

    fn key(&self) -> &'static str {
        match self {
            AccessDifficulty::Easy => "easy",
            AccessDifficulty::Moderate => "moderate",
            AccessDifficulty::Difficult => "difficult",
        }
    }

    fn fallback() -> Self {
        AccessDifficulty::Easy
    }
}

lenient_tier_serde!(AccessDifficulty);

/// Lineal concrete work priced per foot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LineType {
    SawCut,
    Forming,
    ThickenedEdge,
}

impl PricingTier for LineType {
    const ALL: &'static [Self] = &[LineType::SawCut, LineType::Forming, LineType::ThickenedEdge];
    const KIND: &'static str = "line_type";

    fn key(&self) -> &'static str {
        match self {
            LineType::SawCut => "saw_cut",
            LineType::Forming => "forming",
            LineType::ThickenedEdge => "thickened_edge",
        }
    }

    fn fallback() -> Self {
        LineType::SawCut
    }
}

lenient_tier_serde!(LineType);

/// A slab measured by area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteSlabMeasurement {
    pub id: String,
    pub area_sqft: f64,
    pub thickness_in: f64,
    #[serde(default)]
    pub finish: Finish,
    #[serde(default)]
    pub reinforcement: Reinforcement,
    #[serde(default)]
    pub access_difficulty: AccessDifficulty,
    #[serde(default)]
    pub demo_included: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ConcreteSlabMeasurement {
    /// Create a broom-finished, unreinforced, easy-access slab
    pub fn new(id: impl Into<String>, area_sqft: f64, thickness_in: f64) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            area_sqft: area_sqft.max(0.0),
            thickness_in: thickness_in.max(0.0),
            finish: Finish::default(),
            reinforcement: Reinforcement::default(),
            access_difficulty: AccessDifficulty::default(),
            demo_included: false,
            label: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_finish(mut self, finish: Finish) -> Self {
        self.finish = finish;
        self
    }

    pub fn with_reinforcement(mut self, reinforcement: Reinforcement) -> Self {
        self.reinforcement = reinforcement;
        self
    }

    pub fn with_access(mut self, access_difficulty: AccessDifficulty) -> Self {
        self.access_difficulty = access_difficulty;
        self
    }

    pub fn with_demo(mut self, demo_included: bool) -> Self {
        self.demo_included = demo_included;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Volume of concrete in cubic yards
    pub fn cubic_yards(&self) -> f64 {
        self.area_sqft.max(0.0) * (self.thickness_in.max(0.0) / 12.0) / 27.0
    }
}

/// Saw cuts, forms, or thickened edges measured by length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteLineMeasurement {
    pub id: String,
    pub lineal_feet: f64,
    #[serde(default)]
    pub line_type: LineType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ConcreteLineMeasurement {
    pub fn new(id: impl Into<String>, lineal_feet: f64, line_type: LineType) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            lineal_feet: lineal_feet.max(0.0),
            line_type,
            label: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A concrete measurement; the variant never changes after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConcreteMeasurement {
    Slab(ConcreteSlabMeasurement),
    Line(ConcreteLineMeasurement),
}

impl ConcreteMeasurement {
    pub fn id(&self) -> &str {
        match self {
            ConcreteMeasurement::Slab(slab) => &slab.id,
            ConcreteMeasurement::Line(line) => &line.id,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            ConcreteMeasurement::Slab(slab) => slab.label.as_deref(),
            ConcreteMeasurement::Line(line) => line.label.as_deref(),
        }
    }
}

impl From<ConcreteSlabMeasurement> for ConcreteMeasurement {
    fn from(slab: ConcreteSlabMeasurement) -> Self {
        ConcreteMeasurement::Slab(slab)
    }
}

impl From<ConcreteLineMeasurement> for ConcreteMeasurement {
    fn from(line: ConcreteLineMeasurement) -> Self {
        ConcreteMeasurement::Line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_keys_round_trip() {
        for finish in Finish::ALL {
            assert_eq!(Finish::from_key(finish.key()), Some(*finish));
        }
        assert_eq!(Reinforcement::from_key("Wire Mesh"), Some(Reinforcement::WireMesh));
        assert_eq!(LineType::from_key("thickened-edge"), Some(LineType::ThickenedEdge));
    }

    #[test]
    fn test_unknown_tier_falls_back() {
        assert_eq!(Finish::parse_lenient("salt_finish"), Finish::Broom);
        assert_eq!(Reinforcement::parse_lenient("carbon"), Reinforcement::None);
        assert_eq!(AccessDifficulty::parse_lenient("crane"), AccessDifficulty::Easy);
        assert_eq!(LineType::parse_lenient("joint"), LineType::SawCut);
    }

    #[test]
    fn test_stored_slab_with_stale_tiers_loads() {
        let measurement: ConcreteMeasurement = serde_json::from_value(serde_json::json!({
            "type": "slab",
            "id": "s1",
            "area_sqft": 400.0,
            "thickness_in": 4.0,
            "finish": "sparkle",
            "reinforcement": "rebar",
            "access_difficulty": "helicopter"
        }))
        .unwrap();

        let ConcreteMeasurement::Slab(slab) = measurement else {
            panic!("expected a slab");
        };
        assert_eq!(slab.finish, Finish::Broom);
        assert_eq!(slab.reinforcement, Reinforcement::Rebar);
        assert_eq!(slab.access_difficulty, AccessDifficulty::Easy);
        assert!(!slab.demo_included);
    }

    #[test]
    fn test_cubic_yards() {
        let slab = ConcreteSlabMeasurement::new("s1", 1000.0, 4.0);
        assert!((slab.cubic_yards() - 12.345679).abs() < 1e-5);
    }

    #[test]
    fn test_line_serializes_with_tag() {
        let line: ConcreteMeasurement =
            ConcreteLineMeasurement::new("l1", 120.0, LineType::Forming).into();
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["line_type"], "forming");
        assert_eq!(line.id(), "l1");
    }
}

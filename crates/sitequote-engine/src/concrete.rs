//! Concrete takeoff pricing.
//!
//! Slabs price by area with a base rate from the thickness tier plus demo,
//! finish and reinforcement surcharges. The access difficulty multiplier
//! only scales the labor-sensitive components named by the rule set. Lines
//! price by lineal foot according to their line type.

use serde::{Deserialize, Serialize};
use sitequote_core::error::{QuoteError, Result};
use sitequote_core::models::{
    ConcreteLineMeasurement, ConcreteMeasurement, ConcreteSlabMeasurement, PricingTier, UnitLabel,
};
use sitequote_core::pricing::{ConcretePricingRules, SlabComponent};

/// Cost breakdown category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcreteCategory {
    Base,
    Demo,
    Finish,
    Reinforcement,
    Access,
    Lines,
}

impl ConcreteCategory {
    /// Display order of the breakdown
    pub const ALL: [ConcreteCategory; 6] = [
        ConcreteCategory::Base,
        ConcreteCategory::Demo,
        ConcreteCategory::Finish,
        ConcreteCategory::Reinforcement,
        ConcreteCategory::Access,
        ConcreteCategory::Lines,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConcreteCategory::Base => "base",
            ConcreteCategory::Demo => "demo",
            ConcreteCategory::Finish => "finish",
            ConcreteCategory::Reinforcement => "reinforcement",
            ConcreteCategory::Access => "access",
            ConcreteCategory::Lines => "lines",
        }
    }
}

/// Amounts per category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub base: f64,
    pub demo: f64,
    pub finish: f64,
    pub reinforcement: f64,
    pub access: f64,
    pub lines: f64,
}

impl CategoryTotals {
    pub fn get(&self, category: ConcreteCategory) -> f64 {
        match category {
            ConcreteCategory::Base => self.base,
            ConcreteCategory::Demo => self.demo,
            ConcreteCategory::Finish => self.finish,
            ConcreteCategory::Reinforcement => self.reinforcement,
            ConcreteCategory::Access => self.access,
            ConcreteCategory::Lines => self.lines,
        }
    }

    /// Categories with their amounts, in display order
    pub fn iter(&self) -> impl Iterator<Item = (ConcreteCategory, f64)> + '_ {
        ConcreteCategory::ALL.into_iter().map(move |category| (category, self.get(category)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, amount)| amount).sum()
    }

    fn accumulate(&mut self, other: &CategoryTotals) {
        self.base += other.base;
        self.demo += other.demo;
        self.finish += other.finish;
        self.reinforcement += other.reinforcement;
        self.access += other.access;
        self.lines += other.lines;
    }
}

/// One priced measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteQuoteItem {
    pub measurement_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub description: String,
    pub quantity: f64,
    pub unit_label: UnitLabel,
    pub breakdown: CategoryTotals,
    pub total: f64,
}

/// Priced concrete takeoff
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConcreteQuoteResult {
    pub items: Vec<ConcreteQuoteItem>,
    pub subtotals: CategoryTotals,
    pub total: f64,
    pub total_sqft: f64,
    pub total_lineal_feet: f64,
    pub total_cubic_yards: f64,
}

/// Price every measurement, in input order
pub fn build_concrete_quote_items(
    measurements: &[ConcreteMeasurement],
    rules: &ConcretePricingRules,
) -> ConcreteQuoteResult {
    let mut result = ConcreteQuoteResult::default();

    for measurement in measurements {
        let item = match measurement {
            ConcreteMeasurement::Slab(slab) => {
                result.total_sqft += slab.area_sqft.max(0.0);
                result.total_cubic_yards += slab.cubic_yards();
                price_slab(slab, rules)
            }
            ConcreteMeasurement::Line(line) => {
                result.total_lineal_feet += line.lineal_feet.max(0.0);
                price_line(line, rules)
            }
        };

        result.subtotals.accumulate(&item.breakdown);
        result.items.push(item);
    }

    result.total = result.subtotals.sum();
    result
}

fn price_slab(slab: &ConcreteSlabMeasurement, rules: &ConcretePricingRules) -> ConcreteQuoteItem {
    let area = slab.area_sqft.max(0.0);

    let mut breakdown = CategoryTotals {
        base: area * rules.thickness_rate(slab.thickness_in),
        demo: if slab.demo_included { area * rules.demo_rate() } else { 0.0 },
        finish: area * rules.finish_rate(slab.finish),
        reinforcement: area * rules.reinforcement_rate(slab.reinforcement),
        ..CategoryTotals::default()
    };

    let labor: f64 = [
        (SlabComponent::Base, breakdown.base),
        (SlabComponent::Demo, breakdown.demo),
        (SlabComponent::Finish, breakdown.finish),
        (SlabComponent::Reinforcement, breakdown.reinforcement),
    ]
    .into_iter()
    .filter(|(component, _)| rules.is_labor_sensitive(*component))
    .map(|(_, amount)| amount)
    .sum();

    breakdown.access = (rules.access_multiplier(slab.access_difficulty) - 1.0) * labor;

    let mut description = format!(
        "{} in slab, {} finish, {} reinforcement",
        format_inches(slab.thickness_in),
        slab.finish.key().replace('_', " "),
        slab.reinforcement.key().replace('_', " "),
    );
    if slab.demo_included {
        description.push_str(", demo");
    }

    ConcreteQuoteItem {
        measurement_id: slab.id.clone(),
        label: slab.label.clone(),
        description,
        quantity: area,
        unit_label: UnitLabel::Sqft,
        total: breakdown.sum(),
        breakdown,
    }
}

fn price_line(line: &ConcreteLineMeasurement, rules: &ConcretePricingRules) -> ConcreteQuoteItem {
    let feet = line.lineal_feet.max(0.0);
    let breakdown = CategoryTotals { lines: feet * rules.line_rate(line.line_type), ..CategoryTotals::default() };

    ConcreteQuoteItem {
        measurement_id: line.id.clone(),
        label: line.label.clone(),
        description: line.line_type.key().replace('_', " "),
        quantity: feet,
        unit_label: UnitLabel::Ft,
        total: breakdown.sum(),
        breakdown,
    }
}

fn format_inches(inches: f64) -> String {
    if inches.fract() == 0.0 {
        format!("{}", inches as i64)
    } else {
        format!("{:.1}", inches)
    }
}

/// A concrete takeoff that reprices after every change
#[derive(Debug, Clone)]
pub struct ConcreteTakeoff {
    measurements: Vec<ConcreteMeasurement>,
    rules: ConcretePricingRules,
    result: ConcreteQuoteResult,
}

impl ConcreteTakeoff {
    pub fn new(rules: ConcretePricingRules) -> Self {
        Self { measurements: Vec::new(), rules, result: ConcreteQuoteResult::default() }
    }

    /// Start from saved measurements
    pub fn with_measurements(
        rules: ConcretePricingRules,
        measurements: Vec<ConcreteMeasurement>,
    ) -> Result<Self> {
        let mut takeoff = Self::new(rules);
        for measurement in measurements {
            takeoff.upsert(measurement)?;
        }
        Ok(takeoff)
    }

    /// Add or replace a measurement by id.
    ///
    /// A slab stays a slab and a line stays a line.
    pub fn upsert(&mut self, measurement: ConcreteMeasurement) -> Result<&ConcreteQuoteResult> {
        if measurement.id().trim().is_empty() {
            return Err(QuoteError::MissingId { entity: "Concrete measurement".to_string() });
        }

        match self.measurements.iter_mut().find(|existing| existing.id() == measurement.id()) {
            Some(existing) => {
                if std::mem::discriminant(existing) != std::mem::discriminant(&measurement) {
                    return Err(QuoteError::InvalidGeometry {
                        geometry_id: measurement.id().to_string(),
                        reason: "measurement type cannot change after creation".to_string(),
                    });
                }
                *existing = measurement;
            }
            None => self.measurements.push(measurement),
        }

        Ok(self.recompute())
    }

    pub fn remove(&mut self, id: &str) -> &ConcreteQuoteResult {
        self.measurements.retain(|measurement| measurement.id() != id);
        self.recompute()
    }

    /// Swap the rule set and reprice everything
    pub fn set_rules(&mut self, rules: ConcretePricingRules) -> &ConcreteQuoteResult {
        self.rules = rules;
        self.recompute()
    }

    pub fn measurements(&self) -> &[ConcreteMeasurement] {
        &self.measurements
    }

    pub fn result(&self) -> &ConcreteQuoteResult {
        &self.result
    }

    fn recompute(&mut self) -> &ConcreteQuoteResult {
        self.result = build_concrete_quote_items(&self.measurements, &self.rules);
        tracing::debug!(
            measurements = self.measurements.len(),
            total = self.result.total,
            "Repriced concrete takeoff"
        );
        &self.result
    }
}

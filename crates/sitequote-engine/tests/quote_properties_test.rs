//! Property tests for quote aggregation and shape ownership

use proptest::prelude::*;
use sitequote_core::models::{
    Geometry, GeometryKind, MeasurementType, PricingOverrides, QuoteMode, ServiceTemplate,
};
use sitequote_core::registry::ServiceTemplateRegistry;
use sitequote_engine::{compute_quote_lines, LiveMeasurementUpdate, QuoteSession, ShapeUpdate};

const SERVICES: [&str; 4] = ["sealcoating", "crack_filling", "striping", "retired"];

fn templates() -> Vec<ServiceTemplate> {
    vec![
        ServiceTemplate::new("sealcoating", "Sealcoating", MeasurementType::Area, 0.25)
            .with_minimum(350.0),
        ServiceTemplate::new("crack_filling", "Crack Filling", MeasurementType::Length, 1.5)
            .with_minimum(250.0),
        ServiceTemplate::new("striping", "Striping", MeasurementType::Length, 0.35),
    ]
}

fn arb_geometries() -> impl Strategy<Value = Vec<Geometry>> {
    prop::collection::vec((0usize..SERVICES.len(), 0.0f64..5_000.0), 0..24).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (service, value))| {
                Geometry::new(format!("g{}", i), SERVICES[service], GeometryKind::Polygon, value)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_permutation_gives_identical_quote(
        (geometries, shuffled) in arb_geometries().prop_flat_map(|g| {
            let original = g.clone();
            (Just(original), Just(g).prop_shuffle())
        })
    ) {
        let overrides = PricingOverrides::new();
        let a = compute_quote_lines(&templates(), &geometries, &overrides);
        let b = compute_quote_lines(&templates(), &shuffled, &overrides);

        prop_assert_eq!(a.total.to_bits(), b.total.to_bits());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_recompute_is_idempotent(geometries in arb_geometries()) {
        let overrides = PricingOverrides::new().rate("striping", 0.4);
        let a = compute_quote_lines(&templates(), &geometries, &overrides);
        let b = compute_quote_lines(&templates(), &geometries, &overrides);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_minimum_floor(value in 0.0f64..5_000.0) {
        let geometries = vec![Geometry::new("g1", "sealcoating", GeometryKind::Polygon, value)];
        let summary = compute_quote_lines(&templates(), &geometries, &PricingOverrides::new());
        let line = &summary.lines[0];
        let raw = value * 0.25;

        prop_assert_eq!(line.min_applied, raw > 0.0 && raw < 350.0);
        if raw > 0.0 {
            prop_assert_eq!(line.subtotal, raw.max(350.0));
        } else {
            prop_assert_eq!(line.subtotal, 0.0);
        }
    }

    #[test]
    fn prop_unknown_services_never_priced(geometries in arb_geometries()) {
        let summary = compute_quote_lines(&templates(), &geometries, &PricingOverrides::new());
        prop_assert!(summary.line("retired").is_none());

        let known: Vec<Geometry> =
            geometries.into_iter().filter(|g| g.service_id != "retired").collect();
        let without = compute_quote_lines(&templates(), &known, &PricingOverrides::new());
        prop_assert_eq!(summary.total.to_bits(), without.total.to_bits());
    }

    #[test]
    fn prop_active_service_only_binds_new_shapes(
        steps in prop::collection::vec(0usize..3, 1..12)
    ) {
        let registry = ServiceTemplateRegistry::builtin("paving").unwrap();
        let ids: Vec<String> = registry.templates().iter().map(|t| t.id.clone()).collect();
        let mut session = QuoteSession::new(registry, QuoteMode::Map);

        let mut shapes: Vec<ShapeUpdate> = Vec::new();
        let mut expected: Vec<String> = Vec::new();

        for (i, service) in steps.into_iter().enumerate() {
            session.set_active_service(&ids[service]).unwrap();
            shapes.push(ShapeUpdate::new(format!("s{}", i), GeometryKind::Polygon, 100.0 + i as f64));
            expected.push(ids[service].clone());
            session.ingest(LiveMeasurementUpdate::shapes(shapes.clone())).unwrap();

            for (shape, service_id) in shapes.iter().zip(&expected) {
                prop_assert_eq!(&session.store().get(&shape.id).unwrap().service_id, service_id);
            }
        }
    }
}

#[test]
fn test_three_service_ownership_scenario() {
    let registry = ServiceTemplateRegistry::builtin("striping").unwrap();
    let mut session = QuoteSession::new(registry, QuoteMode::Map);

    session.set_active_service("stall_striping").unwrap();
    let g1 = ShapeUpdate::new("g1", GeometryKind::Polyline, 300.0);
    session.ingest(LiveMeasurementUpdate::shapes(vec![g1.clone()])).unwrap();

    session.set_active_service("fire_lane").unwrap();
    let g2 = ShapeUpdate::new("g2", GeometryKind::Polyline, 120.0);
    session.ingest(LiveMeasurementUpdate::shapes(vec![g1.clone(), g2.clone()])).unwrap();

    session.set_active_service("ada_symbol").unwrap();
    let g3 = ShapeUpdate::new("g3", GeometryKind::Point, 1.0);
    let quote = session.ingest(LiveMeasurementUpdate::shapes(vec![g1, g2, g3])).unwrap().clone();

    let store = session.store();
    assert_eq!(store.get("g1").unwrap().service_id, "stall_striping");
    assert_eq!(store.get("g2").unwrap().service_id, "fire_lane");
    assert_eq!(store.get("g3").unwrap().service_id, "ada_symbol");

    let order: Vec<_> = quote.lines.iter().map(|l| l.service_id.as_str()).collect();
    assert_eq!(order, vec!["stall_striping", "fire_lane", "ada_symbol"]);
}

//! Reconciles live drawing-surface measurements into the geometry store.
//!
//! A shape belongs to whichever service was active when the bridge first
//! saw it. Changing the active service later only affects shapes drawn
//! afterwards; moving an existing shape takes an explicit reassign.

use serde::{Deserialize, Serialize};
use sitequote_core::models::{Geometry, GeometryKind, ShapePayload};
use std::collections::{HashMap, HashSet};

use crate::store::{GeometryStore, StoreAction};

/// Id of the synthetic geometry used when only a total is available
pub const AGGREGATE_SHAPE_ID: &str = "__aggregate__";

/// One shape as reported by the drawing surface, measured in engine units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeUpdate {
    pub id: String,
    pub kind: GeometryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapePayload>,
    pub measurement_value: f64,
}

impl ShapeUpdate {
    pub fn new(id: impl Into<String>, kind: GeometryKind, measurement_value: f64) -> Self {
        Self { id: id.into(), kind, shape: None, measurement_value }
    }

    pub fn with_shape(mut self, shape: ShapePayload) -> Self {
        self.shape = Some(shape);
        self
    }
}

/// A running total without a per-shape breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMeasurement {
    pub kind: GeometryKind,
    pub value: f64,
}

/// Everything the drawing surface currently reports.
///
/// `shapes` is a full snapshot of the canvas. When it is non-empty it wins
/// over `aggregate`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMeasurementUpdate {
    #[serde(default)]
    pub shapes: Vec<ShapeUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregateMeasurement>,
}

impl LiveMeasurementUpdate {
    pub fn shapes(shapes: Vec<ShapeUpdate>) -> Self {
        Self { shapes, aggregate: None }
    }

    pub fn aggregate(kind: GeometryKind, value: f64) -> Self {
        Self { shapes: Vec::new(), aggregate: Some(AggregateMeasurement { kind, value }) }
    }
}

/// Shape id to service id bindings
#[derive(Debug, Clone, Default)]
pub struct MeasurementSyncBridge {
    bindings: HashMap<String, String>,
}

impl MeasurementSyncBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service a shape is bound to, if it has been seen
    pub fn binding(&self, shape_id: &str) -> Option<&str> {
        self.bindings.get(shape_id).map(String::as_str)
    }

    /// Turn a live update into store actions.
    ///
    /// Unbound shapes bind to `active_service`. With no active service they
    /// are skipped until one is selected.
    pub fn reconcile(
        &mut self,
        update: LiveMeasurementUpdate,
        active_service: Option<&str>,
        store: &GeometryStore,
    ) -> Vec<StoreAction> {
        if !update.shapes.is_empty() {
            if update.aggregate.is_some() {
                tracing::debug!("Per-shape breakdown present, ignoring aggregate total");
            }
            return self.reconcile_shapes(update.shapes, active_service, store);
        }

        match update.aggregate {
            Some(aggregate) => self.reconcile_aggregate(aggregate, active_service, store),
            None => self.reconcile_shapes(Vec::new(), active_service, store),
        }
    }

    fn reconcile_shapes(
        &mut self,
        shapes: Vec<ShapeUpdate>,
        active_service: Option<&str>,
        store: &GeometryStore,
    ) -> Vec<StoreAction> {
        let reported: HashSet<&str> = shapes.iter().map(|shape| shape.id.as_str()).collect();

        // Anything on record but missing from the snapshot was deleted
        let mut actions: Vec<StoreAction> = store
            .geometries()
            .iter()
            .filter(|geometry| !reported.contains(geometry.id.as_str()))
            .map(|geometry| StoreAction::Remove { geometry_id: geometry.id.clone() })
            .collect();

        for shape in shapes {
            let Some(service_id) = self.resolve(&shape.id, active_service, store) else {
                tracing::warn!(shape_id = %shape.id, "No active service, shape left unpriced");
                continue;
            };

            let mut geometry =
                Geometry::new(shape.id, service_id, shape.kind, shape.measurement_value);
            geometry.shape = shape.shape;
            actions.push(StoreAction::Upsert(geometry));
        }

        actions
    }

    fn reconcile_aggregate(
        &mut self,
        aggregate: AggregateMeasurement,
        active_service: Option<&str>,
        store: &GeometryStore,
    ) -> Vec<StoreAction> {
        let Some(service_id) = self.resolve(AGGREGATE_SHAPE_ID, active_service, store) else {
            tracing::warn!("No active service, aggregate measurement left unpriced");
            return Vec::new();
        };

        vec![StoreAction::Upsert(Geometry::new(
            AGGREGATE_SHAPE_ID,
            service_id,
            aggregate.kind,
            aggregate.value,
        ))]
    }

    /// The store's record wins, then the first observation, then the active service
    fn resolve(
        &mut self,
        shape_id: &str,
        active_service: Option<&str>,
        store: &GeometryStore,
    ) -> Option<String> {
        if let Some(geometry) = store.get(shape_id) {
            let service_id = geometry.service_id.clone();
            self.bindings.entry(shape_id.to_string()).or_insert_with(|| service_id.clone());
            return Some(service_id);
        }

        if let Some(service_id) = self.bindings.get(shape_id) {
            return Some(service_id.clone());
        }

        let service_id = active_service?.to_string();
        tracing::debug!(shape_id, service_id = %service_id, "Bound new shape to active service");
        self.bindings.insert(shape_id.to_string(), service_id.clone());
        Some(service_id)
    }

    /// Explicitly move a shape to another service
    pub fn reassign(&mut self, shape_id: &str, service_id: &str) -> StoreAction {
        self.bindings.insert(shape_id.to_string(), service_id.to_string());
        StoreAction::Reassign {
            geometry_id: shape_id.to_string(),
            service_id: service_id.to_string(),
        }
    }

    /// Align bindings with the store after undo or redo
    pub fn sync_from_store(&mut self, store: &GeometryStore) {
        for geometry in store.geometries() {
            self.bindings.insert(geometry.id.clone(), geometry.service_id.clone());
        }
    }

    /// Forget every binding, used when the canvas is reset
    pub fn reset(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(store: &mut GeometryStore, actions: Vec<StoreAction>) {
        for action in actions {
            store.apply(action).unwrap();
        }
    }

    fn shape(id: &str, value: f64) -> ShapeUpdate {
        ShapeUpdate::new(id, GeometryKind::Polygon, value)
    }

    #[test]
    fn test_switching_service_keeps_existing_bindings() {
        let mut bridge = MeasurementSyncBridge::new();
        let mut store = GeometryStore::default();

        let actions = bridge.reconcile(
            LiveMeasurementUpdate::shapes(vec![shape("g1", 100.0)]),
            Some("A"),
            &store,
        );
        apply_all(&mut store, actions);

        let actions = bridge.reconcile(
            LiveMeasurementUpdate::shapes(vec![shape("g1", 100.0), shape("g2", 50.0)]),
            Some("B"),
            &store,
        );
        apply_all(&mut store, actions);

        let actions = bridge.reconcile(
            LiveMeasurementUpdate::shapes(vec![
                shape("g1", 110.0),
                shape("g2", 50.0),
                shape("g3", 25.0),
            ]),
            Some("C"),
            &store,
        );
        apply_all(&mut store, actions);

        assert_eq!(store.get("g1").unwrap().service_id, "A");
        assert_eq!(store.get("g1").unwrap().measurement_value, 110.0);
        assert_eq!(store.get("g2").unwrap().service_id, "B");
        assert_eq!(store.get("g3").unwrap().service_id, "C");
    }

    #[test]
    fn test_missing_shapes_are_removed() {
        let mut bridge = MeasurementSyncBridge::new();
        let mut store = GeometryStore::default();

        let actions = bridge.reconcile(
            LiveMeasurementUpdate::shapes(vec![shape("g1", 1.0), shape("g2", 2.0)]),
            Some("A"),
            &store,
        );
        apply_all(&mut store, actions);

        let actions =
            bridge.reconcile(LiveMeasurementUpdate::shapes(vec![shape("g2", 2.0)]), Some("A"), &store);
        apply_all(&mut store, actions);

        assert!(store.get("g1").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_aggregate_updates_in_place() {
        let mut bridge = MeasurementSyncBridge::new();
        let mut store = GeometryStore::default();

        for value in [120.0, 180.0, 240.0] {
            let actions = bridge.reconcile(
                LiveMeasurementUpdate::aggregate(GeometryKind::Polygon, value),
                Some("A"),
                &store,
            );
            apply_all(&mut store, actions);
        }

        assert_eq!(store.len(), 1);
        let sentinel = store.get(AGGREGATE_SHAPE_ID).unwrap();
        assert_eq!(sentinel.measurement_value, 240.0);
        assert_eq!(sentinel.service_id, "A");
    }

    #[test]
    fn test_shapes_win_over_aggregate() {
        let mut bridge = MeasurementSyncBridge::new();
        let mut store = GeometryStore::default();

        let actions = bridge.reconcile(
            LiveMeasurementUpdate::aggregate(GeometryKind::Polygon, 500.0),
            Some("A"),
            &store,
        );
        apply_all(&mut store, actions);

        let update = LiveMeasurementUpdate {
            shapes: vec![shape("g1", 300.0)],
            aggregate: Some(AggregateMeasurement { kind: GeometryKind::Polygon, value: 999.0 }),
        };
        let actions = bridge.reconcile(update, Some("A"), &store);
        apply_all(&mut store, actions);

        assert!(store.get(AGGREGATE_SHAPE_ID).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("g1").unwrap().measurement_value, 300.0);
    }

    #[test]
    fn test_no_active_service_skips_new_shapes() {
        let mut bridge = MeasurementSyncBridge::new();
        let store = GeometryStore::default();

        let actions =
            bridge.reconcile(LiveMeasurementUpdate::shapes(vec![shape("g1", 1.0)]), None, &store);
        assert!(actions.is_empty());
        assert!(bridge.binding("g1").is_none());
    }

    #[test]
    fn test_reassign_rebinds() {
        let mut bridge = MeasurementSyncBridge::new();
        let mut store = GeometryStore::default();

        let actions =
            bridge.reconcile(LiveMeasurementUpdate::shapes(vec![shape("g1", 1.0)]), Some("A"), &store);
        apply_all(&mut store, actions);

        store.apply(bridge.reassign("g1", "B")).unwrap();
        assert_eq!(bridge.binding("g1"), Some("B"));
        assert_eq!(store.get("g1").unwrap().service_id, "B");
    }
}

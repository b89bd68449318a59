//! Geometry store: the drawn shapes of one session.
//!
//! All mutation goes through [`GeometryStore::apply`] or
//! [`GeometryStore::apply_all`]. An action that
//! changes nothing is not recorded, so replaying the same upsert is free and
//! never pollutes the undo history.

use chrono::Utc;
use sitequote_core::error::{QuoteError, Result};
use sitequote_core::models::{Geometry, QuoteMode};
use std::collections::VecDeque;

/// Undo depth kept per session
pub const HISTORY_LIMIT: usize = 100;

/// A store mutation
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Insert a geometry, or update the shape and measurement of an existing one
    Upsert(Geometry),
    Remove { geometry_id: String },
    Clear,
    /// Switch drawing surface; shapes from the old surface are discarded
    SetMode(QuoteMode),
    /// Move a geometry to another service
    Reassign { geometry_id: String, service_id: String },
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    geometries: Vec<Geometry>,
    mode: QuoteMode,
}

/// Ordered geometries plus undo/redo history
#[derive(Debug, Clone, Default)]
pub struct GeometryStore {
    geometries: Vec<Geometry>,
    mode: QuoteMode,
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl GeometryStore {
    pub fn new(mode: QuoteMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Apply an action; returns whether anything changed
    pub fn apply(&mut self, action: StoreAction) -> Result<bool> {
        self.apply_all(vec![action])
    }

    /// Apply a batch as one undo step.
    ///
    /// Either every action lands or the store is left untouched.
    pub fn apply_all(&mut self, actions: Vec<StoreAction>) -> Result<bool> {
        let before = self.snapshot();

        let mut changed = false;
        for action in actions {
            match self.apply_one(action) {
                Ok(applied) => changed |= applied,
                Err(err) => {
                    self.restore(before);
                    return Err(err);
                }
            }
        }

        if changed {
            self.undo_stack.push_back(before);
            if self.undo_stack.len() > HISTORY_LIMIT {
                self.undo_stack.pop_front();
            }
            self.redo_stack.clear();
        }

        Ok(changed)
    }

    fn apply_one(&mut self, action: StoreAction) -> Result<bool> {
        let changed = match action {
            StoreAction::Upsert(geometry) => self.upsert(geometry)?,
            StoreAction::Remove { geometry_id } => {
                let len = self.geometries.len();
                self.geometries.retain(|geometry| geometry.id != geometry_id);
                self.geometries.len() != len
            }
            StoreAction::Clear => {
                let changed = !self.geometries.is_empty();
                self.geometries.clear();
                changed
            }
            StoreAction::SetMode(mode) => {
                if mode == self.mode {
                    false
                } else {
                    tracing::info!(from = ?self.mode, to = ?mode, "Switching quote mode");
                    self.mode = mode;
                    self.geometries.clear();
                    true
                }
            }
            StoreAction::Reassign { geometry_id, service_id } => {
                let geometry = self
                    .geometries
                    .iter_mut()
                    .find(|geometry| geometry.id == geometry_id)
                    .ok_or_else(|| QuoteError::GeometryNotFound { id: geometry_id.clone() })?;

                if geometry.service_id == service_id {
                    false
                } else {
                    geometry.service_id = service_id;
                    geometry.updated_at = Utc::now();
                    true
                }
            }
        };

        Ok(changed)
    }

    fn upsert(&mut self, incoming: Geometry) -> Result<bool> {
        incoming.validate()?;

        if let Some(shape_mode) = incoming.mode() {
            if shape_mode != self.mode {
                return Err(QuoteError::InvalidGeometry {
                    geometry_id: incoming.id.clone(),
                    reason: format!("{:?} shape drawn while in {:?} mode", shape_mode, self.mode),
                });
            }
        }

        match self.geometries.iter_mut().find(|geometry| geometry.id == incoming.id) {
            Some(existing) => {
                if existing.kind == incoming.kind
                    && existing.shape == incoming.shape
                    && existing.measurement_value.to_bits() == incoming.measurement_value.to_bits()
                {
                    return Ok(false);
                }

                // Identity, ownership and creation time survive edits
                existing.kind = incoming.kind;
                existing.shape = incoming.shape;
                existing.measurement_value = incoming.measurement_value.max(0.0);
                existing.updated_at = Utc::now();
                Ok(true)
            }
            None => {
                let mut geometry = incoming;
                geometry.measurement_value = geometry.measurement_value.max(0.0);
                self.geometries.push(geometry);
                Ok(true)
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop_back() {
            Some(previous) => {
                let current = self.snapshot();
                self.redo_stack.push(current);
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                let current = self.snapshot();
                self.undo_stack.push_back(current);
                self.restore(next);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Geometries in drawing order
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn get(&self, geometry_id: &str) -> Option<&Geometry> {
        self.geometries.iter().find(|geometry| geometry.id == geometry_id)
    }

    pub fn mode(&self) -> QuoteMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot { geometries: self.geometries.clone(), mode: self.mode }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.geometries = snapshot.geometries;
        self.mode = snapshot.mode;
    }
}

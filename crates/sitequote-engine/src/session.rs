use sitequote_core::error::{QuoteError, Result};
use sitequote_core::models::{
    MeasurementDocument, PricingOverrides, QuoteMode, QuoteSummary, ServiceTemplate,
};
use sitequote_core::registry::ServiceTemplateRegistry;

use crate::bridge::{LiveMeasurementUpdate, MeasurementSyncBridge};
use crate::quote::compute_quote_lines;
use crate::store::{GeometryStore, StoreAction};

/// Receives the quote after every change
pub trait QuoteObserver {
    fn quote_changed(&mut self, quote: &QuoteSummary);
}

impl<F> QuoteObserver for F
where
    F: FnMut(&QuoteSummary),
{
    fn quote_changed(&mut self, quote: &QuoteSummary) {
        self(quote)
    }
}

/// An interactive quoting session.
///
/// Owns the drawn geometries and keeps the quote current. Observers are
/// notified only after the store, bindings and quote are all updated.
pub struct QuoteSession {
    registry: ServiceTemplateRegistry,
    overrides: PricingOverrides,
    store: GeometryStore,
    bridge: MeasurementSyncBridge,
    active_service: Option<String>,
    quote: QuoteSummary,
    observers: Vec<Box<dyn QuoteObserver>>,
}

impl QuoteSession {
    /// Start a session with the first catalog service selected
    pub fn new(registry: ServiceTemplateRegistry, mode: QuoteMode) -> Self {
        let active_service = registry.first().map(|template| template.id.clone());
        Self {
            registry,
            overrides: PricingOverrides::default(),
            store: GeometryStore::new(mode),
            bridge: MeasurementSyncBridge::new(),
            active_service,
            quote: QuoteSummary::default(),
            observers: Vec::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: PricingOverrides) -> Self {
        self.overrides = overrides;
        self.recompute();
        self
    }

    /// Rebuild a session from a saved document.
    ///
    /// Geometries are replayed in stored order, so the quote matches the
    /// one the user saw while drawing.
    pub fn from_document(
        registry: ServiceTemplateRegistry,
        overrides: PricingOverrides,
        document: &MeasurementDocument,
    ) -> Result<Self> {
        let mut session = Self::new(registry, document.mode).with_overrides(overrides);

        let actions: Vec<StoreAction> =
            document.geometries.iter().cloned().map(StoreAction::Upsert).collect();
        session.store.apply_all(actions)?;
        session.bridge.sync_from_store(&session.store);
        session.recompute();

        tracing::debug!(
            document_id = %document.id,
            geometries = session.store.len(),
            total = session.quote.total,
            "Replayed measurement document"
        );
        Ok(session)
    }

    pub fn subscribe(&mut self, observer: impl QuoteObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Select the service newly drawn shapes are priced as
    pub fn set_active_service(&mut self, service_id: &str) -> Result<()> {
        self.registry.require(service_id)?;
        self.active_service = Some(service_id.to_string());
        Ok(())
    }

    pub fn active_service(&self) -> Option<&str> {
        self.active_service.as_deref()
    }

    /// Apply a store action directly
    pub fn apply(&mut self, action: StoreAction) -> Result<&QuoteSummary> {
        if matches!(action, StoreAction::SetMode(_) | StoreAction::Clear) {
            self.bridge.reset();
        }
        if self.store.apply(action)? {
            self.changed();
        }
        Ok(&self.quote)
    }

    /// Feed a live measurement update from the drawing surface.
    ///
    /// The update lands as a single undo step. If any shape is rejected the
    /// store, bindings and quote all stay as they were.
    pub fn ingest(&mut self, update: LiveMeasurementUpdate) -> Result<&QuoteSummary> {
        let bindings = self.bridge.clone();
        let actions = self.bridge.reconcile(update, self.active_service.as_deref(), &self.store);

        match self.store.apply_all(actions) {
            Ok(true) => self.changed(),
            Ok(false) => {}
            Err(err) => {
                self.bridge = bindings;
                return Err(err);
            }
        }
        Ok(&self.quote)
    }

    /// Move a drawn shape to another service
    pub fn reassign(&mut self, geometry_id: &str, service_id: &str) -> Result<&QuoteSummary> {
        self.registry.require(service_id)?;
        if self.store.get(geometry_id).is_none() {
            return Err(QuoteError::GeometryNotFound { id: geometry_id.to_string() });
        }
        let action = self.bridge.reassign(geometry_id, service_id);
        self.apply(action)
    }

    pub fn set_mode(&mut self, mode: QuoteMode) -> Result<&QuoteSummary> {
        self.apply(StoreAction::SetMode(mode))
    }

    pub fn set_overrides(&mut self, overrides: PricingOverrides) -> &QuoteSummary {
        self.overrides = overrides;
        self.changed();
        &self.quote
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.store.undo();
        if undone {
            self.bridge.sync_from_store(&self.store);
            self.changed();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.store.redo();
        if redone {
            self.bridge.sync_from_store(&self.store);
            self.changed();
        }
        redone
    }

    pub fn quote(&self) -> &QuoteSummary {
        &self.quote
    }

    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    pub fn templates(&self) -> &[ServiceTemplate] {
        self.registry.templates()
    }

    fn recompute(&mut self) {
        self.quote =
            compute_quote_lines(self.registry.templates(), self.store.geometries(), &self.overrides);
    }

    fn changed(&mut self) {
        self.recompute();
        for observer in &mut self.observers {
            observer.quote_changed(&self.quote);
        }
    }
}

impl std::fmt::Debug for QuoteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteSession")
            .field("industry", &self.registry.industry)
            .field("active_service", &self.active_service)
            .field("geometries", &self.store.len())
            .field("observers", &self.observers.len())
            .field("quote", &self.quote)
            .finish()
    }
}

// customui-core/src/customizer.rs
//! The owned customization context: registries, placements and persistence for one UI.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::area::{Area, AreaRegistry};
use crate::error::{CustomizeError, CustomizeResult};
use crate::event::{
    self, Event, EventBus, PlacementChange, PlacementMove, StateChange, WidgetChange,
};
use crate::extension::ExtensionManifest;
use crate::gate::{DestroyGate, GateState};
use crate::migration::{MigrationContext, MigrationEngine, MigrationOutcome};
use crate::normalize::WidgetCandidate;
use crate::persistence::{LoadStatus, PersistedState, PersistenceGateway, StoredArea};
use crate::placement::{Placement, PlacementProperties, PlacementStore, Removed};
use crate::registry::WidgetRegistry;
use crate::storage::{BlobStore, MemoryBlobStore};
use crate::widget::{Configurable, WidgetDefinition, WidgetSource};

/// A built-in widget record with its optional destroy decision
#[derive(Debug)]
pub struct CatalogEntry {
    pub candidate: WidgetCandidate,
    pub gate: Option<DestroyGate>,
}

impl CatalogEntry {
    pub fn new(candidate: WidgetCandidate) -> Self {
        Self {
            candidate,
            gate: None,
        }
    }

    pub fn gated(candidate: WidgetCandidate, gate: DestroyGate) -> Self {
        Self {
            candidate,
            gate: Some(gate),
        }
    }
}

impl From<WidgetCandidate> for CatalogEntry {
    fn from(candidate: WidgetCandidate) -> Self {
        Self::new(candidate)
    }
}

pub struct Customizer {
    widgets: WidgetRegistry,
    areas: AreaRegistry,
    placements: PlacementStore,
    gateway: PersistenceGateway,
    migrations: MigrationEngine,
    /// State as last loaded or saved, source of legacy areas on save
    saved: PersistedState,
    current_version: u32,
    pending: Vec<(String, DestroyGate)>,
    bus: EventBus,
    initialized: bool,
}

impl Customizer {
    pub fn new(store: Box<dyn BlobStore>, migrations: MigrationEngine) -> Self {
        Self {
            widgets: WidgetRegistry::new(),
            areas: AreaRegistry::new(),
            placements: PlacementStore::new(),
            gateway: PersistenceGateway::new(store),
            migrations,
            saved: PersistedState::default(),
            current_version: 0,
            pending: Vec::new(),
            bus: EventBus::new(),
            initialized: false,
        }
    }

    /// Customizer backed by a fresh [`MemoryBlobStore`]
    pub fn in_memory(migrations: MigrationEngine) -> Self {
        Self::new(Box::new(MemoryBlobStore::new()), migrations)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn current_version(&self) -> u32 {
        self.current_version
    }

    pub fn target_version(&self) -> u32 {
        self.migrations.target()
    }

    pub fn saved_state(&self) -> &PersistedState {
        &self.saved
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Start up: register built-ins, load saved state, restore areas, migrate
    ///
    /// Destroy decisions that are already resolved are applied at the end.
    pub fn initialize<I>(&mut self, catalog: I) -> MigrationOutcome
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        tracing::debug!(store = %self.gateway.store_name(), "initializing UI customization");

        for entry in catalog {
            self.create_builtin_widget(entry);
        }
        self.load_saved_state();
        self.restore_all();
        self.initialized = true;

        let outcome = self.migrate();
        self.process_pending();
        outcome
    }

    fn create_builtin_widget(&mut self, entry: CatalogEntry) {
        if let Ok(id) = self.register(&entry.candidate, WidgetSource::BuiltIn, entry.gate) {
            tracing::debug!(widget = %id, "created built-in widget");
        }
    }

    fn load_saved_state(&mut self) {
        let (state, status) = self.gateway.load_with_status();
        if status == LoadStatus::Reset {
            self.publish(event::STATE_RESET, StateChange { version: 0 });
        }
        self.current_version = state.current_version;
        self.saved = state;
    }

    // Widgets

    /// Normalize and register a widget
    ///
    /// With a gate, the widget is retracted once the gate resolves to `true`
    /// and [`Customizer::process_pending`] runs.
    pub fn register(
        &mut self,
        candidate: &WidgetCandidate,
        source: WidgetSource,
        gate: Option<DestroyGate>,
    ) -> CustomizeResult<String> {
        let id = self.widgets.register(candidate, source).map_err(|e| {
            tracing::error!(
                widget = %candidate.describe_id(),
                source = source.as_str(),
                error = %e,
                "rejected widget definition"
            );
            CustomizeError::from(e)
        })?;

        self.pending.retain(|(pending, _)| *pending != id);
        if let Some(gate) = gate {
            self.pending.push((id.clone(), gate));
        }

        self.publish(
            event::WIDGET_REGISTERED,
            WidgetChange {
                widget_id: id.clone(),
            },
        );
        Ok(id)
    }

    /// Register an externally sourced widget
    pub fn register_widget(&mut self, candidate: &WidgetCandidate) -> CustomizeResult<String> {
        self.register(candidate, WidgetSource::External, None)
    }

    /// Register every widget an extension manifest declares
    ///
    /// Invalid entries are logged and skipped; returns the registered ids.
    pub fn register_extension(&mut self, manifest: &ExtensionManifest) -> Vec<String> {
        let mut registered = Vec::new();
        for candidate in manifest.candidates() {
            if let Ok(id) = self.register_widget(&candidate) {
                registered.push(id);
            }
        }
        tracing::debug!(
            extension = %manifest.name,
            widgets = registered.len(),
            "registered extension widgets"
        );
        registered
    }

    /// Remove a widget and every placement of it
    pub fn unregister_widget(&mut self, id: &str) -> CustomizeResult<WidgetDefinition> {
        let definition = self
            .widgets
            .unregister(id)
            .ok_or_else(|| CustomizeError::WidgetNotFound(id.to_string()))?;

        self.pending.retain(|(pending, _)| pending != id);
        self.remove_placement(id);
        self.publish(
            event::WIDGET_DESTROYED,
            WidgetChange {
                widget_id: id.to_string(),
            },
        );
        Ok(definition)
    }

    /// Apply every destroy decision that has resolved; returns retracted ids
    pub fn process_pending(&mut self) -> Vec<String> {
        let mut retracted = Vec::new();
        let mut waiting = Vec::new();

        for (id, gate) in std::mem::take(&mut self.pending) {
            match gate.poll() {
                GateState::Pending => waiting.push((id, gate)),
                GateState::Keep => {}
                GateState::Destroy => retracted.push(id),
                GateState::Abandoned => {
                    tracing::warn!(widget = %id, "destroy decision dropped before resolving");
                }
            }
        }
        self.pending = waiting;

        retracted.retain(|id| {
            tracing::debug!(widget = %id, "retracting widget");
            match self.unregister_widget(id) {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(widget = %id, error = %e, "could not retract widget");
                    false
                }
            }
        });
        retracted
    }

    pub fn pending_decisions(&self) -> usize {
        self.pending.len()
    }

    pub fn widget(&self, id: &str) -> CustomizeResult<&WidgetDefinition> {
        self.widgets
            .get(id)
            .ok_or_else(|| CustomizeError::WidgetNotFound(id.to_string()))
    }

    pub fn widgets(&self) -> Vec<&WidgetDefinition> {
        self.widgets.list_widgets()
    }

    /// Apply runtime options to a registered widget
    ///
    /// Options the widget does not declare, or values of the wrong type,
    /// reject the whole set.
    pub fn configure_widget(&mut self, id: &str, options: &Map<String, Value>) -> CustomizeResult<()> {
        let widget = self
            .widgets
            .get_mut(id)
            .ok_or_else(|| CustomizeError::WidgetNotFound(id.to_string()))?;
        widget.configure(options)?;
        tracing::debug!(widget = %id, options = options.len(), "configured widget");
        Ok(())
    }

    // Areas

    /// Declare or redefine an area
    ///
    /// Redefinition never touches an existing placement list. After
    /// initialization, an area without a list is restored from saved state
    /// or seeded from its defaults.
    pub fn define_area(&mut self, area: Area) {
        let id = area.id.clone();
        if self.areas.define(area).is_some() {
            tracing::debug!(area = %id, "redefined area");
        }
        if self.initialized && !self.placements.has_area(&id) {
            if self.saved.placements.contains_key(&id) {
                self.restore_area(&id);
            } else {
                self.seed_defaults(&id);
            }
        }
    }

    pub fn area(&self, id: &str) -> CustomizeResult<&Area> {
        self.areas
            .get(id)
            .ok_or_else(|| CustomizeError::AreaNotFound(id.to_string()))
    }

    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.iter()
    }

    pub fn resolve_anchor(&self, area: &str) -> Option<&str> {
        self.areas.resolve_anchor(area)
    }

    // Placements

    /// Ordered placements of an area, empty for unknown areas
    pub fn placements(&self, area: &str) -> &[Placement] {
        self.placements.placements(area)
    }

    /// The area currently holding the widget
    pub fn area_of(&self, widget: &str) -> Option<&str> {
        self.placements.locate(widget).map(|(area, _)| area)
    }

    /// Place a widget at `index` (clamped) in an area
    pub fn insert_placement(
        &mut self,
        area: &str,
        widget: &str,
        index: usize,
        properties: Option<PlacementProperties>,
    ) -> CustomizeResult<usize> {
        self.check_target(area, widget)?;

        let placement = Placement {
            widget_id: widget.to_string(),
            properties,
        };
        let index = self.placements.insert(area, placement, index)?;
        self.publish(
            event::PLACEMENT_INSERTED,
            PlacementChange {
                widget_id: widget.to_string(),
                area_id: area.to_string(),
                index,
            },
        );
        Ok(index)
    }

    /// Take a widget out of whichever area holds it; no-op if unplaced
    pub fn remove_placement(&mut self, widget: &str) -> Option<Removed> {
        let removed = self.placements.remove(widget)?;
        self.publish(
            event::PLACEMENT_REMOVED,
            PlacementChange {
                widget_id: widget.to_string(),
                area_id: removed.area.clone(),
                index: removed.index,
            },
        );
        Some(removed)
    }

    /// Move a widget to `index` (clamped) in another or the same area
    ///
    /// Observers get a single `moved` event once the widget sits in its new
    /// place.
    pub fn move_placement(&mut self, widget: &str, area: &str, index: usize) -> CustomizeResult<usize> {
        self.check_target(area, widget)?;

        let (removed, index) = self.placements.move_to(widget, area, index)?;
        self.publish(
            event::PLACEMENT_MOVED,
            PlacementMove {
                widget_id: widget.to_string(),
                from: removed.map(|r| (r.area, r.index)),
                to: (area.to_string(), index),
            },
        );
        Ok(index)
    }

    fn check_target(&self, area: &str, widget: &str) -> CustomizeResult<()> {
        if !self.widgets.contains(widget) {
            return Err(CustomizeError::WidgetNotFound(widget.to_string()));
        }
        if !self.areas.contains(area) {
            return Err(CustomizeError::AreaNotFound(area.to_string()));
        }
        Ok(())
    }

    /// Rebuild every defined area's list
    ///
    /// Areas with saved placements go first so a default never steals a
    /// widget the user placed elsewhere.
    fn restore_all(&mut self) {
        self.placements.clear();

        let (saved, fresh): (Vec<_>, Vec<_>) = self
            .areas
            .ids()
            .into_iter()
            .partition(|id| self.saved.placements.contains_key(id));

        for id in &saved {
            self.restore_area(id);
        }
        for id in &fresh {
            self.seed_defaults(id);
        }
    }

    /// Restore an area from saved placements, pruning what no longer holds
    fn restore_area(&mut self, area_id: &str) {
        let Some(saved) = self.saved.placements.get(area_id) else {
            return;
        };

        let mut list: Vec<Placement> = Vec::with_capacity(saved.len());
        for placement in saved {
            let widget = placement.widget_id.as_str();
            if !self.widgets.contains(widget) {
                tracing::warn!(widget, area = area_id, "dropping placement of unknown widget");
                continue;
            }
            if list.iter().any(|p| p.widget_id == widget) || self.placements.locate(widget).is_some() {
                tracing::warn!(widget, area = area_id, "dropping duplicate placement");
                continue;
            }
            list.push(placement.clone());
        }
        self.placements.set_area(area_id, list);
    }

    /// Fill an area from its default placements
    fn seed_defaults(&mut self, area_id: &str) {
        let Some(area) = self.areas.get(area_id) else {
            return;
        };

        let mut list: Vec<Placement> = Vec::with_capacity(area.default_placements.len());
        for widget in &area.default_placements {
            if !self.widgets.contains(widget) {
                tracing::warn!(widget = %widget, area = area_id, "dropping unresolved default placement");
                continue;
            }
            if list.iter().any(|p| p.widget_id == *widget) || self.placements.locate(widget).is_some()
            {
                tracing::debug!(widget = %widget, area = area_id, "default widget already placed");
                continue;
            }
            list.push(Placement::new(widget.as_str()));
        }
        self.placements.set_area(area_id, list);
    }

    // Versions and persistence

    /// Run pending upgrade steps up to the built-in version
    pub fn migrate(&mut self) -> MigrationOutcome {
        let mut ctx = MigrationContext {
            widgets: &self.widgets,
            areas: &self.areas,
            placements: &mut self.placements,
        };
        let outcome = self.migrations.run(self.current_version, &mut ctx);

        if !outcome.is_noop() {
            tracing::debug!(from = outcome.from, to = outcome.to, "migrated UI state");
        }
        self.current_version = outcome.to;
        outcome
    }

    /// The state that [`Customizer::save`] would write
    ///
    /// Areas and placement lists from the saved state that the registry does
    /// not know about are carried over verbatim.
    pub fn snapshot(&self) -> PersistedState {
        let mut placements = self.placements.snapshot();
        let mut areas: BTreeMap<String, StoredArea> = self
            .areas
            .iter()
            .map(|area| (area.id.clone(), StoredArea::Known(area.record())))
            .collect();

        for (id, area) in &self.saved.areas {
            areas.entry(id.clone()).or_insert_with(|| area.clone());
        }
        for (id, list) in &self.saved.placements {
            placements.entry(id.clone()).or_insert_with(|| list.clone());
        }

        PersistedState {
            placements,
            areas,
            seen: self.saved.seen.clone(),
            dirty_area_cache: self.saved.dirty_area_cache.clone(),
            current_version: self.current_version,
            new_element_count: self.saved.new_element_count,
        }
    }

    /// Write the whole state through the gateway
    pub fn save(&mut self) -> CustomizeResult<()> {
        let state = self.snapshot();
        tracing::debug!(version = state.current_version, "saving UI state");
        self.gateway.save(&state)?;
        self.saved = state;

        self.publish(
            event::STATE_SAVED,
            StateChange {
                version: self.current_version,
            },
        );
        Ok(())
    }

    /// Drop all customization and go back to default placements
    ///
    /// Nothing is written until the next [`Customizer::save`].
    pub fn reset(&mut self) {
        self.saved = PersistedState::default();
        self.placements.clear();
        for id in self.areas.ids() {
            self.seed_defaults(&id);
        }
        self.current_version = self.current_version.max(self.migrations.target());

        self.publish(
            event::STATE_RESET,
            StateChange {
                version: self.current_version,
            },
        );
    }

    fn publish<T: std::any::Any + Send + Sync>(&self, topic: &str, data: T) {
        self.bus.publish(Event::new(topic, data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PLACEMENT_MOVED;
    use crate::migration::MigrationStep;
    use crate::normalize::NormalizeError;
    use std::sync::Arc;

    fn catalog() -> Vec<CatalogEntry> {
        ["back-button", "forward-button", "home-button", "overflow-button"]
            .into_iter()
            .map(|id| CatalogEntry::new(WidgetCandidate::with_id(id)))
            .collect()
    }

    fn customizer(store: &MemoryBlobStore) -> Customizer {
        let mut customizer = Customizer::new(Box::new(store.clone()), MigrationEngine::new(0));
        customizer.define_area(
            Area::panel("nav-bar")
                .with_anchor("overflow-button")
                .with_defaults(["back-button", "forward-button", "missing-button"]),
        );
        customizer.define_area(Area::panel("TabsToolbar"));
        customizer
    }

    fn ids(customizer: &Customizer, area: &str) -> Vec<String> {
        customizer
            .placements(area)
            .iter()
            .map(|p| p.widget_id.clone())
            .collect()
    }

    #[test]
    fn test_first_run_seeds_defaults() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());

        assert_eq!(ids(&customizer, "nav-bar"), ["back-button", "forward-button"]);
        assert!(customizer.placements("TabsToolbar").is_empty());
        assert_eq!(customizer.resolve_anchor("nav-bar"), Some("overflow-button"));
    }

    #[test]
    fn test_saved_placements_win_over_defaults() {
        let store = MemoryBlobStore::with_blob(
            r#"{"placements": {"nav-bar": [["home-button"], ["ghost"], ["home-button"]]}}"#,
        );
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());

        assert_eq!(ids(&customizer, "nav-bar"), ["home-button"]);
    }

    #[test]
    fn test_defaults_skip_widgets_placed_elsewhere() {
        let store = MemoryBlobStore::with_blob(r#"{"placements": {"TabsToolbar": [["back-button"]]}}"#);
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());

        assert_eq!(ids(&customizer, "nav-bar"), ["forward-button"]);
        assert_eq!(customizer.area_of("back-button"), Some("TabsToolbar"));
    }

    #[test]
    fn test_insert_errors() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());

        assert!(matches!(
            customizer.insert_placement("nav-bar", "ghost", 0, None),
            Err(CustomizeError::WidgetNotFound(_))
        ));
        assert!(matches!(
            customizer.insert_placement("nowhere", "home-button", 0, None),
            Err(CustomizeError::AreaNotFound(_))
        ));
        assert!(matches!(
            customizer.insert_placement("nav-bar", "back-button", 0, None),
            Err(CustomizeError::DuplicateInArea { .. })
        ));
        assert!(matches!(
            customizer.insert_placement("TabsToolbar", "back-button", 0, None),
            Err(CustomizeError::AlreadyPlaced { .. })
        ));
    }

    #[test]
    fn test_unregister_cascades() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());

        customizer.unregister_widget("back-button").unwrap();
        assert_eq!(ids(&customizer, "nav-bar"), ["forward-button"]);
        assert!(customizer.widget("back-button").is_err());
        assert!(matches!(
            customizer.unregister_widget("back-button"),
            Err(CustomizeError::WidgetNotFound(_))
        ));
    }

    #[test]
    fn test_destroy_gate_retracts_after_registration() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        let (decision, gate) = DestroyGate::channel();
        let mut entries = catalog();
        entries[0] = CatalogEntry::gated(WidgetCandidate::with_id("back-button"), gate);

        customizer.initialize(entries);
        assert_eq!(customizer.pending_decisions(), 1);
        assert!(customizer.widget("back-button").is_ok());
        assert_eq!(ids(&customizer, "nav-bar"), ["back-button", "forward-button"]);

        decision.resolve(true);
        assert_eq!(customizer.process_pending(), ["back-button"]);
        assert!(customizer.widget("back-button").is_err());
        assert_eq!(ids(&customizer, "nav-bar"), ["forward-button"]);
        assert_eq!(customizer.pending_decisions(), 0);
    }

    #[test]
    fn test_unregister_drops_pending_decision() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        let (decision, gate) = DestroyGate::channel();
        let mut entries = catalog();
        entries[0] = CatalogEntry::gated(WidgetCandidate::with_id("back-button"), gate);
        customizer.initialize(entries);

        customizer.unregister_widget("back-button").unwrap();
        assert_eq!(customizer.pending_decisions(), 0);

        decision.resolve(true);
        assert!(customizer.process_pending().is_empty());
        assert_eq!(ids(&customizer, "nav-bar"), ["forward-button"]);
    }

    #[test]
    fn test_destroy_gate_keep() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        let mut entries = catalog();
        entries[1] = CatalogEntry::gated(
            WidgetCandidate::with_id("forward-button"),
            DestroyGate::resolved(false),
        );

        customizer.initialize(entries);
        assert_eq!(customizer.pending_decisions(), 0);
        assert!(customizer.widget("forward-button").is_ok());
    }

    #[test]
    fn test_configure_widget() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());

        let options = serde_json::json!({"visible": false});
        customizer
            .configure_widget("back-button", options.as_object().unwrap())
            .unwrap();
        assert!(!customizer.widget("back-button").unwrap().visible);

        let options = serde_json::json!({"text": "Back"});
        assert!(matches!(
            customizer.configure_widget("back-button", options.as_object().unwrap()),
            Err(CustomizeError::Validation(NormalizeError::UnknownOption(_)))
        ));
    }

    #[test]
    fn test_invalid_builtin_is_skipped() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        let mut entries = catalog();
        entries.push(CatalogEntry::new(WidgetCandidate::with_id("bad id")));

        customizer.initialize(entries);
        assert_eq!(customizer.widgets().len(), 4);
    }

    #[test]
    fn test_move_publishes_single_event() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());
        let (_sub, rx) = customizer.event_bus().subscribe("customize.placement.*");

        customizer.move_placement("back-button", "TabsToolbar", 0).unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.topic, PLACEMENT_MOVED);
        let moved: Arc<PlacementMove> = event.payload.downcast().unwrap();
        assert_eq!(moved.from, Some(("nav-bar".to_string(), 0)));
        assert_eq!(moved.to, ("TabsToolbar".to_string(), 0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_define_area_after_initialize() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());

        customizer.define_area(Area::panel("PersonalToolbar").with_defaults(["home-button"]));
        assert_eq!(ids(&customizer, "PersonalToolbar"), ["home-button"]);

        // Redefinition leaves the list alone
        customizer.define_area(Area::panel("PersonalToolbar").with_defaults(["back-button"]));
        assert_eq!(ids(&customizer, "PersonalToolbar"), ["home-button"]);
    }

    #[test]
    fn test_save_preserves_legacy_areas() {
        let store = MemoryBlobStore::with_blob(
            r#"{
                "placements": {"old-toolbar": [["home-button"]]},
                "areas": {"old-toolbar": {"type": "panel", "anchor": "", "defaultPlacements": [], "extra": 1}}
            }"#,
        );
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());
        customizer.save().unwrap();

        let state = PersistedState::decode(&store.blob().unwrap()).unwrap();
        assert_eq!(state.placements["old-toolbar"], [Placement::new("home-button")]);
        assert!(matches!(state.areas["old-toolbar"], StoredArea::Legacy(_)));
        assert!(matches!(state.areas["nav-bar"], StoredArea::Known(_)));
    }

    #[test]
    fn test_version_never_lowered() {
        let store = MemoryBlobStore::with_blob(r#"{"currentVersion": 9}"#);
        let mut customizer = Customizer::new(
            Box::new(store.clone()),
            MigrationEngine::new(2).with_step(MigrationStep::retire_widget(1, "back-button")),
        );
        customizer.define_area(Area::panel("nav-bar").with_defaults(["back-button"]));
        customizer.initialize(catalog());
        customizer.save().unwrap();

        assert_eq!(customizer.current_version(), 9);
        assert_eq!(customizer.placements("nav-bar").len(), 1);
        assert_eq!(PersistedState::decode(&store.blob().unwrap()).unwrap().current_version, 9);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let store = MemoryBlobStore::new();
        let mut customizer = customizer(&store);
        customizer.initialize(catalog());
        customizer.move_placement("back-button", "TabsToolbar", 0).unwrap();

        customizer.reset();
        assert_eq!(ids(&customizer, "nav-bar"), ["back-button", "forward-button"]);
        assert!(customizer.placements("TabsToolbar").is_empty());
    }

    #[test]
    fn test_corrupt_state_publishes_reset() {
        let store = MemoryBlobStore::with_blob("not json{");
        let mut customizer = customizer(&store);
        let (_sub, rx) = customizer.event_bus().subscribe(event::STATE_RESET);

        customizer.initialize(catalog());
        assert!(rx.try_recv().is_ok());
        assert_eq!(store.blob().as_deref(), Some(""));
        assert_eq!(ids(&customizer, "nav-bar"), ["back-button", "forward-button"]);
    }
}

//! Startup, save and reload cycles against real blob stores.

use customui_core::{
    Area, CatalogEntry, CustomizeError, Customizer, FileBlobStore, LoadStatus, MemoryBlobStore,
    MigrationEngine, MigrationStep, PersistedState, PersistenceGateway, Placement,
    PlacementProperties, WidgetCandidate,
};

const WIDGETS: &[&str] = &[
    "back-button",
    "forward-button",
    "home-button",
    "sidebar-button",
    "downloads-button",
    "nav-bar-overflow-button",
];

fn catalog() -> Vec<CatalogEntry> {
    WIDGETS
        .iter()
        .map(|id| CatalogEntry::new(WidgetCandidate::with_id(*id)))
        .collect()
}

fn define_areas(customizer: &mut Customizer) {
    customizer.define_area(
        Area::panel("nav-bar")
            .with_anchor("nav-bar-overflow-button")
            .with_defaults(["back-button", "forward-button", "home-button"]),
    );
    customizer.define_area(Area::panel("unified-extensions-area"));
    customizer.define_area(Area::panel("TabsToolbar").with_defaults(["downloads-button"]));
}

fn start(store: &MemoryBlobStore, migrations: MigrationEngine) -> Customizer {
    let mut customizer = Customizer::new(Box::new(store.clone()), migrations);
    define_areas(&mut customizer);
    customizer.initialize(catalog());
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
fn absent_blob_loads_default_state() {
    let store = MemoryBlobStore::new();
    let gateway = PersistenceGateway::new(Box::new(store.clone()));

    let (state, status) = gateway.load_with_status();
    assert_eq!(status, LoadStatus::Absent);
    assert!(state.placements.is_empty());
    assert!(state.areas.is_empty());
    assert_eq!(state.current_version, 0);
}

#[test]
fn corrupt_blob_is_erased_once() {
    let store = MemoryBlobStore::with_blob("not json{");
    let gateway = PersistenceGateway::new(Box::new(store.clone()));

    assert_eq!(gateway.load(), PersistedState::default());
    assert_eq!(store.blob().as_deref(), Some(""));
    assert_eq!(gateway.load(), PersistedState::default());
    assert_eq!(store.blob().as_deref(), Some(""));
}

#[test]
fn migration_applies_each_step_once() {
    let store = MemoryBlobStore::with_blob(
        r#"{"currentVersion": 0, "placements": {"nav-bar": [["back-button"]], "unified-extensions-area": []}}"#,
    );
    let migrations = || {
        MigrationEngine::new(2)
            .with_step(MigrationStep::add_default_widget(1, "sidebar-button", "nav-bar", None))
            .with_step(MigrationStep::add_default_widget(
                2,
                "home-button",
                "unified-extensions-area",
                Some(0),
            ))
    };

    let mut customizer = start(&store, migrations());
    assert_eq!(customizer.current_version(), 2);
    assert_eq!(ids(&customizer, "nav-bar"), ["back-button", "sidebar-button"]);
    assert_eq!(ids(&customizer, "unified-extensions-area"), ["home-button"]);
    // No saved list, so seeded from defaults before the steps ran
    assert_eq!(ids(&customizer, "TabsToolbar"), ["downloads-button"]);

    customizer.save().unwrap();

    // Second startup is a no-op for migrations
    let again = start(&store, migrations());
    assert_eq!(again.current_version(), 2);
    assert_eq!(ids(&again, "nav-bar"), ["back-button", "sidebar-button"]);
    assert_eq!(ids(&again, "unified-extensions-area"), ["home-button"]);
}

#[test]
fn migrate_twice_leaves_state_unchanged() {
    let store = MemoryBlobStore::with_blob(
        r#"{"currentVersion": 0, "placements": {"nav-bar": [["back-button"]]}}"#,
    );
    let migrations = MigrationEngine::new(2)
        .with_step(MigrationStep::add_default_widget(1, "sidebar-button", "nav-bar", Some(0)))
        .with_step(MigrationStep::new(2, "hide forward button", |ctx| {
            if ctx.placements.locate("forward-button").is_none() {
                ctx.placements.insert(
                    "unified-extensions-area",
                    Placement::with_properties("forward-button", PlacementProperties { visible: false }),
                    0,
                )?;
            }
            Ok(())
        }));

    let mut customizer = start(&store, migrations);
    let first = customizer.snapshot();
    assert_eq!(first.current_version, 2);
    assert_eq!(first.placements["nav-bar"][0], Placement::new("sidebar-button"));
    assert!(!first.placements["unified-extensions-area"][0].visible());
    assert!(first.areas.contains_key("nav-bar"));

    let outcome = customizer.migrate();
    assert!(outcome.is_noop());
    assert!(outcome.applied.is_empty());
    assert_eq!(customizer.snapshot(), first);

    customizer.migrate();
    assert_eq!(customizer.snapshot(), first);
}

#[test]
fn non_utf8_state_file_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ui.json");
    std::fs::write(&path, [0xc3, 0x28, b'{']).unwrap();

    let mut customizer = Customizer::new(Box::new(FileBlobStore::new(&path)), MigrationEngine::new(0));
    define_areas(&mut customizer);
    customizer.initialize(catalog());

    assert_eq!(ids(&customizer, "nav-bar"), ["back-button", "forward-button", "home-button"]);
    assert!(std::fs::read(&path).unwrap().is_empty());
}

#[test]
fn move_between_areas() {
    let store = MemoryBlobStore::new();
    let mut customizer = start(&store, MigrationEngine::new(0));
    customizer.remove_placement("back-button");

    customizer
        .insert_placement("nav-bar", "back-button", 0, None)
        .unwrap();
    customizer
        .move_placement("back-button", "unified-extensions-area", 0)
        .unwrap();

    assert!(!ids(&customizer, "nav-bar").contains(&"back-button".to_string()));
    assert_eq!(ids(&customizer, "unified-extensions-area"), ["back-button"]);
    assert_eq!(customizer.area_of("back-button"), Some("unified-extensions-area"));
}

#[test]
fn move_to_unknown_area_changes_nothing() {
    let store = MemoryBlobStore::new();
    let mut customizer = start(&store, MigrationEngine::new(0));

    let err = customizer.move_placement("back-button", "nowhere", 0).unwrap_err();
    assert!(matches!(err, CustomizeError::AreaNotFound(_)));
    assert_eq!(customizer.area_of("back-button"), Some("nav-bar"));
}

#[test]
fn save_then_load_round_trips() {
    let store = MemoryBlobStore::new();
    let mut customizer = start(&store, MigrationEngine::new(0));
    customizer.move_placement("home-button", "TabsToolbar", 0).unwrap();
    customizer.remove_placement("forward-button");
    customizer
        .insert_placement(
            "unified-extensions-area",
            "forward-button",
            5,
            Some(PlacementProperties { visible: false }),
        )
        .unwrap();
    customizer.save().unwrap();

    let reloaded = start(&store, MigrationEngine::new(0));
    for area in ["nav-bar", "TabsToolbar", "unified-extensions-area"] {
        assert_eq!(customizer.placements(area), reloaded.placements(area), "{area}");
    }
    assert!(!reloaded.placements("unified-extensions-area")[0].visible());
}

#[test]
fn unknown_widgets_are_pruned_on_load() {
    let store = MemoryBlobStore::with_blob(
        r#"{"placements": {"nav-bar": [["back-button"], ["retired-button"], ["back-button"]]}}"#,
    );
    let mut customizer = start(&store, MigrationEngine::new(0));
    assert_eq!(customizer.placements("nav-bar"), [Placement::new("back-button")]);

    customizer.save().unwrap();
    let state = PersistedState::decode(&store.blob().unwrap()).unwrap();
    assert_eq!(state.placements["nav-bar"], [Placement::new("back-button")]);
}

#[test]
fn extension_widgets_survive_restart() {
    let store = MemoryBlobStore::new();
    let mut customizer = start(&store, MigrationEngine::new(0));
    let id = customizer
        .register_widget(&WidgetCandidate::with_id("weather-button").kind("toolbar-button"))
        .unwrap();
    customizer.insert_placement("nav-bar", &id, 1, None).unwrap();
    customizer.save().unwrap();

    // Registered before initialize, as a host loading extensions would
    let mut customizer = Customizer::new(Box::new(store.clone()), MigrationEngine::new(0));
    define_areas(&mut customizer);
    customizer
        .register_widget(&WidgetCandidate::with_id("weather-button").kind("toolbar-button"))
        .unwrap();
    customizer.initialize(catalog());
    assert_eq!(customizer.area_of("weather-button"), Some("nav-bar"));
}

#[test]
fn file_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile").join("ui.json");

    let mut customizer = Customizer::new(Box::new(FileBlobStore::new(&path)), MigrationEngine::new(3));
    define_areas(&mut customizer);
    customizer.initialize(catalog());
    customizer.move_placement("back-button", "TabsToolbar", 0).unwrap();
    customizer.save().unwrap();
    assert!(path.exists());

    let mut reloaded = Customizer::new(Box::new(FileBlobStore::new(&path)), MigrationEngine::new(3));
    define_areas(&mut reloaded);
    reloaded.initialize(catalog());
    assert_eq!(reloaded.current_version(), 3);
    assert_eq!(ids(&reloaded, "TabsToolbar"), ["back-button", "downloads-button"]);
}

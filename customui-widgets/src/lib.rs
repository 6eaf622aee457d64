pub mod areas;
pub mod common;
pub mod migrations;
pub mod navigation;
pub mod tabs;
pub mod toolbar;

use customui_core::{BlobStore, CatalogEntry, Customizer};

pub use areas::builtin_areas;
pub use common::{item_list, toolbar_button};
pub use migrations::{CURRENT_VERSION, builtin_migrations};

/// Every built-in widget, in registration order
pub fn catalog() -> Vec<CatalogEntry> {
    let mut entries = navigation::entries();
    entries.extend(tabs::entries());
    entries.extend(toolbar::entries());
    entries
}

/// A customizer with the built-in areas declared and built-in migrations,
/// not yet initialized
pub fn builtin_customizer(store: Box<dyn BlobStore>) -> Customizer {
    let mut customizer = Customizer::new(store, builtin_migrations());
    let areas = builtin_areas();
    tracing::debug!(areas = areas.len(), version = CURRENT_VERSION, "declaring built-in areas");
    for area in areas {
        customizer.define_area(area);
    }
    customizer
}

// customui-widgets/src/toolbar.rs
use customui_core::{CatalogEntry, DestroyGate};

use crate::common::{container, item_list, toolbar_button};

pub const URLBAR_CONTAINER: &str = "urlbar-container";
pub const DOWNLOADS_BUTTON: &str = "downloads-button";
pub const UNIFIED_EXTENSIONS_BUTTON: &str = "unified-extensions-button";
pub const NAV_BAR_OVERFLOW_BUTTON: &str = "nav-bar-overflow-button";
pub const SIDEBAR_BUTTON: &str = "sidebar-button";
pub const PERSONAL_BOOKMARKS: &str = "personal-bookmarks";
pub const MENUBAR_ITEMS: &str = "menubar-items";

pub fn entries() -> Vec<CatalogEntry> {
    vec![
        container(URLBAR_CONTAINER).into(),
        toolbar_button(DOWNLOADS_BUTTON, "Downloads", "downloads")
            .keybind("Ctrl+Shift+Y")
            .into(),
        toolbar_button(UNIFIED_EXTENSIONS_BUTTON, "Extensions", "extensions").into(),
        toolbar_button(NAV_BAR_OVERFLOW_BUTTON, "More tools", "chevron").into(),
        toolbar_button(SIDEBAR_BUTTON, "Show sidebars", "sidebar").into(),
        item_list(PERSONAL_BOOKMARKS).into(),
        // The native menu bar replaces these on macOS
        CatalogEntry::gated(
            item_list(MENUBAR_ITEMS),
            DestroyGate::resolved(cfg!(target_os = "macos")),
        ),
    ]
}

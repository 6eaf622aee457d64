// customui-widgets/src/tabs.rs
use customui_core::CatalogEntry;

use crate::common::{container, toolbar_button};

pub const TABBROWSER_TABS: &str = "tabbrowser-tabs";
pub const NEW_TAB_BUTTON: &str = "new-tab-button";
pub const ALLTABS_BUTTON: &str = "alltabs-button";

pub fn entries() -> Vec<CatalogEntry> {
    vec![
        container(TABBROWSER_TABS).into(),
        toolbar_button(NEW_TAB_BUTTON, "Open a new tab", "add")
            .keybind("Ctrl+T")
            .into(),
        toolbar_button(ALLTABS_BUTTON, "List all tabs", "chevron-down").into(),
    ]
}

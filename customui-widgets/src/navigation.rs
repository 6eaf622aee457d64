// customui-widgets/src/navigation.rs
//! History and page-load buttons.

use customui_core::{CatalogEntry, WidgetCandidate};

use crate::common::toolbar_button;

pub const BACK_BUTTON: &str = "back-button";
pub const FORWARD_BUTTON: &str = "forward-button";
pub const STOP_RELOAD_BUTTON: &str = "stop-reload-button";
pub const HOME_BUTTON: &str = "home-button";

pub fn back_button() -> WidgetCandidate {
    toolbar_button(BACK_BUTTON, "Go Back", "back").keybind("Alt+Left")
}

pub fn forward_button() -> WidgetCandidate {
    toolbar_button(FORWARD_BUTTON, "Go Forward", "forward").keybind("Alt+Right")
}

pub fn stop_reload_button() -> WidgetCandidate {
    toolbar_button(STOP_RELOAD_BUTTON, "Reload", "reload").keybind("Ctrl+R")
}

pub fn home_button() -> WidgetCandidate {
    toolbar_button(HOME_BUTTON, "Home", "home").keybind("Alt+Home")
}

pub fn entries() -> Vec<CatalogEntry> {
    vec![
        back_button().into(),
        forward_button().into(),
        stop_reload_button().into(),
        home_button().into(),
    ]
}

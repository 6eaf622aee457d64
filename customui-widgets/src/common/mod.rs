// customui-widgets/src/common/mod.rs
//! Shared constructors for built-in widget records.

use customui_core::{WidgetCandidate, WidgetDisplay, WidgetKind};

/// Base path of the bundled icon set
pub const ICON_ROOT: &str = "icons";

pub fn icon(name: &str) -> String {
    format!("{ICON_ROOT}/{name}.svg")
}

/// A toolbar button with a label and a bundled icon
pub fn toolbar_button(id: &str, text: &str, icon_name: &str) -> WidgetCandidate {
    WidgetCandidate::with_id(id)
        .kind(WidgetKind::TOOLBAR_BUTTON)
        .text(text)
        .tooltip_text(text)
        .icon(icon(icon_name))
}

/// A list of items rendered with icons beside their text
pub fn item_list(id: &str) -> WidgetCandidate {
    WidgetCandidate::with_id(id)
        .kind(WidgetKind::ITEM_LIST)
        .display(WidgetDisplay::IconsBesideText)
}

/// A container widget with no button fields
pub fn container(id: &str) -> WidgetCandidate {
    WidgetCandidate::with_id(id)
}

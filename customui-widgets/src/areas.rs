// customui-widgets/src/areas.rs
use customui_core::Area;

use crate::navigation::{BACK_BUTTON, FORWARD_BUTTON, HOME_BUTTON, STOP_RELOAD_BUTTON};
use crate::tabs::{ALLTABS_BUTTON, NEW_TAB_BUTTON, TABBROWSER_TABS};
use crate::toolbar::{
    DOWNLOADS_BUTTON, MENUBAR_ITEMS, NAV_BAR_OVERFLOW_BUTTON, PERSONAL_BOOKMARKS, SIDEBAR_BUTTON,
    UNIFIED_EXTENSIONS_BUTTON, URLBAR_CONTAINER,
};

pub const NAV_BAR: &str = "nav-bar";
pub const TABS_TOOLBAR: &str = "TabsToolbar";
pub const PERSONAL_TOOLBAR: &str = "PersonalToolbar";
pub const MENUBAR: &str = "toolbar-menubar";
pub const UNIFIED_EXTENSIONS_AREA: &str = "unified-extensions-area";
pub const OVERFLOW_FIXED_LIST: &str = "widget-overflow-fixed-list";

/// Areas every window declares, in declaration order
pub fn builtin_areas() -> Vec<Area> {
    vec![
        Area::panel(NAV_BAR)
            .with_anchor(NAV_BAR_OVERFLOW_BUTTON)
            .with_defaults([
                BACK_BUTTON,
                FORWARD_BUTTON,
                STOP_RELOAD_BUTTON,
                HOME_BUTTON,
                URLBAR_CONTAINER,
                DOWNLOADS_BUTTON,
                SIDEBAR_BUTTON,
                UNIFIED_EXTENSIONS_BUTTON,
            ]),
        Area::panel(TABS_TOOLBAR).with_defaults([TABBROWSER_TABS, NEW_TAB_BUTTON, ALLTABS_BUTTON]),
        Area::panel(PERSONAL_TOOLBAR).with_defaults([PERSONAL_BOOKMARKS]),
        Area::panel(MENUBAR).with_defaults([MENUBAR_ITEMS]),
        Area::panel(UNIFIED_EXTENSIONS_AREA),
        Area::panel(OVERFLOW_FIXED_LIST),
    ]
}

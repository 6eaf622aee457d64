// customui-widgets/src/migrations.rs
//! Upgrades for arrangements saved by older builds.
//!
//! Bump [`CURRENT_VERSION`] together with every new step.

use customui_core::{MigrationEngine, MigrationStep};

use crate::areas::NAV_BAR;
use crate::toolbar::{SIDEBAR_BUTTON, UNIFIED_EXTENSIONS_BUTTON};

pub const CURRENT_VERSION: u32 = 2;

pub fn builtin_migrations() -> MigrationEngine {
    MigrationEngine::new(CURRENT_VERSION)
        .with_step(MigrationStep::add_default_widget(1, SIDEBAR_BUTTON, NAV_BAR, None))
        .with_step(MigrationStep::add_default_widget(
            2,
            UNIFIED_EXTENSIONS_BUTTON,
            NAV_BAR,
            None,
        ))
}

// customui-core/src/migration.rs
//! Versioned upgrades of stored placements.

use std::collections::BTreeMap;
use std::fmt;

use crate::area::AreaRegistry;
use crate::error::{CustomizeError, CustomizeResult};
use crate::placement::{Placement, PlacementStore};
use crate::registry::WidgetRegistry;

/// What a step may look at and change
pub struct MigrationContext<'a> {
    pub widgets: &'a WidgetRegistry,
    pub areas: &'a AreaRegistry,
    pub placements: &'a mut PlacementStore,
}

type StepFn = Box<dyn Fn(&mut MigrationContext<'_>) -> CustomizeResult<()>>;

pub struct MigrationStep {
    version: u32,
    description: String,
    apply: StepFn,
}

impl MigrationStep {
    pub fn new<F>(version: u32, description: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&mut MigrationContext<'_>) -> CustomizeResult<()> + 'static,
    {
        Self {
            version,
            description: description.into(),
            apply: Box::new(apply),
        }
    }

    /// Place a new default widget unless it is already placed somewhere
    ///
    /// `index` of `None` appends. Unknown widgets and areas are skipped.
    pub fn add_default_widget(
        version: u32,
        widget_id: impl Into<String>,
        area_id: impl Into<String>,
        index: Option<usize>,
    ) -> Self {
        let widget_id = widget_id.into();
        let area_id = area_id.into();
        let description = format!("add {widget_id} to {area_id}");

        Self::new(version, description, move |ctx| {
            if !ctx.widgets.contains(&widget_id) || !ctx.areas.contains(&area_id) {
                tracing::debug!(widget = %widget_id, area = %area_id, "skipping default widget");
                return Ok(());
            }
            if ctx.placements.locate(&widget_id).is_some() {
                return Ok(());
            }
            let index = index.unwrap_or(usize::MAX);
            ctx.placements
                .insert(&area_id, Placement::new(widget_id.as_str()), index)?;
            Ok(())
        })
    }

    /// Take a widget out of whatever area holds it
    pub fn retire_widget(version: u32, widget_id: impl Into<String>) -> Self {
        let widget_id = widget_id.into();
        let description = format!("retire {widget_id}");

        Self::new(version, description, move |ctx| {
            ctx.placements.remove(&widget_id);
            Ok(())
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("version", &self.version)
            .field("description", &self.description)
            .finish()
    }
}

/// Result of one migration run
#[derive(Debug)]
pub struct MigrationOutcome {
    pub from: u32,
    pub to: u32,
    /// Versions whose step ran successfully
    pub applied: Vec<u32>,
    pub failed: Option<CustomizeError>,
}

impl MigrationOutcome {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug)]
pub struct MigrationEngine {
    target: u32,
    steps: BTreeMap<u32, MigrationStep>,
}

impl MigrationEngine {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            steps: BTreeMap::new(),
        }
    }

    /// Add a step, replacing any step for the same version
    pub fn with_step(mut self, step: MigrationStep) -> Self {
        if step.version == 0 || step.version > self.target {
            tracing::warn!(
                version = step.version,
                target = self.target,
                "migration step outside 1..=target will never run"
            );
        }
        self.steps.insert(step.version, step);
        self
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn steps(&self) -> impl Iterator<Item = &MigrationStep> {
        self.steps.values()
    }

    /// Walk `stored` up to the target, one version at a time
    ///
    /// A step's changes are kept, and its version reached, only when it
    /// returns `Ok`. Stored versions above the target are left alone.
    pub fn run(&self, stored: u32, ctx: &mut MigrationContext<'_>) -> MigrationOutcome {
        let mut outcome = MigrationOutcome {
            from: stored,
            to: stored,
            applied: Vec::new(),
            failed: None,
        };

        if stored >= self.target {
            return outcome;
        }

        for version in stored + 1..=self.target {
            if let Some(step) = self.steps.get(&version) {
                let before = ctx.placements.clone();
                if let Err(e) = (step.apply)(ctx) {
                    *ctx.placements = before;
                    tracing::error!(
                        version,
                        step = %step.description,
                        error = %e,
                        "UI migration step failed"
                    );
                    outcome.failed = Some(CustomizeError::Migration {
                        version,
                        reason: e.to_string(),
                    });
                    break;
                }
                tracing::debug!(version, step = %step.description, "applied UI migration step");
                outcome.applied.push(version);
            }
            outcome.to = version;
        }

        outcome
    }
}

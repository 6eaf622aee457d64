// customui-core/src/registry.rs
use std::collections::BTreeMap;

use crate::normalize::{NormalizeError, WidgetCandidate, normalize};
use crate::widget::{WidgetDefinition, WidgetSource};

/// Widget id -> resolved definition
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: BTreeMap<String, WidgetDefinition>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and insert a candidate, replacing any entry with the same id
    ///
    /// A rejected candidate leaves the registry untouched.
    pub fn register(
        &mut self,
        candidate: &WidgetCandidate,
        source: WidgetSource,
    ) -> Result<String, NormalizeError> {
        let definition = normalize(candidate, source)?;
        let id = definition.id.clone();

        if self.widgets.insert(id.clone(), definition).is_some() {
            tracing::debug!(widget = %id, "replaced existing widget definition");
        }
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<&WidgetDefinition> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut WidgetDefinition> {
        self.widgets.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }

    /// Remove a definition; placements are the caller's to clean up
    pub fn unregister(&mut self, id: &str) -> Option<WidgetDefinition> {
        self.widgets.remove(id)
    }

    /// Definitions ordered by id
    pub fn list_widgets(&self) -> Vec<&WidgetDefinition> {
        self.widgets.values().collect()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetKind;

    #[test]
    fn test_register_and_get() {
        let mut registry = WidgetRegistry::new();
        let id = registry
            .register(&WidgetCandidate::with_id("home-button"), WidgetSource::BuiltIn)
            .unwrap();

        assert_eq!(id, "home-button");
        assert_eq!(registry.get("home-button").unwrap().source, WidgetSource::BuiltIn);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_last_writer_wins() {
        let mut registry = WidgetRegistry::new();
        registry
            .register(&WidgetCandidate::with_id("w"), WidgetSource::BuiltIn)
            .unwrap();
        registry
            .register(
                &WidgetCandidate::with_id("w").kind(WidgetKind::ITEM_LIST),
                WidgetSource::External,
            )
            .unwrap();

        assert_eq!(registry.len(), 1);
        let widget = registry.get("w").unwrap();
        assert_eq!(widget.kind, WidgetKind::ItemList);
        assert_eq!(widget.source, WidgetSource::External);
    }

    #[test]
    fn test_rejected_candidate_leaves_registry_alone() {
        let mut registry = WidgetRegistry::new();
        registry
            .register(&WidgetCandidate::with_id("w").visible(false), WidgetSource::BuiltIn)
            .unwrap();

        let bad = WidgetCandidate::with_id("w").set("display", "sideways");
        assert!(registry.register(&bad, WidgetSource::BuiltIn).is_err());
        assert!(!registry.get("w").unwrap().visible);
    }

    #[test]
    fn test_unregister() {
        let mut registry = WidgetRegistry::new();
        registry
            .register(&WidgetCandidate::with_id("w"), WidgetSource::BuiltIn)
            .unwrap();

        assert!(registry.unregister("w").is_some());
        assert!(registry.unregister("w").is_none());
        assert!(registry.is_empty());
    }
}

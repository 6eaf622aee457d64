// customui-core/src/area.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaType {
    #[default]
    Panel,
}

/// A named region of the shell that hosts an ordered list of widgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub id: String,
    pub area_type: AreaType,
    /// Id of the overflow widget for this area, empty if none
    pub anchor: String,
    /// Widget ids placed here on first run
    pub default_placements: Vec<String>,
}

impl Area {
    pub fn panel(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            area_type: AreaType::Panel,
            anchor: String::new(),
            default_placements: Vec::new(),
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }

    pub fn with_defaults<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_placements = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn record(&self) -> AreaRecord {
        AreaRecord {
            area_type: self.area_type,
            anchor: self.anchor.clone(),
            default_placements: self.default_placements.clone(),
        }
    }

    pub fn from_record(id: impl Into<String>, record: AreaRecord) -> Self {
        Self {
            id: id.into(),
            area_type: record.area_type,
            anchor: record.anchor,
            default_placements: record.default_placements,
        }
    }
}

/// Persisted shape of an area, keyed by id in the state blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AreaRecord {
    #[serde(rename = "type")]
    pub area_type: AreaType,
    #[serde(default)]
    pub anchor: String,
    #[serde(default)]
    pub default_placements: Vec<String>,
}

/// Area id -> area, declared by the host application
#[derive(Debug, Default)]
pub struct AreaRegistry {
    areas: BTreeMap<String, Area>,
}

impl AreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an area; returns the previous definition
    pub fn define(&mut self, area: Area) -> Option<Area> {
        self.areas.insert(area.id.clone(), area)
    }

    pub fn get(&self, id: &str) -> Option<&Area> {
        self.areas.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.areas.contains_key(id)
    }

    /// The anchor widget id, `None` for unknown areas or an empty anchor
    pub fn resolve_anchor(&self, id: &str) -> Option<&str> {
        self.areas
            .get(id)
            .map(|area| area.anchor.as_str())
            .filter(|anchor| !anchor.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    pub fn ids(&self) -> Vec<String> {
        self.areas.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

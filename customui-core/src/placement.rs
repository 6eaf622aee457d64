// customui-core/src/placement.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CustomizeError;

fn default_true() -> bool {
    true
}

/// Per-placement properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementProperties {
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for PlacementProperties {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// One widget occupying one slot of an area
///
/// Serialized as `[widgetId]` or `[widgetId, {"visible": bool}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub widget_id: String,
    pub properties: Option<PlacementProperties>,
}

impl Placement {
    pub fn new(widget_id: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
            properties: None,
        }
    }

    pub fn with_properties(widget_id: impl Into<String>, properties: PlacementProperties) -> Self {
        Self {
            widget_id: widget_id.into(),
            properties: Some(properties),
        }
    }

    pub fn visible(&self) -> bool {
        self.properties.is_none_or(|p| p.visible)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PlacementRepr {
    WithProperties((String, PlacementProperties)),
    Bare((String,)),
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self.properties {
            Some(properties) => PlacementRepr::WithProperties((self.widget_id.clone(), properties)),
            None => PlacementRepr::Bare((self.widget_id.clone(),)),
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Placement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PlacementRepr::deserialize(deserializer)? {
            PlacementRepr::WithProperties((widget_id, properties)) => {
                Placement::with_properties(widget_id, properties)
            }
            PlacementRepr::Bare((widget_id,)) => Placement::new(widget_id),
        })
    }
}

/// A placement taken out of an area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub area: String,
    pub index: usize,
    pub placement: Placement,
}

/// Ordered placement lists per area
///
/// A widget id occurs at most once across all areas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementStore {
    areas: BTreeMap<String, Vec<Placement>>,
}

impl PlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placements of an area, empty for unknown areas
    pub fn placements(&self, area: &str) -> &[Placement] {
        self.areas.get(area).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the area has a list at all, even an empty one
    pub fn has_area(&self, area: &str) -> bool {
        self.areas.contains_key(area)
    }

    /// Area and index currently holding the widget
    pub fn locate(&self, widget_id: &str) -> Option<(&str, usize)> {
        self.areas.iter().find_map(|(area, list)| {
            list.iter()
                .position(|p| p.widget_id == widget_id)
                .map(|index| (area.as_str(), index))
        })
    }

    /// Insert at `index`, clamped to the list length; returns the final index
    pub fn insert(
        &mut self,
        area: &str,
        placement: Placement,
        index: usize,
    ) -> Result<usize, CustomizeError> {
        if let Some((current, _)) = self.locate(&placement.widget_id) {
            return Err(if current == area {
                CustomizeError::DuplicateInArea {
                    widget: placement.widget_id,
                    area: area.to_string(),
                }
            } else {
                CustomizeError::AlreadyPlaced {
                    widget: placement.widget_id,
                    area: current.to_string(),
                }
            });
        }

        let list = self.areas.entry(area.to_string()).or_default();
        let index = index.min(list.len());
        list.insert(index, placement);
        Ok(index)
    }

    /// Remove the widget from whichever area holds it
    pub fn remove(&mut self, widget_id: &str) -> Option<Removed> {
        let (area, index) = self
            .locate(widget_id)
            .map(|(area, index)| (area.to_string(), index))?;
        let list = self.areas.get_mut(&area)?;
        let placement = list.remove(index);
        Some(Removed {
            area,
            index,
            placement,
        })
    }

    /// Remove then insert, keeping the placement's properties
    ///
    /// A widget that is not placed anywhere is simply inserted.
    pub fn move_to(
        &mut self,
        widget_id: &str,
        area: &str,
        index: usize,
    ) -> Result<(Option<Removed>, usize), CustomizeError> {
        let removed = self.remove(widget_id);
        let placement = removed
            .as_ref()
            .map(|r| r.placement.clone())
            .unwrap_or_else(|| Placement::new(widget_id));

        match self.insert(area, placement, index) {
            Ok(index) => Ok((removed, index)),
            Err(err) => {
                // Put the widget back where it was
                if let Some(r) = &removed {
                    let list = self.areas.entry(r.area.clone()).or_default();
                    let at = r.index.min(list.len());
                    list.insert(at, r.placement.clone());
                }
                Err(err)
            }
        }
    }

    /// Replace an area's whole list; the caller guarantees exclusivity
    pub fn set_area(&mut self, area: impl Into<String>, placements: Vec<Placement>) {
        self.areas.insert(area.into(), placements);
    }

    pub fn clear(&mut self) {
        self.areas.clear();
    }

    /// Copy of every area's list, keyed by area id
    pub fn snapshot(&self) -> BTreeMap<String, Vec<Placement>> {
        self.areas.clone()
    }
}

// customui-core/src/persistence.rs
//! The persisted customization state and the gateway that reads and writes it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::area::AreaRecord;
use crate::placement::Placement;
use crate::storage::{BlobStore, StorageError, StorageResult};

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

/// An area as found in the blob
///
/// Records that do not match the current area shape are kept verbatim so
/// they survive the next save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredArea {
    Known(AreaRecord),
    Legacy(Value),
}

/// Everything written to the blob store
///
/// ```json
/// {
///   "placements": { "nav-bar": [["back-button"], ["home-button", {"visible": false}]] },
///   "areas": { "nav-bar": { "type": "panel", "anchor": "", "defaultPlacements": ["back-button"] } },
///   "seen": [],
///   "dirtyAreaCache": [],
///   "currentVersion": 2,
///   "newElementCount": 0
/// }
/// ```
///
/// `seen`, `dirtyAreaCache` and `newElementCount` are read and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub placements: BTreeMap<String, Vec<Placement>>,
    #[serde(default)]
    pub areas: BTreeMap<String, StoredArea>,
    #[serde(default = "empty_array")]
    pub seen: Value,
    #[serde(default = "empty_array")]
    pub dirty_area_cache: Value,
    #[serde(default)]
    pub current_version: u32,
    #[serde(default)]
    pub new_element_count: u64,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            placements: BTreeMap::new(),
            areas: BTreeMap::new(),
            seen: empty_array(),
            dirty_area_cache: empty_array(),
            current_version: 0,
            new_element_count: 0,
        }
    }
}

impl PersistedState {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty() && self.areas.is_empty()
    }

    /// Parse a blob, rejecting anything that is not a well-formed object
    pub fn decode(blob: &str) -> StorageResult<Self> {
        let value: Value = serde_json::from_str(blob)?;
        if !value.is_object() {
            return Err(StorageError::Corrupt("top level is not an object".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn encode(&self) -> StorageResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// How a load went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing stored yet
    Absent,
    Loaded,
    /// The blob was corrupt and has been erased
    Reset,
    /// The store could not be read
    Unreadable,
}

/// Reads and writes [`PersistedState`] through a [`BlobStore`]
pub struct PersistenceGateway {
    store: Box<dyn BlobStore>,
}

impl PersistenceGateway {
    pub fn new(store: Box<dyn BlobStore>) -> Self {
        Self { store }
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Load the stored state, falling back to an empty one
    pub fn load(&self) -> PersistedState {
        self.load_with_status().0
    }

    /// Load the stored state and report how it went
    ///
    /// A corrupt blob (unreadable text, bad JSON, wrong shapes) is erased and
    /// reported as `Reset`; a failing store is left alone as `Unreadable`.
    pub fn load_with_status(&self) -> (PersistedState, LoadStatus) {
        let blob = match self.store.read() {
            Ok(Some(blob)) if !blob.trim().is_empty() => blob,
            Ok(_) => return (PersistedState::default(), LoadStatus::Absent),
            Err(e @ StorageError::Corrupt(_)) => return self.reset(&e),
            Err(e) => {
                tracing::warn!(store = %self.store.name(), error = %e, "could not read saved UI state");
                return (PersistedState::default(), LoadStatus::Unreadable);
            }
        };

        match PersistedState::decode(&blob) {
            Ok(state) => {
                tracing::debug!(
                    store = %self.store.name(),
                    areas = state.placements.len(),
                    version = state.current_version,
                    "loaded saved UI state"
                );
                (state, LoadStatus::Loaded)
            }
            Err(e) => self.reset(&e),
        }
    }

    fn reset(&self, error: &StorageError) -> (PersistedState, LoadStatus) {
        tracing::warn!(
            error = %error,
            "error loading saved UI customization state, falling back to defaults"
        );
        if let Err(e) = self.store.write("") {
            tracing::warn!(error = %e, "could not erase corrupt UI state");
        }
        (PersistedState::default(), LoadStatus::Reset)
    }

    /// Replace the stored blob with `state`
    pub fn save(&self, state: &PersistedState) -> StorageResult<()> {
        let blob = state.encode()?;
        self.store.write(&blob)?;
        tracing::debug!(store = %self.store.name(), bytes = blob.len(), "saved UI state");
        Ok(())
    }
}

impl std::fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway")
            .field("store", &self.store.name())
            .finish()
    }
}

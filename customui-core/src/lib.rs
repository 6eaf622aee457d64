pub mod area;
pub mod config;
pub mod customizer;
pub mod error;
pub mod event;
pub mod extension;
pub mod gate;
pub mod migration;
pub mod normalize;
pub mod persistence;
pub mod placement;
pub mod registry;
pub mod storage;
pub mod widget;

pub use area::{Area, AreaRecord, AreaRegistry, AreaType};
pub use config::{AreaConfig, ConfigError, ConfigFile};
pub use customizer::{CatalogEntry, Customizer};
pub use error::{CustomizeError, CustomizeResult};
pub use event::{
    Event, EventBus, EventPayload, PlacementChange, PlacementMove, StateChange, Subscription,
    WidgetChange,
};
pub use extension::{ExtensionError, ExtensionLoader, ExtensionManifest};
pub use gate::{DestroyDecision, DestroyGate, GateState};
pub use migration::{MigrationContext, MigrationEngine, MigrationOutcome, MigrationStep};
pub use normalize::{NormalizeError, WidgetCandidate, is_valid_id, normalize};
pub use persistence::{LoadStatus, PersistedState, PersistenceGateway, StoredArea};
pub use placement::{Placement, PlacementProperties, PlacementStore, Removed};
pub use registry::WidgetRegistry;
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, StorageError, StorageResult};
pub use widget::{
    Configurable, OptionType, ToolbarButton, WidgetDefinition, WidgetDisplay, WidgetKind,
    WidgetSource,
};

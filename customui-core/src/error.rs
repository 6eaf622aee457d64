// customui-core/src/error.rs
use crate::normalize::NormalizeError;
use crate::storage::StorageError;

/// Errors returned by registry, placement and persistence operations
///
/// None of these are fatal: customization state is best effort and the
/// host keeps running with whatever state is left.
#[derive(Debug, thiserror::Error)]
pub enum CustomizeError {
    #[error("invalid widget definition: {0}")]
    Validation(#[from] NormalizeError),
    #[error("widget not found: {0}")]
    WidgetNotFound(String),
    #[error("area not found: {0}")]
    AreaNotFound(String),
    #[error("widget `{widget}` is already placed in area `{area}`")]
    DuplicateInArea { widget: String, area: String },
    #[error("widget `{widget}` is already placed in another area `{area}`")]
    AlreadyPlaced { widget: String, area: String },
    #[error("migration to version {version} failed: {reason}")]
    Migration { version: u32, reason: String },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type CustomizeResult<T> = Result<T, CustomizeError>;

// customui-core/src/normalize.rs
//! Validation of candidate widget definitions.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::widget::{ToolbarButton, WidgetDefinition, WidgetDisplay, WidgetKind, WidgetSource};

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("widget id pattern compiles"));

const BUTTON_FIELDS: [&str; 4] = ["icon", "text", "tooltipText", "keybind"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("illegal widget id: {0}")]
    InvalidId(String),
    #[error("unknown widget type: {0}")]
    UnknownKind(String),
    #[error("invalid display mode: {0}")]
    InvalidDisplay(String),
    #[error("field `{field}` must be a {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },
    #[error("field `{field}` is not allowed on {kind} widgets")]
    FieldNotAllowed { field: String, kind: &'static str },
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// Unvalidated widget fields
///
/// Keys follow the persisted naming: `id`, `type`, `visible`, `disabled`,
/// `display`, `icon`, `text`, `tooltipText`, `keybind`. Unknown keys are
/// carried but ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetCandidate {
    fields: Map<String, Value>,
}

impl WidgetCandidate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().id(id)
    }

    /// Candidate with a generated `widget-xxxx` id
    pub fn anonymous() -> Self {
        let suffix: String = rand::rng()
            .sample_iter(rand::distr::Alphanumeric)
            .take(4)
            .map(|byte| char::from(byte).to_ascii_lowercase())
            .collect();
        Self::with_id(format!("widget-{suffix}"))
    }

    /// Wrap a JSON value; only objects are candidates
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.set("id", id.into())
    }

    pub fn kind(self, kind: &str) -> Self {
        self.set("type", kind)
    }

    pub fn visible(self, visible: bool) -> Self {
        self.set("visible", visible)
    }

    pub fn disabled(self, disabled: bool) -> Self {
        self.set("disabled", disabled)
    }

    pub fn display(self, display: WidgetDisplay) -> Self {
        self.set("display", display.as_str())
    }

    pub fn icon(self, icon: impl Into<String>) -> Self {
        self.set("icon", icon.into())
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.set("text", text.into())
    }

    pub fn tooltip_text(self, tooltip: impl Into<String>) -> Self {
        self.set("tooltipText", tooltip.into())
    }

    pub fn keybind(self, keybind: impl Into<String>) -> Self {
        self.set("keybind", keybind.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The id as written, for diagnostics
    pub fn describe_id(&self) -> String {
        match self.fields.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => "<missing>".to_string(),
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn bool_field(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }
}

/// A single check; `Err` stops the chain
pub type Rule = fn(&WidgetCandidate) -> Result<(), NormalizeError>;

/// Checks applied by [`normalize`], in order
pub const RULES: &[Rule] = &[
    check_id,
    check_kind,
    check_display,
    check_flags,
    check_button_fields,
];

/// Validate a candidate and resolve it into a definition
///
/// The first failing entry of [`RULES`] decides the error.
///
/// Has no side effects; registration is the caller's business.
pub fn normalize(
    candidate: &WidgetCandidate,
    source: WidgetSource,
) -> Result<WidgetDefinition, NormalizeError> {
    for rule in RULES {
        rule(candidate)?;
    }
    Ok(resolve(candidate, source))
}

/// Whether `id` is acceptable as a widget id
pub fn is_valid_id(id: &str) -> bool {
    ID_PATTERN.is_match(id)
}

fn check_id(candidate: &WidgetCandidate) -> Result<(), NormalizeError> {
    match candidate.get("id") {
        Some(Value::String(id)) if is_valid_id(id) => Ok(()),
        _ => Err(NormalizeError::InvalidId(candidate.describe_id())),
    }
}

fn check_kind(candidate: &WidgetCandidate) -> Result<(), NormalizeError> {
    match candidate.get("type") {
        None => Ok(()),
        Some(Value::String(name)) if WidgetKind::from_name(name).is_some() => Ok(()),
        Some(Value::String(name)) => Err(NormalizeError::UnknownKind(name.clone())),
        Some(_) => Err(NormalizeError::InvalidField {
            field: "type".to_string(),
            expected: "string",
        }),
    }
}

fn check_display(candidate: &WidgetCandidate) -> Result<(), NormalizeError> {
    match candidate.get("display") {
        None => Ok(()),
        Some(Value::String(mode)) if WidgetDisplay::parse(mode).is_some() => Ok(()),
        Some(other) => Err(NormalizeError::InvalidDisplay(match other {
            Value::String(mode) => mode.clone(),
            value => value.to_string(),
        })),
    }
}

fn check_flags(candidate: &WidgetCandidate) -> Result<(), NormalizeError> {
    for field in ["visible", "disabled"] {
        if let Some(value) = candidate.get(field)
            && !value.is_boolean()
        {
            return Err(NormalizeError::InvalidField {
                field: field.to_string(),
                expected: "boolean",
            });
        }
    }
    Ok(())
}

/// Button fields are only valid on toolbar buttons and must be strings
fn check_button_fields(candidate: &WidgetCandidate) -> Result<(), NormalizeError> {
    let kind = candidate
        .str_field("type")
        .unwrap_or(WidgetKind::GENERIC);

    for field in BUTTON_FIELDS {
        let Some(value) = candidate.get(field) else {
            continue;
        };
        if kind != WidgetKind::TOOLBAR_BUTTON {
            let kind = WidgetKind::from_name(kind)
                .map(|k| k.name())
                .unwrap_or(WidgetKind::GENERIC);
            return Err(NormalizeError::FieldNotAllowed {
                field: field.to_string(),
                kind,
            });
        }
        if !value.is_string() {
            return Err(NormalizeError::InvalidField {
                field: field.to_string(),
                expected: "string",
            });
        }
    }
    Ok(())
}

/// Build the definition from a candidate that passed every rule
fn resolve(candidate: &WidgetCandidate, source: WidgetSource) -> WidgetDefinition {
    let text = |key: &str| candidate.str_field(key).unwrap_or_default().to_string();

    let kind = match candidate.str_field("type").and_then(WidgetKind::from_name) {
        Some(WidgetKind::ToolbarButton(_)) => WidgetKind::ToolbarButton(ToolbarButton {
            icon: text("icon"),
            text: text("text"),
            tooltip_text: text("tooltipText"),
            keybind: text("keybind"),
        }),
        Some(kind) => kind,
        None => WidgetKind::Generic,
    };

    let mut definition = WidgetDefinition::new(text("id"), kind, source);
    if let Some(visible) = candidate.bool_field("visible") {
        definition.visible = visible;
    }
    if let Some(disabled) = candidate.bool_field("disabled") {
        definition.disabled = disabled;
    }
    if let Some(display) = candidate.str_field("display").and_then(WidgetDisplay::parse) {
        definition.display = display;
    }
    definition
}

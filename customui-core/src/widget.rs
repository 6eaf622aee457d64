// customui-core/src/widget.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalize::NormalizeError;

/// How a widget lays out its icon and label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetDisplay {
    #[default]
    Icons,
    Text,
    IconsAndText,
    IconsBesideText,
}

impl WidgetDisplay {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "icons" => Some(Self::Icons),
            "text" => Some(Self::Text),
            "icons_and_text" => Some(Self::IconsAndText),
            "icons_beside_text" => Some(Self::IconsBesideText),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Icons => "icons",
            Self::Text => "text",
            Self::IconsAndText => "icons_and_text",
            Self::IconsBesideText => "icons_beside_text",
        }
    }
}

/// Where a widget definition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetSource {
    /// Shipped with the host application
    #[serde(rename = "builtin")]
    BuiltIn,
    /// Provided by an extension or another non-core party
    #[serde(rename = "external")]
    External,
}

impl WidgetSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuiltIn => "builtin",
            Self::External => "external",
        }
    }
}

/// Fields specific to toolbar buttons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolbarButton {
    /// Icon URI
    pub icon: String,
    /// Label text
    pub text: String,
    pub tooltip_text: String,
    /// Keybind that runs the button's command
    pub keybind: String,
}

/// The closed set of widget variants
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WidgetKind {
    #[default]
    Generic,
    ToolbarButton(ToolbarButton),
    ItemList,
}

impl WidgetKind {
    pub const GENERIC: &'static str = "widget";
    pub const TOOLBAR_BUTTON: &'static str = "toolbar-button";
    pub const ITEM_LIST: &'static str = "item-list";

    /// Kind with empty variant fields for a `type` name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            Self::GENERIC => Some(Self::Generic),
            Self::TOOLBAR_BUTTON => Some(Self::ToolbarButton(ToolbarButton::default())),
            Self::ITEM_LIST => Some(Self::ItemList),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Generic => Self::GENERIC,
            Self::ToolbarButton(_) => Self::TOOLBAR_BUTTON,
            Self::ItemList => Self::ITEM_LIST,
        }
    }

    pub fn default_display(&self) -> WidgetDisplay {
        match self {
            Self::ItemList => WidgetDisplay::IconsBesideText,
            Self::Generic | Self::ToolbarButton(_) => WidgetDisplay::Icons,
        }
    }
}

/// A resolved, placeable widget
///
/// Definitions are produced by [`crate::normalize`] and are not mutated
/// once they sit in the [`crate::WidgetRegistry`]; registering the same id
/// again replaces the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDefinition {
    pub id: String,
    pub visible: bool,
    /// Whether the widget can be interacted with
    pub disabled: bool,
    pub display: WidgetDisplay,
    pub source: WidgetSource,
    pub kind: WidgetKind,
}

impl WidgetDefinition {
    pub fn new(id: impl Into<String>, kind: WidgetKind, source: WidgetSource) -> Self {
        let display = kind.default_display();
        Self {
            id: id.into(),
            visible: true,
            disabled: false,
            display,
            source,
            kind,
        }
    }

    pub fn toolbar_button(&self) -> Option<&ToolbarButton> {
        match &self.kind {
            WidgetKind::ToolbarButton(button) => Some(button),
            _ => None,
        }
    }
}

/// Value type accepted for a runtime option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    String,
    Boolean,
    Number,
}

impl OptionType {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Number => value.is_number(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
        }
    }
}

/// Widgets that accept a typed set of runtime options
pub trait Configurable {
    /// Option names accepted by [`Configurable::configure`] with their types
    fn configurable_options(&self) -> &'static [(&'static str, OptionType)];

    /// Apply one option whose type has already been checked
    fn apply_option(&mut self, key: &str, value: &Value);

    /// Check every option, then apply them all
    ///
    /// Nothing is applied when any key is unknown or mistyped.
    fn configure(&mut self, options: &Map<String, Value>) -> Result<(), NormalizeError> {
        let allowed = self.configurable_options();
        for (key, value) in options {
            let Some((_, expected)) = allowed.iter().find(|(name, _)| name == key) else {
                return Err(NormalizeError::UnknownOption(key.clone()));
            };
            if !expected.matches(value) {
                return Err(NormalizeError::InvalidField {
                    field: key.clone(),
                    expected: expected.name(),
                });
            }
        }

        for (key, value) in options {
            self.apply_option(key, value);
        }
        Ok(())
    }
}

const COMMON_OPTIONS: &[(&str, OptionType)] = &[
    ("visible", OptionType::Boolean),
    ("disabled", OptionType::Boolean),
];

const BUTTON_OPTIONS: &[(&str, OptionType)] = &[
    ("visible", OptionType::Boolean),
    ("disabled", OptionType::Boolean),
    ("text", OptionType::String),
    ("tooltipText", OptionType::String),
    ("icon", OptionType::String),
    ("keybind", OptionType::String),
];

impl Configurable for WidgetDefinition {
    fn configurable_options(&self) -> &'static [(&'static str, OptionType)] {
        match self.kind {
            WidgetKind::ToolbarButton(_) => BUTTON_OPTIONS,
            WidgetKind::Generic | WidgetKind::ItemList => COMMON_OPTIONS,
        }
    }

    fn apply_option(&mut self, key: &str, value: &Value) {
        match (key, value) {
            ("visible", Value::Bool(flag)) => self.visible = *flag,
            ("disabled", Value::Bool(flag)) => self.disabled = *flag,
            (_, Value::String(text)) => {
                if let WidgetKind::ToolbarButton(button) = &mut self.kind {
                    let field = match key {
                        "text" => &mut button.text,
                        "tooltipText" => &mut button.tooltip_text,
                        "icon" => &mut button.icon,
                        "keybind" => &mut button.keybind,
                        _ => return,
                    };
                    *field = text.clone();
                }
            }
            _ => {}
        }
    }
}

//! Field declarations and the values a form field can hold.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text or a single selection.
    Text,
    /// Checkbox or toggle.
    Flag,
    /// Multi-select list of strings.
    List,
    /// Nested group of values, e.g. a range.
    Record,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Flag => "flag",
            Self::List => "list",
            Self::Record => "record",
        };
        f.write_str(name)
    }
}

/// Static declaration of a form field.
///
/// Fields are declared once as constants and shared between the record, the
/// rulesets and the mode projections, so a field name cannot drift between
/// them.
///
/// # Examples
/// ```
/// use hub::domain::form::{Field, FieldKind};
///
/// const NICKNAME: Field = Field::text("nickname", "Nickname");
/// assert_eq!(NICKNAME.name(), "nickname");
/// assert_eq!(NICKNAME.kind(), FieldKind::Text);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
}

impl Field {
    /// Declare a text field.
    #[must_use]
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Declare a flag field.
    #[must_use]
    pub const fn flag(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Flag)
    }

    /// Declare a list field.
    #[must_use]
    pub const fn list(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::List)
    }

    /// Declare a nested record field.
    #[must_use]
    pub const fn record(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Record)
    }

    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }

    /// Wire name of the field, e.g. `firstName`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable label used in validation messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Declared value kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }
}

/// Value held by a single form field.
///
/// Serialises untagged so a record maps onto a plain JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state.
    Flag(bool),
    /// Text or single selection.
    Text(String),
    /// Multi-select values.
    List(Vec<String>),
    /// Nested values.
    Record(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// The empty value for a declared kind.
    #[must_use]
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::Flag => Self::Flag(false),
            FieldKind::List => Self::List(Vec::new()),
            FieldKind::Record => Self::Record(BTreeMap::new()),
        }
    }

    /// Kind of the value.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Flag(_) => FieldKind::Flag,
            Self::Text(_) => FieldKind::Text,
            Self::List(_) => FieldKind::List,
            Self::Record(_) => FieldKind::Record,
        }
    }

    /// Text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Flag state, if this is a flag value.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    /// List items, if this is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Nested values, if this is a record value.
    #[must_use]
    pub fn as_record(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            Self::Record(values) => Some(values),
            _ => None,
        }
    }

    /// Whether the value holds nothing a user entered.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Flag(_) => false,
            Self::Text(text) => field_rules::is_blank(text),
            Self::List(items) => items.is_empty(),
            Self::Record(values) => values.values().all(Self::is_blank),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(value: BTreeMap<String, FieldValue>) -> Self {
        Self::Record(value)
    }
}

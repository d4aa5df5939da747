//! Live field-value store and per-field error store for one form instance.

use std::collections::BTreeMap;

use serde::Serialize;

use super::field::{Field, FieldValue};

/// Mapping from field name to its current value.
///
/// ## Invariants
/// - Keys are the static names of declared [`Field`]s.
/// - A record built with [`FormRecord::blank`] holds every given field with
///   the empty value of its kind, so later lookups never miss.
///
/// # Examples
/// ```
/// use hub::domain::fields::{EMAIL, PASSWORD};
/// use hub::domain::form::FormRecord;
///
/// let record = FormRecord::blank(&[EMAIL, PASSWORD]);
/// assert_eq!(record.text(EMAIL), "");
/// assert_eq!(record.project(&[EMAIL]).len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormRecord(BTreeMap<&'static str, FieldValue>);

impl FormRecord {
    /// Build a record holding the empty value of every given field.
    #[must_use]
    pub fn blank(fields: &[Field]) -> Self {
        Self(
            fields
                .iter()
                .map(|field| (field.name(), FieldValue::empty(field.kind())))
                .collect(),
        )
    }

    /// Value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Whether the record holds a value for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Text content of a field, empty when absent or not text.
    #[must_use]
    pub fn text(&self, field: Field) -> &str {
        self.get(field.name())
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    /// Flag state of a field, `false` when absent or not a flag.
    #[must_use]
    pub fn flag(&self, field: Field) -> bool {
        self.get(field.name())
            .and_then(FieldValue::as_flag)
            .unwrap_or_default()
    }

    /// List items of a field, empty when absent or not a list.
    #[must_use]
    pub fn list(&self, field: Field) -> &[String] {
        self.get(field.name())
            .and_then(FieldValue::as_list)
            .unwrap_or_default()
    }

    /// Field names in the record, in name order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }

    /// Number of fields held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Subset of the record restricted to `fields`.
    ///
    /// Fields missing from the record are skipped rather than invented.
    #[must_use]
    pub fn project(&self, fields: &[Field]) -> Self {
        Self(
            fields
                .iter()
                .filter_map(|field| {
                    self.0
                        .get(field.name())
                        .map(|value| (field.name(), value.clone()))
                })
                .collect(),
        )
    }

    pub(crate) fn insert(&mut self, field: Field, value: FieldValue) {
        self.0.insert(field.name(), value);
    }
}

/// Mapping from field name to a human-readable validation message.
///
/// Populated wholesale by a validation pass; single entries are dropped when
/// their field is edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorRecord(BTreeMap<&'static str, String>);

impl ErrorRecord {
    /// Message recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether an entry exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Names of the failing fields, in name order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Iterate over `(name, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(name, message)| (*name, message.as_str()))
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, field: Field, message: String) {
        self.0.insert(field.name(), message);
    }

    pub(crate) fn clear_field(&mut self, name: &str) -> bool {
        self.0.remove(name).is_some()
    }
}

//! Declarative validation rules and the single-pass validator.
//!
//! A ruleset is a static table of [`FieldRule`]s. Validation walks the whole
//! table: every field contributes its own entry, and within one field the
//! first failing rule supplies the message.

use field_rules::{LinkShapeError, SharedImageLink};
use thiserror::Error;

use super::field::Field;
use super::record::{ErrorRecord, FormRecord};

/// Minimum password length accepted by the hub.
pub const PASSWORD_MIN: usize = 6;

/// A single check applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Must hold something once trimmed.
    Required,
    /// Must hold at least one character. Whitespace counts, for secrets.
    NonEmpty,
    /// A selection must have been made (no trimming).
    Selected,
    /// Must have the `local@domain.tld` shape.
    Email,
    /// Must hold at least this many characters.
    MinLength(usize),
    /// Must equal this exact value.
    Exactly(&'static str),
    /// Must be one of these values.
    OneOf(&'static [&'static str]),
    /// Must equal the value of another field.
    SameAs(Field),
    /// When non-empty, must be a recognised shared-image link.
    SharedImageLink,
}

/// Rules attached to one field, evaluated in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    field: Field,
    rules: &'static [Rule],
}

impl FieldRule {
    /// Attach `rules` to `field`.
    #[must_use]
    pub const fn new(field: Field, rules: &'static [Rule]) -> Self {
        Self { field, rules }
    }

    /// Field the rules apply to.
    #[must_use]
    pub const fn field(&self) -> Field {
        self.field
    }

    /// Rules in evaluation order.
    #[must_use]
    pub const fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    fn first_violation(&self, record: &FormRecord) -> Option<RuleViolation> {
        self.rules
            .iter()
            .find_map(|rule| rule.check(self.field, record).err())
    }
}

/// Reason a field failed validation. The display text is the message stored
/// in the [`ErrorRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// Required value missing.
    #[error("{label} is required")]
    Missing {
        /// Field label.
        label: &'static str,
    },
    /// No option selected.
    #[error("Please select a {label}")]
    NotSelected {
        /// Field label, lower-cased for the sentence.
        label: String,
    },
    /// Malformed email address.
    #[error("Please enter a valid email address")]
    InvalidEmail,
    /// Value shorter than allowed.
    #[error("{label} must be at least {min} characters")]
    TooShort {
        /// Field label.
        label: &'static str,
        /// Minimum length.
        min: usize,
    },
    /// Value differs from the single permitted one.
    #[error("{label} must be {expected}")]
    NotPermitted {
        /// Field label.
        label: &'static str,
        /// Permitted value.
        expected: &'static str,
    },
    /// Value outside the allowed set.
    #[error("{label} must be one of: {allowed}")]
    NotOneOf {
        /// Field label.
        label: &'static str,
        /// Comma-separated allowed values.
        allowed: String,
    },
    /// Value differs from its companion field.
    #[error("{label} must match {other}")]
    Mismatch {
        /// Field label.
        label: &'static str,
        /// Companion field label, lower-cased.
        other: String,
    },
    /// Value is not a recognised shared-image link.
    #[error("{label} must be a Google Drive share link ({reason})")]
    InvalidLink {
        /// Field label.
        label: &'static str,
        /// Shape violation.
        reason: LinkShapeError,
    },
}

impl Rule {
    /// Apply the rule to `field` within `record`.
    ///
    /// # Errors
    /// Returns the [`RuleViolation`] describing why the value is rejected.
    pub fn check(self, field: Field, record: &FormRecord) -> Result<(), RuleViolation> {
        let label = field.label();
        let text = record.text(field);
        match self {
            Self::Required => {
                let blank = record.get(field.name()).is_none_or(|value| value.is_blank());
                if blank {
                    return Err(RuleViolation::Missing { label });
                }
            }
            Self::NonEmpty => {
                if text.is_empty() {
                    return Err(RuleViolation::Missing { label });
                }
            }
            Self::Selected => {
                if text.is_empty() {
                    return Err(RuleViolation::NotSelected {
                        label: label.to_lowercase(),
                    });
                }
            }
            Self::Email => {
                if !field_rules::is_email(text) {
                    return Err(RuleViolation::InvalidEmail);
                }
            }
            Self::MinLength(min) => {
                if !field_rules::meets_min_length(text, min) {
                    return Err(RuleViolation::TooShort { label, min });
                }
            }
            Self::Exactly(expected) => {
                if !field_rules::is_exactly(text, expected) {
                    return Err(RuleViolation::NotPermitted { label, expected });
                }
            }
            Self::OneOf(allowed) => {
                if !field_rules::is_one_of(text, allowed) {
                    return Err(RuleViolation::NotOneOf {
                        label,
                        allowed: allowed.join(", "),
                    });
                }
            }
            Self::SameAs(other) => {
                if text != record.text(other) {
                    return Err(RuleViolation::Mismatch {
                        label,
                        other: other.label().to_lowercase(),
                    });
                }
            }
            Self::SharedImageLink => {
                if !field_rules::is_blank(text) {
                    SharedImageLink::parse(text)
                        .map_err(|reason| RuleViolation::InvalidLink { label, reason })?;
                }
            }
        }
        Ok(())
    }
}

/// Result of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    errors: ErrorRecord,
}

impl Validation {
    /// Whether every rule passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages for every failing field.
    #[must_use]
    pub fn errors(&self) -> &ErrorRecord {
        &self.errors
    }

    /// Take ownership of the error record.
    #[must_use]
    pub fn into_errors(self) -> ErrorRecord {
        self.errors
    }
}

/// Run `ruleset` over `record` in a single pass.
///
/// Pure: the record is not modified and a fresh [`ErrorRecord`] is returned.
///
/// # Examples
/// ```
/// use hub::domain::fields::{EMAIL, PASSWORD};
/// use hub::domain::form::{FieldRule, FormRecord, Rule, validate};
///
/// const RULES: &[FieldRule] = &[
///     FieldRule::new(EMAIL, &[Rule::Required, Rule::Email]),
///     FieldRule::new(PASSWORD, &[Rule::Required, Rule::MinLength(6)]),
/// ];
/// let outcome = validate(RULES, &FormRecord::blank(&[EMAIL, PASSWORD]));
/// assert!(!outcome.is_valid());
/// assert_eq!(outcome.errors().len(), 2);
/// ```
#[must_use]
pub fn validate(ruleset: &[FieldRule], record: &FormRecord) -> Validation {
    let mut errors = ErrorRecord::default();
    for entry in ruleset {
        if let Some(violation) = entry.first_violation(record) {
            errors.insert(entry.field(), violation.to_string());
        }
    }
    Validation { errors }
}

//! Discriminator contract and the dispatcher that tracks the active mode.
//!
//! A form's discriminator is a closed enum implementing [`FormMode`]. Each
//! variant names its fields, its ruleset and the typed payload built from
//! its projection, so a payload can only ever carry fields of its own mode.

use std::fmt;

use tracing::debug;

use super::field::Field;
use super::record::FormRecord;
use super::rules::FieldRule;

/// Closed set of modes (or tabs) a form can be in.
pub trait FormMode: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Typed value handed to the submit handler.
    type Payload: fmt::Debug + Send + Sync + 'static;

    /// Every mode of the form.
    const ALL: &'static [Self];

    /// Short name used in logs, e.g. `register:investor`.
    fn label(self) -> &'static str;

    /// Ordered fields visible in this mode.
    fn fields(self) -> &'static [Field];

    /// Rules applied on submit in this mode.
    fn ruleset(self) -> &'static [FieldRule];

    /// Fields wiped after a successful submission, e.g. passwords.
    fn transient_fields(self) -> &'static [Field] {
        &[]
    }

    /// Build the typed payload from a projection of this mode's fields.
    fn payload(self, projected: &FormRecord) -> Self::Payload;
}

/// Union of the fields of every mode, first occurrence order.
#[must_use]
pub fn field_domain<M: FormMode>() -> Vec<Field> {
    let mut domain: Vec<Field> = Vec::new();
    for field in M::ALL.iter().flat_map(|mode| mode.fields()) {
        if !domain.iter().any(|known| known.name() == field.name()) {
            domain.push(*field);
        }
    }
    domain
}

/// Resolve a field name against the domain of `M`.
#[must_use]
pub fn lookup_field<M: FormMode>(name: &str) -> Option<Field> {
    M::ALL
        .iter()
        .flat_map(|mode| mode.fields())
        .find(|field| field.name() == name)
        .copied()
}

/// Tracks which mode is active.
///
/// Switching modes is the only way to change the active ruleset. The
/// dispatcher owns no field data, so a switch never touches entered values.
///
/// # Examples
/// ```
/// use hub::domain::{AuthMode, Role};
/// use hub::domain::form::ModeDispatcher;
///
/// let mut dispatcher = ModeDispatcher::new(AuthMode::Login);
/// dispatcher.select(AuthMode::Register(Role::Investor));
/// assert_eq!(dispatcher.active(), AuthMode::Register(Role::Investor));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDispatcher<M> {
    active: M,
}

impl<M: FormMode> ModeDispatcher<M> {
    /// Start in `initial`.
    #[must_use]
    pub fn new(initial: M) -> Self {
        Self { active: initial }
    }

    /// Currently active mode.
    #[must_use]
    pub fn active(&self) -> M {
        self.active
    }

    /// Switch to `mode`, returning the previous one.
    pub fn select(&mut self, mode: M) -> M {
        let previous = std::mem::replace(&mut self.active, mode);
        if previous != mode {
            debug!(from = previous.label(), to = mode.label(), "form mode switched");
        }
        previous
    }

    /// Ordered fields of `mode`.
    #[must_use]
    pub fn fields_for(mode: M) -> &'static [Field] {
        mode.fields()
    }

    /// Ruleset of `mode`.
    #[must_use]
    pub fn ruleset_for(mode: M) -> &'static [FieldRule] {
        mode.ruleset()
    }

    /// Projection of `record` onto the fields of `mode`.
    #[must_use]
    pub fn extract(mode: M, record: &FormRecord) -> FormRecord {
        record.project(Self::fields_for(mode))
    }
}

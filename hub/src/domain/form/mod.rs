//! Multi-mode form workflow.
//!
//! Purpose: hold one form's values and validation messages, switch between
//! modes without losing input, and hand a validated, mode-specific payload to
//! an external handler exactly once per submit.
//!
//! Public surface:
//! - [`FormController`]: record ownership, edits, submit and resubmit.
//! - [`FormMode`] / [`ModeDispatcher`]: discriminator contract and tracker.
//! - [`Rule`], [`FieldRule`], [`validate`]: declarative single-pass rules.
//! - [`FormRecord`], [`ErrorRecord`], [`FieldValue`]: state containers.

mod controller;
mod field;
mod mode;
mod record;
mod rules;

pub use controller::{
    Banner, FormController, FormError, PendingSubmission, SubmitBlocked, SubmitOutcome,
};
pub use field::{Field, FieldKind, FieldValue};
pub use mode::{FormMode, ModeDispatcher, field_domain, lookup_field};
pub use record::{ErrorRecord, FormRecord};
pub use rules::{FieldRule, PASSWORD_MIN, Rule, RuleViolation, Validation, validate};

//! Form state, validation and submission workflow for the WomenConnect Hub.
//!
//! The hub's authentication and profile-settings screens are multi-mode
//! forms: one record of values shared by several modes (login and two
//! registration roles; six settings tabs), each mode with its own fields and
//! rules. [`domain::form::FormController`] owns that record, validates the
//! active mode and hands a typed payload to a
//! [`domain::ports::SubmitHandler`] exactly once per submit.

pub mod config;
pub mod domain;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use domain::TraceId;

//! Domain primitives, forms and ports.
//!
//! Purpose: model the hub's forms as typed state machines and keep the
//! external operations they submit to behind ports. Nothing here knows how a
//! form is rendered or how a handler reaches its backend.
//!
//! Public surface:
//! - [`form`]: the generic form controller, modes and rules.
//! - [`auth`] and [`settings`]: the two concrete forms.
//! - [`ports`]: submit handlers and the session cache.
//! - Error (alias to `error::Error`): failure reported by a handler.
//! - TraceId: per-submission correlation identifier.

pub mod account;
pub mod auth;
pub mod error;
pub mod fields;
pub mod form;
pub mod ports;
pub mod session;
pub mod settings;
pub mod trace_id;

pub use self::account::{Account, Role, TicketSize, UserId, UserIdError, UserProfile};
pub use self::auth::{
    AuthMode, AuthPayload, EntrepreneurRegistration, InvestorRegistration, LoginCredentials,
    Registration, RegistrationBasics,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::session::AuthSession;
pub use self::settings::{SettingsPatch, SettingsTab};
pub use self::trace_id::TraceId;

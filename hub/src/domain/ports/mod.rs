//! Domain ports: the handlers forms submit to and the session store.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod profile_settings_service;
mod session_cache;
mod submit_handler;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::{AuthService, DEMO_EMAIL, DEMO_PASSWORD, FixtureAuthService};
#[cfg(test)]
pub use profile_settings_service::MockProfileSettingsService;
pub use profile_settings_service::{FixtureProfileSettingsService, ProfileSettingsService};
#[cfg(test)]
pub use session_cache::MockSessionCache;
pub use session_cache::{InMemorySessionCache, SessionCache, SessionCacheError};
pub use submit_handler::SubmitHandler;

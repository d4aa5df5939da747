//! Outbound adapters for domain ports.

mod session_cache;

pub use session_cache::{JsonFileSessionCache, SESSION_FILE};

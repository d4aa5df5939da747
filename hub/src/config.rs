//! Runtime configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_MOCK_LATENCY_MS: u64 = 800;

/// Settings for the fixture handlers and the session cache.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HUB")]
pub struct HubSettings {
    /// Simulated round-trip delay of the fixture handlers, in milliseconds.
    pub mock_latency_ms: Option<u64>,
    /// Directory holding the cached session. No caching when unset.
    pub session_dir: Option<PathBuf>,
    /// Seed the demo account into the fixture authenticator.
    pub seed_demo_account: Option<bool>,
}

impl HubSettings {
    /// Configured fixture latency, falling back to the default.
    #[must_use]
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms.unwrap_or(DEFAULT_MOCK_LATENCY_MS))
    }

    /// Whether the demo account should be seeded. Defaults to true.
    #[must_use]
    pub fn seed_demo_account(&self) -> bool {
        self.seed_demo_account.unwrap_or(true)
    }
}

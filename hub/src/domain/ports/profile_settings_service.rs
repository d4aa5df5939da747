//! Driving port for saving one settings tab.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use zeroize::Zeroizing;

use super::SubmitHandler;
use crate::domain::fields::{CURRENT_PASSWORD, NEW_PASSWORD};
use crate::domain::{Error, SettingsPatch, SettingsTab, UserProfile};

/// Domain use-case port for profile settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileSettingsService: Send + Sync {
    /// Persist the values of one tab and return the updated profile.
    async fn update(&self, patch: &SettingsPatch) -> Result<UserProfile, Error>;
}

#[async_trait]
impl<T> SubmitHandler<SettingsPatch> for T
where
    T: ProfileSettingsService,
{
    type Output = UserProfile;

    async fn handle(&self, payload: &SettingsPatch) -> Result<UserProfile, Error> {
        self.update(payload).await
    }
}

#[derive(Debug)]
struct ProfileState {
    profile: UserProfile,
    password: Zeroizing<String>,
}

/// Single-profile settings store with simulated latency.
///
/// Security updates check the current password before replacing it.
#[derive(Debug)]
pub struct FixtureProfileSettingsService {
    latency: Duration,
    state: Mutex<ProfileState>,
}

impl FixtureProfileSettingsService {
    /// Hold `profile` guarded by `password`, answering after `latency`.
    #[must_use]
    pub fn new(profile: UserProfile, password: &str, latency: Duration) -> Self {
        Self {
            latency,
            state: Mutex::new(ProfileState {
                profile,
                password: Zeroizing::new(password.to_owned()),
            }),
        }
    }

    /// Current stored profile.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .profile
            .clone()
    }
}

#[async_trait]
impl ProfileSettingsService for FixtureProfileSettingsService {
    async fn update(&self, patch: &SettingsPatch) -> Result<UserProfile, Error> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if patch.tab == SettingsTab::Security {
            if patch.fields.text(CURRENT_PASSWORD) != state.password.as_str() {
                return Err(Error::unauthorized("Current password is incorrect"));
            }
            state.password = Zeroizing::new(patch.fields.text(NEW_PASSWORD).to_owned());
        }

        state.profile.apply(&patch.fields);
        debug!(tab = ?patch.tab, user_id = %state.profile.id, "fixture settings saved");
        Ok(state.profile.clone())
    }
}

//! Driving port for sign-in and registration.
//!
//! The hub has no backend yet, so [`FixtureAuthService`] stands in for one:
//! it keeps accounts in memory and answers after a configurable delay, the
//! way the screens' mock fetches do.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use zeroize::Zeroizing;

use super::SubmitHandler;
use crate::domain::{
    Account, AuthPayload, Error, LoginCredentials, Registration, Role, UserId,
};

/// Email of the account seeded by [`FixtureAuthService::with_demo_account`].
pub const DEMO_EMAIL: &str = "demo@womenconnect.hub";
/// Password of the seeded demo account.
pub const DEMO_PASSWORD: &str = "password123";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate credentials and return the signed-in account.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Account, Error>;

    /// Create an account and return it signed in.
    async fn register(&self, registration: &Registration) -> Result<Account, Error>;
}

#[async_trait]
impl<T> SubmitHandler<AuthPayload> for T
where
    T: AuthService,
{
    type Output = Account;

    async fn handle(&self, payload: &AuthPayload) -> Result<Account, Error> {
        match payload {
            AuthPayload::Login(credentials) => self.login(credentials).await,
            AuthPayload::Register(registration) => self.register(registration).await,
        }
    }
}

#[derive(Debug)]
struct StoredAccount {
    account: Account,
    password: Zeroizing<String>,
}

/// In-memory authenticator with simulated latency.
#[derive(Debug, Default)]
pub struct FixtureAuthService {
    latency: Duration,
    accounts: Mutex<HashMap<String, StoredAccount>>,
}

impl FixtureAuthService {
    /// Empty account table answering after `latency`.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Seed the demo entrepreneur account.
    #[must_use]
    pub fn with_demo_account(self) -> Self {
        self.insert(
            Account {
                id: UserId::random(),
                email: DEMO_EMAIL.to_owned(),
                display_name: "Demo Founder".to_owned(),
                role: Role::Entrepreneur,
            },
            DEMO_PASSWORD,
        );
        self
    }

    fn insert(&self, account: Account, password: &str) {
        let key = account.email.to_lowercase();
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                key,
                StoredAccount {
                    account,
                    password: Zeroizing::new(password.to_owned()),
                },
            );
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthService for FixtureAuthService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Account, Error> {
        self.simulate_round_trip().await;
        let accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        match accounts.get(&credentials.email().to_lowercase()) {
            Some(stored) if stored.password.as_str() == credentials.password() => {
                debug!(email = credentials.email(), "fixture login accepted");
                Ok(stored.account.clone())
            }
            _ => Err(Error::unauthorized("Invalid email or password")),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<Account, Error> {
        self.simulate_round_trip().await;
        let credentials = &registration.basics().credentials;
        let key = credentials.email().to_lowercase();
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(&key) {
            return Err(Error::conflict("An account with this email already exists"));
        }

        let account = Account {
            id: UserId::random(),
            email: credentials.email().to_owned(),
            display_name: registration.display_name(),
            role: registration.role(),
        };
        accounts.insert(
            key,
            StoredAccount {
                account: account.clone(),
                password: Zeroizing::new(credentials.password().to_owned()),
            },
        );
        debug!(email = credentials.email(), role = %account.role, "fixture account created");
        Ok(account)
    }
}

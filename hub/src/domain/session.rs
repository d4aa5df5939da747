//! Signed-in session: an [`AuthService`] decorator that remembers the account.
//!
//! Successful sign-ins and registrations are written to a [`SessionCache`]
//! so the next run can restore them. Cache failures are logged and never
//! turn a successful sign-in into a failed one.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{AuthService, SessionCache, SessionCacheError};
use crate::domain::{Account, Error, LoginCredentials, Registration};

/// Authentication handler backed by `S` that caches accounts in `C`.
#[derive(Debug)]
pub struct AuthSession<S, C> {
    service: Arc<S>,
    cache: Arc<C>,
}

impl<S, C> Clone for AuthSession<S, C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S, C> AuthSession<S, C>
where
    S: AuthService,
    C: SessionCache,
{
    /// Wrap `service`, caching accounts in `cache`.
    pub fn new(service: Arc<S>, cache: Arc<C>) -> Self {
        Self { service, cache }
    }

    /// Account left by a previous run, if any.
    ///
    /// A corrupt entry is cleared and treated as signed out.
    ///
    /// # Errors
    /// Returns [`SessionCacheError::Io`] when the cache cannot be read.
    pub fn restore(&self) -> Result<Option<Account>, SessionCacheError> {
        match self.cache.load() {
            Ok(account) => Ok(account),
            Err(SessionCacheError::Corrupt { message }) => {
                warn!(%message, "discarding corrupt session entry");
                self.cache.clear()?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Forget the signed-in account.
    ///
    /// # Errors
    /// Propagates the cache adapter's failure.
    pub fn logout(&self) -> Result<(), SessionCacheError> {
        self.cache.clear()?;
        info!("signed out");
        Ok(())
    }

    fn remember(&self, account: &Account) {
        if let Err(err) = self.cache.store(account) {
            warn!(error = %err, "failed to cache session");
        }
    }
}

#[async_trait]
impl<S, C> AuthService for AuthSession<S, C>
where
    S: AuthService,
    C: SessionCache,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<Account, Error> {
        let account = self.service.login(credentials).await?;
        self.remember(&account);
        Ok(account)
    }

    async fn register(&self, registration: &Registration) -> Result<Account, Error> {
        let account = self.service.register(registration).await?;
        self.remember(&account);
        Ok(account)
    }
}

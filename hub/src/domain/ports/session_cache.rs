//! Port for caching the signed-in account between runs.
//!
//! Mirrors the browser's local-storage session cache: one slot, read on
//! start, written after sign-in, cleared on sign-out.

use std::sync::{Mutex, PoisonError};

use crate::domain::Account;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session cache adapters.
    pub enum SessionCacheError {
        /// The backing store could not be read or written.
        Io { message: String } => "session cache I/O failed: {message}",
        /// The stored entry could not be decoded.
        Corrupt { message: String } => "session cache entry is corrupt: {message}",
    }
}

/// Single-slot store for the signed-in account.
#[cfg_attr(test, mockall::automock)]
pub trait SessionCache: Send + Sync {
    /// Cached account, if any.
    fn load(&self) -> Result<Option<Account>, SessionCacheError>;

    /// Replace the cached account.
    fn store(&self, account: &Account) -> Result<(), SessionCacheError>;

    /// Drop the cached account. Clearing an empty cache succeeds.
    fn clear(&self) -> Result<(), SessionCacheError>;
}

/// Process-local cache, lost on exit.
#[derive(Debug, Default)]
pub struct InMemorySessionCache {
    slot: Mutex<Option<Account>>,
}

impl SessionCache for InMemorySessionCache {
    fn load(&self) -> Result<Option<Account>, SessionCacheError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, account: &Account) -> Result<(), SessionCacheError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(account.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionCacheError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

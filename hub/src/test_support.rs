//! Test utilities for the hub crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled with the `test-support` feature.

use std::collections::VecDeque;
use std::io;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::domain::Error;
use crate::domain::ports::SubmitHandler;

/// Submit handler that records every payload and answers from a script.
///
/// When the script runs dry the handler fails with an internal error, so a
/// test that submits more often than expected notices.
///
/// # Examples
/// ```
/// use hub::domain::Error;
/// use hub::test_support::RecordingHandler;
///
/// let handler: RecordingHandler<String, u32> = RecordingHandler::new([Ok(7)]);
/// assert_eq!(handler.calls(), 0);
/// ```
#[derive(Debug)]
pub struct RecordingHandler<P, O> {
    payloads: Mutex<Vec<P>>,
    script: Mutex<VecDeque<Result<O, Error>>>,
}

impl<P, O> RecordingHandler<P, O> {
    /// Answer successive calls with `script`, in order.
    pub fn new(script: impl IntoIterator<Item = Result<O, Error>>) -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// Number of times the handler was invoked.
    pub fn calls(&self) -> usize {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<P: Clone, O> RecordingHandler<P, O> {
    /// Payloads received so far, oldest first.
    pub fn payloads(&self) -> Vec<P> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl<P, O> SubmitHandler<P> for RecordingHandler<P, O>
where
    P: Clone + Send + Sync,
    O: Send,
{
    type Output = O;

    async fn handle(&self, payload: &P) -> Result<O, Error> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload.clone());
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(Error::internal("no scripted response left")))
    }
}

/// Fresh temporary directory for session cache tests.
///
/// # Errors
/// Returns the underlying I/O error when the directory cannot be created.
pub fn session_dir() -> io::Result<TempDir> {
    tempfile::Builder::new().prefix("hub-session-").tempdir()
}

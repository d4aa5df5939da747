//! Driving port invoked by a form once its payload has passed validation.
//!
//! The controller only needs success or failure back; whatever protocol the
//! handler speaks (HTTP call, storage write, mock delay) stays behind this
//! trait.

use async_trait::async_trait;

use crate::domain::Error;

/// External operation a form hands its validated payload to.
///
/// Implementations are generally not idempotent (account creation), which is
/// why the controller never has two calls outstanding at once.
#[async_trait]
pub trait SubmitHandler<P>: Send + Sync
where
    P: Send + Sync,
{
    /// Entity produced on success, e.g. the signed-in account.
    type Output: Send;

    /// Perform the operation.
    async fn handle(&self, payload: &P) -> Result<Self::Output, Error>;
}

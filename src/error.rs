//! Error types.

use thiserror::Error;

/// Errors from settling a [`Deferred`](crate::accept::Deferred) computation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum SettleError {
    /// The deferred computation was already resolved or rejected. Exactly
    /// one settlement is honored; later attempts have no effect.
    #[error("deferred computation has already settled")]
    AlreadySettled,
}

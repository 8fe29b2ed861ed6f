//! The accept protocol: bridging a deferred computation into a holder.
//!
//! `accept` has a synchronous half and an asynchronous half. The synchronous
//! half runs `loading()` before returning, so the caller observes the
//! idle→active mapping on the same tick. The asynchronous half runs when the
//! deferred computation settles: the settlement callback applies `success` or
//! `failure`, and the mutation plus the derivation recomputations it triggers
//! run as one uninterrupted unit.
//!
//! There is no cancellation. Accepting a second computation before the first
//! settles leaves both settlement callbacks live, and the LAST settlement to
//! arrive wins — a stale computation can overwrite a newer result. Callers
//! that need staleness protection must track a generation on their side.

use crate::error::SettleError;
use crate::holder::FutureValue;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

type SettleFn<T, E> = Box<dyn FnOnce(&Result<T, E>)>;

struct Inner<T, E> {
    outcome: Option<Result<T, E>>,
    waiters: Vec<SettleFn<T, E>>,
}

/// A single-settlement deferred computation.
///
/// The producing side calls [`resolve`](Self::resolve) or
/// [`reject`](Self::reject) exactly once; the consuming side registers
/// callbacks with [`on_settle`](Self::on_settle), each invoked at most once.
/// Handles are `Rc`-based clones of the same cell.
///
/// # Example
///
/// ```rust
/// use futurable::{Deferred, FutureState, FutureValue};
///
/// let value: FutureValue<u32, String> = FutureValue::new();
/// let deferred = Deferred::new();
///
/// value.accept(&deferred);
/// assert_eq!(value.state(), FutureState::Pending);
///
/// deferred.resolve(5).unwrap();
/// assert_eq!(value.state(), FutureState::Success);
/// assert_eq!(value.value(), Some(5));
/// ```
pub struct Deferred<T, E> {
    inner: Rc<RefCell<Inner<T, E>>>,
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Default for Deferred<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Deferred<T, E> {
    /// An unsettled deferred computation.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                outcome: None,
                waiters: Vec::new(),
            })),
        }
    }

    /// A deferred computation that has already resolved.
    pub fn resolved(value: T) -> Self {
        let deferred = Self::new();
        let _ = deferred.resolve(value);
        deferred
    }

    /// A deferred computation that has already rejected.
    pub fn rejected(error: E) -> Self {
        let deferred = Self::new();
        let _ = deferred.reject(error);
        deferred
    }

    /// True once the computation has settled either way.
    pub fn is_settled(&self) -> bool {
        self.inner.borrow().outcome.is_some()
    }

    /// The settlement outcome, if any, cloned.
    pub fn outcome(&self) -> Option<Result<T, E>> {
        self.inner.borrow().outcome.clone()
    }

    /// Settle with a success value. Fails with
    /// [`SettleError::AlreadySettled`] on a second settlement attempt, which
    /// has no effect.
    pub fn resolve(&self, value: T) -> Result<(), SettleError> {
        self.settle(Ok(value))
    }

    /// Settle with a failure value. Same single-settlement contract as
    /// [`resolve`](Self::resolve).
    pub fn reject(&self, error: E) -> Result<(), SettleError> {
        self.settle(Err(error))
    }

    /// Register a callback invoked exactly once with the outcome —
    /// immediately when the computation has already settled.
    pub fn on_settle(&self, callback: impl FnOnce(&Result<T, E>) + 'static) {
        let settled = self.inner.borrow().outcome.clone();
        match settled {
            Some(outcome) => callback(&outcome),
            None => self.inner.borrow_mut().waiters.push(Box::new(callback)),
        }
    }

    fn settle(&self, outcome: Result<T, E>) -> Result<(), SettleError> {
        let waiters = {
            let mut inner = self.inner.borrow_mut();
            if inner.outcome.is_some() {
                return Err(SettleError::AlreadySettled);
            }
            inner.outcome = Some(outcome.clone());
            std::mem::take(&mut inner.waiters)
        };
        for waiter in waiters {
            waiter(&outcome);
        }
        Ok(())
    }
}

impl<T: Clone + 'static, E: Clone + 'static> FutureValue<T, E> {
    /// Accept a deferred computation.
    ///
    /// Synchronously applies [`loading`](Self::loading) (a no-op when
    /// already active) and returns. When the computation settles, the holder
    /// transitions to `Success` or `Failure` with the settlement payload.
    ///
    /// Exactly one settlement per deferred is honored. Accepting again before
    /// a prior settlement does not cancel anything: both callbacks stay live
    /// and the last settlement wins.
    pub fn accept(&self, deferred: &Deferred<T, E>) {
        self.loading();
        let holder = self.clone();
        deferred.on_settle(move |outcome| match outcome {
            Ok(value) => holder.success(value.clone()),
            Err(error) => holder.failure(error.clone()),
        });
    }

    /// Accept a Rust future resolving to `Result<T, E>`.
    ///
    /// `loading()` is applied eagerly when this method is called, not when
    /// the returned future is first polled; awaiting the returned future
    /// drives the computation and applies the settlement.
    ///
    /// Holders are not `Send`, so drive this on a current-thread runtime or
    /// a `LocalSet`.
    pub fn accept_future<Fut>(&self, future: Fut) -> impl Future<Output = ()>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        self.loading();
        let holder = self.clone();
        async move {
            match future.await {
                Ok(value) => holder.success(value),
                Err(error) => holder.failure(error),
            }
        }
    }
}

//! Derived read-only views.
//!
//! A derivation is a holder whose (state, payload) is fully determined by one
//! source holder plus a set of per-availability transforms. It recomputes
//! synchronously inside the source's notification wave and then notifies its
//! own observers, so one source mutation produces one coherent propagation
//! wave with no torn reads.
//!
//! Transforms are fallible: they return `Result`, and an `Err` becomes the
//! derivation's failure payload instead of propagating. A derivation never
//! panics the wave on a transform error.

use crate::core::Snapshot;
use crate::holder::{FutureValue, Subscription};
use crate::FutureState;
use std::fmt;

/// Place a transform outcome on the right side of the state table, mirroring
/// the source's activity.
fn settle<U, F>(outcome: Result<U, F>, active: bool) -> Snapshot<U, F> {
    match (outcome, active) {
        (Ok(value), false) => Snapshot::Success(value),
        (Ok(value), true) => Snapshot::Reloading(value),
        (Err(error), false) => Snapshot::Failure(error),
        (Err(error), true) => Snapshot::Retrying(error),
    }
}

/// Per-availability transforms for [`FutureValue::derive`].
///
/// Axes that are not overridden pass the source payload through unchanged —
/// which is why [`new`](Self::new) asks for `T: Into<U>` and `E: Into<F>`.
/// When the derivation changes the payload types on both axes, start from
/// [`transforming`](Self::transforming) instead, which carries no conversion
/// bounds. A missing `pending` transform mirrors the "nothing yet" states
/// directly.
///
/// ```rust
/// use futurable::{DeriveOptions, FutureValue};
///
/// let source: FutureValue<u32, String> = FutureValue::succeeded(41);
/// let view = source.derive(
///     DeriveOptions::new()
///         .success(|v: &u32| Ok(v + 1))
///         .failure(|e: &String| Err(format!("wrapped: {e}"))),
/// );
/// assert_eq!(view.value(), Some(42));
/// ```
pub struct DeriveOptions<T, E, U, F> {
    on_success: Box<dyn Fn(&T) -> Result<U, F>>,
    on_failure: Box<dyn Fn(&E) -> Result<U, F>>,
    on_pending: Option<Box<dyn Fn() -> Result<U, F>>>,
}

impl<T, E, U, F> Default for DeriveOptions<T, E, U, F>
where
    T: Clone + Into<U> + 'static,
    E: Clone + Into<F> + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E, U, F> DeriveOptions<T, E, U, F> {
    /// Options where every axis passes through: values convert via
    /// `T: Into<U>`, errors via `E: Into<F>`, and the empty/pending states
    /// are mirrored.
    pub fn new() -> Self
    where
        T: Clone + Into<U> + 'static,
        E: Clone + Into<F> + 'static,
    {
        Self {
            on_success: Box::new(|value: &T| Ok(value.clone().into())),
            on_failure: Box::new(|error: &E| Err(error.clone().into())),
            on_pending: None,
        }
    }

    /// Options with both payload transforms supplied up front. No conversion
    /// bounds: use this when `U`/`F` are unrelated to `T`/`E`.
    pub fn transforming(
        success: impl Fn(&T) -> Result<U, F> + 'static,
        failure: impl Fn(&E) -> Result<U, F> + 'static,
    ) -> Self {
        Self {
            on_success: Box::new(success),
            on_failure: Box::new(failure),
            on_pending: None,
        }
    }

    /// Transform applied when the source carries a value. Its `Ok` becomes
    /// the derivation's success payload, its `Err` the failure payload.
    pub fn success(mut self, transform: impl Fn(&T) -> Result<U, F> + 'static) -> Self {
        self.on_success = Box::new(transform);
        self
    }

    /// Transform applied when the source carries an error. An `Ok` return
    /// recovers into a success payload.
    pub fn failure(mut self, transform: impl Fn(&E) -> Result<U, F> + 'static) -> Self {
        self.on_failure = Box::new(transform);
        self
    }

    /// Transform applied when the source carries nothing, producing a
    /// placeholder payload for the empty/pending states.
    pub fn pending(mut self, transform: impl Fn() -> Result<U, F> + 'static) -> Self {
        self.on_pending = Some(Box::new(transform));
        self
    }

    fn recompute(&self, snapshot: &Snapshot<T, E>) -> Snapshot<U, F> {
        let active = snapshot.is_loading();
        match snapshot {
            Snapshot::Success(value) | Snapshot::Reloading(value) => {
                settle((self.on_success)(value), active)
            }
            Snapshot::Failure(error) | Snapshot::Retrying(error) => {
                settle((self.on_failure)(error), active)
            }
            Snapshot::Empty | Snapshot::Pending => match &self.on_pending {
                Some(transform) => settle(transform(), active),
                None if active => Snapshot::Pending,
                None => Snapshot::Empty,
            },
        }
    }
}

/// A read-only holder kept in sync with a source [`FutureValue`].
///
/// Created by [`FutureValue::map`], [`FutureValue::rescue`], or
/// [`FutureValue::derive`]. The derivation holds only a weak relation to the
/// source: dropping the last clone of a `DerivedValue` unsubscribes it, and
/// derivation chains stay live as long as their tail is held.
pub struct DerivedValue<U, F> {
    value: FutureValue<U, F>,
    subscription: Subscription,
}

impl<U, F> Clone for DerivedValue<U, F> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscription: self.subscription.clone(),
        }
    }
}

impl<U: fmt::Debug, F: fmt::Debug> fmt::Debug for DerivedValue<U, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DerivedValue").field(&self.value).finish()
    }
}

impl<T: Clone + 'static, E: Clone + 'static> FutureValue<T, E> {
    /// Shared engine: compute the initial snapshot from the source, then
    /// republish on every source mutation.
    pub(crate) fn derive_raw<U, F>(
        &self,
        recompute: impl Fn(&Snapshot<T, E>) -> Snapshot<U, F> + 'static,
    ) -> DerivedValue<U, F>
    where
        U: Clone + 'static,
        F: Clone + 'static,
    {
        let derived = FutureValue::from_snapshot(recompute(&self.snapshot()));
        let target = derived.clone();
        let subscription = self.subscribe(move |_, new| {
            target.publish(recompute(new));
        });
        DerivedValue {
            value: derived,
            subscription,
        }
    }

    /// A read-only view transforming the success payload.
    ///
    /// Failures pass through unchanged; activity is mirrored from the
    /// source. An `Err` from the transform becomes the view's failure
    /// payload.
    ///
    /// ```rust
    /// use futurable::FutureValue;
    ///
    /// let source: FutureValue<u32, String> = FutureValue::succeeded(3);
    /// let plus_one = source.map(|v| Ok(v + 1));
    /// assert_eq!(plus_one.value(), Some(4));
    ///
    /// source.failure("boom".to_string());
    /// assert_eq!(plus_one.error(), Some("boom".to_string()));
    /// ```
    pub fn map<U: Clone + 'static>(
        &self,
        transform: impl Fn(&T) -> Result<U, E> + 'static,
    ) -> DerivedValue<U, E> {
        self.derive_raw(move |snapshot| {
            let active = snapshot.is_loading();
            match snapshot {
                Snapshot::Success(value) | Snapshot::Reloading(value) => {
                    settle(transform(value), active)
                }
                Snapshot::Failure(error) | Snapshot::Retrying(error) => {
                    settle(Err(error.clone()), active)
                }
                Snapshot::Empty => Snapshot::Empty,
                Snapshot::Pending => Snapshot::Pending,
            }
        })
    }

    /// A read-only view transforming the failure payload.
    ///
    /// Success values pass through unchanged. An `Ok` return recovers the
    /// view into success; an `Err` replaces the failure payload.
    pub fn rescue(
        &self,
        transform: impl Fn(&E) -> Result<T, E> + 'static,
    ) -> DerivedValue<T, E> {
        self.derive_raw(move |snapshot| {
            let active = snapshot.is_loading();
            match snapshot {
                Snapshot::Success(value) | Snapshot::Reloading(value) => {
                    settle(Ok(value.clone()), active)
                }
                Snapshot::Failure(error) | Snapshot::Retrying(error) => {
                    settle(transform(error), active)
                }
                Snapshot::Empty => Snapshot::Empty,
                Snapshot::Pending => Snapshot::Pending,
            }
        })
    }

    /// A read-only view applying one transform per availability axis.
    ///
    /// See [`DeriveOptions`] for the recomputation rule.
    pub fn derive<U, F>(&self, options: DeriveOptions<T, E, U, F>) -> DerivedValue<U, F>
    where
        U: Clone + 'static,
        F: Clone + 'static,
    {
        self.derive_raw(move |snapshot| options.recompute(snapshot))
    }
}

impl<U: Clone + 'static, F: Clone + 'static> DerivedValue<U, F> {
    /// The current (state, payload) pair.
    pub fn snapshot(&self) -> Snapshot<U, F> {
        self.value.snapshot()
    }

    /// The current state label.
    pub fn state(&self) -> FutureState {
        self.value.state()
    }

    /// True when a success value is available (success or reloading).
    pub fn is_success(&self) -> bool {
        self.value.is_success()
    }

    /// True when a failure value is available (failure or retrying).
    pub fn is_failure(&self) -> bool {
        self.value.is_failure()
    }

    /// True when no settled value should be shown (empty or loading).
    pub fn is_pending(&self) -> bool {
        self.value.is_pending()
    }

    /// True exactly when an operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.value.is_loading()
    }

    /// The success payload, cloned, regardless of activity.
    pub fn value(&self) -> Option<U> {
        self.value.value()
    }

    /// The failure payload, cloned, regardless of activity.
    pub fn error(&self) -> Option<F> {
        self.value.error()
    }

    /// The success payload, or `fallback` when none is available.
    pub fn success_or(&self, fallback: U) -> U {
        self.value.success_or(fallback)
    }

    /// The success payload, or a lazily computed fallback.
    pub fn success_or_else(&self, fallback: impl FnOnce() -> U) -> U {
        self.value.success_or_else(fallback)
    }

    /// The failure payload, or `fallback` when none is available.
    pub fn failure_or(&self, fallback: F) -> F {
        self.value.failure_or(fallback)
    }

    /// The failure payload, or a lazily computed fallback.
    pub fn failure_or_else(&self, fallback: impl FnOnce() -> F) -> F {
        self.value.failure_or_else(fallback)
    }

    /// Dispatch exactly one of three handlers by availability, passing the
    /// activity flag.
    pub fn match_with<R>(
        &self,
        on_value: impl FnOnce(&U, bool) -> R,
        on_error: impl FnOnce(&F, bool) -> R,
        on_none: impl FnOnce(bool) -> R,
    ) -> R {
        self.value.match_with(on_value, on_error, on_none)
    }

    /// Observe this view's own mutations. Same contract as
    /// [`FutureValue::subscribe`].
    pub fn subscribe(
        &self,
        observer: impl Fn(&Snapshot<U, F>, &Snapshot<U, F>) + 'static,
    ) -> Subscription {
        self.value.subscribe(observer)
    }

    /// Hook fired whenever the view becomes `Success`.
    pub fn on_success(&self, hook: impl Fn(&U) + 'static) -> Subscription {
        self.value.on_success(hook)
    }

    /// Hook fired whenever the view becomes `Failure`.
    pub fn on_failure(&self, hook: impl Fn(&F) + 'static) -> Subscription {
        self.value.on_failure(hook)
    }

    /// Hook fired exactly once per idle→active transition.
    pub fn on_loading(&self, hook: impl Fn() + 'static) -> Subscription {
        self.value.on_loading(hook)
    }

    /// Chain a further success transform off this view.
    pub fn map<V: Clone + 'static>(
        &self,
        transform: impl Fn(&U) -> Result<V, F> + 'static,
    ) -> DerivedValue<V, F> {
        let derived = self.value.map(transform);
        DerivedValue {
            subscription: derived.subscription.with_upstream(self.subscription.clone()),
            value: derived.value,
        }
    }

    /// Chain a further failure transform off this view.
    pub fn rescue(
        &self,
        transform: impl Fn(&F) -> Result<U, F> + 'static,
    ) -> DerivedValue<U, F> {
        let derived = self.value.rescue(transform);
        DerivedValue {
            subscription: derived.subscription.with_upstream(self.subscription.clone()),
            value: derived.value,
        }
    }

    /// Chain a full per-axis derivation off this view.
    pub fn derive<V, G>(&self, options: DeriveOptions<U, F, V, G>) -> DerivedValue<V, G>
    where
        V: Clone + 'static,
        G: Clone + 'static,
    {
        let derived = self.value.derive(options);
        DerivedValue {
            subscription: derived.subscription.with_upstream(self.subscription.clone()),
            value: derived.value,
        }
    }
}

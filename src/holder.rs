//! The mutable future-like value.
//!
//! [`FutureValue`] is a shared handle to one [`Snapshot`] plus a list of
//! observers. Every action computes the full new snapshot first, swaps it in,
//! and only then notifies observers with the (old, new) pair — observers can
//! never see a half-updated holder.
//!
//! The holder follows a single-threaded cooperative model: all mutations and
//! the notification waves they trigger run synchronously on the calling
//! thread. Handles are `Rc`-based and cheap to clone; clones share the same
//! underlying state.

use crate::core::{FutureState, Snapshot};
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

type ObserverFn<T, E> = Box<dyn Fn(&Snapshot<T, E>, &Snapshot<T, E>)>;

struct Inner<T, E> {
    snapshot: Snapshot<T, E>,
    observers: Vec<Weak<ObserverFn<T, E>>>,
}

/// Keeps an observer registered for as long as it is held.
///
/// The holder keeps only a weak reference to each observer; dropping the last
/// clone of a `Subscription` unsubscribes it. Derived views hold their source
/// subscription internally, so a derivation chain stays live as long as its
/// tail is referenced.
#[derive(Clone)]
pub struct Subscription {
    _observer: Rc<dyn Any>,
    _upstream: Vec<Subscription>,
}

impl Subscription {
    pub(crate) fn new(observer: Rc<dyn Any>) -> Self {
        Self {
            _observer: observer,
            _upstream: Vec::new(),
        }
    }

    /// Tie another subscription's lifetime to this one.
    pub(crate) fn with_upstream(mut self, upstream: Subscription) -> Self {
        self._upstream.push(upstream);
        self
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// A reactive holder for the result of an asynchronous operation.
///
/// The holder is always in exactly one of the six [`FutureState`]s and owns
/// the matching payload: a success value `T`, a failure value `E`, or nothing.
/// Consumers either poll it through the query methods or register observers
/// that are notified synchronously on every effective mutation.
///
/// # Example
///
/// ```rust
/// use futurable::{FutureState, FutureValue};
///
/// let value: FutureValue<u32, String> = FutureValue::new();
/// assert_eq!(value.state(), FutureState::Empty);
///
/// value.loading();
/// assert_eq!(value.state(), FutureState::Pending);
///
/// value.success(3);
/// assert_eq!(value.state(), FutureState::Success);
/// assert_eq!(value.value(), Some(3));
///
/// // A reload keeps the previous value available.
/// value.loading();
/// assert_eq!(value.state(), FutureState::Reloading);
/// assert_eq!(value.success_or(0), 3);
/// ```
pub struct FutureValue<T, E> {
    inner: Rc<RefCell<Inner<T, E>>>,
}

impl<T, E> Clone for FutureValue<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for FutureValue<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FutureValue")
            .field(&self.inner.borrow().snapshot)
            .finish()
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Default for FutureValue<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static, E: Clone + 'static> FutureValue<T, E> {
    /// A holder in the `Empty` state.
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::Empty)
    }

    /// A holder already settled in the `Success` state.
    pub fn succeeded(value: T) -> Self {
        Self::from_snapshot(Snapshot::Success(value))
    }

    /// A holder already settled in the `Failure` state.
    pub fn failed(error: E) -> Self {
        Self::from_snapshot(Snapshot::Failure(error))
    }

    pub(crate) fn from_snapshot(snapshot: Snapshot<T, E>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                snapshot,
                observers: Vec::new(),
            })),
        }
    }

    /// The current (state, payload) pair.
    pub fn snapshot(&self) -> Snapshot<T, E> {
        self.inner.borrow().snapshot.clone()
    }

    /// The current state label.
    pub fn state(&self) -> FutureState {
        self.inner.borrow().snapshot.state()
    }

    /// True when a success value is available (success or reloading).
    pub fn is_success(&self) -> bool {
        self.state().is_success()
    }

    /// True when a failure value is available (failure or retrying).
    pub fn is_failure(&self) -> bool {
        self.state().is_failure()
    }

    /// True when no settled value should be shown (empty or loading).
    pub fn is_pending(&self) -> bool {
        self.state().is_pending()
    }

    /// True exactly when an operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    /// The success payload, cloned, regardless of activity.
    pub fn value(&self) -> Option<T> {
        self.inner.borrow().snapshot.value().cloned()
    }

    /// The failure payload, cloned, regardless of activity.
    pub fn error(&self) -> Option<E> {
        self.inner.borrow().snapshot.error().cloned()
    }

    /// The success payload, or `fallback` when none is available.
    pub fn success_or(&self, fallback: T) -> T {
        self.success_or_else(|| fallback)
    }

    /// The success payload, or a lazily computed fallback.
    pub fn success_or_else(&self, fallback: impl FnOnce() -> T) -> T {
        self.value().unwrap_or_else(fallback)
    }

    /// The failure payload, or `fallback` when none is available.
    pub fn failure_or(&self, fallback: E) -> E {
        self.failure_or_else(|| fallback)
    }

    /// The failure payload, or a lazily computed fallback.
    pub fn failure_or_else(&self, fallback: impl FnOnce() -> E) -> E {
        self.error().unwrap_or_else(fallback)
    }

    /// Dispatch exactly one of three handlers by availability, passing the
    /// activity flag. See [`Snapshot::match_with`].
    pub fn match_with<R>(
        &self,
        on_value: impl FnOnce(&T, bool) -> R,
        on_error: impl FnOnce(&E, bool) -> R,
        on_none: impl FnOnce(bool) -> R,
    ) -> R {
        self.snapshot().match_with(on_value, on_error, on_none)
    }

    /// Force the `Success` state with the given value.
    ///
    /// Always notifies observers, even when the holder was already in
    /// `Success`.
    pub fn success(&self, value: T) {
        self.publish(Snapshot::Success(value));
    }

    /// Force the `Failure` state with the given error.
    pub fn failure(&self, error: E) {
        self.publish(Snapshot::Failure(error));
    }

    /// Begin loading: `Empty`→`Pending`, `Success`→`Reloading`,
    /// `Failure`→`Retrying`, preserving the current payload.
    ///
    /// Idempotent: when the holder is already active this is a no-op and
    /// observers are not notified again.
    pub fn loading(&self) {
        let next = {
            let inner = self.inner.borrow();
            if inner.snapshot.is_loading() {
                return;
            }
            inner.snapshot.clone().activate()
        };
        self.publish(next);
    }

    /// Alias for [`loading`](Self::loading), kept for symmetry with the
    /// state names. Same code path, identical behavior.
    pub fn pending(&self) {
        self.loading();
    }

    /// Register an observer called synchronously with the (old, new)
    /// snapshot pair on every effective mutation.
    ///
    /// The returned [`Subscription`] keeps the observer alive; dropping it
    /// unsubscribes.
    pub fn subscribe(
        &self,
        observer: impl Fn(&Snapshot<T, E>, &Snapshot<T, E>) + 'static,
    ) -> Subscription {
        let observer: Rc<ObserverFn<T, E>> = Rc::new(Box::new(observer));
        self.inner.borrow_mut().observers.push(Rc::downgrade(&observer));
        Subscription::new(observer)
    }

    /// Hook fired whenever the holder becomes `Success`.
    pub fn on_success(&self, hook: impl Fn(&T) + 'static) -> Subscription {
        self.subscribe(move |_, new| {
            if let Snapshot::Success(value) = new {
                hook(value);
            }
        })
    }

    /// Hook fired whenever the holder becomes `Failure`.
    pub fn on_failure(&self, hook: impl Fn(&E) + 'static) -> Subscription {
        self.subscribe(move |_, new| {
            if let Snapshot::Failure(error) = new {
                hook(error);
            }
        })
    }

    /// Hook fired exactly once per idle→active transition.
    pub fn on_loading(&self, hook: impl Fn() + 'static) -> Subscription {
        self.subscribe(move |old, new| {
            if !old.is_loading() && new.is_loading() {
                hook();
            }
        })
    }

    /// Swap in the new snapshot and run one notification wave.
    ///
    /// The observer list is pruned and copied out before any observer runs,
    /// so observers may subscribe or unsubscribe reentrantly.
    pub(crate) fn publish(&self, next: Snapshot<T, E>) {
        let (old, observers) = {
            let mut inner = self.inner.borrow_mut();
            let old = std::mem::replace(&mut inner.snapshot, next.clone());
            inner.observers.retain(|weak| weak.strong_count() > 0);
            let observers: Vec<Rc<ObserverFn<T, E>>> =
                inner.observers.iter().filter_map(Weak::upgrade).collect();
            (old, observers)
        };

        trace!(
            from = %old.state(),
            to = %next.state(),
            observers = observers.len(),
            "state transition"
        );

        for observer in observers {
            (*observer)(&old, &next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    type Value = FutureValue<u32, String>;

    #[test]
    fn new_holder_is_empty() {
        let value = Value::new();
        assert_eq!(value.state(), FutureState::Empty);
        assert_eq!(value.value(), None);
        assert_eq!(value.error(), None);
    }

    #[test]
    fn success_sets_state_and_payload() {
        let value = Value::new();
        value.success(3);
        assert_eq!(value.state(), FutureState::Success);
        assert_eq!(value.value(), Some(3));
    }

    #[test]
    fn failure_sets_state_and_payload() {
        let value = Value::new();
        value.failure("boom".to_string());
        assert_eq!(value.state(), FutureState::Failure);
        assert_eq!(value.error(), Some("boom".to_string()));
    }

    #[test]
    fn loading_preserves_availability() {
        let value = Value::new();
        value.loading();
        assert_eq!(value.state(), FutureState::Pending);

        value.success(7);
        value.loading();
        assert_eq!(value.state(), FutureState::Reloading);
        assert_eq!(value.value(), Some(7));

        value.failure("e".to_string());
        value.loading();
        assert_eq!(value.state(), FutureState::Retrying);
        assert_eq!(value.error(), Some("e".to_string()));
    }

    #[test]
    fn loading_is_idempotent_and_notifies_once() {
        let value = Value::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let _sub = value.on_loading(move || counter.set(counter.get() + 1));

        value.loading();
        value.loading();
        value.pending();

        assert_eq!(value.state(), FutureState::Pending);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn pending_is_an_alias_for_loading() {
        let value = Value::succeeded(4);
        value.pending();
        assert_eq!(value.state(), FutureState::Reloading);
        assert_eq!(value.value(), Some(4));
    }

    #[test]
    fn success_hook_fires_exactly_once_per_action() {
        let value = Value::new();
        let successes = Rc::new(Cell::new(0));
        let failures = Rc::new(Cell::new(0));

        let s = Rc::clone(&successes);
        let _on_success = value.on_success(move |_| s.set(s.get() + 1));
        let f = Rc::clone(&failures);
        let _on_failure = value.on_failure(move |_| f.set(f.get() + 1));

        value.success(1);
        assert_eq!(successes.get(), 1);
        assert_eq!(failures.get(), 0);

        value.success(2);
        assert_eq!(successes.get(), 2);
        assert_eq!(failures.get(), 0);
    }

    #[test]
    fn fallback_accessors_follow_availability() {
        let value = Value::new();
        assert_eq!(value.success_or(9), 9);
        assert_eq!(value.failure_or("none".to_string()), "none");

        value.success(3);
        assert_eq!(value.success_or(9), 3);
        // A reload keeps the payload reachable.
        value.loading();
        assert_eq!(value.success_or(9), 3);
        assert_eq!(value.failure_or("none".to_string()), "none");

        value.failure("e".to_string());
        assert_eq!(value.success_or(9), 9);
        assert_eq!(value.failure_or("none".to_string()), "e");
        value.loading();
        assert_eq!(value.failure_or("none".to_string()), "e");
    }

    #[test]
    fn lazy_fallback_is_not_evaluated_when_payload_present() {
        let value = Value::succeeded(5);
        let evaluated = Rc::new(Cell::new(false));
        let flag = Rc::clone(&evaluated);
        let got = value.success_or_else(move || {
            flag.set(true);
            0
        });
        assert_eq!(got, 5);
        assert!(!evaluated.get());
    }

    #[test]
    fn match_with_passes_activity_flag() {
        let value = Value::succeeded(3);
        assert_eq!(
            value.match_with(|v, active| (*v, active), |_, _| (0, false), |_| (0, false)),
            (3, false)
        );
        value.loading();
        assert_eq!(
            value.match_with(|v, active| (*v, active), |_, _| (0, false), |_| (0, false)),
            (3, true)
        );
    }

    #[test]
    fn observers_see_consistent_old_new_pairs() {
        let value = Value::succeeded(1);
        let seen: Rc<RefCell<Vec<(FutureState, FutureState)>>> =
            Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let _sub = value.subscribe(move |old, new| {
            log.borrow_mut().push((old.state(), new.state()));
        });

        value.loading();
        value.failure("e".to_string());

        assert_eq!(
            *seen.borrow(),
            vec![
                (FutureState::Success, FutureState::Reloading),
                (FutureState::Reloading, FutureState::Failure),
            ]
        );
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let value = Value::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let sub = value.subscribe(move |_, _| counter.set(counter.get() + 1));

        value.success(1);
        assert_eq!(fired.get(), 1);

        drop(sub);
        value.success(2);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn clones_share_the_same_state() {
        let value = Value::new();
        let other = value.clone();
        other.success(8);
        assert_eq!(value.value(), Some(8));
    }

    #[test]
    fn observer_may_mutate_the_holder_reentrantly() {
        let value = Value::new();
        let inner = value.clone();
        // Converts any failure into a fallback success, from inside the wave.
        let _sub = value.subscribe(move |_, new| {
            if new.state() == FutureState::Failure {
                inner.success(0);
            }
        });

        value.failure("e".to_string());
        assert_eq!(value.state(), FutureState::Success);
        assert_eq!(value.value(), Some(0));
    }
}

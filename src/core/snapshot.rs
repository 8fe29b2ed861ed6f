//! Fused (state, payload) snapshots.
//!
//! A snapshot is the unit of observation: every mutation of a holder produces
//! a new snapshot, and observers are handed the old and new snapshots as one
//! coherent pair. Fusing state and payload into a single tagged variant makes
//! the "payload kind matches availability" invariant unrepresentable: there
//! is no way to build a `Pending` snapshot that carries a value, or a
//! `Success` snapshot that carries an error.

use super::state::FutureState;
use serde::{Deserialize, Serialize};

/// One consistent (state, payload) pair for a future-like value.
///
/// `T` is the success payload, `E` the failure payload. The variant encodes
/// both axes of [`FutureState`]: the active variants (`Pending`, `Reloading`,
/// `Retrying`) carry the same payload shape as their idle counterparts.
///
/// # Example
///
/// ```rust
/// use futurable::core::{FutureState, Snapshot};
///
/// let snap: Snapshot<u32, String> = Snapshot::Success(3);
/// assert_eq!(snap.state(), FutureState::Success);
///
/// // Going active preserves the payload by move.
/// let reloading = snap.activate();
/// assert_eq!(reloading, Snapshot::Reloading(3));
/// assert_eq!(reloading.value(), Some(&3));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "state", content = "payload", rename_all = "snake_case")]
pub enum Snapshot<T, E> {
    /// Nothing has happened yet.
    Empty,
    /// Loading with no previous result.
    Pending,
    /// A value is available.
    Success(T),
    /// Loading while the previous value is still available.
    Reloading(T),
    /// An error is available.
    Failure(E),
    /// Loading while the previous error is still available.
    Retrying(E),
}

impl<T, E> Snapshot<T, E> {
    /// The payload-less label for this snapshot.
    pub fn state(&self) -> FutureState {
        match self {
            Self::Empty => FutureState::Empty,
            Self::Pending => FutureState::Pending,
            Self::Success(_) => FutureState::Success,
            Self::Reloading(_) => FutureState::Reloading,
            Self::Failure(_) => FutureState::Failure,
            Self::Retrying(_) => FutureState::Retrying,
        }
    }

    /// True when a success value is available (success or reloading).
    pub fn is_success(&self) -> bool {
        self.state().is_success()
    }

    /// True when a failure value is available (failure or retrying).
    pub fn is_failure(&self) -> bool {
        self.state().is_failure()
    }

    /// True when no settled value should be shown (empty or active).
    pub fn is_pending(&self) -> bool {
        self.state().is_pending()
    }

    /// True exactly when an operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    /// The success payload, regardless of activity.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(v) | Self::Reloading(v) => Some(v),
            _ => None,
        }
    }

    /// The failure payload, regardless of activity.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failure(e) | Self::Retrying(e) => Some(e),
            _ => None,
        }
    }

    /// The idle→active transition, preserving the payload by move. Active
    /// snapshots are returned unchanged.
    pub fn activate(self) -> Self {
        match self {
            Self::Empty => Self::Pending,
            Self::Success(v) => Self::Reloading(v),
            Self::Failure(e) => Self::Retrying(e),
            active => active,
        }
    }

    /// Dispatch exactly one of three handlers by availability.
    ///
    /// The boolean passed to each handler is the activity flag, so callers
    /// can distinguish e.g. `Success` (value, `false`) from `Reloading`
    /// (value, `true`).
    ///
    /// ```rust
    /// use futurable::core::Snapshot;
    ///
    /// let snap: Snapshot<u32, String> = Snapshot::Reloading(3);
    /// let text = snap.match_with(
    ///     |v, active| format!("value {v} (loading: {active})"),
    ///     |e, _| format!("error {e}"),
    ///     |_| "nothing yet".to_string(),
    /// );
    /// assert_eq!(text, "value 3 (loading: true)");
    /// ```
    pub fn match_with<R>(
        &self,
        on_value: impl FnOnce(&T, bool) -> R,
        on_error: impl FnOnce(&E, bool) -> R,
        on_none: impl FnOnce(bool) -> R,
    ) -> R {
        let active = self.is_loading();
        match self {
            Self::Success(v) | Self::Reloading(v) => on_value(v, active),
            Self::Failure(e) | Self::Retrying(e) => on_error(e, active),
            Self::Empty | Self::Pending => on_none(active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Snap = Snapshot<u32, String>;

    fn err(msg: &str) -> String {
        msg.to_string()
    }

    #[test]
    fn state_label_matches_variant() {
        assert_eq!(Snap::Empty.state(), FutureState::Empty);
        assert_eq!(Snap::Pending.state(), FutureState::Pending);
        assert_eq!(Snap::Success(1).state(), FutureState::Success);
        assert_eq!(Snap::Reloading(1).state(), FutureState::Reloading);
        assert_eq!(Snap::Failure(err("x")).state(), FutureState::Failure);
        assert_eq!(Snap::Retrying(err("x")).state(), FutureState::Retrying);
    }

    #[test]
    fn activate_preserves_payload() {
        assert_eq!(Snap::Empty.activate(), Snap::Pending);
        assert_eq!(Snap::Success(7).activate(), Snap::Reloading(7));
        assert_eq!(Snap::Failure(err("e")).activate(), Snap::Retrying(err("e")));
        // Active snapshots are left alone.
        assert_eq!(Snap::Reloading(7).activate(), Snap::Reloading(7));
    }

    #[test]
    fn payload_accessors_ignore_activity() {
        assert_eq!(Snap::Success(3).value(), Some(&3));
        assert_eq!(Snap::Reloading(3).value(), Some(&3));
        assert_eq!(Snap::Pending.value(), None);
        assert_eq!(Snap::Failure(err("e")).value(), None);

        assert_eq!(Snap::Failure(err("e")).error(), Some(&err("e")));
        assert_eq!(Snap::Retrying(err("e")).error(), Some(&err("e")));
        assert_eq!(Snap::Success(3).error(), None);
    }

    #[test]
    fn match_with_dispatches_exactly_one_handler() {
        let cases: Vec<(Snap, &str)> = vec![
            (Snap::Empty, "none:false"),
            (Snap::Pending, "none:true"),
            (Snap::Success(1), "value:false"),
            (Snap::Reloading(1), "value:true"),
            (Snap::Failure(err("e")), "error:false"),
            (Snap::Retrying(err("e")), "error:true"),
        ];

        for (snap, expected) in cases {
            let got = snap.match_with(
                |_, active| format!("value:{active}"),
                |_, active| format!("error:{active}"),
                |active| format!("none:{active}"),
            );
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn snapshot_serializes_with_payload() {
        let snap = Snap::Reloading(42);
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(json, r#"{"state":"reloading","payload":42}"#);
        let back: Snap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn payloadless_snapshot_serializes_without_payload() {
        let json = serde_json::to_string(&Snap::Pending).unwrap();
        assert_eq!(json, r#"{"state":"pending"}"#);
        let back: Snap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Snap::Pending);
    }
}

//! The closed set of lifecycle states.
//!
//! A future-like value is always in exactly one of six states, formed by two
//! orthogonal axes: *availability* (is there a value, an error, or nothing?)
//! and *activity* (is an operation currently in flight?).

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

/// What kind of payload the holder currently carries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Availability {
    /// No payload yet (empty/pending).
    None,
    /// A success value (success/reloading).
    Value,
    /// A failure value (failure/retrying).
    Error,
}

/// Whether an operation is currently in flight.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Activity {
    /// Settled; no operation in flight.
    Idle,
    /// An operation is in flight (pending/reloading/retrying).
    Active,
}

/// Label for the six lifecycle states of a future-like value.
///
/// The three "active" labels are the loading counterparts of the three idle
/// ones, carrying forward the previous availability:
///
/// | label       | availability | activity |
/// |-------------|--------------|----------|
/// | `Empty`     | None         | Idle     |
/// | `Pending`   | None         | Active   |
/// | `Success`   | Value        | Idle     |
/// | `Reloading` | Value        | Active   |
/// | `Failure`   | Error        | Idle     |
/// | `Retrying`  | Error        | Active   |
///
/// The set is closed: exhaustiveness is enforced by the compiler, and
/// `strum::IntoEnumIterator` provides a fixed iteration order over all six
/// labels.
///
/// # Example
///
/// ```rust
/// use futurable::core::FutureState;
/// use strum::IntoEnumIterator;
///
/// assert_eq!(FutureState::iter().count(), 6);
/// assert!(FutureState::Reloading.is_success());
/// assert!(FutureState::Reloading.is_loading());
/// assert_eq!(FutureState::Success.activate(), FutureState::Reloading);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum FutureState {
    /// Nothing has happened yet.
    Empty,
    /// Loading with no previous result.
    Pending,
    /// A value is available.
    Success,
    /// Loading while a previous value is still available.
    Reloading,
    /// An error is available.
    Failure,
    /// Loading while a previous error is still available.
    Retrying,
}

impl FutureState {
    /// The state's name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Reloading => "reloading",
            Self::Failure => "failure",
            Self::Retrying => "retrying",
        }
    }

    /// The availability axis of this state.
    pub fn availability(&self) -> Availability {
        match self {
            Self::Empty | Self::Pending => Availability::None,
            Self::Success | Self::Reloading => Availability::Value,
            Self::Failure | Self::Retrying => Availability::Error,
        }
    }

    /// The activity axis of this state.
    pub fn activity(&self) -> Activity {
        match self {
            Self::Empty | Self::Success | Self::Failure => Activity::Idle,
            Self::Pending | Self::Reloading | Self::Retrying => Activity::Active,
        }
    }

    /// True when a success value is available (success or reloading).
    pub fn is_success(&self) -> bool {
        self.availability() == Availability::Value
    }

    /// True when a failure value is available (failure or retrying).
    pub fn is_failure(&self) -> bool {
        self.availability() == Availability::Error
    }

    /// True when no settled value should be shown: empty, or any active
    /// state. Note that `empty` counts as pending for this query even though
    /// nothing is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Empty) || self.is_loading()
    }

    /// True exactly when an operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.activity() == Activity::Active
    }

    /// The idle→active mapping: `Empty`→`Pending`, `Success`→`Reloading`,
    /// `Failure`→`Retrying`. Active states map to themselves.
    pub fn activate(self) -> Self {
        match self {
            Self::Empty => Self::Pending,
            Self::Success => Self::Reloading,
            Self::Failure => Self::Retrying,
            active => active,
        }
    }
}

impl fmt::Display for FutureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Core state types for future-like values.
//!
//! This module holds the pure part of the crate: the closed six-state
//! lifecycle and the fused (state, payload) snapshot. Everything here is a
//! plain value with no interior mutability; the reactive machinery lives in
//! the [`holder`](crate::holder) and [`derive`](crate::derive) modules.

pub mod snapshot;
pub mod state;

pub use snapshot::Snapshot;
pub use state::{Activity, Availability, FutureState};

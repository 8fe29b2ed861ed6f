//! Futurable: a reactive, observable holder for asynchronous results
//!
//! A [`FutureValue`] tracks the lifecycle of one asynchronous operation's
//! result as a single observable value in exactly one of six states: `empty`,
//! `pending`, `success`, `reloading`, `failure`, `retrying`. Consumers react
//! declaratively to state changes instead of juggling `is_loading` booleans.
//!
//! # Core Concepts
//!
//! - **State machine**: the closed six-state lifecycle ([`FutureState`]),
//!   with `loading()` carrying the previous result forward into the
//!   `reloading`/`retrying` sub-states
//! - **Accept protocol**: hand the holder a [`Deferred`] computation; it goes
//!   active immediately and settles to success or failure later
//! - **Derived views**: [`DerivedValue`]s recompute synchronously from their
//!   source, converting transform errors into failure states
//!
//! # Example
//!
//! ```rust
//! use futurable::{Deferred, FutureState, FutureValue};
//!
//! let user: FutureValue<String, String> = FutureValue::new();
//! let greeting = user.map(|name| Ok(format!("hello, {name}")));
//!
//! let request = Deferred::new();
//! user.accept(&request);
//! assert_eq!(user.state(), FutureState::Pending);
//! assert!(greeting.is_pending());
//!
//! request.resolve("ada".to_string()).unwrap();
//! assert_eq!(greeting.value(), Some("hello, ada".to_string()));
//!
//! // Reloading keeps the previous value on display.
//! user.accept(&Deferred::new());
//! assert_eq!(user.state(), FutureState::Reloading);
//! assert_eq!(greeting.success_or("...".to_string()), "hello, ada");
//! ```

pub mod accept;
pub mod core;
pub mod derive;
pub mod error;
pub mod holder;

// Re-export commonly used types
pub use accept::Deferred;
pub use core::{Activity, Availability, FutureState, Snapshot};
pub use derive::{DeriveOptions, DerivedValue};
pub use error::SettleError;
pub use holder::{FutureValue, Subscription};

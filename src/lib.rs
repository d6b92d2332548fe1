//! # Runnel
//!
//! Typed outcome and optional containers for code where failure is an
//! ordinary value.
//!
//! - [`Outcome<T, E>`](Outcome): `Success(T)` or `Failure(E)`.
//! - [`Optional<T>`](Optional): `Present(T)` or `Absent`.
//! - [`propagate`](propagate::propagate): write multi-step procedures as
//!   straight-line code; the first failed step ends the procedure.
//! - [`all`] / [`partition`]: combine many outcomes.
//! - [`bridge`]: turn panics and failed futures into outcomes, and retry
//!   async attempts with linear or exponential backoff.
//!
//! ## Quick Example
//!
//! ```rust
//! use runnel::propagate::{propagate, Scope};
//! use runnel::{Optional, Outcome};
//!
//! #[derive(Debug, PartialEq)]
//! enum SignupError {
//!     MissingName,
//!     TooYoung(u32),
//! }
//!
//! fn adult(age: u32) -> Outcome<u32, SignupError> {
//!     if age >= 18 {
//!         Outcome::success(age)
//!     } else {
//!         Outcome::failure(SignupError::TooYoung(age))
//!     }
//! }
//!
//! let signup = propagate(
//!     |scope: &mut Scope<SignupError>, (name, age): (Option<String>, u32)| {
//!         let name = scope.bind_optional(Optional::from(name), || SignupError::MissingName)?;
//!         let age = scope.bind(adult(age))?;
//!         Ok(Outcome::success(format!("{} ({})", name, age)))
//!     },
//! );
//!
//! assert_eq!(signup((Some("ada".into()), 36)), Outcome::Success("ada (36)".into()));
//! assert_eq!(signup((None, 36)), Outcome::Failure(SignupError::MissingName));
//! assert_eq!(signup((Some("tim".into()), 12)), Outcome::Failure(SignupError::TooYoung(12)));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(feature = "try_trait", feature(try_trait_v2))]

pub mod aggregate;
pub mod bridge;
pub mod either;
pub mod error;
pub mod optional;
pub mod outcome;
pub mod propagate;
pub mod retry;
pub mod testing;

#[cfg(feature = "try_trait")]
mod try_trait;

// Re-exports
pub use aggregate::{all, partition, traverse};
pub use bridge::{catch_unwind_future, from_future, from_throwable};
#[cfg(feature = "async")]
pub use bridge::{try_async, TryAsync};
pub use either::Either;
pub use error::{Fault, UnwrapError};
pub use optional::{absent, from_nullable, present, Nullable, Optional};
pub use outcome::{failure, success, Outcome};
pub use propagate::{propagate, run, Flow, Halt, Scope};
pub use retry::{Backoff, JitterStrategy, RetryEvent, RetryPolicy};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregate::{all, partition, traverse};
    pub use crate::bridge::{catch_unwind_future, from_future, from_throwable};
    #[cfg(feature = "async")]
    pub use crate::bridge::try_async;
    pub use crate::either::Either;
    pub use crate::optional::{absent, present, Optional};
    pub use crate::outcome::{failure, success, Outcome};
    pub use crate::propagate::{propagate, run, Flow, Scope};
    pub use crate::retry::RetryPolicy;
}

//! Error types raised or captured at the crate's boundaries.
//!
//! - [`UnwrapError`]: a contract violation. Returned by the `try_*` extraction
//!   methods and used as the panic message by `unwrap`, `expect` and
//!   `expect_err` when they are called on the wrong variant.
//! - [`Fault`]: a panic captured by [`from_throwable`](crate::from_throwable)
//!   or [`catch_unwind_future`](crate::catch_unwind_future) and turned into a
//!   failure value.

use std::any::Any;

/// Error describing an extraction attempted against the wrong variant.
///
/// # Example
///
/// ```rust
/// use runnel::Outcome;
///
/// let outcome: Outcome<i32, &str> = Outcome::failure("boom");
/// let err = outcome.try_unwrap().unwrap_err();
/// assert!(err.message().contains("boom"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwrapError {
    message: String,
}

impl UnwrapError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Panic with this error's message.
    ///
    /// The panicking extractors all end up here.
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("{}", self.message)
    }
}

impl std::fmt::Display for UnwrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for UnwrapError {}

/// A panic captured at a conversion boundary.
///
/// Panic payloads are usually `&'static str` or `String`; those are kept as
/// the message. Any other payload type is recorded with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    message: String,
}

impl Fault {
    pub(crate) const OPAQUE: &'static str = "panic with a non-string payload";

    /// Create a fault from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build a fault from a payload returned by `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(s) => *s,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(s) => (*s).to_string(),
                Err(_) => Self::OPAQUE.to_string(),
            },
        };
        Self { message }
    }

    /// The panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "panicked: {}", self.message)
    }
}

impl std::error::Error for Fault {}

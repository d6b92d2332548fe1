//! The binary-outcome container.
//!
//! `Outcome<T, E>` is either `Success(T)` or `Failure(E)`. A failure is an
//! expected, typed result of a fallible computation: it travels by value
//! through the combinators below and through the
//! [propagation engine](crate::propagate), and is never raised.
//!
//! Extraction against the wrong variant (`unwrap` on a failure, `expect_err`
//! on a success) is a programmer error and panics with an
//! [`UnwrapError`](crate::UnwrapError) message. Each panicking extractor has a
//! `try_*` counterpart that returns the error as a value instead.
//!
//! # Example
//!
//! ```rust
//! use runnel::Outcome;
//!
//! fn parse_port(raw: &str) -> Outcome<u16, String> {
//!     raw.parse::<u16>()
//!         .map_err(|e| format!("invalid port {:?}: {}", raw, e))
//!         .into()
//! }
//!
//! let port = parse_port("8080").map(|p| p + 1).unwrap_or(80);
//! assert_eq!(port, 8081);
//!
//! let port = parse_port("http").unwrap_or(80);
//! assert_eq!(port, 80);
//! ```

use std::convert::Infallible;
use std::fmt::Debug;
use std::ops::ControlFlow;

use crate::error::UnwrapError;
use crate::{Either, Optional};

/// A value that is either a `Success(T)` or a `Failure(E)`.
///
/// Outcomes are immutable: every combinator consumes `self` and returns a
/// new outcome, passing the untouched variant through as-is.
///
/// # Example
///
/// ```rust
/// use runnel::Outcome;
///
/// let ok: Outcome<i32, &str> = Outcome::success(21);
/// let err: Outcome<i32, &str> = Outcome::failure("no value");
///
/// assert_eq!(ok.map(|x| x * 2), Outcome::Success(42));
/// assert_eq!(err.map(|x| x * 2), Outcome::Failure("no value"));
/// ```
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome<T, E> {
    /// The computation succeeded with a value
    Success(T),
    /// The computation failed with an error
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    // ========== Constructors ==========

    /// Create a successful outcome.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let o = Outcome::<i32, String>::success(42);
    /// assert!(o.is_success());
    /// ```
    #[inline]
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Create a failed outcome.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let o = Outcome::<i32, &str>::failure("error");
    /// assert!(o.is_failure());
    /// ```
    #[inline]
    pub fn failure(error: E) -> Self {
        Outcome::Failure(error)
    }

    /// Create an outcome from a `Result`.
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if this is a `Success`.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` if this is a `Failure`.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    // ========== Extractors ==========

    /// Return the success value, or `default` for a failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// assert_eq!(Outcome::<i32, &str>::success(1).unwrap_or(0), 1);
    /// assert_eq!(Outcome::<i32, &str>::failure("e").unwrap_or(0), 0);
    /// ```
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => default,
        }
    }

    /// Return the success value, or compute one from the error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let o: Outcome<usize, &str> = Outcome::failure("four");
    /// assert_eq!(o.unwrap_or_else(|e| e.len()), 4);
    /// ```
    #[inline]
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => f(error),
        }
    }

    /// Return the error, or an [`UnwrapError`] carrying `msg` for a success.
    pub fn try_expect_err(self, msg: &str) -> Result<E, UnwrapError> {
        match self {
            Outcome::Success(_) => Err(UnwrapError::new(msg)),
            Outcome::Failure(error) => Ok(error),
        }
    }

    /// Return the error, panicking with `msg` if this is a success.
    ///
    /// # Panics
    ///
    /// Panics with exactly `msg` if the value is a `Success`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let o: Outcome<i32, &str> = Outcome::failure("bad");
    /// assert_eq!(o.expect_err("should have failed"), "bad");
    /// ```
    #[track_caller]
    pub fn expect_err(self, msg: &str) -> E {
        self.try_expect_err(msg).unwrap_or_else(|e| e.raise())
    }

    // ========== Transformations ==========

    /// Transform the success value, passing failures through unchanged.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transform the error, passing successes through unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let o: Outcome<i32, &str> = Outcome::failure("oops");
    /// assert_eq!(o.map_err(str::len), Outcome::Failure(4));
    /// ```
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Chain a step that fails with the same error type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let halve = |n: i32| {
    ///     if n % 2 == 0 {
    ///         Outcome::success(n / 2)
    ///     } else {
    ///         Outcome::failure(format!("{} is odd", n))
    ///     }
    /// };
    ///
    /// assert_eq!(Outcome::success(8).and_then(halve).and_then(halve), Outcome::Success(2));
    /// assert!(Outcome::success(6).and_then(halve).and_then(halve).is_failure());
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Chain a step whose error type may differ from this one.
    ///
    /// The result's error is the union `Either<E, F>`: an original failure
    /// comes back as `Left` (and `f` is never called), a failure produced by
    /// `f` comes back as `Right`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::{Either, Outcome};
    ///
    /// let o: Outcome<&str, u8> = Outcome::failure(1);
    /// let chained = o.flat_map(|s| Outcome::<usize, String>::success(s.len()));
    /// assert_eq!(chained, Outcome::Failure(Either::Left(1)));
    /// ```
    #[inline]
    pub fn flat_map<U, F, G>(self, f: G) -> Outcome<U, Either<E, F>>
    where
        G: FnOnce(T) -> Outcome<U, F>,
    {
        match self {
            Outcome::Success(value) => f(value).map_err(Either::Right),
            Outcome::Failure(error) => Outcome::Failure(Either::Left(error)),
        }
    }

    /// Return `other` if this is a success, otherwise this failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let a: Outcome<i32, &str> = Outcome::success(1);
    /// let b: Outcome<&str, &str> = Outcome::success("two");
    /// assert_eq!(a.and(b), Outcome::Success("two"));
    ///
    /// let a: Outcome<i32, &str> = Outcome::failure("first");
    /// assert_eq!(a.and(b), Outcome::Failure("first"));
    /// ```
    #[inline]
    pub fn and<U>(self, other: Outcome<U, E>) -> Outcome<U, E> {
        match self {
            Outcome::Success(_) => other,
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Return this outcome if it is a success, otherwise `other`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let primary: Outcome<i32, &str> = Outcome::failure("down");
    /// let replica: Outcome<i32, u8> = Outcome::success(7);
    /// assert_eq!(primary.or(replica), Outcome::Success(7));
    /// ```
    #[inline]
    pub fn or<F>(self, other: Outcome<T, F>) -> Outcome<T, F> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(_) => other,
        }
    }

    /// Apply the handler matching the active variant.
    ///
    /// Both handlers are required, so every caller decides what a failure
    /// means at the call site.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let o: Outcome<u32, &str> = Outcome::success(3);
    /// let text = o.fold(|n| format!("{} items", n), |e| format!("error: {}", e));
    /// assert_eq!(text, "3 items");
    /// ```
    #[inline]
    pub fn fold<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(E) -> R,
    {
        match self {
            Outcome::Success(value) => on_success(value),
            Outcome::Failure(error) => on_failure(error),
        }
    }

    /// Call `f` with a reference to the success value, returning self.
    #[inline]
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Outcome::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Call `f` with a reference to the error, returning self.
    #[inline]
    pub fn inspect_err<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Outcome::Failure(error) = &self {
            f(error);
        }
        self
    }

    // ========== Conversions ==========

    /// Convert to `Outcome<&T, &E>`.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// The success value as an [`Optional`], discarding any error.
    #[inline]
    pub fn ok(self) -> Optional<T> {
        match self {
            Outcome::Success(value) => Optional::Present(value),
            Outcome::Failure(_) => Optional::Absent,
        }
    }

    /// The error as an [`Optional`], discarding any success value.
    #[inline]
    pub fn err(self) -> Optional<E> {
        match self {
            Outcome::Success(_) => Optional::Absent,
            Outcome::Failure(error) => Optional::Present(error),
        }
    }

    /// Convert to a `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }

    // ========== Sequencing ==========

    /// Split this outcome into "continue with the value" or "stop here".
    ///
    /// A success continues with its unwrapped value. A failure breaks with
    /// itself, re-typed so its success side is uninhabited; that residual can
    /// be turned back into a failure of any success type without touching the
    /// error. This is the hook the [propagation engine](crate::propagate)
    /// drives.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use runnel::Outcome;
    ///
    /// let ok: Outcome<i32, &str> = Outcome::success(5);
    /// assert_eq!(ok.into_flow(), ControlFlow::Continue(5));
    ///
    /// let err: Outcome<i32, &str> = Outcome::failure("stop");
    /// assert_eq!(err.into_flow(), ControlFlow::Break(Outcome::Failure("stop")));
    /// ```
    #[inline]
    pub fn into_flow(self) -> ControlFlow<Outcome<Infallible, E>, T> {
        match self {
            Outcome::Success(value) => ControlFlow::Continue(value),
            Outcome::Failure(error) => ControlFlow::Break(Outcome::Failure(error)),
        }
    }
}

impl<T, E: Debug> Outcome<T, E> {
    /// Return the success value, or an [`UnwrapError`] describing the error.
    pub fn try_unwrap(self) -> Result<T, UnwrapError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(UnwrapError::new(format!(
                "called `Outcome::unwrap()` on a `Failure` value: {:?}",
                error
            ))),
        }
    }

    /// Return the success value, or an [`UnwrapError`] of `msg` and the error.
    pub fn try_expect(self, msg: &str) -> Result<T, UnwrapError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(UnwrapError::new(format!("{}: {:?}", msg, error))),
        }
    }

    /// Return the success value.
    ///
    /// # Panics
    ///
    /// Panics if the value is a `Failure`, with a message containing the
    /// `Debug` rendering of the error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// assert_eq!(Outcome::<i32, &str>::success(42).unwrap(), 42);
    /// ```
    #[track_caller]
    pub fn unwrap(self) -> T {
        self.try_unwrap().unwrap_or_else(|e| e.raise())
    }

    /// Return the success value, panicking with `msg` and the error otherwise.
    ///
    /// # Panics
    ///
    /// Panics with `"{msg}: {error:?}"` if the value is a `Failure`.
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        self.try_expect(msg).unwrap_or_else(|e| e.raise())
    }
}

impl<E> Outcome<Infallible, E> {
    /// Extract the error from a residual produced by [`Outcome::into_flow`].
    ///
    /// The success side is uninhabited, so this cannot fail.
    #[inline]
    pub fn into_error(self) -> E {
        match self {
            Outcome::Success(never) => match never {},
            Outcome::Failure(error) => error,
        }
    }
}

impl<T, E> Outcome<Outcome<T, E>, E> {
    /// Flatten a nested outcome.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Outcome;
    ///
    /// let nested: Outcome<Outcome<i32, &str>, &str> = Outcome::success(Outcome::failure("inner"));
    /// assert_eq!(nested.flatten(), Outcome::Failure("inner"));
    /// ```
    #[inline]
    pub fn flatten(self) -> Outcome<T, E> {
        self.and_then(|inner| inner)
    }
}

impl<T, E> Outcome<T, Either<E, E>> {
    /// Collapse a union error whose sides share a type.
    #[inline]
    pub fn unify_err(self) -> Outcome<T, E> {
        self.map_err(Either::into_inner)
    }
}

// ========== Trait Implementations ==========

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Outcome::from_result(result)
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}

impl<T, E> IntoIterator for Outcome<T, E> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_result().ok().into_iter()
    }
}

/// Create a successful outcome.
#[inline]
pub fn success<T, E>(value: T) -> Outcome<T, E> {
    Outcome::Success(value)
}

/// Create a failed outcome.
#[inline]
pub fn failure<T, E>(error: E) -> Outcome<T, E> {
    Outcome::Failure(error)
}

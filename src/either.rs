//! A two-sided sum type used as the union of two error types.
//!
//! When [`Outcome::flat_map`](crate::Outcome::flat_map) chains a step whose
//! error type differs from the original, the combined error is
//! `Either<E, F>`: `Left` holds an error from the original outcome, `Right`
//! one produced by the continuation. Nothing is lost in either direction and
//! callers match on the side they care about.
//!
//! # Example
//!
//! ```rust
//! use runnel::{Either, Outcome};
//!
//! #[derive(Debug, PartialEq)]
//! struct ParseError;
//! #[derive(Debug, PartialEq)]
//! struct RangeError(i32);
//!
//! let parsed: Outcome<i32, ParseError> = Outcome::success(150);
//! let checked = parsed.flat_map(|n| {
//!     if n <= 100 {
//!         Outcome::success(n)
//!     } else {
//!         Outcome::failure(RangeError(n))
//!     }
//! });
//!
//! assert_eq!(checked, Outcome::failure(Either::Right(RangeError(150))));
//! ```

/// A value that is either `Left(L)` or `Right(R)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The left variant
    Left(L),
    /// The right variant
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Returns the left value if present, consuming self.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the right value if present, consuming self.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Transform the left value, passing right values through unchanged.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the right value, passing left values through unchanged.
    #[inline]
    pub fn map_right<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Fold both variants into a single value.
    ///
    /// This is the usual way to collapse a union error into one type:
    ///
    /// ```rust
    /// use runnel::Either;
    ///
    /// let err: Either<&str, u16> = Either::Right(404);
    /// let message = err.fold(|s| s.to_string(), |code| format!("status {}", code));
    /// assert_eq!(message, "status 404");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, left_fn: F, right_fn: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => left_fn(l),
            Either::Right(r) => right_fn(r),
        }
    }
}

impl<T> Either<T, T> {
    /// Collapse an `Either` whose sides share a type.
    #[inline]
    pub fn into_inner(self) -> T {
        match self {
            Either::Left(v) | Either::Right(v) => v,
        }
    }
}

impl<L: std::fmt::Display, R: std::fmt::Display> std::fmt::Display for Either<L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Either::Left(l) => l.fmt(f),
            Either::Right(r) => r.fmt(f),
        }
    }
}

impl<L, R> std::error::Error for Either<L, R>
where
    L: std::error::Error + 'static,
    R: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Either::Left(l) => l.source(),
            Either::Right(r) => r.source(),
        }
    }
}

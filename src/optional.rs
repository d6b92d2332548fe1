//! The optional-value container.
//!
//! `Optional<T>` is either `Present(T)` or `Absent`. Absence is only ever
//! represented by the `Absent` variant; values that merely *look* empty
//! (`0`, `""`, `false`) are ordinary payloads.
//!
//! `Absent` carries no data, so every absent value is interchangeable with
//! every other. [`Optional::ABSENT`] is the shared constant.
//!
//! # Example
//!
//! ```rust
//! use runnel::{Optional, Outcome};
//!
//! fn lookup(id: u32) -> Optional<&'static str> {
//!     Optional::from_nullable(match id {
//!         1 => Some("ada"),
//!         2 => Some("grace"),
//!         _ => None,
//!     })
//! }
//!
//! let name = lookup(2).map(str::to_uppercase).unwrap_or_else(|| "anonymous".into());
//! assert_eq!(name, "GRACE");
//!
//! let user: Outcome<&str, String> = lookup(7).to_outcome_else(|| format!("no user {}", 7));
//! assert_eq!(user, Outcome::Failure("no user 7".to_string()));
//! ```

use crate::error::UnwrapError;
use crate::Outcome;

/// A value that is either `Present(T)` or `Absent`.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Optional<T> {
    /// A value is present
    Present(T),
    /// No value
    Absent,
}

impl<T> Optional<T> {
    /// The absent value.
    ///
    /// ```rust
    /// use runnel::Optional;
    ///
    /// assert_eq!(Optional::<i32>::absent(), Optional::ABSENT);
    /// assert_eq!(Optional::<i32>::absent(), Optional::absent());
    /// ```
    pub const ABSENT: Self = Optional::Absent;

    // ========== Constructors ==========

    /// Wrap a value.
    #[inline]
    pub fn present(value: T) -> Self {
        Optional::Present(value)
    }

    /// The absent value; identical to [`Optional::ABSENT`].
    #[inline]
    pub const fn absent() -> Self {
        Self::ABSENT
    }

    /// Build an optional from anything with an absence sentinel.
    ///
    /// `None` (or a null pointer) becomes `Absent`; every other value is
    /// `Present`, including zero, empty strings and `false`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Optional;
    ///
    /// assert!(Optional::from_nullable(Some(0)).is_present());
    /// assert!(Optional::from_nullable(Some(false)).is_present());
    /// assert!(Optional::from_nullable(Some("")).is_present());
    /// assert!(Optional::<i32>::from_nullable(None).is_absent());
    /// ```
    #[inline]
    pub fn from_nullable<N>(value: N) -> Self
    where
        N: Nullable<Value = T>,
    {
        match value.into_value() {
            Some(v) => Optional::Present(v),
            None => Optional::Absent,
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if a value is present.
    #[inline]
    pub fn is_present(&self) -> bool {
        matches!(self, Optional::Present(_))
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Optional::Absent)
    }

    // ========== Extractors ==========

    /// Return the value, or an [`UnwrapError`] if absent.
    pub fn try_unwrap(self) -> Result<T, UnwrapError> {
        match self {
            Optional::Present(value) => Ok(value),
            Optional::Absent => Err(UnwrapError::new("called unwrap on an absent value")),
        }
    }

    /// Return the value.
    ///
    /// # Panics
    ///
    /// Panics with "called unwrap on an absent value" if absent.
    #[track_caller]
    pub fn unwrap(self) -> T {
        self.try_unwrap().unwrap_or_else(|e| e.raise())
    }

    /// Return the value, panicking with `msg` if absent.
    ///
    /// # Panics
    ///
    /// Panics with exactly `msg` if absent.
    #[track_caller]
    pub fn expect(self, msg: &str) -> T {
        match self {
            Optional::Present(value) => value,
            Optional::Absent => UnwrapError::new(msg).raise(),
        }
    }

    /// Return the value or `default`.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Optional::Present(value) => value,
            Optional::Absent => default,
        }
    }

    /// Return the value or compute one.
    #[inline]
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Optional::Present(value) => value,
            Optional::Absent => f(),
        }
    }

    // ========== Transformations ==========

    /// Transform a present value.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Optional::Present(value) => Optional::Present(f(value)),
            Optional::Absent => Optional::Absent,
        }
    }

    /// Chain a computation that may itself be absent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Optional;
    ///
    /// let first_char = |s: &str| Optional::from_nullable(s.chars().next());
    /// assert_eq!(Optional::present("rust").flat_map(first_char), Optional::Present('r'));
    /// assert_eq!(Optional::present("").flat_map(first_char), Optional::Absent);
    /// ```
    #[inline]
    pub fn flat_map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        match self {
            Optional::Present(value) => f(value),
            Optional::Absent => Optional::Absent,
        }
    }

    /// Keep a present value only if `predicate` holds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Optional;
    ///
    /// assert_eq!(Optional::present(4).filter(|n| n % 2 == 0), Optional::Present(4));
    /// assert_eq!(Optional::present(3).filter(|n| n % 2 == 0), Optional::Absent);
    /// ```
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Optional::Present(value) if predicate(&value) => Optional::Present(value),
            _ => Optional::Absent,
        }
    }

    /// Return `other` if a value is present, otherwise `Absent`.
    #[inline]
    pub fn and<U>(self, other: Optional<U>) -> Optional<U> {
        match self {
            Optional::Present(_) => other,
            Optional::Absent => Optional::Absent,
        }
    }

    /// Return self if a value is present, otherwise `other`.
    #[inline]
    pub fn or(self, other: Optional<T>) -> Optional<T> {
        match self {
            Optional::Present(value) => Optional::Present(value),
            Optional::Absent => other,
        }
    }

    /// Apply the handler matching the active variant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runnel::Optional;
    ///
    /// let greeting = Optional::present("ada").fold(|n| format!("hi {}", n), || "hi".to_string());
    /// assert_eq!(greeting, "hi ada");
    /// ```
    #[inline]
    pub fn fold<R, P, A>(self, on_present: P, on_absent: A) -> R
    where
        P: FnOnce(T) -> R,
        A: FnOnce() -> R,
    {
        match self {
            Optional::Present(value) => on_present(value),
            Optional::Absent => on_absent(),
        }
    }

    // ========== Conversions ==========

    /// Convert to an outcome, failing with `error` when absent.
    #[inline]
    pub fn to_outcome<E>(self, error: E) -> Outcome<T, E> {
        match self {
            Optional::Present(value) => Outcome::Success(value),
            Optional::Absent => Outcome::Failure(error),
        }
    }

    /// Convert to an outcome, computing the error only when absent.
    #[inline]
    pub fn to_outcome_else<E, F>(self, f: F) -> Outcome<T, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Optional::Present(value) => Outcome::Success(value),
            Optional::Absent => Outcome::Failure(f()),
        }
    }

    /// Convert to `Optional<&T>`.
    #[inline]
    pub fn as_ref(&self) -> Optional<&T> {
        match self {
            Optional::Present(value) => Optional::Present(value),
            Optional::Absent => Optional::Absent,
        }
    }

    /// Convert to a std `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Optional::Present(value) => Some(value),
            Optional::Absent => None,
        }
    }
}

impl<T> Default for Optional<T> {
    /// Returns `Absent`.
    fn default() -> Self {
        Optional::Absent
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(option: Option<T>) -> Self {
        Optional::from_nullable(option)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        optional.into_option()
    }
}

impl<T> IntoIterator for Optional<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_option().into_iter()
    }
}

/// Values that carry their own "no value" sentinel.
///
/// `Option<T>` uses `None`; raw pointers use null.
pub trait Nullable {
    /// The payload type once the sentinel is ruled out.
    type Value;

    /// `None` if this value is an absence sentinel.
    fn into_value(self) -> Option<Self::Value>;
}

impl<T> Nullable for Option<T> {
    type Value = T;

    fn into_value(self) -> Option<T> {
        self
    }
}

impl<T> Nullable for *const T {
    type Value = *const T;

    fn into_value(self) -> Option<*const T> {
        (!self.is_null()).then_some(self)
    }
}

impl<T> Nullable for *mut T {
    type Value = *mut T;

    fn into_value(self) -> Option<*mut T> {
        (!self.is_null()).then_some(self)
    }
}

/// Wrap a value.
#[inline]
pub fn present<T>(value: T) -> Optional<T> {
    Optional::Present(value)
}

/// The absent value.
#[inline]
pub fn absent<T>() -> Optional<T> {
    Optional::ABSENT
}

/// Build an optional from a value with an absence sentinel.
#[inline]
pub fn from_nullable<N: Nullable>(value: N) -> Optional<N::Value> {
    Optional::from_nullable(value)
}

//! Testing utilities for code built on [`Outcome`](crate::Outcome) and
//! [`Optional`](crate::Optional).
//!
//! # Assertion Macros
//!
//! ```rust
//! use runnel::{assert_absent, assert_failure, assert_present, assert_success};
//! use runnel::{Optional, Outcome};
//!
//! let value = assert_success!(Outcome::<_, String>::success(42));
//! assert_eq!(value, 42);
//!
//! assert_failure!(Outcome::<i32, _>::failure("boom"), "boom");
//! assert_present!(Optional::present('x'), 'x');
//! assert_absent!(Optional::<u8>::absent());
//! ```
//!
//! # Property-Based Testing
//!
//! With the `proptest` feature, `Outcome<T, E>` and `Optional<T>` implement
//! `proptest::arbitrary::Arbitrary`:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use runnel::Outcome;
//!
//! proptest! {
//!     #[test]
//!     fn map_keeps_the_variant(o in any::<Outcome<i32, String>>()) {
//!         prop_assert_eq!(o.clone().map(|x| x).is_success(), o.is_success());
//!     }
//! }
//! ```

/// Assert that an outcome is a `Success`, yielding the value.
///
/// With a second argument, also assert the value equals it.
///
/// # Example
///
/// ```rust
/// use runnel::{assert_success, Outcome};
///
/// let n = assert_success!(Outcome::<_, ()>::success(3));
/// assert_success!(Outcome::<_, ()>::success(n * 2), 6);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Success(value) => value,
            $crate::Outcome::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Success(value) => assert_eq!(value, $expected),
            $crate::Outcome::Failure(e) => {
                panic!("Expected Success({:?}), got Failure: {:?}", $expected, e);
            }
        }
    };
}

/// Assert that an outcome is a `Failure`, yielding the error.
///
/// With a second argument, also assert the error equals it.
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Failure(error) => error,
            $crate::Outcome::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Failure(error) => assert_eq!(error, $expected),
            $crate::Outcome::Success(v) => {
                panic!("Expected Failure({:?}), got Success: {:?}", $expected, v);
            }
        }
    };
}

/// Assert that an optional is `Present`, yielding the value.
///
/// With a second argument, also assert the value equals it.
#[macro_export]
macro_rules! assert_present {
    ($optional:expr) => {
        match $optional {
            $crate::Optional::Present(value) => value,
            $crate::Optional::Absent => panic!("Expected Present, got Absent"),
        }
    };
    ($optional:expr, $expected:expr) => {
        match $optional {
            $crate::Optional::Present(value) => assert_eq!(value, $expected),
            $crate::Optional::Absent => {
                panic!("Expected Present({:?}), got Absent", $expected)
            }
        }
    };
}

/// Assert that an optional is `Absent`.
#[macro_export]
macro_rules! assert_absent {
    ($optional:expr) => {
        match $optional {
            $crate::Optional::Absent => {}
            $crate::Optional::Present(v) => {
                panic!("Expected Absent, got Present: {:?}", v);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::{prelude::*, strategy::LazyJust};

#[cfg(feature = "proptest")]
use crate::{Optional, Outcome};

#[cfg(feature = "proptest")]
impl<T, E> Arbitrary for Outcome<T, E>
where
    T: Arbitrary + 'static,
    E: Arbitrary + 'static,
{
    type Parameters = (T::Parameters, E::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (t_params, e_params) = args;
        prop_oneof![
            any_with::<T>(t_params).prop_map(Outcome::success),
            any_with::<E>(e_params).prop_map(Outcome::failure),
        ]
        .boxed()
    }
}

#[cfg(feature = "proptest")]
impl<T> Arbitrary for Optional<T>
where
    T: Arbitrary + 'static,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            any_with::<T>(args).prop_map(Optional::present),
            LazyJust::new(|| Optional::Absent),
        ]
        .boxed()
    }
}

//! `?` support for [`Outcome`] on nightly.
//!
//! With the `try_trait` feature, `?` works on an `Outcome` inside functions
//! returning `Outcome` or `Result`, and on a `Result` inside functions
//! returning `Outcome`. Errors are converted with [`From`], as for `Result`.

use std::convert::Infallible;
use std::ops::{ControlFlow, FromResidual, Try};

use crate::Outcome;

impl<T, E> Try for Outcome<T, E> {
    type Output = T;
    type Residual = Outcome<Infallible, E>;

    fn from_output(output: T) -> Self {
        Outcome::Success(output)
    }

    fn branch(self) -> ControlFlow<Self::Residual, T> {
        self.into_flow()
    }
}

impl<T, E, F: From<E>> FromResidual<Outcome<Infallible, E>> for Outcome<T, F> {
    fn from_residual(residual: Outcome<Infallible, E>) -> Self {
        Outcome::Failure(From::from(residual.into_error()))
    }
}

impl<T, E, F: From<E>> FromResidual<Result<Infallible, E>> for Outcome<T, F> {
    fn from_residual(residual: Result<Infallible, E>) -> Self {
        match residual {
            Err(error) => Outcome::Failure(From::from(error)),
        }
    }
}

impl<T, E, F: From<E>> FromResidual<Outcome<Infallible, E>> for Result<T, F> {
    fn from_residual(residual: Outcome<Infallible, E>) -> Self {
        Err(From::from(residual.into_error()))
    }
}

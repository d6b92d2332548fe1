//! Boundaries where faults from outside become [`Outcome`] values.
//!
//! - [`from_throwable`] runs a closure and turns a panic into
//!   `Failure(Fault)`.
//! - [`from_future`] awaits a future yielding `Result` and keeps its `Err`
//!   as the failure.
//! - [`catch_unwind_future`] awaits any future and turns a panic while
//!   polling into `Failure(Fault)`.
//! - [`try_async`] (feature `async`) runs an async attempt with an optional
//!   [`RetryPolicy`](crate::RetryPolicy) and a mapper for the final error.
//!
//! Nothing escapes these functions as a panic or an `Err`: whatever went
//! wrong is in the returned `Failure`.

use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};

use futures::{FutureExt, TryFuture, TryFutureExt};

use crate::{Fault, Outcome};

#[cfg(feature = "async")]
mod try_async;

#[cfg(feature = "async")]
pub use try_async::{try_async, TryAsync};

/// Run `f`, converting a panic into `Failure(Fault)`.
///
/// The panic hook still runs, so the message is printed as usual.
///
/// # Example
///
/// ```rust
/// use runnel::bridge::from_throwable;
/// use runnel::Outcome;
///
/// assert_eq!(from_throwable(|| 6 * 7), Outcome::Success(42));
///
/// let crashed = from_throwable(|| -> i32 { panic!("boom") });
/// assert_eq!(crashed.expect_err("closure panics").message(), "boom");
/// ```
pub fn from_throwable<T, F>(f: F) -> Outcome<T, Fault>
where
    F: FnOnce() -> T,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Outcome::Success(value),
        Err(payload) => Outcome::Failure(Fault::from_panic(payload)),
    }
}

/// Await a fallible future: `Ok` becomes `Success`, `Err` becomes `Failure`.
///
/// # Example
///
/// ```rust
/// use runnel::bridge::from_future;
/// use runnel::Outcome;
///
/// # tokio_test::block_on(async {
/// let ok = from_future(async { Ok::<_, String>(1) }).await;
/// assert_eq!(ok, Outcome::Success(1));
///
/// let rejected = from_future(async { Err::<i32, _>("refused") }).await;
/// assert_eq!(rejected, Outcome::Failure("refused"));
/// # });
/// ```
pub async fn from_future<Fut>(fut: Fut) -> Outcome<Fut::Ok, Fut::Error>
where
    Fut: TryFuture,
{
    TryFutureExt::into_future(fut).await.into()
}

/// Await `fut`, converting a panic raised while polling it into
/// `Failure(Fault)`.
pub async fn catch_unwind_future<Fut>(fut: Fut) -> Outcome<Fut::Output, Fault>
where
    Fut: Future,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(value) => Outcome::Success(value),
        Err(payload) => Outcome::Failure(Fault::from_panic(payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_throwable_success() {
        assert_eq!(from_throwable(|| "fine"), Outcome::Success("fine"));
    }

    #[test]
    fn test_from_throwable_captures_string_payload() {
        let outcome = from_throwable(|| -> u8 { panic!("code {}", 7) });
        assert_eq!(outcome, Outcome::Failure(Fault::new("code 7")));
    }

    #[test]
    fn test_from_throwable_opaque_payload() {
        let outcome = from_throwable(|| -> u8 { std::panic::panic_any(17_u32) });
        assert_eq!(outcome, Outcome::Failure(Fault::new(Fault::OPAQUE)));
    }

    #[test]
    fn test_from_throwable_runs_once() {
        let mut calls = 0;
        let outcome = from_throwable(|| {
            calls += 1;
            calls
        });
        assert_eq!(outcome, Outcome::Success(1));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_from_future_fulfilled() {
        let outcome = from_future(async { Ok::<_, &str>(vec![1, 2]) }).await;
        assert_eq!(outcome, Outcome::Success(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_from_future_rejected_keeps_reason() {
        #[derive(Debug, PartialEq)]
        struct Refused {
            code: u16,
        }

        let outcome = from_future(async { Err::<(), _>(Refused { code: 503 }) }).await;
        assert_eq!(outcome, Outcome::Failure(Refused { code: 503 }));
    }

    #[tokio::test]
    async fn test_from_future_accepts_ready_futures() {
        let outcome = from_future(futures::future::ready(Ok::<_, ()>('x'))).await;
        assert_eq!(outcome, Outcome::Success('x'));
    }

    #[tokio::test]
    async fn test_catch_unwind_future() {
        let ok = catch_unwind_future(async { 5 }).await;
        assert_eq!(ok, Outcome::Success(5));

        let crashed = catch_unwind_future(async {
            let empty: Vec<i32> = Vec::new();
            empty[0]
        })
        .await;
        assert!(crashed.is_failure());
    }
}

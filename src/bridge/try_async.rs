//! Async attempts with retry and error mapping.

use std::convert::identity;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::retry::{RetryEvent, RetryPolicy};
use crate::Outcome;

type RetryHook<X> = Box<dyn Fn(&RetryEvent<'_, X>) + Send + Sync>;
type RetryPredicate<X> = Box<dyn Fn(&X) -> bool + Send + Sync>;

/// An async operation to attempt, possibly several times.
///
/// Built with [`try_async`]. Nothing runs until [`run`](TryAsync::run) is
/// awaited. `X` is the error produced by a single attempt and `C` maps the
/// last one into the error of the returned [`Outcome`].
///
/// Each attempt calls the `attempt` closure again, so every retry gets a
/// fresh future.
///
/// # Example
///
/// ```rust
/// use runnel::bridge::try_async;
/// use runnel::{Outcome, RetryPolicy};
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let counter = AtomicU32::new(0);
/// let calls = &counter;
///
/// let outcome = try_async(move || async move {
///     match calls.fetch_add(1, Ordering::SeqCst) {
///         0 => Err("connection reset"),
///         _ => Ok("payload"),
///     }
/// })
/// .catch(|reason: &str| format!("fetch failed: {}", reason))
/// .retry(RetryPolicy::linear(2, Duration::from_millis(1)))
/// .run()
/// .await;
///
/// assert_eq!(outcome, Outcome::Success("payload"));
/// assert_eq!(counter.load(Ordering::SeqCst), 2);
/// # });
/// ```
pub struct TryAsync<F, C, X> {
    attempt: F,
    catch: C,
    policy: Option<RetryPolicy>,
    on_retry: Option<RetryHook<X>>,
    retry_when: Option<RetryPredicate<X>>,
}

/// Start building a [`TryAsync`] from an attempt factory.
///
/// Without further configuration the attempt runs once and its error is
/// returned unchanged.
pub fn try_async<F, Fut, T, X>(attempt: F) -> TryAsync<F, fn(X) -> X, X>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, X>>,
{
    TryAsync::new(attempt)
}

impl<F, X> TryAsync<F, fn(X) -> X, X> {
    /// Create an attempt with no retry and an identity error mapper.
    pub fn new<Fut, T>(attempt: F) -> Self
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, X>>,
    {
        TryAsync {
            attempt,
            catch: identity,
            policy: None,
            on_retry: None,
            retry_when: None,
        }
    }
}

impl<F, C, X> TryAsync<F, C, X> {
    /// Map the error of the final failed attempt.
    ///
    /// Intermediate errors are only seen by hooks, never by `catch`.
    pub fn catch<C2, E>(self, catch: C2) -> TryAsync<F, C2, X>
    where
        C2: FnOnce(X) -> E,
    {
        TryAsync {
            attempt: self.attempt,
            catch,
            policy: self.policy,
            on_retry: self.on_retry,
            retry_when: self.retry_when,
        }
    }

    /// Retry failed attempts according to `policy`.
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Observe every failed attempt.
    ///
    /// The event's `next_delay` is `None` when no further attempt will be
    /// made.
    pub fn on_retry<H>(mut self, hook: H) -> Self
    where
        H: Fn(&RetryEvent<'_, X>) + Send + Sync + 'static,
    {
        self.on_retry = Some(Box::new(hook));
        self
    }

    /// Only retry errors for which `predicate` returns `true`.
    ///
    /// Other errors end the run at once, as if the budget were spent.
    pub fn retry_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&X) -> bool + Send + Sync + 'static,
    {
        self.retry_when = Some(Box::new(predicate));
        self
    }

    /// The configured retry policy, if any.
    pub fn policy(&self) -> Option<&RetryPolicy> {
        self.policy.as_ref()
    }

    /// For the failed attempt with 0-based index `attempt`, the 1-based
    /// count of failed attempts and the delay before the next one, if any.
    fn after_failure(&self, attempt: u32, error: &X) -> (u32, Option<Duration>) {
        let retryable = self
            .retry_when
            .as_ref()
            .is_none_or(|predicate| predicate(error));
        let next_delay = match &self.policy {
            Some(policy) if retryable => policy.delay_with_jitter(attempt),
            _ => None,
        };
        (attempt.saturating_add(1), next_delay)
    }

    /// Run attempts until one succeeds or no attempt is left.
    ///
    /// Between attempts the task sleeps on the tokio timer, so other tasks
    /// keep running. An attempt already in flight is never cancelled.
    pub async fn run<Fut, T, E>(mut self) -> Outcome<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, X>>,
        C: FnOnce(X) -> E,
    {
        let start = Instant::now();
        let mut attempt = 0u32;

        loop {
            let error = match (self.attempt)().await {
                Ok(value) => return Outcome::Success(value),
                Err(error) => error,
            };

            let (failed, next_delay) = self.after_failure(attempt, &error);
            attempt = failed;

            if let Some(hook) = &self.on_retry {
                hook(&RetryEvent {
                    attempt,
                    error: &error,
                    next_delay,
                    elapsed: start.elapsed(),
                });
            }

            match next_delay {
                Some(delay) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    #[cfg(feature = "tracing")]
                    if self.policy.is_some() {
                        tracing::warn!(
                            attempts = attempt,
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "giving up after final failed attempt"
                        );
                    }
                    return Outcome::Failure((self.catch)(error));
                }
            }
        }
    }
}

impl<F, C, X> fmt::Debug for TryAsync<F, C, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryAsync")
            .field("attempt", &"<function>")
            .field("policy", &self.policy)
            .field("on_retry", &self.on_retry.as_ref().map(|_| "<hook>"))
            .field("retry_when", &self.retry_when.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

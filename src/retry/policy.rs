//! Retry policy types and configuration.

use std::time::Duration;

/// A retry policy describing how often, and after what delay, a failed
/// attempt is tried again.
///
/// Policies are pure data - they describe retry behavior but don't execute it.
/// [`TryAsync`](crate::bridge::TryAsync) consumes them.
///
/// `times` counts retries, not attempts: a policy with `times = 2` allows up
/// to three attempts in total.
///
/// # Examples
///
/// ```rust
/// use runnel::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::exponential(3, Duration::from_millis(100));
///
/// assert_eq!(policy.times(), 3);
/// assert_eq!(policy.attempts(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    times: u32,
    delay: Duration,
    backoff: Backoff,
    max_delay: Option<Duration>,
    jitter: JitterStrategy,
}

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// The same delay before every retry.
    #[default]
    Linear,
    /// Delay doubles: delay * 2^attempt (zero-based).
    Exponential,
}

/// Strategy for adding randomness to delays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JitterStrategy {
    /// No jitter applied.
    #[default]
    None,
    /// Add ±percentage randomness to delay.
    Proportional(f64),
    /// Random delay between 0 and calculated delay (AWS recommended).
    Full,
}

/// Information about a failed attempt, passed to retry hooks.
#[derive(Debug, Clone)]
pub struct RetryEvent<'a, E> {
    /// Which attempt just failed (1-indexed).
    pub attempt: u32,
    /// The error from the failed attempt.
    pub error: &'a E,
    /// Delay before next attempt, or `None` if this was the last one.
    pub next_delay: Option<Duration>,
    /// Total elapsed time since first attempt.
    pub elapsed: Duration,
}

impl RetryPolicy {
    /// Create a policy with an explicit backoff.
    pub fn new(times: u32, delay: Duration, backoff: Backoff) -> Self {
        Self {
            times,
            delay,
            backoff,
            max_delay: None,
            jitter: JitterStrategy::None,
        }
    }

    /// Retry up to `times` times, waiting `delay` before each retry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use runnel::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::linear(3, Duration::from_millis(500));
    ///
    /// // Every retry waits 500ms
    /// assert_eq!(policy.delay_for_attempt(0), Some(Duration::from_millis(500)));
    /// assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_millis(500)));
    /// assert_eq!(policy.delay_for_attempt(2), Some(Duration::from_millis(500)));
    /// assert_eq!(policy.delay_for_attempt(3), None); // retries exhausted
    /// ```
    pub fn linear(times: u32, delay: Duration) -> Self {
        Self::new(times, delay, Backoff::Linear)
    }

    /// Retry up to `times` times with exponentially increasing delay.
    ///
    /// Delay = delay * 2^attempt
    ///
    /// # Examples
    ///
    /// ```rust
    /// use runnel::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::exponential(5, Duration::from_millis(100));
    ///
    /// // Delay doubles: 100ms, 200ms, 400ms, 800ms, 1600ms
    /// assert_eq!(policy.delay_for_attempt(0), Some(Duration::from_millis(100)));
    /// assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_millis(200)));
    /// assert_eq!(policy.delay_for_attempt(2), Some(Duration::from_millis(400)));
    /// ```
    pub fn exponential(times: u32, delay: Duration) -> Self {
        Self::new(times, delay, Backoff::Exponential)
    }

    /// Set the maximum delay cap.
    ///
    /// Delays will never exceed this value, regardless of the backoff.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use runnel::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::exponential(10, Duration::from_millis(100))
    ///     .with_max_delay(Duration::from_secs(1));
    ///
    /// assert_eq!(policy.delay_for_attempt(3), Some(Duration::from_millis(800)));
    /// assert_eq!(policy.delay_for_attempt(4), Some(Duration::from_secs(1)));
    /// ```
    pub fn with_max_delay(mut self, d: Duration) -> Self {
        self.max_delay = Some(d);
        self
    }

    /// Add proportional jitter to delays.
    ///
    /// The factor determines the range of randomness. For example, `0.25` means
    /// the actual delay will be ±25% of the calculated delay. The factor is
    /// clamped to `0.0..=1.0`; NaN and infinities count as `0.0`.
    ///
    /// **Note**: Requires the `jitter` feature. Without it, this method does nothing.
    pub fn with_jitter(mut self, factor: f64) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.jitter = JitterStrategy::Proportional(factor);
        self
    }

    /// Use full jitter (AWS recommended).
    ///
    /// The delay will be a random value between 0 and the calculated delay.
    ///
    /// **Note**: Requires the `jitter` feature. Without it, this method does nothing.
    pub fn with_full_jitter(mut self) -> Self {
        self.jitter = JitterStrategy::Full;
        self
    }

    /// Number of retries after the first attempt.
    pub fn times(&self) -> u32 {
        self.times
    }

    /// Total attempt budget: the first attempt plus every retry.
    pub fn attempts(&self) -> u32 {
        self.times.saturating_add(1)
    }

    /// The base delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The backoff strategy.
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Get the maximum delay cap.
    pub fn max_delay(&self) -> Option<Duration> {
        self.max_delay
    }

    /// Get the jitter strategy.
    pub fn jitter(&self) -> &JitterStrategy {
        &self.jitter
    }

    /// Calculate the delay after failed attempt N (0-indexed).
    ///
    /// Returns None if no more retries should be attempted.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.times {
            return None;
        }

        let base_delay = match self.backoff {
            Backoff::Linear => self.delay,
            Backoff::Exponential => self.delay.saturating_mul(2u32.saturating_pow(attempt)),
        };

        let capped = match self.max_delay {
            Some(max) => base_delay.min(max),
            None => base_delay,
        };

        Some(capped)
    }

    /// Calculate the delay with jitter applied.
    pub(crate) fn delay_with_jitter(&self, attempt: u32) -> Option<Duration> {
        let base_delay = self.delay_for_attempt(attempt)?;
        Some(self.jitter.apply(base_delay, self.max_delay))
    }
}

impl JitterStrategy {
    /// Apply jitter to a base delay.
    ///
    /// # Arguments
    ///
    /// * `base_delay` - The calculated delay before jitter
    /// * `max_delay` - Optional cap on the final delay
    ///
    /// A non-finite proportional factor leaves the delay unjittered.
    pub fn apply(&self, base_delay: Duration, max_delay: Option<Duration>) -> Duration {
        let jittered = match self {
            JitterStrategy::None => base_delay,
            #[cfg(feature = "jitter")]
            JitterStrategy::Proportional(factor) if !factor.is_finite() => base_delay,
            #[cfg(feature = "jitter")]
            JitterStrategy::Proportional(factor) => {
                use rand::Rng;
                let base_millis = base_delay.as_millis() as f64;
                let jitter_range = base_millis * factor.clamp(0.0, 1.0);
                let min = (base_millis - jitter_range).max(0.0);
                let max = base_millis + jitter_range;
                let jittered_millis = rand::rng().random_range(min..=max);
                Duration::from_millis(jittered_millis as u64)
            }
            #[cfg(not(feature = "jitter"))]
            JitterStrategy::Proportional(_) => base_delay,
            #[cfg(feature = "jitter")]
            JitterStrategy::Full => {
                use rand::Rng;
                let max_millis = base_delay.as_millis() as u64;
                if max_millis == 0 {
                    Duration::ZERO
                } else {
                    Duration::from_millis(rand::rng().random_range(0..=max_millis))
                }
            }
            #[cfg(not(feature = "jitter"))]
            JitterStrategy::Full => base_delay,
        };

        match max_delay {
            Some(max) => jittered.min(max),
            None => jittered,
        }
    }
}

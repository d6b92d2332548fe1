//! Retry schedules for the async bridge.
//!
//! A [`RetryPolicy`] is just data: how many retries, the base delay, and how
//! the delay grows. [`try_async`](crate::bridge::try_async) executes it.
//!
//! # Quick Start
//!
//! ```rust
//! use runnel::{bridge::try_async, Outcome, RetryPolicy};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let outcome: Outcome<u32, String> = try_async(|| async { Ok::<_, String>(42) })
//!     .retry(RetryPolicy::exponential(3, Duration::from_millis(100)))
//!     .run()
//!     .await;
//!
//! assert_eq!(outcome, Outcome::Success(42));
//! # });
//! ```
//!
//! # Backoff
//!
//! - **Linear**: the same delay before every retry (100ms, 100ms, 100ms, ...)
//! - **Exponential**: delay doubles each retry (100ms, 200ms, 400ms, ...)
//!
//! # Jitter Support
//!
//! Jitter adds randomness to delays to prevent thundering herd problems.
//! Enable the `jitter` feature to use jitter:
//!
//! ```toml
//! runnel = { version = "...", features = ["jitter"] }
//! ```

mod policy;

pub use policy::{Backoff, JitterStrategy, RetryEvent, RetryPolicy};

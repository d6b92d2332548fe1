//! Early-return propagation for multi-step fallible procedures.
//!
//! A procedure is ordinary straight-line code that receives a [`Scope`]. Each
//! fallible step is handed to the scope with [`Scope::bind`] and the `?`
//! operator:
//!
//! ```rust
//! use runnel::propagate::{propagate, Flow, Scope};
//! use runnel::Outcome;
//!
//! fn parse(s: &str) -> Outcome<i32, String> {
//!     s.parse().map_err(|_| format!("not a number: {}", s)).into()
//! }
//!
//! type Args = (&'static str, &'static str);
//!
//! let add = propagate(|scope: &mut Scope<String>, (a, b): Args| -> Flow<i32, String> {
//!     let a = scope.bind(parse(a))?;
//!     let b = scope.bind(parse(b))?;
//!     Ok(Outcome::success(a + b))
//! });
//!
//! assert_eq!(add(("10", "20")), Outcome::Success(30));
//! assert_eq!(add(("10", "x")), Outcome::Failure("not a number: x".to_string()));
//! ```
//!
//! `bind` is the suspension point. It inspects the outcome through
//! [`Outcome::into_flow`]:
//!
//! - a success resumes the procedure with the unwrapped value;
//! - a failure is recorded in the scope and a [`Halt`] is returned, so the
//!   `?` leaves the procedure at once and none of the remaining steps (or
//!   their side effects) run.
//!
//! The scope keeps the first failure. Once it holds one, every later `bind`
//! halts again without looking at its step, and [`run`] returns that failure
//! whatever the procedure itself returns. Discarding a halt (with
//! `unwrap_or`, `ok()` or a `match`) cannot turn a failed procedure into a
//! successful one.
//!
//! When no step failed and the procedure returns `Ok(outcome)`, that outcome
//! is the result. A procedure with no steps simply returns its outcome
//! unchanged, and a wrapped procedure can itself be a step of another one,
//! since calling it yields a plain [`Outcome`].
//!
//! Steps may fail with any error type convertible into the procedure's error
//! type via [`Into`], so each step keeps its own precise error type.

use std::marker::PhantomData;

use crate::{Optional, Outcome, UnwrapError};

/// What a procedure returns: its final outcome, or a [`Halt`] from a
/// failed step.
pub type Flow<T, E> = Result<Outcome<T, E>, Halt<E>>;

/// The engine side of a running procedure.
///
/// A scope lives for exactly one invocation. `bind` takes `&mut self`, so
/// only one step can be in flight at a time.
#[derive(Debug)]
pub struct Scope<E> {
    steps: usize,
    halted: Option<(usize, E)>,
}

/// A short-circuit signal: some step of the procedure failed.
///
/// The error itself stays in the [`Scope`] that produced the halt. Only a
/// scope creates halts; return it from the procedure with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt<E> {
    step: usize,
    _error: PhantomData<fn() -> E>,
}

impl<E> Scope<E> {
    fn new() -> Self {
        Self {
            steps: 0,
            halted: None,
        }
    }

    fn halt(&self, step: usize) -> Halt<E> {
        Halt {
            step,
            _error: PhantomData,
        }
    }

    /// Suspend on `step`.
    ///
    /// Returns the unwrapped value for a success. For a failure, records the
    /// error converted into `E` and returns a [`Halt`]; propagate it with `?`.
    /// After a failure every call halts with the first failed step, and
    /// `step` is dropped unexamined.
    pub fn bind<T, F>(&mut self, step: Outcome<T, F>) -> Result<T, Halt<E>>
    where
        F: Into<E>,
    {
        if let Some((failed, _)) = &self.halted {
            return Err(self.halt(*failed));
        }
        self.steps += 1;
        match step.into_flow() {
            std::ops::ControlFlow::Continue(value) => Ok(value),
            std::ops::ControlFlow::Break(residual) => {
                self.halted = Some((self.steps, residual.into_error().into()));
                Err(self.halt(self.steps))
            }
        }
    }

    /// Suspend on an optional, halting with `error()` when it is absent.
    ///
    /// ```rust
    /// use runnel::propagate::run;
    /// use runnel::{Optional, Outcome};
    ///
    /// let result: Outcome<i32, &str> = run(|scope| {
    ///     let n = scope.bind_optional(Optional::<i32>::absent(), || "missing")?;
    ///     Ok(Outcome::success(n))
    /// });
    /// assert_eq!(result, Outcome::Failure("missing"));
    /// ```
    pub fn bind_optional<T, F>(&mut self, value: Optional<T>, error: F) -> Result<T, Halt<E>>
    where
        F: FnOnce() -> E,
    {
        if let Some((failed, _)) = &self.halted {
            return Err(self.halt(*failed));
        }
        self.bind(value.to_outcome_else(error))
    }

    /// Number of steps bound so far. Steps after a failure are not counted.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The first failure seen by this scope, if any.
    pub fn failure(&self) -> Option<&E> {
        self.halted.as_ref().map(|(_, error)| error)
    }

    /// Whether a step has failed.
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }
}

impl<E> Halt<E> {
    /// The 1-based index of the step that failed.
    pub fn step(&self) -> usize {
        self.step
    }
}

/// Run a zero-argument procedure once and return its outcome.
///
/// If any step failed, the result is the first failure, even when the
/// procedure discarded the halt and went on to return a success.
///
/// # Panics
///
/// Panics if the procedure returns a [`Halt`] that its own scope did not
/// produce.
///
/// # Example
///
/// ```rust
/// use runnel::propagate::run;
/// use runnel::Outcome;
///
/// let total: Outcome<i32, String> = run(|scope| {
///     let a = scope.bind(Outcome::<_, String>::success(10))?;
///     let b = scope.bind(Outcome::<_, String>::success(20))?;
///     Ok(Outcome::success(a + b))
/// });
/// assert_eq!(total, Outcome::Success(30));
/// ```
pub fn run<T, E, P>(procedure: P) -> Outcome<T, E>
where
    P: FnOnce(&mut Scope<E>) -> Flow<T, E>,
{
    let mut scope = Scope::new();
    let flow = procedure(&mut scope);
    match (scope.halted, flow) {
        (Some((step, error)), _) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(step, "procedure short-circuited on failed step");
            #[cfg(not(feature = "tracing"))]
            let _ = step;
            Outcome::Failure(error)
        }
        (None, Ok(outcome)) => outcome,
        (None, Err(halt)) => UnwrapError::new(format!(
            "procedure returned a halt (step {}) from a different scope",
            halt.step
        ))
        .raise(),
    }
}

/// Wrap a procedure into a plain function returning an [`Outcome`].
///
/// The returned function takes the procedure's argument (use a tuple for
/// several) and runs the procedure to completion on every call, each time
/// with a fresh [`Scope`].
///
/// # Example
///
/// ```rust
/// use runnel::propagate::{propagate, Scope};
/// use runnel::Outcome;
///
/// fn nonzero(n: i32) -> Outcome<i32, &'static str> {
///     if n == 0 {
///         Outcome::failure("divide by zero")
///     } else {
///         Outcome::success(n)
///     }
/// }
///
/// let checked_div = propagate(|scope: &mut Scope<&'static str>, (a, b): (i32, i32)| {
///     let divisor = scope.bind(nonzero(b))?;
///     Ok(Outcome::success(a / divisor))
/// });
///
/// assert_eq!(checked_div((10, 2)), Outcome::Success(5));
/// assert_eq!(checked_div((10, 0)), Outcome::Failure("divide by zero"));
/// ```
pub fn propagate<A, T, E, P>(procedure: P) -> impl Fn(A) -> Outcome<T, E>
where
    P: Fn(&mut Scope<E>, A) -> Flow<T, E>,
{
    move |args| run(|scope| procedure(scope, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, PartialEq)]
    enum AppError {
        Parse(String),
        Io(&'static str),
    }

    impl From<std::num::ParseIntError> for AppError {
        fn from(e: std::num::ParseIntError) -> Self {
            AppError::Parse(e.to_string())
        }
    }

    #[test]
    fn test_success_path_unwraps_each_step() {
        let result: Outcome<i32, String> = run(|scope| {
            let a = scope.bind(Outcome::<_, String>::success(10))?;
            let b = scope.bind(Outcome::<_, String>::success(20))?;
            Ok(Outcome::success(a + b))
        });

        assert_eq!(result, Outcome::Success(30));
    }

    #[test]
    fn test_failure_short_circuits_remaining_steps() {
        let evaluated = RefCell::new(Vec::new());
        let step = |name: &'static str, outcome: Outcome<&'static str, &'static str>| {
            evaluated.borrow_mut().push(name);
            outcome
        };

        let result: Outcome<Vec<&str>, &str> = run(|scope| {
            let a = scope.bind(step("a", Outcome::success("A")))?;
            let b = scope.bind(step("b", Outcome::failure("B")))?;
            let c = scope.bind(step("c", Outcome::success("C")))?;
            Ok(Outcome::success(vec![a, b, c]))
        });

        assert_eq!(result, Outcome::Failure("B"));
        assert_eq!(*evaluated.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_discarded_halt_still_fails_procedure() {
        let later_ran = Cell::new(false);

        let result: Outcome<i32, &str> = run(|scope| {
            let b = scope.bind(Outcome::<i32, _>::failure("B")).unwrap_or(0);
            let later = scope.bind(Outcome::<i32, &str>::success(5));
            later_ran.set(later.is_ok());
            Ok(Outcome::success(b + later.unwrap_or(0)))
        });

        assert_eq!(result, Outcome::Failure("B"));
        assert!(!later_ran.get());
    }

    #[test]
    fn test_matched_halt_does_not_override_failure() {
        let result: Outcome<&str, &str> = run(|scope| {
            match scope.bind(Outcome::<&str, _>::failure("denied")) {
                Ok(value) => Ok(Outcome::success(value)),
                Err(_) => Ok(Outcome::success("fallback")),
            }
        });

        assert_eq!(result, Outcome::Failure("denied"));
    }

    #[test]
    fn test_zero_steps_returns_outcome_unchanged() {
        let ok: Outcome<i32, &str> = run(|_| Ok(Outcome::success(1)));
        assert_eq!(ok, Outcome::Success(1));

        let err: Outcome<i32, &str> = run(|_| Ok(Outcome::failure("direct")));
        assert_eq!(err, Outcome::Failure("direct"));
    }

    #[test]
    fn test_step_errors_convert_into_procedure_error() {
        let parse = |s: &str| -> Outcome<i32, std::num::ParseIntError> { s.parse().into() };

        let result: Outcome<i32, AppError> = run(|scope| {
            let n = scope.bind(parse("12"))?;
            let m = scope.bind(parse("twelve"))?;
            Ok(Outcome::success(n + m))
        });

        assert!(matches!(result, Outcome::Failure(AppError::Parse(_))));
    }

    #[test]
    fn test_propagate_wraps_into_reusable_function() {
        let calls = Cell::new(0);
        let read = |ok: bool| -> Outcome<u8, AppError> {
            calls.set(calls.get() + 1);
            if ok {
                Outcome::success(1)
            } else {
                Outcome::failure(AppError::Io("unreadable"))
            }
        };

        let load = propagate(|scope: &mut Scope<AppError>, (first, second): (bool, bool)| {
            let a = scope.bind(read(first))?;
            let b = scope.bind(read(second))?;
            Ok(Outcome::success(a + b))
        });

        assert_eq!(load((true, true)), Outcome::Success(2));
        assert_eq!(load((false, true)), Outcome::Failure(AppError::Io("unreadable")));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_nested_procedures_compose() {
        let inner = propagate(|scope: &mut Scope<String>, n: i32| {
            let checked = scope.bind(if n >= 0 {
                Outcome::success(n)
            } else {
                Outcome::failure(format!("{} is negative", n))
            })?;
            Ok(Outcome::success(checked * 2))
        });

        let outer = propagate(|scope: &mut Scope<String>, (a, b): (i32, i32)| {
            let x = scope.bind(inner(a))?;
            let y = scope.bind(inner(b))?;
            Ok(Outcome::success(x + y))
        });

        assert_eq!(outer((1, 2)), Outcome::Success(6));
        assert_eq!(outer((1, -2)), Outcome::Failure("-2 is negative".to_string()));
    }

    #[test]
    fn test_halt_records_failed_step() {
        let mut scope: Scope<&str> = Scope::new();
        assert_eq!(scope.bind(Outcome::<_, &str>::success(1)), Ok(1));
        assert!(!scope.is_halted());

        let halt = scope.bind(Outcome::<i32, _>::failure("second")).unwrap_err();
        assert_eq!(halt.step(), 2);
        assert_eq!(scope.failure(), Some(&"second"));
        assert_eq!(scope.steps(), 2);
    }

    #[test]
    fn test_bind_after_failure_halts_at_first_failed_step() {
        let mut scope: Scope<&str> = Scope::new();
        let _ = scope.bind(Outcome::<i32, _>::failure("first"));

        let later = scope.bind(Outcome::<i32, &str>::success(5)).unwrap_err();
        assert_eq!(later.step(), 1);
        let again = scope.bind(Outcome::<i32, _>::failure("second")).unwrap_err();
        assert_eq!(again.step(), 1);

        assert_eq!(scope.failure(), Some(&"first"));
        assert_eq!(scope.steps(), 1);
    }

    #[test]
    #[should_panic(expected = "different scope")]
    fn test_foreign_halt_panics() {
        let mut stray = None;
        let _: Outcome<(), &str> = run(|inner| {
            stray = inner.bind(Outcome::<(), _>::failure("inner")).err();
            Ok(Outcome::success(()))
        });

        let _: Outcome<(), &str> = run(|_| match stray {
            Some(halt) => Err(halt),
            None => Ok(Outcome::success(())),
        });
    }

    #[test]
    fn test_bind_optional() {
        let result: Outcome<i32, &str> = run(|scope| {
            let n = scope.bind_optional(Optional::present(4), || "missing")?;
            Ok(Outcome::success(n * 2))
        });
        assert_eq!(result, Outcome::Success(8));

        let result: Outcome<i32, &str> = run(|scope| {
            let n = scope.bind_optional(Optional::<i32>::absent(), || "missing")?;
            Ok(Outcome::success(n * 2))
        });
        assert_eq!(result, Outcome::Failure("missing"));
    }
}

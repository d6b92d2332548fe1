//! Combinators over collections of outcomes.
//!
//! - [`all`]: turn many outcomes into one outcome of a `Vec`, stopping at the
//!   first failure.
//! - [`partition`]: split outcomes into successes and failures, inspecting
//!   every element.
//! - [`traverse`]: map a fallible function over items with the same
//!   short-circuit as `all`.
//!
//! `Outcome` also implements [`FromIterator`], so `collect()` works like it
//! does for `Result`.
//!
//! # Examples
//!
//! ```
//! use runnel::{aggregate::{all, partition}, Outcome};
//!
//! let ok: Vec<Outcome<i32, &str>> = vec![Outcome::success(1), Outcome::success(2)];
//! assert_eq!(all(ok), Outcome::Success(vec![1, 2]));
//!
//! let mixed = vec![
//!     Outcome::success(1),
//!     Outcome::failure("e1"),
//!     Outcome::success(2),
//!     Outcome::failure("e2"),
//! ];
//! assert_eq!(partition(mixed), (vec![1, 2], vec!["e1", "e2"]));
//! ```

use crate::Outcome;

/// Collect successes in order, returning the first failure if there is one.
///
/// The input is consumed lazily: once a failure is found, no further
/// elements are pulled from the iterator. An empty input yields
/// `Success(vec![])`.
///
/// # Examples
///
/// ```
/// use runnel::{aggregate::all, Outcome};
///
/// let outcomes = vec![
///     Outcome::success(1),
///     Outcome::failure("x"),
///     Outcome::success(3),
/// ];
/// assert_eq!(all(outcomes), Outcome::Failure("x"));
///
/// let empty: Vec<Outcome<i32, &str>> = vec![];
/// assert_eq!(all(empty), Outcome::Success(vec![]));
/// ```
pub fn all<T, E, I>(iter: I) -> Outcome<Vec<T>, E>
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    iter.into_iter().collect()
}

/// Split outcomes into `(successes, failures)`.
///
/// Every element is inspected; relative order is preserved within each
/// side.
pub fn partition<T, E, I>(iter: I) -> (Vec<T>, Vec<E>)
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    let mut successes = Vec::new();
    let mut failures = Vec::new();

    for outcome in iter {
        match outcome {
            Outcome::Success(value) => successes.push(value),
            Outcome::Failure(error) => failures.push(error),
        }
    }

    (successes, failures)
}

/// Apply `f` to each item and collect the results with [`all`].
///
/// `f` is not called for items after the first failure.
///
/// # Examples
///
/// ```
/// use runnel::{aggregate::traverse, Outcome};
///
/// fn parse(s: &str) -> Outcome<i32, String> {
///     s.parse().map_err(|_| format!("invalid number: {}", s)).into()
/// }
///
/// assert_eq!(traverse(["1", "2", "3"], parse), Outcome::Success(vec![1, 2, 3]));
/// assert_eq!(
///     traverse(["1", "two", "3"], parse),
///     Outcome::Failure("invalid number: two".to_string())
/// );
/// ```
pub fn traverse<A, T, E, F, I>(iter: I, f: F) -> Outcome<Vec<T>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> Outcome<T, E>,
{
    all(iter.into_iter().map(f))
}

impl<T, E, V> FromIterator<Outcome<T, E>> for Outcome<V, E>
where
    V: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<T, E>>>(iter: I) -> Self {
        let mut failure = None;
        let collected = iter
            .into_iter()
            .map_while(|outcome| match outcome {
                Outcome::Success(value) => Some(value),
                Outcome::Failure(error) => {
                    failure = Some(error);
                    None
                }
            })
            .collect::<V>();

        match failure {
            Some(error) => Outcome::Failure(error),
            None => Outcome::Success(collected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_all_success_preserves_order() {
        let outcomes: Vec<Outcome<i32, &str>> =
            vec![Outcome::success(1), Outcome::success(2), Outcome::success(3)];
        assert_eq!(all(outcomes).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_all_empty_is_success() {
        let outcomes: Vec<Outcome<i32, &str>> = Vec::new();
        assert_eq!(all(outcomes), Outcome::Success(vec![]));
    }

    #[test]
    fn test_all_returns_first_failure() {
        let outcomes = vec![
            Outcome::<i32, _>::failure("first"),
            Outcome::failure("second"),
        ];
        assert_eq!(all(outcomes), Outcome::Failure("first"));
    }

    #[test]
    fn test_all_stops_pulling_after_failure() {
        let pulled = Cell::new(0);
        let source = [Outcome::success(1), Outcome::failure("x"), Outcome::success(3)];

        let result = all(source.into_iter().inspect(|_| pulled.set(pulled.get() + 1)));

        assert_eq!(result, Outcome::Failure("x"));
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn test_partition_inspects_everything_in_order() {
        let pulled = Cell::new(0);
        let source = vec![
            Outcome::success(1),
            Outcome::failure("e1"),
            Outcome::success(2),
            Outcome::failure("e2"),
        ];

        let (successes, failures) =
            partition(source.into_iter().inspect(|_| pulled.set(pulled.get() + 1)));

        assert_eq!(successes, vec![1, 2]);
        assert_eq!(failures, vec!["e1", "e2"]);
        assert_eq!(pulled.get(), 4);
    }

    #[test]
    fn test_traverse_stops_calling_after_failure() {
        let mut seen = Vec::new();
        let result = traverse(vec![2, 4, 5, 6], |n| {
            seen.push(n);
            if n % 2 == 0 {
                Outcome::success(n / 2)
            } else {
                Outcome::failure(format!("{} is odd", n))
            }
        });

        assert_eq!(result, Outcome::Failure("5 is odd".to_string()));
        assert_eq!(seen, vec![2, 4, 5]);
    }

    #[test]
    fn test_collect_into_other_containers() {
        let outcomes = vec![Outcome::<_, ()>::success('a'), Outcome::success('b')];
        let word: Outcome<String, ()> = outcomes.into_iter().collect();
        assert_eq!(word, Outcome::Success("ab".to_string()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn outcome_strategy() -> impl Strategy<Value = Outcome<i32, String>> {
        prop_oneof![
            any::<i32>().prop_map(Outcome::success),
            "[a-z]{1,8}".prop_map(Outcome::failure),
        ]
    }

    proptest! {
        #[test]
        fn prop_partition_accounts_for_every_element(
            outcomes in prop::collection::vec(outcome_strategy(), 0..50)
        ) {
            let total = outcomes.len();
            let (successes, failures) = partition(outcomes);
            prop_assert_eq!(successes.len() + failures.len(), total);
        }

        #[test]
        fn prop_all_matches_first_failure(
            outcomes in prop::collection::vec(outcome_strategy(), 0..50)
        ) {
            let first_failure = outcomes.iter().find_map(|o| match o {
                Outcome::Failure(e) => Some(e.clone()),
                Outcome::Success(_) => None,
            });

            match (all(outcomes.clone()), first_failure) {
                (Outcome::Failure(e), Some(expected)) => prop_assert_eq!(e, expected),
                (Outcome::Success(values), None) => {
                    let (successes, _) = partition(outcomes);
                    prop_assert_eq!(values, successes);
                }
                (result, expected) => {
                    prop_assert!(false, "all returned {:?}, expected failure {:?}", result, expected);
                }
            }
        }
    }
}

//! Multi-step procedures mixing outcomes, optionals and error conversion.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use runnel::propagate::{propagate, run, Flow, Scope};
use runnel::{Either, Optional, Outcome};

#[derive(Debug, Clone, PartialEq)]
enum OrderError {
    UnknownCustomer(u32),
    OutOfStock(&'static str),
    InvalidQuantity(String),
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::UnknownCustomer(id) => write!(f, "unknown customer {}", id),
            OrderError::OutOfStock(item) => write!(f, "{} is out of stock", item),
            OrderError::InvalidQuantity(raw) => write!(f, "invalid quantity {:?}", raw),
        }
    }
}

impl From<std::num::ParseIntError> for OrderError {
    fn from(e: std::num::ParseIntError) -> Self {
        OrderError::InvalidQuantity(e.to_string())
    }
}

struct Shop {
    customers: HashMap<u32, &'static str>,
    stock: HashMap<&'static str, u32>,
    log: RefCell<Vec<String>>,
}

impl Shop {
    fn new() -> Self {
        Shop {
            customers: HashMap::from([(1, "ada"), (2, "grace")]),
            stock: HashMap::from([("tea", 10), ("cake", 0)]),
            log: RefCell::new(Vec::new()),
        }
    }

    fn customer(&self, id: u32) -> Optional<&'static str> {
        self.log.borrow_mut().push(format!("customer {}", id));
        Optional::from_nullable(self.customers.get(&id).copied())
    }

    fn reserve(&self, item: &'static str, qty: u32) -> Outcome<u32, OrderError> {
        self.log.borrow_mut().push(format!("reserve {} x{}", item, qty));
        match self.stock.get(item) {
            Some(&available) if available >= qty => Outcome::success(available - qty),
            _ => Outcome::failure(OrderError::OutOfStock(item)),
        }
    }
}

type Order = (u32, &'static str, &'static str);

fn place_order(shop: &Shop, (customer, item, raw_qty): Order) -> Outcome<String, OrderError> {
    run(|scope: &mut Scope<OrderError>| {
        let name = scope.bind_optional(shop.customer(customer), || {
            OrderError::UnknownCustomer(customer)
        })?;
        let qty: u32 = scope.bind(Outcome::from(raw_qty.parse::<u32>()))?;
        let left = scope.bind(shop.reserve(item, qty))?;
        Ok(Outcome::success(format!(
            "{} ordered {} {} ({} left)",
            name, qty, item, left
        )))
    })
}

#[test]
fn test_order_succeeds_through_every_step() {
    let shop = Shop::new();
    let outcome = place_order(&shop, (1, "tea", "3"));

    assert_eq!(
        outcome,
        Outcome::Success("ada ordered 3 tea (7 left)".to_string())
    );
    assert_eq!(*shop.log.borrow(), vec!["customer 1", "reserve tea x3"]);
}

#[test]
fn test_unknown_customer_stops_before_reservation() {
    let shop = Shop::new();
    let outcome = place_order(&shop, (9, "tea", "1"));

    assert_eq!(outcome, Outcome::Failure(OrderError::UnknownCustomer(9)));
    assert_eq!(*shop.log.borrow(), vec!["customer 9"]);
}

#[test]
fn test_parse_error_is_converted() {
    let shop = Shop::new();
    let outcome = place_order(&shop, (2, "tea", "lots"));

    match outcome {
        Outcome::Failure(OrderError::InvalidQuantity(msg)) => {
            assert!(msg.contains("invalid digit"));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(shop.log.borrow().len(), 1);
}

#[test]
fn test_failure_value_is_relayed_unchanged() {
    let shop = Shop::new();
    let outcome = place_order(&shop, (2, "cake", "1"));

    let error = outcome.expect_err("cake is sold out");
    assert_eq!(error, OrderError::OutOfStock("cake"));
    assert_eq!(error.to_string(), "cake is out of stock");
}

#[test]
fn test_wrapped_procedure_is_reusable_and_composable() {
    let double_positive = propagate(|scope: &mut Scope<String>, n: i64| -> Flow<i64, String> {
        let n = scope.bind(if n > 0 {
            Outcome::success(n)
        } else {
            Outcome::failure(format!("{} is not positive", n))
        })?;
        Ok(Outcome::success(n * 2))
    });

    let sum_of_doubles = propagate(|scope: &mut Scope<String>, items: Vec<i64>| {
        let mut total = 0;
        for item in items {
            total += scope.bind(double_positive(item))?;
        }
        Ok(Outcome::success(total))
    });

    assert_eq!(sum_of_doubles(vec![1, 2, 3]), Outcome::Success(12));
    assert_eq!(
        sum_of_doubles(vec![1, -2, 3]),
        Outcome::Failure("-2 is not positive".to_string())
    );
    assert_eq!(sum_of_doubles(Vec::new()), Outcome::Success(0));
}

#[test]
fn test_procedure_may_finish_with_its_own_failure() {
    let outcome: Outcome<u8, &str> = run(|scope| {
        let n = scope.bind(Outcome::<u8, &str>::success(200))?;
        if n > 100 {
            return Ok(Outcome::failure("too large"));
        }
        Ok(Outcome::success(n))
    });

    assert_eq!(outcome, Outcome::Failure("too large"));
}

#[test]
fn test_flat_map_union_matches_procedure_with_either() {
    fn parse(raw: &str) -> Outcome<i32, String> {
        raw.parse().map_err(|_| format!("bad {}", raw)).into()
    }

    fn bounded(n: i32) -> Outcome<i32, u8> {
        if n < 256 {
            Outcome::success(n)
        } else {
            Outcome::failure(0)
        }
    }

    let chained = parse("999").flat_map(bounded);

    let procedural: Outcome<i32, Either<String, u8>> = run(|scope| {
        let n = scope.bind(parse("999").map_err(Either::<String, u8>::Left))?;
        let m = scope.bind(bounded(n).map_err(Either::<String, u8>::Right))?;
        Ok(Outcome::success(m))
    });

    assert_eq!(chained, procedural);
    assert_eq!(chained, Outcome::Failure(Either::Right(0)));
}

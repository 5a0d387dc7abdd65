//! Fibonacci / nearest palindrome utility
//!
//! Stateless functions on arbitrary-precision integers. The palindrome
//! search walks outward from the value, lower side first, and gives up
//! after a fixed number of offsets to bound the cost of a single call.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::NumericError;

/// Largest offset tried by [`nearest_palindrome`]
pub const MAX_PALINDROME_OFFSET: u64 = 500_000;

/// Compute the n-th Fibonacci number iteratively
pub fn fibonacci(n: u64) -> BigUint {
    if n == 0 {
        return BigUint::zero();
    }

    let mut a = BigUint::zero();
    let mut b = BigUint::one();
    for _ in 2..=n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
    b
}

/// Whether the decimal representation reads the same both ways
pub fn is_palindrome(value: &BigUint) -> bool {
    let digits = value.to_str_radix(10);
    let bytes = digits.as_bytes();
    bytes.iter().eq(bytes.iter().rev())
}

/// Find the palindrome closest to `value`
///
/// Ties go to the smaller candidate because the lower side is checked
/// first at every offset.
pub fn nearest_palindrome(value: &BigUint) -> Result<BigUint, NumericError> {
    if is_palindrome(value) {
        return Ok(value.clone());
    }

    let mut offset = BigUint::one();
    for _ in 1..=MAX_PALINDROME_OFFSET {
        if *value >= offset {
            let below = value - &offset;
            if is_palindrome(&below) {
                return Ok(below);
            }
        }
        let above = value + &offset;
        if is_palindrome(&above) {
            return Ok(above);
        }
        offset += 1u32;
    }

    log::warn!(
        "palindrome search exhausted after {} offsets",
        MAX_PALINDROME_OFFSET
    );
    Err(NumericError::SearchExhausted {
        ceiling: MAX_PALINDROME_OFFSET,
    })
}

/// A request from the input form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FibonacciRequest {
    pub n: i64,
}

impl FibonacciRequest {
    /// Parse raw text typed by the user
    pub fn parse(input: &str) -> Result<Self, NumericError> {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(n) if n >= 0 => Ok(Self { n }),
            _ => Err(NumericError::InvalidInput {
                input: input.to_string(),
            }),
        }
    }

    /// Parse a JSON request body like `{"n": 20}`
    pub fn from_json(json: &str) -> Result<Self, NumericError> {
        serde_json::from_str(json).map_err(|_| NumericError::InvalidInput {
            input: json.to_string(),
        })
    }
}

/// Result of evaluating a [`FibonacciRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibonacciReport {
    pub n: u64,
    pub fibonacci_value: BigUint,
    pub nearest_palindrome: BigUint,
    pub difference: BigUint,
}

impl fmt::Display for FibonacciReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "N: {}", self.n)?;
        writeln!(f, "Fibonacci Value: {}", self.fibonacci_value)?;
        writeln!(f, "Nearest Palindrome: {}", self.nearest_palindrome)?;
        write!(f, "Difference: {}", self.difference)
    }
}

/// Compute the Fibonacci value, its nearest palindrome and their distance
pub fn evaluate(request: FibonacciRequest) -> Result<FibonacciReport, NumericError> {
    let n = u64::try_from(request.n).map_err(|_| NumericError::InvalidInput {
        input: request.n.to_string(),
    })?;

    if n > 100 {
        log::info!("computing fibonacci({}), large gaps may take a while", n);
    }

    let fibonacci_value = fibonacci(n);
    let nearest_palindrome = nearest_palindrome(&fibonacci_value)?;
    let difference = if fibonacci_value > nearest_palindrome {
        &fibonacci_value - &nearest_palindrome
    } else {
        &nearest_palindrome - &fibonacci_value
    };

    Ok(FibonacciReport {
        n,
        fibonacci_value,
        nearest_palindrome,
        difference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    fn is_pal_u64(v: u64) -> bool {
        let s = v.to_string();
        s.chars().eq(s.chars().rev())
    }

    #[test]
    fn test_fibonacci_base_cases() {
        assert_eq!(fibonacci(0), big(0));
        assert_eq!(fibonacci(1), big(1));
        assert_eq!(fibonacci(2), big(1));
        assert_eq!(fibonacci(10), big(55));
        assert_eq!(fibonacci(20), big(6765));
    }

    #[test]
    fn test_fibonacci_past_u64() {
        // fib(93) is the last one that fits in a u64
        assert_eq!(fibonacci(93), big(12_200_160_415_121_876_738));
        let f100 = fibonacci(100);
        assert_eq!(f100.to_string(), "354224848179261915075");
    }

    #[test]
    fn test_palindrome_examples() {
        assert_eq!(nearest_palindrome(&big(55)), Ok(big(55)));
        // 6764 is not a palindrome, 6776 is found at offset 11
        assert!(!is_palindrome(&big(6764)));
        assert_eq!(nearest_palindrome(&big(6765)), Ok(big(6776)));
    }

    #[test]
    fn test_palindrome_tie_prefers_lower() {
        // 10 is equidistant from 9 and 11
        assert_eq!(nearest_palindrome(&big(10)), Ok(big(9)));
        // 100 is equidistant from 99 and 101
        assert_eq!(nearest_palindrome(&big(100)), Ok(big(99)));
    }

    #[test]
    fn test_gap_too_large() {
        let v: BigUint = "100000005000000".parse().unwrap();
        assert_eq!(
            nearest_palindrome(&v),
            Err(NumericError::SearchExhausted { ceiling: 500_000 })
        );
        // Closest palindrome 100000000000001 is one offset past the ceiling
        let v: BigUint = "100000000500002".parse().unwrap();
        assert_eq!(
            nearest_palindrome(&v),
            Err(NumericError::SearchExhausted { ceiling: 500_000 })
        );
    }

    #[test]
    fn test_palindrome_at_ceiling_is_found() {
        // 1000000000001 and 1000001000001 are both exactly 500000 away
        let v: BigUint = "1000000500001".parse().unwrap();
        let expected: BigUint = "1000000000001".parse().unwrap();
        assert_eq!(nearest_palindrome(&v), Ok(expected));
    }

    #[test]
    fn test_zero_and_single_digits() {
        for v in 0..10u64 {
            assert_eq!(nearest_palindrome(&big(v)), Ok(big(v)));
        }
    }

    #[test]
    fn test_evaluate_report() {
        let report = evaluate(FibonacciRequest { n: 20 }).unwrap();
        assert_eq!(report.fibonacci_value, big(6765));
        assert_eq!(report.nearest_palindrome, big(6776));
        assert_eq!(report.difference, big(11));
        assert_eq!(
            report.to_string(),
            "N: 20\nFibonacci Value: 6765\nNearest Palindrome: 6776\nDifference: 11"
        );
    }

    #[test]
    fn test_invalid_requests() {
        assert!(matches!(
            evaluate(FibonacciRequest { n: -1 }),
            Err(NumericError::InvalidInput { .. })
        ));
        assert!(matches!(
            FibonacciRequest::parse("abc"),
            Err(NumericError::InvalidInput { .. })
        ));
        assert!(matches!(
            FibonacciRequest::parse("-4"),
            Err(NumericError::InvalidInput { .. })
        ));
        assert!(matches!(
            FibonacciRequest::parse("2.5"),
            Err(NumericError::InvalidInput { .. })
        ));
        assert_eq!(FibonacciRequest::parse(" 20 "), Ok(FibonacciRequest { n: 20 }));
        assert_eq!(
            FibonacciRequest::from_json(r#"{"n": 7}"#),
            Ok(FibonacciRequest { n: 7 })
        );
        assert!(FibonacciRequest::from_json(r#"{"n": 1.5}"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_fibonacci_recurrence(n in 0u64..300) {
            prop_assert_eq!(fibonacci(n + 2), fibonacci(n) + fibonacci(n + 1));
        }

        #[test]
        fn prop_nearest_is_palindrome_and_closest(v in 0u64..200_000) {
            let found = nearest_palindrome(&big(v)).unwrap();
            prop_assert!(is_palindrome(&found));

            let found: u64 = found.to_string().parse().unwrap();
            let gap = found.abs_diff(v);
            // Nothing strictly closer on either side, and a lower tie wins
            for d in 0..gap {
                if d <= v {
                    prop_assert!(!is_pal_u64(v - d));
                }
                prop_assert!(!is_pal_u64(v + d));
            }
            if found > v && gap <= v {
                prop_assert!(!is_pal_u64(v - gap));
            }
        }

        #[test]
        fn prop_palindromes_are_fixed_points(half in 0u64..100_000) {
            let s = half.to_string();
            let mirrored: String = s.chars().rev().collect();
            let p: u64 = format!("{s}{mirrored}").parse().unwrap();
            prop_assert_eq!(nearest_palindrome(&big(p)), Ok(big(p)));
        }
    }
}

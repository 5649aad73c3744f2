//! Exact rational arithmetic over `(numerator, denominator)` pairs.
//!
//! Every operator returns a pair already in lowest terms. Denominators must be
//! positive; a zero denominator is a caller bug and is not checked here.

use crate::domain::Operation;
use crate::error::{EngineError, Result};

/// `(numerator, denominator)`
pub type Fraction = (i64, i64);

/// `(whole, numerator, denominator)` with `0 <= numerator < denominator`.
pub type Mixed = (i64, i64, i64);

pub fn gcd(a: i64, b: i64) -> i64 {
  let (mut a, mut b) = (a.abs(), b.abs());
  while b != 0 {
    let t = a % b;
    a = b;
    b = t;
  }
  a
}

pub fn lcm(a: i64, b: i64) -> i64 {
  if a == 0 || b == 0 {
    return 0;
  }
  (a / gcd(a, b) * b).abs()
}

/// Lowest terms with a positive denominator. Zero simplifies to `0/1`.
pub fn simplify(n: i64, d: i64) -> Fraction {
  if n == 0 {
    return (0, 1);
  }
  let g = gcd(n, d);
  let (n, d) = (n / g, d / g);
  if d < 0 { (-n, -d) } else { (n, d) }
}

pub fn to_mixed(n: i64, d: i64) -> Mixed {
  (n / d, n % d, d)
}

pub fn to_improper((whole, n, d): Mixed) -> Fraction {
  (whole * d + n, d)
}

pub fn add_fractions((n1, d1): Fraction, (n2, d2): Fraction) -> Fraction {
  let common = lcm(d1, d2);
  simplify(n1 * (common / d1) + n2 * (common / d2), common)
}

/// Difference of the larger minus the smaller operand, never negative.
pub fn subtract_fractions((n1, d1): Fraction, (n2, d2): Fraction) -> Fraction {
  let common = lcm(d1, d2);
  let a = n1 * (common / d1);
  let b = n2 * (common / d2);
  let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
  simplify(hi - lo, common)
}

pub fn multiply_fractions((n1, d1): Fraction, (n2, d2): Fraction) -> Fraction {
  simplify(n1 * n2, d1 * d2)
}

/// Multiplies by the reciprocal of the divisor.
pub fn divide_fractions((n1, d1): Fraction, (n2, d2): Fraction) -> Fraction {
  simplify(n1 * d2, d1 * n2)
}

pub fn calculate_fraction(op: Operation, a: Fraction, b: Fraction) -> Fraction {
  match op {
    Operation::Addition => add_fractions(a, b),
    Operation::Subtraction => subtract_fractions(a, b),
    Operation::Multiplication => multiply_fractions(a, b),
    Operation::Division => divide_fractions(a, b),
  }
}

/// True when `a` is strictly smaller than `b`.
pub fn is_less((n1, d1): Fraction, (n2, d2): Fraction) -> bool {
  n1 * d2 < n2 * d1
}

/// Mixed-number addition and subtraction. The answer is a proper mixed
/// number in lowest terms.
pub fn calculate_mixed(op: Operation, a: Mixed, b: Mixed) -> Result<Mixed> {
  let result = match op {
    Operation::Addition => add_fractions(to_improper(a), to_improper(b)),
    Operation::Subtraction => subtract_fractions(to_improper(a), to_improper(b)),
    other => {
      return Err(EngineError::UnsupportedOperation(format!("{other} on mixed numbers")));
    }
  };
  Ok(to_mixed(result.0, result.1))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gcd_and_lcm() {
    assert_eq!(gcd(12, 18), 6);
    assert_eq!(gcd(7, 0), 7);
    assert_eq!(gcd(-4, 6), 2);
    assert_eq!(lcm(4, 6), 12);
    assert_eq!(lcm(3, 5), 15);
  }

  #[test]
  fn simplify_normalizes_sign_and_zero() {
    assert_eq!(simplify(6, 8), (3, 4));
    assert_eq!(simplify(0, 9), (0, 1));
    assert_eq!(simplify(3, -6), (-1, 2));
  }

  #[test]
  fn four_operations_reduce() {
    assert_eq!(add_fractions((1, 6), (1, 3)), (1, 2));
    assert_eq!(subtract_fractions((4, 5), (1, 5)), (3, 5));
    assert_eq!(multiply_fractions((2, 3), (3, 4)), (1, 2));
    assert_eq!(divide_fractions((3, 4), (3, 8)), (2, 1));
  }

  #[test]
  fn subtraction_never_goes_negative() {
    assert_eq!(subtract_fractions((1, 4), (1, 2)), (1, 4));
    assert_eq!(subtract_fractions((2, 3), (2, 3)), (0, 1));
  }

  #[test]
  fn mixed_conversions() {
    assert_eq!(to_mixed(7, 3), (2, 1, 3));
    assert_eq!(to_improper((2, 1, 3)), (7, 3));
    assert_eq!(calculate_mixed(Operation::Addition, (1, 2, 3), (2, 2, 3)).unwrap(), (4, 1, 3));
    assert_eq!(calculate_mixed(Operation::Subtraction, (3, 1, 4), (1, 3, 4)).unwrap(), (1, 1, 2));
  }

  #[test]
  fn mixed_multiplication_is_unsupported() {
    let err = calculate_mixed(Operation::Multiplication, (1, 1, 2), (1, 1, 2)).unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedOperation(_)));
  }
}

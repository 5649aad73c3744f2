//! Controlled-precision decimal helpers.
//!
//! Values are stored as `f64`, but every value that reaches a problem goes
//! through `round_to_decimal_places`, which works on the value scaled to an
//! integer so binary drift (`0.1 + 0.2`) never shows up on a worksheet.

use rand::Rng;

use crate::domain::Operation;
use crate::random::random_int;

/// Fractional digits in the shortest decimal representation of `x`.
pub fn get_decimal_places(x: f64) -> u32 {
  let text = format_decimal(x);
  match text.split_once('.') {
    Some((_, frac)) => frac.len() as u32,
    None => 0,
  }
}

/// Half away from zero, computed on the scaled integer.
pub fn round_to_decimal_places(x: f64, places: u32) -> f64 {
  scaled(x, places) as f64 / 10_f64.powi(places as i32)
}

/// `x` as an integer count of `10^-places` units.
pub fn scaled(x: f64, places: u32) -> i64 {
  (x * 10_f64.powi(places as i32)).round() as i64
}

pub fn unscaled(n: i64, places: u32) -> f64 {
  round_to_decimal_places(n as f64 / 10_f64.powi(places as i32), places)
}

/// Display form with float noise beyond 10 places removed.
pub fn format_decimal(x: f64) -> String {
  let clean = round_to_decimal_places(x, 10);
  if clean == 0.0 {
    return "0".into();
  }
  format!("{clean}")
}

/// Uniform value in `[min, max]` on the `10^-places` grid.
pub fn sample_decimal<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, places: u32) -> f64 {
  let factor = 10_f64.powi(places as i32);
  let lo = (min * factor - 1e-9).ceil() as i64;
  let hi = ((max * factor + 1e-9).floor() as i64).max(lo);
  unscaled(random_int(rng, lo, hi), places)
}

pub fn evaluate(op: Operation, a: f64, b: f64, places: u32) -> f64 {
  let raw = match op {
    Operation::Addition => a + b,
    Operation::Subtraction => a - b,
    Operation::Multiplication => a * b,
    Operation::Division => {
      if b == 0.0 {
        return 0.0;
      }
      a / b
    }
  };
  round_to_decimal_places(raw, places)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn rounding_removes_binary_drift() {
    assert_eq!(round_to_decimal_places(0.1 + 0.2, 1), 0.3);
    assert_eq!(round_to_decimal_places(1.23456, 2), 1.23);
    assert_eq!(round_to_decimal_places(2.5, 0), 3.0);
  }

  #[test]
  fn scaled_counts_grid_units() {
    assert_eq!(scaled(0.1 + 0.2, 1), 3);
    assert_eq!(scaled(2.5, 1), 25);
    assert_eq!(scaled(-0.25, 2), -25);
    assert_eq!(unscaled(scaled(4.75, 2), 2), 4.75);
  }

  #[test]
  fn decimal_places_of_values() {
    assert_eq!(get_decimal_places(3.0), 0);
    assert_eq!(get_decimal_places(0.25), 2);
    assert_eq!(get_decimal_places(0.1 + 0.2), 1);
    assert_eq!(get_decimal_places(12.5), 1);
  }

  #[test]
  fn sampled_values_stay_on_grid() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
      let x = sample_decimal(&mut rng, 0.1, 9.9, 1);
      assert!((0.1..=9.9).contains(&x));
      assert!(get_decimal_places(x) <= 1);
    }
  }

  #[test]
  fn evaluate_rounds_to_places() {
    assert_eq!(evaluate(Operation::Multiplication, 1.2, 0.3, 2), 0.36);
    assert_eq!(evaluate(Operation::Subtraction, 5.0, 4.7, 1), 0.3);
    assert_eq!(evaluate(Operation::Division, 4.8, 1.2, 1), 4.0);
  }
}

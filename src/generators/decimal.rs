//! Decimal problems at a controlled precision.

use rand::Rng;

use super::{rejection_sample, GenerationOptions, Sampled, MAX_ATTEMPTS};
use crate::decimal::{get_decimal_places, round_to_decimal_places, sample_decimal};
use crate::domain::{DecimalProblem, Operation, WorksheetSettings};
use crate::random::{problem_id, random_int};

/// Operands are drawn on the `10^-decimal_places` grid (default one place,
/// range `[0.1, 10]`). Division builds `dividend = quotient × divisor` so the
/// quotient is exact. `times_table` turns operand2 of a multiplication or
/// division into that whole number, `0` meaning "any of 2–9".
pub fn generate_decimal_problem<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  options: &GenerationOptions,
) -> Sampled<DecimalProblem> {
  let op = settings.operation;
  let places = options.decimal_places.unwrap_or(1).clamp(1, 3);
  let unit = round_to_decimal_places(10_f64.powi(-(places as i32)), places);
  let min = options.min_decimal.unwrap_or(unit).max(unit);
  let max = options.max_decimal.unwrap_or(10.0).max(min);
  let whole_operand2 = options.times_table;

  let sampled = rejection_sample(rng, MAX_ATTEMPTS, "decimal", |rng| {
    let draw_operand2 = |rng: &mut R| match whole_operand2 {
      Some(n) if n > 0 => n as f64,
      Some(_) => random_int(rng, 2, 9) as f64,
      None => sample_decimal(rng, min, max, places),
    };
    let (a, b, answer) = match op {
      Operation::Addition => {
        let (a, b) = (sample_decimal(rng, min, max, places), sample_decimal(rng, min, max, places));
        (a, b, round_to_decimal_places(a + b, places))
      }
      Operation::Subtraction => {
        let (mut a, mut b) = (sample_decimal(rng, min, max, places), sample_decimal(rng, min, max, places));
        if a < b {
          std::mem::swap(&mut a, &mut b);
        }
        (a, b, round_to_decimal_places(a - b, places))
      }
      Operation::Multiplication => {
        let a = sample_decimal(rng, min, max, places);
        let b = draw_operand2(&mut *rng);
        (a, b, round_to_decimal_places(a * b, places * 2))
      }
      Operation::Division => {
        let quotient = sample_decimal(rng, min, max, places);
        let divisor = draw_operand2(&mut *rng);
        let dividend = round_to_decimal_places(quotient * divisor, places * 2);
        (dividend, divisor, quotient)
      }
    };
    let decimal_places = [a, b, answer].into_iter().map(get_decimal_places).max().unwrap_or(places);
    let ok = answer > 0.0 && b > 0.0;
    let p = DecimalProblem {
      id: String::new(),
      operation: op,
      operand1: a,
      operand2: b,
      answer,
      decimal_places,
    };
    (p, ok)
  });
  let id = problem_id(rng);
  sampled.map(|p| DecimalProblem { id, ..p })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Problem, ProblemType};
  use rand::{rngs::StdRng, SeedableRng};

  fn settings(op: Operation) -> WorksheetSettings {
    WorksheetSettings::new(4, ProblemType::Decimal, op)
  }

  #[test]
  fn every_operation_is_exact_at_its_precision() {
    let mut rng = StdRng::seed_from_u64(41);
    for op in Operation::ALL {
      for places in 1..=2 {
        let opts = GenerationOptions { decimal_places: Some(places), ..Default::default() };
        for _ in 0..50 {
          let p = generate_decimal_problem(&mut rng, &settings(op), &opts).problem;
          assert!(p.answer > 0.0, "{op}: {p:?}");
          assert!(get_decimal_places(p.answer) <= p.decimal_places);
          assert!(Problem::Decimal(p).check_answer());
        }
      }
    }
  }

  #[test]
  fn tenths_addition_has_one_place() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
      let p = generate_decimal_problem(&mut rng, &settings(Operation::Addition), &GenerationOptions::default()).problem;
      assert!(p.decimal_places <= 1);
      assert!((0.1..=10.0).contains(&p.operand1));
    }
  }

  #[test]
  fn whole_divisor() {
    let mut rng = StdRng::seed_from_u64(43);
    let opts = GenerationOptions { times_table: Some(0), ..Default::default() };
    for _ in 0..50 {
      let p = generate_decimal_problem(&mut rng, &settings(Operation::Division), &opts).problem;
      assert_eq!(p.operand2.fract(), 0.0);
      assert!((2.0..=9.0).contains(&p.operand2));
    }
  }
}

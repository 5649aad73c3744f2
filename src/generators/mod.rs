//! Problem generators.
//!
//! Single-problem generators are bounded rejection samplers: draw a
//! candidate, test it, retry up to `MAX_ATTEMPTS` times. When the budget runs
//! out the last candidate is kept anyway, flagged `satisfied = false` and
//! logged, so a worksheet is always produced.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::MissingPosition;

pub mod arithmetic;
pub mod batch;
pub mod decimal;
pub mod fraction;
pub mod grade;
pub mod hissan;

pub use arithmetic::{
  generate_addition_problem, generate_division_problem, generate_multiplication_problem,
  generate_subtraction_problem,
};
pub use batch::{
  collect_unique, try_collect_unique, generate_addition_problems, generate_decimal_problems, generate_division_problems,
  generate_fraction_problems, generate_hissan_problems, generate_multiplication_problems,
  generate_subtraction_problems,
};
pub use decimal::generate_decimal_problem;
pub use fraction::{generate_fraction_problem, generate_mixed_number_problem};
pub use grade::{
  generate_grade_addition_problems, generate_grade_decimal_problems, generate_grade_division_problems,
  generate_grade_fraction_problems, generate_grade_multiplication_problems,
  generate_grade_subtraction_problems,
};
pub use hissan::{generate_hissan_problem, get_number_range};

/// Attempt budget of every single-problem generator.
pub const MAX_ATTEMPTS: usize = 100;

/// A generated value and whether it met every requested constraint.
#[derive(Clone, Debug)]
pub struct Sampled<T> {
  pub problem: T,
  pub satisfied: bool,
  pub attempts: usize,
}

impl<T> Sampled<T> {
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sampled<U> {
    Sampled { problem: f(self.problem), satisfied: self.satisfied, attempts: self.attempts }
  }
}

/// Per-call overrides. Unset fields fall back to the worksheet settings and
/// then to the generator's own defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
  pub min_number: Option<i64>,
  pub max_number: Option<i64>,
  pub digit_count: Option<u32>,
  pub include_carry_over: Option<bool>,
  pub exclude_carry_over: Option<bool>,
  pub allow_negative: Option<bool>,
  /// Times-table focus: one operand is fixed to this value.
  pub times_table: Option<i64>,
  pub max_answer: Option<i64>,
  pub allow_remainder: Option<bool>,
  pub exact_division_only: Option<bool>,
  pub times_table_based: Option<bool>,
  pub max_quotient: Option<i64>,
  pub missing_position: Option<MissingPosition>,
  pub common_denominator: Option<bool>,
  pub max_denominator: Option<i64>,
  pub require_simplification: Option<bool>,
  pub allow_improper: Option<bool>,
  pub decimal_places: Option<u32>,
  /// Lower bound for decimal operands (`min_number` covers integers).
  pub min_decimal: Option<f64>,
  pub max_decimal: Option<f64>,
}

impl GenerationOptions {
  pub fn range(min: i64, max: i64) -> Self {
    Self { min_number: Some(min), max_number: Some(max), ..Self::default() }
  }
}

/// Runs `draw` until it reports success or the budget is spent.
pub(crate) fn rejection_sample<R, T>(
  rng: &mut R,
  attempts: usize,
  label: &'static str,
  mut draw: impl FnMut(&mut R) -> (T, bool),
) -> Sampled<T>
where
  R: Rng + ?Sized,
{
  let (mut last, ok) = draw(rng);
  if ok {
    return Sampled { problem: last, satisfied: true, attempts: 1 };
  }
  for attempt in 2..=attempts.max(1) {
    let (candidate, ok) = draw(rng);
    if ok {
      return Sampled { problem: candidate, satisfied: true, attempts: attempt };
    }
    last = candidate;
  }
  warn!(target: "generator", generator = label, attempts, "Constraints unsatisfied; accepting last candidate");
  Sampled { problem: last, satisfied: false, attempts: attempts.max(1) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn rejection_sample_reports_success_attempt() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut n = 0;
    let s = rejection_sample(&mut rng, 10, "test", |_| {
      n += 1;
      (n, n == 3)
    });
    assert!(s.satisfied);
    assert_eq!(s.problem, 3);
    assert_eq!(s.attempts, 3);
  }

  #[test]
  fn rejection_sample_fails_open_with_last_candidate() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut n = 0;
    let s = rejection_sample(&mut rng, 5, "test", |_| {
      n += 1;
      (n, false)
    });
    assert!(!s.satisfied);
    assert_eq!(s.problem, 5);
  }
}

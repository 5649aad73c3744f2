//! Fraction and mixed-number problems.

use rand::Rng;

use super::{rejection_sample, GenerationOptions, Sampled, MAX_ATTEMPTS};
use crate::domain::{FractionProblem, MixedNumberProblem, Operation, WorksheetSettings};
use crate::error::{EngineError, Result};
use crate::fraction::{calculate_fraction, calculate_mixed, gcd, is_less, lcm, to_improper, Fraction};
use crate::random::{problem_id, random_int};

const DEFAULT_MAX_DENOMINATOR: i64 = 10;

/// Result before reduction; used to tell whether an answer needs simplifying.
fn unreduced(op: Operation, (n1, d1): Fraction, (n2, d2): Fraction) -> Fraction {
  match op {
    Operation::Addition | Operation::Subtraction => {
      let common = lcm(d1, d2);
      let (a, b) = (n1 * (common / d1), n2 * (common / d2));
      let n = if op == Operation::Addition { a + b } else { (a - b).abs() };
      (n, common)
    }
    Operation::Multiplication => (n1 * n2, d1 * d2),
    Operation::Division => (n1 * d2, d1 * n2),
  }
}

/// `common_denominator`: `Some(true)` shares one denominator, `Some(false)`
/// demands two different ones, unset draws them independently.
pub fn generate_fraction_problem<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  options: &GenerationOptions,
) -> Sampled<FractionProblem> {
  let op = settings.operation;
  let max_den = options.max_denominator.unwrap_or(DEFAULT_MAX_DENOMINATOR).max(2);
  let improper = options.allow_improper.unwrap_or(false);
  let require_simplification = options.require_simplification.unwrap_or(false);
  let common = options.common_denominator;
  let numerator_max = |d: i64| if improper { 2 * d - 1 } else { d - 1 };

  let sampled = rejection_sample(rng, MAX_ATTEMPTS, "fraction", |rng| {
    let d1 = random_int(rng, 2, max_den);
    let d2 = if common == Some(true) { d1 } else { random_int(rng, 2, max_den) };
    let mut a = (random_int(rng, 1, numerator_max(d1)), d1);
    let mut b = (random_int(rng, 1, numerator_max(d2)), d2);
    if op == Operation::Subtraction && is_less(a, b) {
      std::mem::swap(&mut a, &mut b);
    }
    let (answer_numerator, answer_denominator) = calculate_fraction(op, a, b);
    let raw = unreduced(op, a, b);

    let ok = answer_numerator != 0
      && (common != Some(false) || a.1 != b.1)
      && (!require_simplification || gcd(raw.0, raw.1) > 1);

    let p = FractionProblem {
      id: String::new(),
      operation: op,
      numerator1: a.0,
      denominator1: a.1,
      numerator2: b.0,
      denominator2: b.1,
      answer_numerator,
      answer_denominator,
      simplified: true,
    };
    (p, ok)
  });
  let id = problem_id(rng);
  sampled.map(|p| FractionProblem { id, ..p })
}

/// Like-denominator mixed numbers. Only addition and subtraction are drilled
/// with mixed numbers; other operations are rejected.
pub fn generate_mixed_number_problem<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  options: &GenerationOptions,
) -> Result<Sampled<MixedNumberProblem>> {
  let op = settings.operation;
  if !matches!(op, Operation::Addition | Operation::Subtraction) {
    return Err(EngineError::UnsupportedOperation(format!("{op} on mixed numbers")));
  }

  let max_den = options.max_denominator.unwrap_or(9).max(2);
  let whole_min = options.min_number.unwrap_or(1).max(0);
  let whole_max = options.max_number.unwrap_or(5).max(whole_min);

  let sampled = rejection_sample(rng, MAX_ATTEMPTS, "mixed-number", |rng| {
    let d = random_int(rng, 2, max_den);
    let mut a = (random_int(rng, whole_min, whole_max), random_int(rng, 1, d - 1), d);
    let mut b = (random_int(rng, whole_min, whole_max), random_int(rng, 1, d - 1), d);
    if op == Operation::Subtraction && is_less(to_improper(a), to_improper(b)) {
      std::mem::swap(&mut a, &mut b);
    }
    let answer = calculate_mixed(op, a, b).unwrap_or((0, 0, d));
    let ok = answer.0 > 0 || answer.1 > 0;
    let p = MixedNumberProblem {
      id: String::new(),
      operation: op,
      whole1: a.0,
      numerator1: a.1,
      denominator1: a.2,
      whole2: b.0,
      numerator2: b.1,
      denominator2: b.2,
      answer_whole: answer.0,
      answer_numerator: answer.1,
      answer_denominator: answer.2,
    };
    (p, ok)
  });
  let id = problem_id(rng);
  Ok(sampled.map(|p| MixedNumberProblem { id, ..p }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Problem, ProblemType};
  use rand::{rngs::StdRng, SeedableRng};

  fn settings(op: Operation) -> WorksheetSettings {
    WorksheetSettings::new(4, ProblemType::Fraction, op)
  }

  #[test]
  fn common_denominator_subtraction_on_fifths() {
    let mut rng = StdRng::seed_from_u64(31);
    let opts = GenerationOptions { common_denominator: Some(true), max_denominator: Some(5), ..Default::default() };
    for _ in 0..100 {
      let p = generate_fraction_problem(&mut rng, &settings(Operation::Subtraction), &opts).problem;
      assert_eq!(p.denominator1, p.denominator2);
      assert!(p.numerator1 > p.numerator2);
      if (p.denominator1, p.numerator1, p.numerator2) == (5, 4, 1) {
        assert_eq!((p.answer_numerator, p.answer_denominator), (3, 5));
      }
      assert!(Problem::Fraction(p).check_answer());
    }
  }

  #[test]
  fn answers_are_in_lowest_terms() {
    let mut rng = StdRng::seed_from_u64(32);
    for op in Operation::ALL {
      for _ in 0..50 {
        let p = generate_fraction_problem(&mut rng, &settings(op), &GenerationOptions::default()).problem;
        assert!(p.answer_denominator > 0);
        assert_eq!(gcd(p.answer_numerator, p.answer_denominator), 1);
      }
    }
  }

  #[test]
  fn unlike_denominators_differ() {
    let mut rng = StdRng::seed_from_u64(33);
    let opts = GenerationOptions { common_denominator: Some(false), ..Default::default() };
    for _ in 0..50 {
      let p = generate_fraction_problem(&mut rng, &settings(Operation::Addition), &opts).problem;
      assert_ne!(p.denominator1, p.denominator2);
    }
  }

  #[test]
  fn simplification_required() {
    let mut rng = StdRng::seed_from_u64(34);
    let opts = GenerationOptions {
      common_denominator: Some(true),
      require_simplification: Some(true),
      ..Default::default()
    };
    let s = generate_fraction_problem(&mut rng, &settings(Operation::Addition), &opts);
    assert!(s.satisfied);
    let p = s.problem;
    assert!(p.answer_denominator < p.denominator1 || p.answer_numerator < p.numerator1 + p.numerator2);
  }

  #[test]
  fn mixed_numbers_stay_proper() {
    let mut rng = StdRng::seed_from_u64(35);
    for op in [Operation::Addition, Operation::Subtraction] {
      for _ in 0..50 {
        let p = generate_mixed_number_problem(&mut rng, &settings(op), &GenerationOptions::default())
          .unwrap()
          .problem;
        assert!(p.answer_numerator < p.answer_denominator);
        assert!(Problem::Mixed(p).check_answer());
      }
    }
  }

  #[test]
  fn mixed_numbers_reject_division() {
    let mut rng = StdRng::seed_from_u64(36);
    let err = generate_mixed_number_problem(&mut rng, &settings(Operation::Division), &GenerationOptions::default());
    assert!(matches!(err, Err(EngineError::UnsupportedOperation(_))));
  }
}

//! Vertical-form ("hissan") problems. Digit bands come from the grade.

use rand::Rng;

use super::arithmetic::Regroup;
use super::{rejection_sample, GenerationOptions, Sampled, MAX_ATTEMPTS};
use crate::domain::{HissanProblem, Operation, WorksheetSettings};
use crate::random::{digit_count, has_borrow, has_carry_over, problem_id, random_int};

/// Operand bands for one grade and operation. For division the first band is
/// the quotient and the second the divisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberRange {
  pub min1: i64,
  pub max1: i64,
  pub min2: i64,
  pub max2: i64,
}

const fn band(min1: i64, max1: i64, min2: i64, max2: i64) -> NumberRange {
  NumberRange { min1, max1, min2, max2 }
}

pub fn get_number_range(grade: u8, op: Operation) -> NumberRange {
  match (op, grade) {
    (Operation::Addition | Operation::Subtraction, 0..=2) => band(10, 99, 10, 99),
    (Operation::Addition | Operation::Subtraction, 3) => band(100, 999, 100, 999),
    (Operation::Addition | Operation::Subtraction, _) => band(1000, 9999, 1000, 9999),
    (Operation::Multiplication, 0..=3) => band(10, 99, 1, 9),
    (Operation::Multiplication, 4) => band(100, 999, 1, 9),
    (Operation::Multiplication, _) => band(100, 999, 10, 99),
    (Operation::Division, 0..=3) => band(1, 9, 2, 9),
    (Operation::Division, 4) => band(10, 99, 2, 9),
    (Operation::Division, _) => band(10, 99, 10, 99),
  }
}

/// True when any single-digit partial product carries into the next column.
pub fn multiplication_carries(a: i64, b: i64) -> bool {
  let mut b = b.abs();
  while b > 0 {
    let digit = b % 10;
    let mut rest = a.abs();
    let mut carry = 0;
    while rest > 0 {
      let product = (rest % 10) * digit + carry;
      if product >= 10 {
        return true;
      }
      carry = product / 10;
      rest /= 10;
    }
    b /= 10;
  }
  false
}

fn candidate(op: Operation, a: i64, b: i64, answer: i64) -> HissanProblem {
  HissanProblem {
    id: String::new(),
    operation: op,
    operand1: a,
    operand2: b,
    answer,
    remainder: None,
    carry_over: false,
    show_carry: false,
    show_partial_products: false,
  }
}

/// Explicit `min_number`/`max_number` narrow the first band (both bands for
/// addition and subtraction). Division draws divisor and quotient and only
/// carries a remainder from grade 4 up.
pub fn generate_hissan_problem<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  options: &GenerationOptions,
) -> Sampled<HissanProblem> {
  let op = settings.operation;
  let mut range = get_number_range(settings.grade, op);
  if op != Operation::Division {
    range.min1 = options.min_number.unwrap_or(range.min1);
    range.max1 = options.max_number.unwrap_or(range.max1);
    if matches!(op, Operation::Addition | Operation::Subtraction) {
      range.min2 = range.min1;
      range.max2 = range.max1;
    }
  }
  let regroup = match (options.include_carry_over, options.exclude_carry_over) {
    (Some(true), _) => Regroup::Require,
    (_, Some(true)) => Regroup::Forbid,
    _ => Regroup::Any,
  };
  let with_remainder = settings.grade >= 4 && options.allow_remainder != Some(false);
  let fixed_divisor = options.times_table.filter(|d| *d > 1);

  let sampled = rejection_sample(rng, MAX_ATTEMPTS, "hissan", |rng| match op {
    Operation::Addition => {
      let a = random_int(rng, range.min1, range.max1);
      let b = random_int(rng, range.min2, range.max2);
      let carry = has_carry_over(a, b);
      let mut p = candidate(op, a, b, a + b);
      p.carry_over = carry;
      p.show_carry = carry;
      (p, regroup.accepts(carry))
    }
    Operation::Subtraction => {
      let mut a = random_int(rng, range.min1, range.max1);
      let mut b = random_int(rng, range.min2, range.max2);
      if a < b {
        std::mem::swap(&mut a, &mut b);
      }
      let borrow = has_borrow(a, b);
      let mut p = candidate(op, a, b, a - b);
      p.carry_over = borrow;
      p.show_carry = borrow;
      (p, regroup.accepts(borrow) && a != b)
    }
    Operation::Multiplication => {
      let a = random_int(rng, range.min1, range.max1);
      let b = random_int(rng, range.min2, range.max2);
      let carry = multiplication_carries(a, b);
      let mut p = candidate(op, a, b, a * b);
      p.carry_over = carry;
      p.show_carry = carry;
      p.show_partial_products = digit_count(b) > 1;
      (p, regroup.accepts(carry))
    }
    Operation::Division => {
      let divisor = fixed_divisor.unwrap_or_else(|| random_int(rng, range.min2, range.max2));
      let quotient = random_int(rng, range.min1, range.max1);
      let remainder = if with_remainder { random_int(rng, 1, divisor - 1) } else { 0 };
      let mut p = candidate(op, quotient * divisor + remainder, divisor, quotient);
      p.remainder = Some(remainder);
      p.show_partial_products = true;
      (p, true)
    }
  });
  let id = problem_id(rng);
  sampled.map(|p| HissanProblem { id, ..p })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Problem, ProblemType};
  use rand::{rngs::StdRng, SeedableRng};

  fn settings(grade: u8, op: Operation) -> WorksheetSettings {
    WorksheetSettings::new(grade, ProblemType::Hissan, op)
  }

  #[test]
  fn grade_three_division_has_no_remainder() {
    let mut rng = StdRng::seed_from_u64(51);
    let mut saw_28 = false;
    for _ in 0..1000 {
      let p = generate_hissan_problem(&mut rng, &settings(3, Operation::Division), &GenerationOptions::default()).problem;
      assert_eq!(p.remainder, Some(0));
      assert_eq!(p.operand1, p.answer * p.operand2);
      if p.operand2 == 4 && p.answer == 7 {
        assert_eq!(p.operand1, 28);
        saw_28 = true;
      }
    }
    assert!(saw_28);
  }

  #[test]
  fn grade_four_division_injects_remainder() {
    let mut rng = StdRng::seed_from_u64(52);
    for _ in 0..100 {
      let p = generate_hissan_problem(&mut rng, &settings(4, Operation::Division), &GenerationOptions::default()).problem;
      let r = p.remainder.unwrap();
      assert!(r >= 1 && r < p.operand2);
      assert!(Problem::Hissan(p).check_answer());
    }
  }

  #[test]
  fn digit_bands_follow_grade() {
    let mut rng = StdRng::seed_from_u64(53);
    for _ in 0..50 {
      let p = generate_hissan_problem(&mut rng, &settings(3, Operation::Addition), &GenerationOptions::default()).problem;
      assert_eq!(digit_count(p.operand1), 3);
      assert_eq!(digit_count(p.operand2), 3);
      let m = generate_hissan_problem(&mut rng, &settings(5, Operation::Multiplication), &GenerationOptions::default()).problem;
      assert_eq!(digit_count(m.operand2), 2);
      assert!(m.show_partial_products);
    }
  }

  #[test]
  fn multiplication_carry_detection() {
    assert!(multiplication_carries(25, 4));
    assert!(!multiplication_carries(21, 3));
    assert!(multiplication_carries(12, 15));
  }
}

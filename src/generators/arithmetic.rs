//! Integer problems in horizontal form: addition, subtraction,
//! multiplication and division.

use rand::Rng;

use super::grade::{divisor_range, grade_number_range};
use super::{rejection_sample, GenerationOptions, Sampled, MAX_ATTEMPTS};
use crate::domain::{BasicProblem, Operation, WorksheetSettings};
use crate::missing::blank_slot;
use crate::random::{digit_range, has_borrow, has_carry_over, problem_id, random_int};

/// Carry/borrow requirement after merging options over settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Regroup {
  Any,
  Require,
  Forbid,
}

impl Regroup {
  pub(crate) fn accepts(self, regrouped: bool) -> bool {
    match self {
      Regroup::Any => true,
      Regroup::Require => regrouped,
      Regroup::Forbid => !regrouped,
    }
  }
}

fn resolve_regroup(settings: &WorksheetSettings, options: &GenerationOptions) -> Regroup {
  if options.include_carry_over == Some(true) {
    return Regroup::Require;
  }
  if options.exclude_carry_over == Some(true) {
    return Regroup::Forbid;
  }
  if options.include_carry_over.is_some() {
    return Regroup::Any;
  }
  match settings.include_carry_over {
    Some(true) => Regroup::Require,
    Some(false) => Regroup::Forbid,
    None => Regroup::Any,
  }
}

/// Operand range: `digit_count` wins, then explicit bounds, then settings, then grade.
pub(crate) fn resolve_range(settings: &WorksheetSettings, options: &GenerationOptions, op: Operation) -> (i64, i64) {
  if let Some(k) = options.digit_count {
    return digit_range(k);
  }
  let (lo, hi) = grade_number_range(settings.grade, op);
  let min = options.min_number.or(settings.min_number).unwrap_or(lo);
  let max = options.max_number.or(settings.max_number).unwrap_or(hi);
  (min, max)
}

fn candidate(op: Operation, a: i64, b: i64, answer: i64) -> BasicProblem {
  BasicProblem {
    id: String::new(),
    operation: op,
    operand1: Some(a),
    operand2: Some(b),
    answer: Some(answer),
    remainder: None,
    missing_position: None,
    carry_over: None,
  }
}

/// Assigns the id and hides the requested slot.
fn finish<R: Rng + ?Sized>(
  rng: &mut R,
  sampled: Sampled<BasicProblem>,
  options: &GenerationOptions,
) -> Sampled<BasicProblem> {
  let id = problem_id(rng);
  sampled.map(|mut p| {
    p.id = id;
    match options.missing_position {
      Some(pos) => blank_slot(p, pos),
      None => p,
    }
  })
}

pub fn generate_addition_problem<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  options: &GenerationOptions,
) -> Sampled<BasicProblem> {
  let (min, max) = resolve_range(settings, options, Operation::Addition);
  let regroup = resolve_regroup(settings, options);
  let max_answer = options.max_answer;

  let sampled = rejection_sample(rng, MAX_ATTEMPTS, "addition", |rng| {
    let a = random_int(rng, min, max);
    let b = random_int(rng, min, max);
    let carry = has_carry_over(a, b);
    let ok = regroup.accepts(carry) && max_answer.map_or(true, |m| a + b <= m);
    let mut p = candidate(Operation::Addition, a, b, a + b);
    p.carry_over = Some(carry);
    (p, ok)
  });
  finish(rng, sampled, options)
}

pub fn generate_subtraction_problem<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  options: &GenerationOptions,
) -> Sampled<BasicProblem> {
  let (min, max) = resolve_range(settings, options, Operation::Subtraction);
  let regroup = resolve_regroup(settings, options);
  let allow_negative = options.allow_negative.unwrap_or(false);
  let max_answer = options.max_answer;

  let sampled = rejection_sample(rng, MAX_ATTEMPTS, "subtraction", |rng| {
    let mut a = random_int(rng, min, max);
    let mut b = random_int(rng, min, max);
    if a < b && !allow_negative {
      std::mem::swap(&mut a, &mut b);
    }
    let borrow = if a >= b { has_borrow(a, b) } else { has_borrow(b, a) };
    let ok = regroup.accepts(borrow) && max_answer.map_or(true, |m| a - b <= m);
    let mut p = candidate(Operation::Subtraction, a, b, a - b);
    p.carry_over = Some(borrow);
    (p, ok)
  });
  finish(rng, sampled, options)
}

pub fn generate_multiplication_problem<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  options: &GenerationOptions,
) -> Sampled<BasicProblem> {
  let (min, max) = resolve_range(settings, options, Operation::Multiplication);
  let focus = options.times_table;
  let max_answer = options.max_answer;

  let sampled = rejection_sample(rng, MAX_ATTEMPTS, "multiplication", |rng| {
    let (a, b) = match focus {
      Some(t) => {
        let other = random_int(rng, min, max);
        if rng.gen_bool(0.5) { (t, other) } else { (other, t) }
      }
      None => (random_int(rng, min, max), random_int(rng, min, max)),
    };
    let ok = max_answer.map_or(true, |m| a * b <= m);
    (candidate(Operation::Multiplication, a, b, a * b), ok)
  });
  finish(rng, sampled, options)
}

/// Times-table mode builds `dividend = quotient × divisor`, so it never
/// retries. Free mode samples the dividend and rejects by remainder policy.
pub fn generate_division_problem<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  options: &GenerationOptions,
) -> Sampled<BasicProblem> {
  let (div_lo, div_hi) = divisor_range(settings.grade);
  let allow_remainder = options.allow_remainder.unwrap_or(false);
  let exact_only = options.exact_division_only.unwrap_or(!allow_remainder);
  let max_quotient = options.max_quotient;
  let fixed_divisor = options.times_table.filter(|d| *d > 0);

  let sampled = if options.times_table_based.unwrap_or(false) {
    let q_max = max_quotient.unwrap_or(9).max(1);
    rejection_sample(rng, MAX_ATTEMPTS, "division", |rng| {
      let divisor = fixed_divisor.unwrap_or_else(|| random_int(rng, div_lo, div_hi));
      let quotient = random_int(rng, 1, q_max);
      (candidate(Operation::Division, quotient * divisor, divisor, quotient), true)
    })
  } else {
    let (min, max) = resolve_range(settings, options, Operation::Division);
    rejection_sample(rng, MAX_ATTEMPTS, "division", |rng| {
      let dividend = random_int(rng, min.max(1), max.max(1));
      let divisor = fixed_divisor.unwrap_or_else(|| random_int(rng, div_lo, div_hi)).max(1);
      let (quotient, remainder) = (dividend / divisor, dividend % divisor);
      let ok = quotient >= 1
        && !(exact_only && remainder != 0)
        && max_quotient.map_or(true, |m| quotient <= m);
      let mut p = candidate(Operation::Division, dividend, divisor, quotient);
      p.remainder = (remainder != 0).then_some(remainder);
      (p, ok)
    })
  };
  finish(rng, sampled, options)
}

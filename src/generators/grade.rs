//! Grade-calibrated generators: number ranges and topic gating per school year.
//!
//! A topic not yet taught in a grade yields an empty sequence.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::instrument;

use super::batch::{
  collect_unique, generate_addition_problems, generate_decimal_problems, generate_division_problems,
  generate_subtraction_problems,
};
use super::{
  generate_decimal_problem, generate_fraction_problem, generate_multiplication_problem, GenerationOptions,
};
use crate::domain::{Operation, Problem, ProblemType, WorksheetSettings};
use crate::random::random_int;

/// Default operand range of the horizontal-form generators. For division it
/// bounds the dividend.
pub fn grade_number_range(grade: u8, op: Operation) -> (i64, i64) {
  match (op, grade) {
    (Operation::Addition | Operation::Subtraction, 0..=1) => (1, 9),
    (Operation::Addition | Operation::Subtraction, 2) => (10, 99),
    (Operation::Addition | Operation::Subtraction, 3) => (100, 999),
    (Operation::Addition | Operation::Subtraction, _) => (1000, 9999),
    (Operation::Multiplication, 0..=2) => (1, 9),
    (Operation::Multiplication, 3..=4) => (1, 99),
    (Operation::Multiplication, _) => (10, 999),
    (Operation::Division, 0..=3) => (2, 81),
    (Operation::Division, 4) => (10, 999),
    (Operation::Division, _) => (100, 9999),
  }
}

/// Multiplication and division start in grade 2.
pub fn operation_taught(grade: u8, op: Operation) -> bool {
  grade >= 2 || matches!(op, Operation::Addition | Operation::Subtraction)
}

pub fn divisor_range(grade: u8) -> (i64, i64) {
  if grade >= 5 { (10, 99) } else { (2, 9) }
}

fn settings_for(grade: u8, problem_type: ProblemType, op: Operation, count: usize) -> WorksheetSettings {
  WorksheetSettings::new(grade, problem_type, op).with_count(count)
}

#[instrument(level = "debug", skip(rng))]
pub fn generate_grade_addition_problems<R: Rng + ?Sized>(rng: &mut R, grade: u8, count: usize) -> Vec<Problem> {
  let settings = settings_for(grade, ProblemType::Basic, Operation::Addition, count);
  generate_addition_problems(rng, &settings, count, &GenerationOptions::default())
}

#[instrument(level = "debug", skip(rng))]
pub fn generate_grade_subtraction_problems<R: Rng + ?Sized>(rng: &mut R, grade: u8, count: usize) -> Vec<Problem> {
  let settings = settings_for(grade, ProblemType::Basic, Operation::Subtraction, count);
  // Grade 1 draws both operands from 1..=9 via `grade_number_range`.
  generate_subtraction_problems(rng, &settings, count, &GenerationOptions::default())
}

/// g2 times tables, g3 2-digit × 1-digit, g4 2-digit × 2-digit, g5+ 3-digit × 2-digit.
#[instrument(level = "debug", skip(rng))]
pub fn generate_grade_multiplication_problems<R: Rng + ?Sized>(rng: &mut R, grade: u8, count: usize) -> Vec<Problem> {
  if !operation_taught(grade, Operation::Multiplication) {
    return Vec::new();
  }
  let settings = settings_for(grade, ProblemType::Basic, Operation::Multiplication, count);
  collect_unique(rng, count, "grade-multiplication", |rng| {
    let options = match grade {
      2 => GenerationOptions::range(1, 9),
      3 => GenerationOptions { times_table: Some(random_int(rng, 2, 9)), ..GenerationOptions::range(10, 99) },
      4 => GenerationOptions::range(10, 99),
      _ => GenerationOptions { times_table: Some(random_int(rng, 10, 99)), ..GenerationOptions::range(100, 999) },
    };
    Problem::Basic(generate_multiplication_problem(rng, &settings, &options).problem)
  })
}

/// g2–3 exact times-table division, g4+ free division with remainders.
#[instrument(level = "debug", skip(rng))]
pub fn generate_grade_division_problems<R: Rng + ?Sized>(rng: &mut R, grade: u8, count: usize) -> Vec<Problem> {
  if !operation_taught(grade, Operation::Division) {
    return Vec::new();
  }
  let settings = settings_for(grade, ProblemType::Basic, Operation::Division, count);
  let options = if grade <= 3 {
    GenerationOptions { times_table_based: Some(true), max_quotient: Some(9), ..Default::default() }
  } else {
    GenerationOptions { allow_remainder: Some(true), ..Default::default() }
  };
  generate_division_problems(rng, &settings, count, &options)
}

/// g2–3 like denominators up to 10, g4 like denominators up to 12 with
/// improper fractions, g5 unlike denominators, g6 multiplication and division.
#[instrument(level = "debug", skip(rng))]
pub fn generate_grade_fraction_problems<R: Rng + ?Sized>(rng: &mut R, grade: u8, count: usize) -> Vec<Problem> {
  let (ops, options): (&[Operation], GenerationOptions) = match grade {
    0..=1 => return Vec::new(),
    2..=3 => (
      &[Operation::Addition, Operation::Subtraction],
      GenerationOptions { common_denominator: Some(true), max_denominator: Some(10), ..Default::default() },
    ),
    4 => (
      &[Operation::Addition, Operation::Subtraction],
      GenerationOptions {
        common_denominator: Some(true),
        max_denominator: Some(12),
        allow_improper: Some(true),
        ..Default::default()
      },
    ),
    5 => (
      &[Operation::Addition, Operation::Subtraction],
      GenerationOptions { common_denominator: Some(false), max_denominator: Some(12), ..Default::default() },
    ),
    _ => (
      &[Operation::Multiplication, Operation::Division],
      GenerationOptions { max_denominator: Some(9), ..Default::default() },
    ),
  };
  collect_unique(rng, count, "grade-fraction", |rng| {
    let op = ops.choose(rng).copied().unwrap_or(ops[0]);
    let settings = settings_for(grade, ProblemType::Fraction, op, count);
    Problem::Fraction(generate_fraction_problem(rng, &settings, &options).problem)
  })
}

/// g3 tenths and g4 hundredths add/sub, g5 tenths multiplication, g6 tenths division.
#[instrument(level = "debug", skip(rng))]
pub fn generate_grade_decimal_problems<R: Rng + ?Sized>(rng: &mut R, grade: u8, count: usize) -> Vec<Problem> {
  let places = match grade {
    0..=2 => return Vec::new(),
    4 => 2,
    _ => 1,
  };
  let options = GenerationOptions { decimal_places: Some(places), ..Default::default() };
  match grade {
    3 | 4 => collect_unique(rng, count, "grade-decimal", |rng| {
      let op = if rng.gen_bool(0.5) { Operation::Addition } else { Operation::Subtraction };
      let settings = settings_for(grade, ProblemType::Decimal, op, count);
      Problem::Decimal(generate_decimal_problem(rng, &settings, &options).problem)
    }),
    5 => {
      let settings = settings_for(grade, ProblemType::Decimal, Operation::Multiplication, count);
      generate_decimal_problems(rng, &settings, count, &options)
    }
    _ => {
      let settings = settings_for(grade, ProblemType::Decimal, Operation::Division, count);
      generate_decimal_problems(rng, &settings, count, &options)
    }
  }
}

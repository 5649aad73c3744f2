//! Batch generators: N problems from a single-problem generator with
//! best-effort uniqueness inside the batch.

use std::collections::HashSet;
use std::convert::Infallible;

use rand::Rng;
use tracing::{debug, instrument, warn};

use super::{
  generate_addition_problem, generate_decimal_problem, generate_division_problem, generate_fraction_problem,
  generate_hissan_problem, generate_multiplication_problem, generate_subtraction_problem, GenerationOptions,
};
use crate::domain::{Problem, WorksheetSettings};

/// Redraws allowed per slot before a duplicate is accepted.
pub const MAX_UNIQUE_ATTEMPTS: usize = 50;

fn is_duplicate(seen: &HashSet<String>, p: &Problem) -> bool {
  seen.contains(&p.canonical_key()) || p.swapped_key().is_some_and(|k| seen.contains(&k))
}

/// Fills `count` slots from `generate`, redrawing collisions on the canonical
/// key (both operand orders for commutative operations). A slot that still
/// collides after `MAX_UNIQUE_ATTEMPTS` keeps its duplicate.
pub fn collect_unique<R, F>(rng: &mut R, count: usize, label: &'static str, mut generate: F) -> Vec<Problem>
where
  R: Rng + ?Sized,
  F: FnMut(&mut R) -> Problem,
{
  match try_collect_unique::<R, Infallible, _>(rng, count, label, |rng| Ok(generate(rng))) {
    Ok(problems) => problems,
    Err(never) => match never {},
  }
}

/// `collect_unique` for generators that can fail; the first error aborts the batch.
pub fn try_collect_unique<R, E, F>(
  rng: &mut R,
  count: usize,
  label: &'static str,
  mut generate: F,
) -> Result<Vec<Problem>, E>
where
  R: Rng + ?Sized,
  F: FnMut(&mut R) -> Result<Problem, E>,
{
  let mut seen: HashSet<String> = HashSet::with_capacity(count);
  let mut out = Vec::with_capacity(count);
  let mut duplicates = 0usize;

  for _ in 0..count {
    let mut problem = generate(rng)?;
    let mut attempts = 1;
    while is_duplicate(&seen, &problem) && attempts < MAX_UNIQUE_ATTEMPTS {
      problem = generate(rng)?;
      attempts += 1;
    }
    if is_duplicate(&seen, &problem) {
      duplicates += 1;
    }
    seen.insert(problem.canonical_key());
    out.push(problem);
  }

  if duplicates > 0 {
    warn!(target: "generator", generator = label, count, duplicates, "Uniqueness exhausted; duplicates accepted");
  }
  debug!(target: "generator", generator = label, count, distinct = seen.len(), "Batch generated");
  Ok(out)
}

#[instrument(level = "debug", skip(rng, settings, options), fields(grade = settings.grade))]
pub fn generate_addition_problems<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  count: usize,
  options: &GenerationOptions,
) -> Vec<Problem> {
  collect_unique(rng, count, "addition", |rng| {
    Problem::Basic(generate_addition_problem(rng, settings, options).problem)
  })
}

#[instrument(level = "debug", skip(rng, settings, options), fields(grade = settings.grade))]
pub fn generate_subtraction_problems<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  count: usize,
  options: &GenerationOptions,
) -> Vec<Problem> {
  collect_unique(rng, count, "subtraction", |rng| {
    Problem::Basic(generate_subtraction_problem(rng, settings, options).problem)
  })
}

#[instrument(level = "debug", skip(rng, settings, options), fields(grade = settings.grade))]
pub fn generate_multiplication_problems<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  count: usize,
  options: &GenerationOptions,
) -> Vec<Problem> {
  collect_unique(rng, count, "multiplication", |rng| {
    Problem::Basic(generate_multiplication_problem(rng, settings, options).problem)
  })
}

#[instrument(level = "debug", skip(rng, settings, options), fields(grade = settings.grade))]
pub fn generate_division_problems<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  count: usize,
  options: &GenerationOptions,
) -> Vec<Problem> {
  collect_unique(rng, count, "division", |rng| {
    Problem::Basic(generate_division_problem(rng, settings, options).problem)
  })
}

#[instrument(level = "debug", skip(rng, settings, options), fields(grade = settings.grade, op = %settings.operation))]
pub fn generate_fraction_problems<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  count: usize,
  options: &GenerationOptions,
) -> Vec<Problem> {
  collect_unique(rng, count, "fraction", |rng| {
    Problem::Fraction(generate_fraction_problem(rng, settings, options).problem)
  })
}

#[instrument(level = "debug", skip(rng, settings, options), fields(grade = settings.grade, op = %settings.operation))]
pub fn generate_decimal_problems<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  count: usize,
  options: &GenerationOptions,
) -> Vec<Problem> {
  collect_unique(rng, count, "decimal", |rng| {
    Problem::Decimal(generate_decimal_problem(rng, settings, options).problem)
  })
}

#[instrument(level = "debug", skip(rng, settings, options), fields(grade = settings.grade, op = %settings.operation))]
pub fn generate_hissan_problems<R: Rng + ?Sized>(
  rng: &mut R,
  settings: &WorksheetSettings,
  count: usize,
  options: &GenerationOptions,
) -> Vec<Problem> {
  collect_unique(rng, count, "hissan", |rng| {
    Problem::Hissan(generate_hissan_problem(rng, settings, options).problem)
  })
}

//! Pattern router: a pattern key in, a deduplicated batch of problems out.

use rand::Rng;
use tracing::{debug, instrument};

use super::rules::{rule_for, sample_rule};
use super::special::generate_special;
use super::CalculationPattern;
use crate::domain::Problem;
use crate::error::Result;
use crate::generators::{collect_unique, try_collect_unique};

/// `count` problems for `pattern`. Integer patterns come from the rule table,
/// the rest from their hand-written generators. A pattern with neither is an
/// error rather than an empty batch.
#[instrument(level = "debug", skip(rng, pattern), fields(pattern = %pattern))]
pub fn generate_pattern_problems<R: Rng + ?Sized>(
  rng: &mut R,
  pattern: CalculationPattern,
  count: usize,
) -> Result<Vec<Problem>> {
  let problems = match rule_for(pattern) {
    Some(rule) => collect_unique(rng, count, pattern.key(), |rng| sample_rule(rng, rule).problem),
    None => try_collect_unique(rng, count, pattern.key(), |rng| generate_special(rng, pattern))?,
  };
  debug!(target: "pattern", pattern = pattern.key(), count = problems.len(), "Pattern batch generated");
  Ok(problems)
}

/// Same as `generate_pattern_problems`, addressed by the kebab-case key.
pub fn generate_pattern_problems_by_key<R: Rng + ?Sized>(rng: &mut R, key: &str, count: usize) -> Result<Vec<Problem>> {
  let pattern: CalculationPattern = key.parse()?;
  generate_pattern_problems(rng, pattern, count)
}

//! Missing-number puzzles: hide one slot of `operand1 ⊕ operand2 = answer`
//! and recover it by inverting the operation.
//!
//! The `calculate_*` functions never fail. When the slots they need are
//! absent they fall back to the stored value, or to an empty string, which
//! callers treat as "uncomputable".

use crate::domain::{BasicProblem, Language, MissingPosition, Operation};

pub fn missing_operand1_value(p: &BasicProblem) -> Option<i64> {
  let (b, ans) = (p.operand2?, p.answer?);
  match p.operation {
    Operation::Addition => ans.checked_sub(b),
    Operation::Subtraction => ans.checked_add(b),
    Operation::Multiplication => exact_div(ans, b),
    Operation::Division => ans.checked_mul(b)?.checked_add(p.remainder.unwrap_or(0)),
  }
}

pub fn missing_operand2_value(p: &BasicProblem) -> Option<i64> {
  let (a, ans) = (p.operand1?, p.answer?);
  match p.operation {
    Operation::Addition => ans.checked_sub(a),
    Operation::Subtraction => a.checked_sub(ans),
    Operation::Multiplication => exact_div(ans, a),
    Operation::Division => exact_div(a.checked_sub(p.remainder.unwrap_or(0))?, ans),
  }
}

/// Quotient only for division; the remainder is reported separately.
/// Overflow, like division by zero, is uncomputable.
pub fn missing_answer_value(p: &BasicProblem) -> Option<i64> {
  let (a, b) = (p.operand1?, p.operand2?);
  match p.operation {
    Operation::Addition => a.checked_add(b),
    Operation::Subtraction => a.checked_sub(b),
    Operation::Multiplication => a.checked_mul(b),
    Operation::Division => a.checked_div_euclid(b),
  }
}

fn exact_div(n: i64, d: i64) -> Option<i64> {
  (n.checked_rem_euclid(d)? == 0).then(|| n.checked_div(d)).flatten()
}

pub fn calculate_missing_operand1(p: &BasicProblem) -> String {
  missing_operand1_value(p)
    .or(p.operand1)
    .map(|n| n.to_string())
    .unwrap_or_default()
}

pub fn calculate_missing_operand2(p: &BasicProblem) -> String {
  missing_operand2_value(p)
    .or(p.operand2)
    .map(|n| n.to_string())
    .unwrap_or_default()
}

/// Division with a non-zero remainder renders as "quotient remainder r".
pub fn calculate_missing_answer(p: &BasicProblem, language: Language) -> String {
  if let (Operation::Division, Some(a), Some(b)) = (p.operation, p.operand1, p.operand2) {
    if b == 0 {
      return p.answer.map(|n| n.to_string()).unwrap_or_default();
    }
    return match (a.checked_div_euclid(b), a.checked_rem_euclid(b)) {
      (Some(q), Some(0)) => q.to_string(),
      (Some(q), Some(r)) => remainder_text(q, r, language),
      _ => String::new(),
    };
  }
  let (Some(_), Some(_)) = (p.operand1, p.operand2) else {
    return p.answer.map(|n| n.to_string()).unwrap_or_default();
  };
  missing_answer_value(p)
    .map(|n| n.to_string())
    .unwrap_or_default()
}

/// Solves whichever slot `missing_position` names; no position means the answer.
pub fn solve_missing(p: &BasicProblem, language: Language) -> String {
  match p.missing_position {
    Some(MissingPosition::Operand1) => calculate_missing_operand1(p),
    Some(MissingPosition::Operand2) => calculate_missing_operand2(p),
    Some(MissingPosition::Answer) | None => calculate_missing_answer(p, language),
  }
}

pub fn remainder_text(quotient: i64, remainder: i64, language: Language) -> String {
  match language {
    Language::Ja => format!("{quotient} あまり {remainder}"),
    Language::En => format!("{quotient} R {remainder}"),
    Language::Neutral => format!("{quotient} … {remainder}"),
  }
}

/// Hides one slot of a complete problem.
pub fn blank_slot(mut p: BasicProblem, position: MissingPosition) -> BasicProblem {
  match position {
    MissingPosition::Operand1 => p.operand1 = None,
    MissingPosition::Operand2 => p.operand2 = None,
    MissingPosition::Answer => p.answer = None,
  }
  p.missing_position = Some(position);
  p
}

/// Copy with the hidden slot filled back in, where it can be derived.
pub fn reveal(p: &BasicProblem) -> BasicProblem {
  let mut full = p.clone();
  match p.missing_position {
    Some(MissingPosition::Operand1) => full.operand1 = missing_operand1_value(p),
    Some(MissingPosition::Operand2) => full.operand2 = missing_operand2_value(p),
    Some(MissingPosition::Answer) => full.answer = missing_answer_value(p),
    None => {}
  }
  full.missing_position = None;
  full
}

//! Domain models: operations, problem kinds, the `Problem` union and worksheet settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decimal::format_decimal;
use crate::error::EngineError;
use crate::patterns::CalculationPattern;

/// The four arithmetic operations a worksheet can drill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
  Addition,
  Subtraction,
  Multiplication,
  Division,
}

impl Operation {
  pub const ALL: [Operation; 4] = [
    Operation::Addition,
    Operation::Subtraction,
    Operation::Multiplication,
    Operation::Division,
  ];

  pub fn key(self) -> &'static str {
    match self {
      Operation::Addition => "addition",
      Operation::Subtraction => "subtraction",
      Operation::Multiplication => "multiplication",
      Operation::Division => "division",
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      Operation::Addition => "+",
      Operation::Subtraction => "-",
      Operation::Multiplication => "×",
      Operation::Division => "÷",
    }
  }

  /// Addition and multiplication: `a ⊕ b` and `b ⊕ a` are the same drill.
  pub fn is_commutative(self) -> bool {
    matches!(self, Operation::Addition | Operation::Multiplication)
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}

impl FromStr for Operation {
  type Err = EngineError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "addition" | "add" | "+" => Ok(Operation::Addition),
      "subtraction" | "sub" | "-" => Ok(Operation::Subtraction),
      "multiplication" | "mul" | "×" | "*" => Ok(Operation::Multiplication),
      "division" | "div" | "÷" | "/" => Ok(Operation::Division),
      other => Err(EngineError::UnsupportedOperation(other.to_string())),
    }
  }
}

/// Worksheet-level problem family chosen in the settings form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemType {
  Basic,
  Hissan,
  Fraction,
  Decimal,
  Word,
}

impl fmt::Display for ProblemType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ProblemType::Basic => "basic",
      ProblemType::Hissan => "hissan",
      ProblemType::Fraction => "fraction",
      ProblemType::Decimal => "decimal",
      ProblemType::Word => "word",
    };
    f.write_str(s)
  }
}

/// Which slot of `operand1 ⊕ operand2 = answer` is hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingPosition {
  Operand1,
  Operand2,
  Answer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  #[default]
  Ja,
  En,
  Neutral,
}

/// Horizontal-form integer problem, optionally with one hidden slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicProblem {
  pub id: String,
  pub operation: Operation,
  pub operand1: Option<i64>,
  pub operand2: Option<i64>,
  pub answer: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub remainder: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub missing_position: Option<MissingPosition>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub carry_over: Option<bool>,
}

/// Vertical ("hissan") written-calculation problem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HissanProblem {
  pub id: String,
  pub operation: Operation,
  pub operand1: i64,
  pub operand2: i64,
  pub answer: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub remainder: Option<i64>,
  pub carry_over: bool,
  pub show_carry: bool,
  pub show_partial_products: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionProblem {
  pub id: String,
  pub operation: Operation,
  pub numerator1: i64,
  pub denominator1: i64,
  pub numerator2: i64,
  pub denominator2: i64,
  pub answer_numerator: i64,
  pub answer_denominator: i64,
  pub simplified: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimalProblem {
  pub id: String,
  pub operation: Operation,
  pub operand1: f64,
  pub operand2: f64,
  pub answer: f64,
  pub decimal_places: u32,
}

/// Mixed-number problem; every triple is a proper mixed number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedNumberProblem {
  pub id: String,
  pub operation: Operation,
  pub whole1: i64,
  pub numerator1: i64,
  pub denominator1: i64,
  pub whole2: i64,
  pub numerator2: i64,
  pub denominator2: i64,
  pub answer_whole: i64,
  pub answer_numerator: i64,
  pub answer_denominator: i64,
}

/// Sentence problem. `operand1 ⊕ operand2 = answer` is the final calculation
/// step the learner performs; `answer_text` is the display form with unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProblem {
  pub id: String,
  pub operation: Operation,
  pub question: String,
  pub operand1: f64,
  pub operand2: f64,
  pub answer: f64,
  pub answer_text: String,
}

/// One worksheet item. Created fresh per generation call, immutable after.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Problem {
  Basic(BasicProblem),
  Hissan(HissanProblem),
  Fraction(FractionProblem),
  Decimal(DecimalProblem),
  Mixed(MixedNumberProblem),
  Word(WordProblem),
  WordEn(WordProblem),
}

impl Problem {
  pub fn id(&self) -> &str {
    match self {
      Problem::Basic(p) => &p.id,
      Problem::Hissan(p) => &p.id,
      Problem::Fraction(p) => &p.id,
      Problem::Decimal(p) => &p.id,
      Problem::Mixed(p) => &p.id,
      Problem::Word(p) | Problem::WordEn(p) => &p.id,
    }
  }

  pub fn operation(&self) -> Operation {
    match self {
      Problem::Basic(p) => p.operation,
      Problem::Hissan(p) => p.operation,
      Problem::Fraction(p) => p.operation,
      Problem::Decimal(p) => p.operation,
      Problem::Mixed(p) => p.operation,
      Problem::Word(p) | Problem::WordEn(p) => p.operation,
    }
  }

  /// Operand encoding used to detect duplicates within one batch.
  pub fn canonical_key(&self) -> String {
    self.key_with(false)
  }

  /// The same key with operands swapped. `None` for non-commutative operations.
  pub fn swapped_key(&self) -> Option<String> {
    if self.operation().is_commutative() {
      Some(self.key_with(true))
    } else {
      None
    }
  }

  fn key_with(&self, swap: bool) -> String {
    let sym = self.operation().symbol();
    let pair = |a: String, b: String| if swap { (b, a) } else { (a, b) };
    match self {
      Problem::Basic(p) => {
        let (a, b) = pair(slot(p.operand1), slot(p.operand2));
        format!("{a}{sym}{b}={}", slot(p.answer))
      }
      Problem::Hissan(p) => {
        let (a, b) = pair(p.operand1.to_string(), p.operand2.to_string());
        format!("{a}{sym}{b}")
      }
      Problem::Fraction(p) => {
        let (a, b) = pair(
          format!("{}/{}", p.numerator1, p.denominator1),
          format!("{}/{}", p.numerator2, p.denominator2),
        );
        format!("{a}{sym}{b}")
      }
      Problem::Decimal(p) => {
        let (a, b) = pair(format_decimal(p.operand1), format_decimal(p.operand2));
        format!("{a}{sym}{b}")
      }
      Problem::Mixed(p) => {
        let (a, b) = pair(
          format!("{} {}/{}", p.whole1, p.numerator1, p.denominator1),
          format!("{} {}/{}", p.whole2, p.numerator2, p.denominator2),
        );
        format!("{a}{sym}{b}")
      }
      Problem::Word(p) | Problem::WordEn(p) => p.question.clone(),
    }
  }

  /// Re-derives the answer from the operands and compares it with the stored one.
  /// Problems with a hidden slot are checked through the remaining slots.
  pub fn check_answer(&self) -> bool {
    match self {
      Problem::Basic(p) => check_basic(p),
      Problem::Hissan(p) => check_integer(p.operation, p.operand1, p.operand2, p.answer, p.remainder),
      Problem::Fraction(p) => {
        if p.denominator1 <= 0 || p.denominator2 <= 0 || p.answer_denominator <= 0 {
          return false;
        }
        if p.answer_numerator != 0 && crate::fraction::gcd(p.answer_numerator, p.answer_denominator) != 1 {
          return false;
        }
        let a = (p.numerator1, p.denominator1);
        let b = (p.numerator2, p.denominator2);
        crate::fraction::calculate_fraction(p.operation, a, b) == (p.answer_numerator, p.answer_denominator)
      }
      Problem::Decimal(p) => {
        let expected = crate::decimal::evaluate(p.operation, p.operand1, p.operand2, p.decimal_places);
        (expected - p.answer).abs() < 1e-9
      }
      Problem::Mixed(p) => {
        let a = (p.whole1, p.numerator1, p.denominator1);
        let b = (p.whole2, p.numerator2, p.denominator2);
        match crate::fraction::calculate_mixed(p.operation, a, b) {
          Ok(ans) => ans == (p.answer_whole, p.answer_numerator, p.answer_denominator),
          Err(_) => false,
        }
      }
      Problem::Word(p) | Problem::WordEn(p) => {
        let places = crate::decimal::get_decimal_places(p.answer).max(2);
        let expected = crate::decimal::evaluate(p.operation, p.operand1, p.operand2, places);
        (expected - p.answer).abs() < 1e-9
      }
    }
  }
}

fn slot(v: Option<i64>) -> String {
  v.map(|n| n.to_string()).unwrap_or_else(|| "□".into())
}

fn check_basic(p: &BasicProblem) -> bool {
  let full = crate::missing::reveal(p);
  match (full.operand1, full.operand2, full.answer) {
    (Some(a), Some(b), Some(ans)) => check_integer(p.operation, a, b, ans, p.remainder),
    _ => false,
  }
}

fn check_integer(op: Operation, a: i64, b: i64, answer: i64, remainder: Option<i64>) -> bool {
  match op {
    Operation::Addition => a + b == answer,
    Operation::Subtraction => a - b == answer,
    Operation::Multiplication => a * b == answer,
    Operation::Division => {
      if b == 0 {
        return false;
      }
      let r = remainder.unwrap_or(0);
      a == answer * b + r && (0..b).contains(&r)
    }
  }
}

/// Settings posted by the worksheet form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetSettings {
  pub grade: u8,
  pub problem_type: ProblemType,
  pub operation: Operation,
  pub problem_count: usize,
  pub layout_columns: u8,
  #[serde(default)]
  pub calculation_pattern: Option<CalculationPattern>,
  #[serde(default)]
  pub min_number: Option<i64>,
  #[serde(default)]
  pub max_number: Option<i64>,
  #[serde(default)]
  pub include_carry_over: Option<bool>,
}

impl WorksheetSettings {
  pub fn new(grade: u8, problem_type: ProblemType, operation: Operation) -> Self {
    Self { grade, problem_type, operation, ..Self::default() }
  }

  pub fn with_count(mut self, problem_count: usize) -> Self {
    self.problem_count = problem_count;
    self
  }

  pub fn with_pattern(mut self, pattern: CalculationPattern) -> Self {
    self.calculation_pattern = Some(pattern);
    self
  }
}

impl Default for WorksheetSettings {
  fn default() -> Self {
    Self {
      grade: 1,
      problem_type: ProblemType::Basic,
      operation: Operation::Addition,
      problem_count: 20,
      layout_columns: 2,
      calculation_pattern: None,
      min_number: None,
      max_number: None,
      include_carry_over: None,
    }
  }
}

//! Declarative integer patterns.
//!
//! Every horizontal or vertical integer pattern is a row in `RULES`: operand
//! bands, the carry policy, the remainder policy, an optional result band and
//! which slot (if any) is hidden. One sampler serves the whole table.

use rand::Rng;

use super::CalculationPattern as P;
use crate::domain::{BasicProblem, HissanProblem, MissingPosition, Operation, Problem};
use crate::generators::arithmetic::Regroup;
use crate::generators::hissan::multiplication_carries;
use crate::generators::{rejection_sample, Sampled, MAX_ATTEMPTS};
use crate::missing::blank_slot;
use crate::random::{has_borrow, has_carry_over, problem_id, random_int};

/// Inclusive integer band on a `step` grid starting at `min`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
  pub min: i64,
  pub max: i64,
  pub step: i64,
}

impl Band {
  pub fn contains(self, n: i64) -> bool {
    (self.min..=self.max).contains(&n)
  }

  fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> i64 {
    self.min + self.step * random_int(rng, 0, (self.max - self.min) / self.step)
  }
}

const fn ones(min: i64, max: i64) -> Band {
  Band { min, max, step: 1 }
}

const fn tens(min: i64, max: i64) -> Band {
  Band { min, max, step: 10 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
  Horizontal,
  Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemainderPolicy {
  Never,
  Require,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blank {
  None,
  /// operand1 or operand2, chosen per problem.
  Operand,
}

/// For division `left` is the quotient, `right` the divisor and `result`
/// bounds the dividend.
#[derive(Clone, Copy, Debug)]
pub struct ArithmeticRule {
  pub pattern: P,
  pub layout: Layout,
  pub operation: Operation,
  pub left: Band,
  pub right: Band,
  pub(crate) regroup: Regroup,
  pub remainder: RemainderPolicy,
  pub result: Option<Band>,
  pub blank: Blank,
}

impl ArithmeticRule {
  const fn new(pattern: P, operation: Operation, left: Band, right: Band) -> Self {
    Self {
      pattern,
      layout: Layout::Horizontal,
      operation,
      left,
      right,
      regroup: Regroup::Any,
      remainder: RemainderPolicy::Never,
      result: None,
      blank: Blank::None,
    }
  }

  const fn add(pattern: P, left: Band, right: Band) -> Self {
    Self::new(pattern, Operation::Addition, left, right)
  }

  const fn sub(pattern: P, left: Band, right: Band) -> Self {
    Self::new(pattern, Operation::Subtraction, left, right)
  }

  const fn mul(pattern: P, left: Band, right: Band) -> Self {
    Self::new(pattern, Operation::Multiplication, left, right)
  }

  const fn div(pattern: P, quotient: Band, divisor: Band) -> Self {
    Self::new(pattern, Operation::Division, quotient, divisor)
  }

  const fn vertical(mut self) -> Self {
    self.layout = Layout::Vertical;
    self
  }

  const fn regrouping(mut self) -> Self {
    self.regroup = Regroup::Require;
    self
  }

  const fn no_regrouping(mut self) -> Self {
    self.regroup = Regroup::Forbid;
    self
  }

  const fn with_remainder(mut self) -> Self {
    self.remainder = RemainderPolicy::Require;
    self
  }

  const fn result(mut self, band: Band) -> Self {
    self.result = Some(band);
    self
  }

  const fn missing(mut self) -> Self {
    self.blank = Blank::Operand;
    self
  }
}

type R = ArithmeticRule;

pub const RULES: &[ArithmeticRule] = &[
  // grade 1
  R::add(P::Add1dNoCarry, ones(1, 9), ones(1, 9)).no_regrouping(),
  R::add(P::Add1dWithCarry, ones(1, 9), ones(1, 9)).regrouping(),
  R::sub(P::Sub1dNoBorrow, ones(1, 9), ones(1, 9)).no_regrouping().result(ones(0, 8)),
  R::sub(P::SubTeensWithBorrow, ones(11, 18), ones(2, 9)).regrouping().result(ones(2, 9)),
  R::add(P::AddTens, tens(10, 90), tens(10, 90)).result(ones(20, 100)),
  R::sub(P::SubTens, tens(20, 90), tens(10, 80)).result(ones(10, 80)),
  R::add(P::MissingAdd1d, ones(1, 9), ones(1, 9)).result(ones(2, 10)).missing(),
  R::sub(P::MissingSub1d, ones(2, 10), ones(1, 9)).result(ones(1, 9)).missing(),
  // grade 2
  R::add(P::Add2dNoCarry, ones(10, 89), ones(10, 89)).no_regrouping().result(ones(20, 99)),
  R::add(P::Add2dWithCarry, ones(10, 99), ones(10, 99)).regrouping(),
  R::sub(P::Sub2dNoBorrow, ones(10, 99), ones(10, 99)).no_regrouping().result(ones(1, 89)),
  R::sub(P::Sub2dWithBorrow, ones(10, 99), ones(10, 99)).regrouping().result(ones(1, 89)),
  R::mul(P::TimesTable2To5, ones(2, 5), ones(1, 9)),
  R::mul(P::TimesTable6To9, ones(6, 9), ones(1, 9)),
  R::mul(P::TimesTableAll, ones(1, 9), ones(1, 9)),
  R::mul(P::MissingTimesTable, ones(2, 9), ones(1, 9)).missing(),
  R::add(P::MissingAdd2d, ones(10, 89), ones(10, 89)).result(ones(20, 99)).missing(),
  R::sub(P::MissingSub2d, ones(20, 99), ones(10, 89)).result(ones(1, 89)).missing(),
  R::add(P::HissanAdd2d, ones(10, 99), ones(10, 99)).vertical().regrouping(),
  R::sub(P::HissanSub2d, ones(10, 99), ones(10, 99)).vertical().regrouping().result(ones(1, 89)),
  // grade 3
  R::add(P::HissanAdd3d, ones(100, 999), ones(100, 999)).vertical(),
  R::sub(P::HissanSub3d, ones(100, 999), ones(100, 999)).vertical().regrouping().result(ones(1, 899)),
  R::mul(P::HissanMul2dBy1d, ones(10, 99), ones(2, 9)).vertical(),
  R::mul(P::HissanMul3dBy1d, ones(100, 999), ones(2, 9)).vertical(),
  R::mul(P::HissanMul2dBy2d, ones(10, 99), ones(10, 99)).vertical(),
  R::div(P::DivTimesTable, ones(1, 9), ones(2, 9)),
  R::div(P::DivWithRemainder, ones(1, 9), ones(2, 9)).with_remainder(),
  R::div(P::MissingDiv, ones(2, 9), ones(2, 9)).missing(),
  R::mul(P::MulTensBy1d, tens(10, 90), ones(2, 9)),
  // grade 4
  R::div(P::HissanDiv2dBy1d, ones(2, 49), ones(2, 9)).vertical().with_remainder().result(ones(10, 99)),
  R::div(P::HissanDiv3dBy1d, ones(12, 499), ones(2, 9)).vertical().with_remainder().result(ones(100, 999)),
  R::div(P::HissanDivBy2d, ones(2, 9), ones(11, 49)).vertical().with_remainder().result(ones(20, 999)),
  R::add(P::HissanAdd4d, ones(1000, 8999), ones(1000, 8999)).vertical().result(ones(2000, 9999)),
];

pub fn rule_for(pattern: P) -> Option<&'static ArithmeticRule> {
  RULES.iter().find(|r| r.pattern == pattern)
}

#[derive(Clone, Copy, Debug)]
struct Draw {
  a: i64,
  b: i64,
  answer: i64,
  remainder: i64,
  regrouped: bool,
}

fn draw<Rn: Rng + ?Sized>(rng: &mut Rn, rule: &ArithmeticRule) -> (Draw, bool) {
  let in_result = |n: i64| rule.result.map_or(true, |band| band.contains(n));
  match rule.operation {
    Operation::Addition => {
      let (a, b) = (rule.left.sample(rng), rule.right.sample(rng));
      let regrouped = has_carry_over(a, b);
      let d = Draw { a, b, answer: a + b, remainder: 0, regrouped };
      (d, rule.regroup.accepts(regrouped) && in_result(a + b))
    }
    Operation::Subtraction => {
      let (mut a, mut b) = (rule.left.sample(rng), rule.right.sample(rng));
      if a < b {
        std::mem::swap(&mut a, &mut b);
      }
      let regrouped = has_borrow(a, b);
      let d = Draw { a, b, answer: a - b, remainder: 0, regrouped };
      (d, rule.regroup.accepts(regrouped) && in_result(a - b))
    }
    Operation::Multiplication => {
      let (a, b) = (rule.left.sample(rng), rule.right.sample(rng));
      let regrouped = multiplication_carries(a, b);
      let d = Draw { a, b, answer: a * b, remainder: 0, regrouped };
      (d, rule.regroup.accepts(regrouped) && in_result(a * b))
    }
    Operation::Division => {
      let (quotient, divisor) = (rule.left.sample(rng), rule.right.sample(rng));
      let remainder = match rule.remainder {
        RemainderPolicy::Never => 0,
        RemainderPolicy::Require => random_int(rng, 1, (divisor - 1).max(1)),
      };
      let dividend = quotient * divisor + remainder;
      let d = Draw { a: dividend, b: divisor, answer: quotient, remainder, regrouped: false };
      (d, remainder < divisor && in_result(dividend))
    }
  }
}

fn build<Rn: Rng + ?Sized>(rng: &mut Rn, rule: &ArithmeticRule, d: Draw) -> Problem {
  let id = problem_id(rng);
  let op = rule.operation;
  match rule.layout {
    Layout::Vertical => Problem::Hissan(HissanProblem {
      id,
      operation: op,
      operand1: d.a,
      operand2: d.b,
      answer: d.answer,
      remainder: (op == Operation::Division).then_some(d.remainder),
      carry_over: d.regrouped,
      show_carry: d.regrouped,
      show_partial_products: op == Operation::Division || (op == Operation::Multiplication && d.b >= 10),
    }),
    Layout::Horizontal => {
      let p = BasicProblem {
        id,
        operation: op,
        operand1: Some(d.a),
        operand2: Some(d.b),
        answer: Some(d.answer),
        remainder: (d.remainder > 0).then_some(d.remainder),
        missing_position: None,
        carry_over: matches!(op, Operation::Addition | Operation::Subtraction).then_some(d.regrouped),
      };
      let p = match rule.blank {
        Blank::None => p,
        Blank::Operand => {
          let pos = if rng.gen_bool(0.5) { MissingPosition::Operand1 } else { MissingPosition::Operand2 };
          blank_slot(p, pos)
        }
      };
      Problem::Basic(p)
    }
  }
}

/// One problem for `rule`, fail-open like every other sampler.
pub fn sample_rule<Rn: Rng + ?Sized>(rng: &mut Rn, rule: &ArithmeticRule) -> Sampled<Problem> {
  let sampled = rejection_sample(rng, MAX_ATTEMPTS, rule.pattern.key(), |rng| draw(rng, rule));
  let problem = build(rng, rule, sampled.problem);
  Sampled { problem, satisfied: sampled.satisfied, attempts: sampled.attempts }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::random::digit_count;
  use rand::{rngs::StdRng, SeedableRng};

  fn basic(p: Problem) -> BasicProblem {
    match p {
      Problem::Basic(b) => b,
      other => panic!("expected basic problem, got {other:?}"),
    }
  }

  fn sample(rng: &mut StdRng, pattern: P) -> Sampled<Problem> {
    let rule = rule_for(pattern).unwrap_or_else(|| panic!("no rule for {pattern}"));
    sample_rule(rng, rule)
  }

  #[test]
  fn every_rule_is_satisfiable() {
    let mut rng = StdRng::seed_from_u64(71);
    for rule in RULES {
      for _ in 0..30 {
        let s = sample_rule(&mut rng, rule);
        assert!(s.satisfied, "{} gave {:?}", rule.pattern, s.problem);
        assert!(s.problem.check_answer(), "{}: {:?}", rule.pattern, s.problem);
      }
    }
  }

  #[test]
  fn carry_patterns() {
    let mut rng = StdRng::seed_from_u64(72);
    for _ in 0..50 {
      let p = basic(sample(&mut rng, P::Add1dWithCarry).problem);
      assert!(p.answer.unwrap() >= 10);
      assert_eq!(p.carry_over, Some(true));
      let q = basic(sample(&mut rng, P::Add1dNoCarry).problem);
      assert!(q.answer.unwrap() <= 9);
    }
  }

  #[test]
  fn teens_with_borrow() {
    let mut rng = StdRng::seed_from_u64(73);
    for _ in 0..50 {
      let p = basic(sample(&mut rng, P::SubTeensWithBorrow).problem);
      let (a, b) = (p.operand1.unwrap(), p.operand2.unwrap());
      assert!((11..=18).contains(&a));
      assert!(a % 10 < b);
      assert!((2..=9).contains(&p.answer.unwrap()));
    }
  }

  #[test]
  fn tens_stay_on_the_tens_grid() {
    let mut rng = StdRng::seed_from_u64(74);
    for _ in 0..30 {
      let p = basic(sample(&mut rng, P::AddTens).problem);
      assert_eq!(p.operand1.unwrap() % 10, 0);
      assert_eq!(p.operand2.unwrap() % 10, 0);
    }
  }

  #[test]
  fn missing_patterns_hide_an_operand() {
    let mut rng = StdRng::seed_from_u64(75);
    for pattern in [P::MissingAdd1d, P::MissingSub2d, P::MissingTimesTable, P::MissingDiv] {
      let p = basic(sample(&mut rng, pattern).problem);
      assert!(matches!(p.missing_position, Some(MissingPosition::Operand1 | MissingPosition::Operand2)));
      assert!(p.answer.is_some());
    }
  }

  #[test]
  fn remainder_patterns() {
    let mut rng = StdRng::seed_from_u64(76);
    for _ in 0..50 {
      let p = basic(sample(&mut rng, P::DivWithRemainder).problem);
      let r = p.remainder.unwrap();
      assert!(r >= 1 && r < p.operand2.unwrap());
      let Problem::Hissan(h) = sample(&mut rng, P::HissanDiv3dBy1d).problem else { panic!("expected hissan") };
      assert_eq!(digit_count(h.operand1), 3);
      assert!(h.remainder.unwrap() >= 1);
    }
  }

  #[test]
  fn vertical_rules_produce_hissan() {
    let mut rng = StdRng::seed_from_u64(77);
    for rule in RULES.iter().filter(|r| r.layout == Layout::Vertical) {
      assert!(rule.pattern.key().starts_with("hissan-"));
      assert!(matches!(sample_rule(&mut rng, rule).problem, Problem::Hissan(_)));
    }
  }
}

//! Property-based tests for the worksheet engine.
//!
//! Properties checked over arbitrary seeds and parameters:
//! 1. **Arithmetic correctness**: every generated problem re-derives its answer
//! 2. **Normal form**: fractions are reduced with a positive denominator
//! 3. **Policies**: ranges and carry requirements hold whenever satisfied
//! 4. **Sizing**: batches have exactly the requested length
//!
//! ```bash
//! PROPTEST_CASES=2000 cargo test --test property_tests
//! ```

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use sansu_worksheets::decimal::{get_decimal_places, round_to_decimal_places};
use sansu_worksheets::fraction::{add_fractions, gcd, simplify, subtract_fractions, to_improper, to_mixed};
use sansu_worksheets::generators::{generate_addition_problem, generate_subtraction_problem};
use sansu_worksheets::random::{has_borrow, has_carry_over, random_int};
use sansu_worksheets::{
  generate_mixed_problems, generate_pattern_problems, generate_problems, CalculationPattern, GenerationOptions,
  Operation, Problem, ProblemType, WorksheetSettings,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn operation() -> impl Strategy<Value = Operation> {
  prop_oneof![
    Just(Operation::Addition),
    Just(Operation::Subtraction),
    Just(Operation::Multiplication),
    Just(Operation::Division),
  ]
}

fn pattern() -> impl Strategy<Value = CalculationPattern> {
  (0..CalculationPattern::ALL.len()).prop_map(|i| CalculationPattern::ALL[i])
}

fn fraction() -> impl Strategy<Value = (i64, i64)> {
  (1i64..50, 1i64..50)
}

// =============================================================================
// Primitives
// =============================================================================

proptest! {
  #[test]
  fn random_int_is_inclusive_and_swaps(seed: u64, a in -1000i64..1000, b in -1000i64..1000) {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = random_int(&mut rng, a, b);
    prop_assert!(n >= a.min(b) && n <= a.max(b));
  }

  #[test]
  fn simplify_gives_normal_form(n in -500i64..500, d in (1i64..500).prop_union(-500i64..-1)) {
    let (sn, sd) = simplify(n, d);
    prop_assert!(sd > 0);
    if n == 0 {
      prop_assert_eq!((sn, sd), (0, 1));
    } else {
      prop_assert_eq!(gcd(sn, sd), 1);
      prop_assert_eq!(sn * d, n * sd);
    }
  }

  #[test]
  fn add_then_subtract_is_identity(a in fraction(), b in fraction()) {
    let sum = add_fractions(a, b);
    prop_assert_eq!(subtract_fractions(sum, b), simplify(a.0, a.1));
  }

  #[test]
  fn mixed_round_trip(n in 0i64..500, d in 1i64..30) {
    prop_assert_eq!(to_improper(to_mixed(n, d)), (n, d));
  }

  #[test]
  fn rounding_caps_decimal_places(x in 0.0f64..1000.0, places in 0u32..4) {
    prop_assert!(get_decimal_places(round_to_decimal_places(x, places)) <= places);
  }
}

// =============================================================================
// Single-problem generators
// =============================================================================

proptest! {
  #[test]
  fn addition_honours_range_and_carry_policy(seed: u64, min in 1i64..500, span in 0i64..500, carry: bool) {
    let mut rng = StdRng::seed_from_u64(seed);
    let settings = WorksheetSettings::new(3, ProblemType::Basic, Operation::Addition);
    let options = GenerationOptions {
      include_carry_over: Some(carry),
      exclude_carry_over: Some(!carry),
      ..GenerationOptions::range(min, min + span)
    };
    let sampled = generate_addition_problem(&mut rng, &settings, &options);
    let p = &sampled.problem;
    let (a, b) = (p.operand1.unwrap(), p.operand2.unwrap());
    prop_assert!((min..=min + span).contains(&a) && (min..=min + span).contains(&b));
    prop_assert_eq!(p.answer, Some(a + b));
    if sampled.satisfied {
      prop_assert_eq!(has_carry_over(a, b), carry);
    }
  }

  #[test]
  fn subtraction_never_goes_negative(seed: u64, min in 1i64..500, span in 0i64..500) {
    let mut rng = StdRng::seed_from_u64(seed);
    let settings = WorksheetSettings::new(3, ProblemType::Basic, Operation::Subtraction);
    let options = GenerationOptions { exclude_carry_over: Some(true), ..GenerationOptions::range(min, min + span) };
    let sampled = generate_subtraction_problem(&mut rng, &settings, &options);
    let p = &sampled.problem;
    prop_assert!(p.answer.unwrap() >= 0);
    if sampled.satisfied {
      prop_assert!(!has_borrow(p.operand1.unwrap(), p.operand2.unwrap()));
    }
  }
}

// =============================================================================
// Batches, patterns and the orchestrator
// =============================================================================

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn every_pattern_batch_is_correct(seed: u64, pattern in pattern(), count in 1usize..12) {
    let mut rng = StdRng::seed_from_u64(seed);
    let problems = generate_pattern_problems(&mut rng, pattern, count).unwrap();
    prop_assert_eq!(problems.len(), count);
    for p in &problems {
      prop_assert!(p.check_answer(), "{}: {:?}", pattern, p);
    }
  }

  #[test]
  fn basic_worksheets_are_correct(seed: u64, grade in 1u8..=6, op in operation(), count in 1usize..30) {
    let mut rng = StdRng::seed_from_u64(seed);
    let settings = WorksheetSettings::new(grade, ProblemType::Basic, op).with_count(count);
    let problems = generate_problems(&mut rng, &settings).unwrap();
    let gated = grade == 1 && matches!(op, Operation::Multiplication | Operation::Division);
    prop_assert_eq!(problems.len(), if gated { 0 } else { count });
    for p in &problems {
      prop_assert!(p.check_answer(), "{:?}", p);
      if let Problem::Basic(b) = p {
        if let Some(r) = b.remainder {
          prop_assert!(r >= 0 && r < b.operand2.unwrap());
        }
      }
    }
  }

  #[test]
  fn mixed_worksheets_keep_their_size(seed: u64, grade in 2u8..=6, count in 1usize..40) {
    let mut rng = StdRng::seed_from_u64(seed);
    let settings = WorksheetSettings::new(grade, ProblemType::Basic, Operation::Addition).with_count(count);
    let problems = generate_mixed_problems(&mut rng, &settings, &Operation::ALL).unwrap();
    prop_assert_eq!(problems.len(), count);
  }

  #[test]
  fn fraction_answers_are_reduced(seed: u64, grade in 2u8..=6) {
    let mut rng = StdRng::seed_from_u64(seed);
    let settings = WorksheetSettings::new(grade, ProblemType::Fraction, Operation::Addition).with_count(10);
    for p in generate_problems(&mut rng, &settings).unwrap() {
      let Problem::Fraction(f) = p else { return Err(TestCaseError::fail("expected fraction")) };
      prop_assert!(f.answer_denominator > 0);
      prop_assert_eq!(gcd(f.answer_numerator, f.answer_denominator), 1);
    }
  }

  #[test]
  fn seeded_runs_repeat(seed: u64, pattern in pattern()) {
    let first = generate_pattern_problems(&mut StdRng::seed_from_u64(seed), pattern, 5).unwrap();
    let second = generate_pattern_problems(&mut StdRng::seed_from_u64(seed), pattern, 5).unwrap();
    prop_assert_eq!(first, second);
  }
}

//! Patterns that do not fit the integer rule table: fractions, mixed numbers,
//! decimals, measurement and sentence problems.
//!
//! Sentence problems store the final calculation step as
//! `operand1 ⊕ operand2 = answer`; for a triangle that is `(b × h) ÷ 2`.

use rand::seq::SliceRandom;
use rand::Rng;

use super::CalculationPattern as P;
use crate::decimal::{evaluate, format_decimal};
use crate::domain::{FractionProblem, Operation, Problem, ProblemType, WordProblem, WorksheetSettings};
use crate::error::{EngineError, Result};
use crate::fraction::calculate_fraction;
use crate::generators::{
  generate_decimal_problem, generate_fraction_problem, generate_mixed_number_problem, rejection_sample,
  GenerationOptions, MAX_ATTEMPTS,
};
use crate::random::{problem_id, random_int};

const PI: f64 = 3.14;

fn settings(pattern: P, problem_type: ProblemType, op: Operation) -> WorksheetSettings {
  WorksheetSettings::new(pattern.info().grade, problem_type, op).with_pattern(pattern)
}

fn fraction<R: Rng + ?Sized>(rng: &mut R, pattern: P, op: Operation, options: GenerationOptions) -> Problem {
  let s = settings(pattern, ProblemType::Fraction, op);
  Problem::Fraction(generate_fraction_problem(rng, &s, &options).problem)
}

/// Proper fraction with a whole-number second operand.
fn fraction_with_integer<R: Rng + ?Sized>(rng: &mut R, op: Operation) -> Problem {
  let d = random_int(rng, 2, 9);
  let n = random_int(rng, 1, d - 1);
  let w = random_int(rng, 2, 9);
  let (answer_numerator, answer_denominator) = calculate_fraction(op, (n, d), (w, 1));
  Problem::Fraction(FractionProblem {
    id: problem_id(rng),
    operation: op,
    numerator1: n,
    denominator1: d,
    numerator2: w,
    denominator2: 1,
    answer_numerator,
    answer_denominator,
    simplified: true,
  })
}

fn decimal<R: Rng + ?Sized>(rng: &mut R, pattern: P, op: Operation, options: GenerationOptions) -> Problem {
  let s = settings(pattern, ProblemType::Decimal, op);
  Problem::Decimal(generate_decimal_problem(rng, &s, &options).problem)
}

fn decimal_options(places: u32, max: f64, whole_operand2: bool) -> GenerationOptions {
  GenerationOptions {
    decimal_places: Some(places),
    max_decimal: Some(max),
    times_table: whole_operand2.then_some(0),
    ..Default::default()
  }
}

fn sentence<R: Rng + ?Sized>(
  rng: &mut R,
  english: bool,
  op: Operation,
  question: String,
  (a, b): (f64, f64),
  answer_text: impl FnOnce(&str) -> String,
) -> Problem {
  let answer = evaluate(op, a, b, 2);
  let p = WordProblem {
    id: problem_id(rng),
    operation: op,
    question,
    operand1: a,
    operand2: b,
    answer,
    answer_text: answer_text(&format_decimal(answer)),
  };
  if english { Problem::WordEn(p) } else { Problem::Word(p) }
}

fn rectangle_area<R: Rng + ?Sized>(rng: &mut R) -> Problem {
  let w = random_int(rng, 2, 19);
  let l = random_int(rng, w + 1, 20);
  let q = format!("たて{w}cm、よこ{l}cmの長方形の面積は何cm²ですか。");
  sentence(rng, false, Operation::Multiplication, q, (w as f64, l as f64), |x| format!("{x}cm²"))
}

fn square_area<R: Rng + ?Sized>(rng: &mut R) -> Problem {
  let s = random_int(rng, 2, 20);
  let q = format!("1辺が{s}cmの正方形の面積は何cm²ですか。");
  sentence(rng, false, Operation::Multiplication, q, (s as f64, s as f64), |x| format!("{x}cm²"))
}

fn triangle_area<R: Rng + ?Sized>(rng: &mut R) -> Problem {
  let (base, height) = rejection_sample(rng, MAX_ATTEMPTS, "triangle-area", |rng| {
    let (b, h) = (random_int(rng, 2, 20), random_int(rng, 2, 20));
    ((b, h), (b * h) % 2 == 0)
  })
  .problem;
  let q = format!("底辺{base}cm、高さ{height}cmの三角形の面積は何cm²ですか。");
  sentence(rng, false, Operation::Division, q, ((base * height) as f64, 2.0), |x| format!("{x}cm²"))
}

fn parallelogram_area<R: Rng + ?Sized>(rng: &mut R) -> Problem {
  let (base, height) = (random_int(rng, 2, 20), random_int(rng, 2, 20));
  let q = format!("底辺{base}cm、高さ{height}cmの平行四辺形の面積は何cm²ですか。");
  sentence(rng, false, Operation::Multiplication, q, (base as f64, height as f64), |x| format!("{x}cm²"))
}

fn cuboid_volume<R: Rng + ?Sized>(rng: &mut R) -> Problem {
  let (l, w, h) = (random_int(rng, 2, 12), random_int(rng, 2, 12), random_int(rng, 2, 12));
  let q = format!("たて{w}cm、よこ{l}cm、高さ{h}cmの直方体の体積は何cm³ですか。");
  sentence(rng, false, Operation::Multiplication, q, ((l * w) as f64, h as f64), |x| format!("{x}cm³"))
}

fn cube_volume<R: Rng + ?Sized>(rng: &mut R) -> Problem {
  let s = random_int(rng, 2, 10);
  let q = format!("1辺が{s}cmの立方体の体積は何cm³ですか。");
  sentence(rng, false, Operation::Multiplication, q, ((s * s) as f64, s as f64), |x| format!("{x}cm³"))
}

fn circle_area<R: Rng + ?Sized>(rng: &mut R) -> Problem {
  let r = random_int(rng, 1, 10);
  let q = format!("半径{r}cmの円の面積は何cm²ですか。円周率は3.14とします。");
  sentence(rng, false, Operation::Multiplication, q, ((r * r) as f64, PI), |x| format!("{x}cm²"))
}

const PERCENTS: [i64; 9] = [10, 20, 25, 30, 40, 50, 60, 75, 80];

/// `whole × rate`, kept to whole-yen answers.
fn percentage_of<R: Rng + ?Sized>(rng: &mut R) -> Problem {
  let (whole, percent) = rejection_sample(rng, MAX_ATTEMPTS, "percentage-of", |rng| {
    let whole = random_int(rng, 2, 50) * 10;
    let percent = PERCENTS.choose(rng).copied().unwrap_or(50);
    ((whole, percent), (whole * percent) % 100 == 0)
  })
  .problem;
  let q = format!("{whole}円の{percent}%は何円ですか。");
  sentence(rng, false, Operation::Multiplication, q, (whole as f64, percent as f64 / 100.0), |x| format!("{x}円"))
}

/// `part ÷ whole`, answered as a percentage.
fn percentage_rate<R: Rng + ?Sized>(rng: &mut R) -> Problem {
  let (whole, percent) = rejection_sample(rng, MAX_ATTEMPTS, "percentage-rate", |rng| {
    let whole = random_int(rng, 2, 50) * 10;
    let percent = PERCENTS.choose(rng).copied().unwrap_or(50);
    ((whole, percent), (whole * percent) % 100 == 0)
  })
  .problem;
  let part = whole * percent / 100;
  let q = format!("{part}人は{whole}人の何%ですか。");
  sentence(rng, false, Operation::Division, q, (part as f64, whole as f64), |_| format!("{percent}%"))
}

fn speed_distance<R: Rng + ?Sized>(rng: &mut R, english: bool) -> Problem {
  let speed = random_int(rng, 6, 16) * 5;
  let hours = random_int(rng, 2, 5);
  let (a, b) = (speed as f64, hours as f64);
  if english {
    let q = format!("A train travels at {speed} km per hour for {hours} hours. How far does it go?");
    sentence(rng, true, Operation::Multiplication, q, (a, b), |x| format!("{x} km"))
  } else {
    let q = format!("時速{speed}kmで{hours}時間走ると、何km進みますか。");
    sentence(rng, false, Operation::Multiplication, q, (a, b), |x| format!("{x}km"))
  }
}

const JA_GOODS: [(&str, &str); 4] = [("りんご", "こ"), ("ノート", "さつ"), ("えんぴつ", "本"), ("ジュース", "本")];
const EN_GOODS: [(&str, &str); 4] =
  [("notebook", "notebooks"), ("pencil", "pencils"), ("apple", "apples"), ("eraser", "erasers")];

fn shopping_total<R: Rng + ?Sized>(rng: &mut R, english: bool) -> Problem {
  let price = random_int(rng, 3, 30) * 10;
  let qty = random_int(rng, 2, 9);
  let (a, b) = (price as f64, qty as f64);
  if english {
    let (one, many) = EN_GOODS.choose(rng).copied().unwrap_or(EN_GOODS[0]);
    let q = format!("A {one} costs {price} yen. How much do {qty} {many} cost?");
    sentence(rng, true, Operation::Multiplication, q, (a, b), |x| format!("{x} yen"))
  } else {
    let (item, counter) = JA_GOODS.choose(rng).copied().unwrap_or(JA_GOODS[0]);
    let q = format!("1{counter}{price}円の{item}を{qty}{counter}買うと、代金は何円ですか。");
    sentence(rng, false, Operation::Multiplication, q, (a, b), |x| format!("{x}円"))
  }
}

fn sharing_equally<R: Rng + ?Sized>(rng: &mut R, english: bool) -> Problem {
  let people = random_int(rng, 2, 9);
  let each = random_int(rng, 2, 12);
  let total = people * each;
  let (a, b) = (total as f64, people as f64);
  if english {
    let q = format!("{total} cookies are shared equally among {people} children. How many cookies does each child get?");
    sentence(rng, true, Operation::Division, q, (a, b), |x| format!("{x} cookies"))
  } else {
    let q = format!("{total}まいのカードを{people}人で同じ数ずつ分けると、1人何まいになりますか。");
    sentence(rng, false, Operation::Division, q, (a, b), |x| format!("{x}まい"))
  }
}

/// One problem for a pattern outside the rule table.
pub fn generate_special<R: Rng + ?Sized>(rng: &mut R, pattern: P) -> Result<Problem> {
  use Operation::{Addition as Add, Division as Div, Multiplication as Mul, Subtraction as Sub};

  let like = |max_den: i64| GenerationOptions {
    common_denominator: Some(true),
    max_denominator: Some(max_den),
    ..Default::default()
  };
  let unlike = GenerationOptions { common_denominator: Some(false), max_denominator: Some(12), ..Default::default() };
  let product = GenerationOptions { max_denominator: Some(9), ..Default::default() };

  let problem = match pattern {
    P::FractionAddLike => fraction(rng, pattern, Add, like(10)),
    P::FractionSubLike => fraction(rng, pattern, Sub, like(10)),
    P::FractionAddUnlike => fraction(rng, pattern, Add, unlike),
    P::FractionSubUnlike => fraction(rng, pattern, Sub, unlike),
    P::FractionMul => fraction(rng, pattern, Mul, product),
    P::FractionDiv => fraction(rng, pattern, Div, product),
    P::FractionMulInteger => fraction_with_integer(rng, Mul),
    P::FractionDivInteger => fraction_with_integer(rng, Div),
    P::MixedAddLike | P::MixedSubLike => {
      let op = if pattern == P::MixedAddLike { Add } else { Sub };
      let s = settings(pattern, ProblemType::Fraction, op);
      Problem::Mixed(generate_mixed_number_problem(rng, &s, &GenerationOptions::default())?.problem)
    }
    P::DecimalAddTenths => decimal(rng, pattern, Add, decimal_options(1, 9.9, false)),
    P::DecimalSubTenths => decimal(rng, pattern, Sub, decimal_options(1, 9.9, false)),
    P::DecimalAddHundredths => decimal(rng, pattern, Add, decimal_options(2, 9.99, false)),
    P::DecimalSubHundredths => decimal(rng, pattern, Sub, decimal_options(2, 9.99, false)),
    P::DecimalMulInteger => decimal(rng, pattern, Mul, decimal_options(1, 9.9, true)),
    P::DecimalDivInteger => decimal(rng, pattern, Div, decimal_options(1, 9.9, true)),
    P::DecimalMulDecimal => decimal(rng, pattern, Mul, decimal_options(1, 9.9, false)),
    P::DecimalDivDecimal => decimal(rng, pattern, Div, decimal_options(1, 9.9, false)),
    P::RectangleArea => rectangle_area(rng),
    P::SquareArea => square_area(rng),
    P::TriangleArea => triangle_area(rng),
    P::ParallelogramArea => parallelogram_area(rng),
    P::CuboidVolume => cuboid_volume(rng),
    P::CubeVolume => cube_volume(rng),
    P::CircleArea => circle_area(rng),
    P::PercentageOf => percentage_of(rng),
    P::PercentageRate => percentage_rate(rng),
    P::SpeedDistance => speed_distance(rng, false),
    P::WordEnSpeedDistance => speed_distance(rng, true),
    P::WordShoppingTotal => shopping_total(rng, false),
    P::WordEnShoppingTotal => shopping_total(rng, true),
    P::WordSharingEqually => sharing_equally(rng, false),
    P::WordEnSharingEqually => sharing_equally(rng, true),
    _ => return Err(EngineError::PatternNotImplemented(pattern.key().to_string())),
  };
  Ok(problem)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::decimal::get_decimal_places;
  use rand::{rngs::StdRng, SeedableRng};

  fn word(p: Problem) -> WordProblem {
    match p {
      Problem::Word(w) | Problem::WordEn(w) => w,
      other => panic!("expected word problem, got {other:?}"),
    }
  }

  #[test]
  fn integer_patterns_are_not_special() {
    let mut rng = StdRng::seed_from_u64(81);
    let err = generate_special(&mut rng, P::Add1dNoCarry).unwrap_err();
    assert!(matches!(err, EngineError::PatternNotImplemented(k) if k == "add-1d-no-carry"));
  }

  #[test]
  fn like_denominators_share_a_denominator() {
    let mut rng = StdRng::seed_from_u64(82);
    for _ in 0..30 {
      let Ok(Problem::Fraction(f)) = generate_special(&mut rng, P::FractionSubLike) else { panic!("expected fraction") };
      assert_eq!(f.denominator1, f.denominator2);
      let Ok(Problem::Fraction(g)) = generate_special(&mut rng, P::FractionAddUnlike) else { panic!("expected fraction") };
      assert_ne!(g.denominator1, g.denominator2);
    }
  }

  #[test]
  fn triangle_stores_the_halving_step() {
    let mut rng = StdRng::seed_from_u64(83);
    for _ in 0..30 {
      let w = word(generate_special(&mut rng, P::TriangleArea).unwrap());
      assert_eq!(w.operation, Operation::Division);
      assert_eq!(w.operand2, 2.0);
      assert_eq!(w.answer.fract(), 0.0);
      assert!(w.answer_text.ends_with("cm²"));
    }
  }

  #[test]
  fn circle_area_uses_three_point_one_four() {
    let mut rng = StdRng::seed_from_u64(84);
    let w = word(generate_special(&mut rng, P::CircleArea).unwrap());
    assert_eq!(w.operand2, 3.14);
    assert!(get_decimal_places(w.answer) <= 2);
    assert!(Problem::Word(w).check_answer());
  }

  #[test]
  fn percentages_are_exact() {
    let mut rng = StdRng::seed_from_u64(85);
    for _ in 0..30 {
      let of = word(generate_special(&mut rng, P::PercentageOf).unwrap());
      assert_eq!(of.answer.fract(), 0.0, "{of:?}");
      let rate = word(generate_special(&mut rng, P::PercentageRate).unwrap());
      assert!(rate.answer > 0.0 && rate.answer < 1.0);
      assert!(rate.answer_text.ends_with('%'));
    }
  }

  #[test]
  fn english_patterns_use_word_en() {
    let mut rng = StdRng::seed_from_u64(86);
    for pattern in [P::WordEnShoppingTotal, P::WordEnSharingEqually, P::WordEnSpeedDistance] {
      let p = generate_special(&mut rng, pattern).unwrap();
      assert!(matches!(p, Problem::WordEn(_)), "{pattern}");
      assert!(p.check_answer());
    }
    assert!(matches!(generate_special(&mut rng, P::WordShoppingTotal).unwrap(), Problem::Word(_)));
  }

  #[test]
  fn sharing_divides_evenly() {
    let mut rng = StdRng::seed_from_u64(87);
    for _ in 0..30 {
      let w = word(generate_special(&mut rng, P::WordSharingEqually).unwrap());
      assert_eq!(w.answer * w.operand2, w.operand1);
    }
  }
}

//! Sampling primitives and base-10 column checks shared by every generator.

use rand::Rng;
use uuid::Builder;

/// Uniform integer in `[min, max]`. Reversed bounds are swapped.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
  let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
  rng.gen_range(lo..=hi)
}

/// Inclusive bounds of the k-digit numbers. `k = 0` is treated as 1.
pub fn digit_range(k: u32) -> (i64, i64) {
  let k = k.max(1);
  let lo = if k == 1 { 1 } else { 10_i64.pow(k - 1) };
  (lo, 10_i64.pow(k) - 1)
}

pub fn digit_count(n: i64) -> u32 {
  let mut n = n.unsigned_abs();
  let mut count = 1;
  while n >= 10 {
    n /= 10;
    count += 1;
  }
  count
}

/// True when column addition of `a + b` carries in any column.
pub fn has_carry_over(a: i64, b: i64) -> bool {
  let (mut a, mut b) = (a.abs(), b.abs());
  while a > 0 || b > 0 {
    if a % 10 + b % 10 >= 10 {
      return true;
    }
    a /= 10;
    b /= 10;
  }
  false
}

/// True when column subtraction of `a - b` borrows in any column. Expects `a >= b >= 0`.
pub fn has_borrow(a: i64, b: i64) -> bool {
  let (mut a, mut b) = (a.abs(), b.abs());
  while b > 0 {
    if a % 10 < b % 10 {
      return true;
    }
    a /= 10;
    b /= 10;
  }
  false
}

/// Problem id drawn from the caller's RNG, so seeded runs repeat exactly.
pub fn problem_id<R: Rng + ?Sized>(rng: &mut R) -> String {
  let bytes: [u8; 16] = rng.gen();
  Builder::from_random_bytes(bytes).into_uuid().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn random_int_stays_in_bounds_even_when_reversed() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
      let n = random_int(&mut rng, 9, 3);
      assert!((3..=9).contains(&n));
    }
    assert_eq!(random_int(&mut rng, 4, 4), 4);
  }

  #[test]
  fn digit_ranges() {
    assert_eq!(digit_range(1), (1, 9));
    assert_eq!(digit_range(2), (10, 99));
    assert_eq!(digit_range(3), (100, 999));
    assert_eq!(digit_count(0), 1);
    assert_eq!(digit_count(4096), 4);
  }

  #[test]
  fn carry_detection_by_column() {
    assert!(has_carry_over(5, 7));
    assert!(has_carry_over(15, 25));
    assert!(has_carry_over(150, 50));
    assert!(!has_carry_over(12, 34));
    assert!(!has_carry_over(405, 4));
  }

  #[test]
  fn borrow_detection_by_column() {
    assert!(has_borrow(12, 5));
    assert!(has_borrow(100, 1));
    assert!(has_borrow(305, 20));
    assert!(!has_borrow(58, 23));
    assert!(!has_borrow(9, 9));
  }

  #[test]
  fn seeded_ids_repeat() {
    let a = problem_id(&mut StdRng::seed_from_u64(1));
    let b = problem_id(&mut StdRng::seed_from_u64(1));
    assert_eq!(a, b);
    assert_eq!(a.len(), 36);
  }
}

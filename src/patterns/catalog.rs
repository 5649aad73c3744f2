//! Calculation pattern keys and the static metadata the settings UI shows
//! for them (grade, category, language, difficulty, title).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Language;
use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Basic,
  Hissan,
  Fraction,
  Life,
  Word,
}

impl Category {
  pub const ALL: [Category; 5] = [Category::Basic, Category::Hissan, Category::Fraction, Category::Life, Category::Word];

  pub fn label(self) -> &'static str {
    match self {
      Category::Basic => "けいさん",
      Category::Hissan => "ひっ算",
      Category::Fraction => "分数・小数",
      Category::Life => "くらしの算数",
      Category::Word => "文章題",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PatternInfo {
  pub key: &'static str,
  pub grade: u8,
  pub category: Category,
  pub language: Language,
  /// 1 (introductory) to 3 (challenging).
  pub difficulty: u8,
  pub title: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct CategoryConfig {
  pub category: Category,
  pub label: &'static str,
  pub patterns: Vec<&'static str>,
}

macro_rules! calculation_patterns {
  ($( $variant:ident => $key:literal, $grade:literal, $category:ident, $language:ident, $difficulty:literal, $title:literal; )*) => {
    /// One grade-calibrated exercise a worksheet can be built from.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum CalculationPattern {
      $( #[serde(rename = $key)] $variant, )*
    }

    impl CalculationPattern {
      pub const ALL: &'static [CalculationPattern] = &[ $( CalculationPattern::$variant, )* ];

      pub fn key(self) -> &'static str {
        match self {
          $( CalculationPattern::$variant => $key, )*
        }
      }

      pub fn info(self) -> PatternInfo {
        match self {
          $( CalculationPattern::$variant => PatternInfo {
            key: $key,
            grade: $grade,
            category: Category::$category,
            language: Language::$language,
            difficulty: $difficulty,
            title: $title,
          }, )*
        }
      }
    }
  };
}

calculation_patterns! {
  // grade 1
  Add1dNoCarry => "add-1d-no-carry", 1, Basic, Neutral, 1, "1けたのたし算（くり上がりなし）";
  Add1dWithCarry => "add-1d-with-carry", 1, Basic, Neutral, 2, "1けたのたし算（くり上がりあり）";
  Sub1dNoBorrow => "sub-1d-no-borrow", 1, Basic, Neutral, 1, "1けたのひき算（くり下がりなし）";
  SubTeensWithBorrow => "sub-teens-with-borrow", 1, Basic, Neutral, 2, "十いくつ − 1けた（くり下がりあり）";
  AddTens => "add-tens", 1, Basic, Neutral, 1, "何十のたし算";
  SubTens => "sub-tens", 1, Basic, Neutral, 1, "何十のひき算";
  MissingAdd1d => "missing-add-1d", 1, Basic, Neutral, 2, "□にはいる数（たし算）";
  MissingSub1d => "missing-sub-1d", 1, Basic, Neutral, 3, "□にはいる数（ひき算）";
  // grade 2
  Add2dNoCarry => "add-2d-no-carry", 2, Basic, Neutral, 1, "2けたのたし算（くり上がりなし）";
  Add2dWithCarry => "add-2d-with-carry", 2, Basic, Neutral, 2, "2けたのたし算（くり上がりあり）";
  Sub2dNoBorrow => "sub-2d-no-borrow", 2, Basic, Neutral, 1, "2けたのひき算（くり下がりなし）";
  Sub2dWithBorrow => "sub-2d-with-borrow", 2, Basic, Neutral, 2, "2けたのひき算（くり下がりあり）";
  TimesTable2To5 => "times-table-2-5", 2, Basic, Neutral, 1, "九九（2〜5のだん）";
  TimesTable6To9 => "times-table-6-9", 2, Basic, Neutral, 2, "九九（6〜9のだん）";
  TimesTableAll => "times-table-all", 2, Basic, Neutral, 2, "九九（ぜんぶ）";
  MissingTimesTable => "missing-times-table", 2, Basic, Neutral, 3, "□にはいる数（九九）";
  MissingAdd2d => "missing-add-2d", 2, Basic, Neutral, 3, "□にはいる数（2けたのたし算）";
  MissingSub2d => "missing-sub-2d", 2, Basic, Neutral, 3, "□にはいる数（2けたのひき算）";
  HissanAdd2d => "hissan-add-2d", 2, Hissan, Neutral, 1, "たし算のひっ算（2けた）";
  HissanSub2d => "hissan-sub-2d", 2, Hissan, Neutral, 2, "ひき算のひっ算（2けた）";
  // grade 3
  HissanAdd3d => "hissan-add-3d", 3, Hissan, Neutral, 2, "たし算のひっ算（3けた）";
  HissanSub3d => "hissan-sub-3d", 3, Hissan, Neutral, 2, "ひき算のひっ算（3けた）";
  HissanMul2dBy1d => "hissan-mul-2d-by-1d", 3, Hissan, Neutral, 1, "かけ算のひっ算（2けた×1けた）";
  HissanMul3dBy1d => "hissan-mul-3d-by-1d", 3, Hissan, Neutral, 2, "かけ算のひっ算（3けた×1けた）";
  HissanMul2dBy2d => "hissan-mul-2d-by-2d", 3, Hissan, Neutral, 3, "かけ算のひっ算（2けた×2けた）";
  DivTimesTable => "div-times-table", 3, Basic, Neutral, 1, "わり算（九九で答えがでる）";
  DivWithRemainder => "div-with-remainder", 3, Basic, Neutral, 2, "あまりのあるわり算";
  MissingDiv => "missing-div", 3, Basic, Neutral, 3, "□にはいる数（わり算）";
  MulTensBy1d => "mul-tens-by-1d", 3, Basic, Neutral, 1, "何十×1けた";
  DecimalAddTenths => "decimal-add-tenths", 3, Fraction, Neutral, 1, "小数のたし算（1/10の位）";
  DecimalSubTenths => "decimal-sub-tenths", 3, Fraction, Neutral, 2, "小数のひき算（1/10の位）";
  FractionAddLike => "fraction-add-like", 3, Fraction, Neutral, 1, "分母が同じ分数のたし算";
  FractionSubLike => "fraction-sub-like", 3, Fraction, Neutral, 2, "分母が同じ分数のひき算";
  // grade 4
  HissanDiv2dBy1d => "hissan-div-2d-by-1d", 4, Hissan, Neutral, 1, "わり算のひっ算（2けた÷1けた）";
  HissanDiv3dBy1d => "hissan-div-3d-by-1d", 4, Hissan, Neutral, 2, "わり算のひっ算（3けた÷1けた）";
  HissanDivBy2d => "hissan-div-by-2d", 4, Hissan, Neutral, 3, "わり算のひっ算（÷2けた）";
  HissanAdd4d => "hissan-add-4d", 4, Hissan, Neutral, 2, "たし算のひっ算（4けた）";
  DecimalAddHundredths => "decimal-add-hundredths", 4, Fraction, Neutral, 2, "小数のたし算（1/100の位）";
  DecimalSubHundredths => "decimal-sub-hundredths", 4, Fraction, Neutral, 2, "小数のひき算（1/100の位）";
  DecimalMulInteger => "decimal-mul-integer", 4, Fraction, Neutral, 2, "小数×整数";
  DecimalDivInteger => "decimal-div-integer", 4, Fraction, Neutral, 3, "小数÷整数";
  MixedAddLike => "mixed-add-like", 4, Fraction, Neutral, 2, "帯分数のたし算";
  MixedSubLike => "mixed-sub-like", 4, Fraction, Neutral, 3, "帯分数のひき算";
  RectangleArea => "rectangle-area", 4, Life, Ja, 1, "長方形の面積";
  SquareArea => "square-area", 4, Life, Ja, 1, "正方形の面積";
  WordShoppingTotal => "word-shopping-total", 4, Word, Ja, 1, "文章題（買いもの）";
  WordEnShoppingTotal => "word-en-shopping-total", 4, Word, En, 1, "Word problems: shopping";
  // grade 5
  FractionAddUnlike => "fraction-add-unlike", 5, Fraction, Neutral, 2, "分母がちがう分数のたし算";
  FractionSubUnlike => "fraction-sub-unlike", 5, Fraction, Neutral, 3, "分母がちがう分数のひき算";
  DecimalMulDecimal => "decimal-mul-decimal", 5, Fraction, Neutral, 2, "小数×小数";
  DecimalDivDecimal => "decimal-div-decimal", 5, Fraction, Neutral, 3, "小数÷小数";
  TriangleArea => "triangle-area", 5, Life, Ja, 2, "三角形の面積";
  ParallelogramArea => "parallelogram-area", 5, Life, Ja, 2, "平行四辺形の面積";
  CuboidVolume => "cuboid-volume", 5, Life, Ja, 2, "直方体の体積";
  CubeVolume => "cube-volume", 5, Life, Ja, 1, "立方体の体積";
  PercentageOf => "percentage-of", 5, Life, Ja, 2, "百分率（比べられる量）";
  PercentageRate => "percentage-rate", 5, Life, Ja, 3, "百分率（割合）";
  WordSharingEqually => "word-sharing-equally", 5, Word, Ja, 1, "文章題（同じ数ずつ分ける）";
  WordEnSharingEqually => "word-en-sharing-equally", 5, Word, En, 1, "Word problems: sharing equally";
  // grade 6
  FractionMul => "fraction-mul", 6, Fraction, Neutral, 2, "分数×分数";
  FractionDiv => "fraction-div", 6, Fraction, Neutral, 3, "分数÷分数";
  FractionMulInteger => "fraction-mul-integer", 6, Fraction, Neutral, 1, "分数×整数";
  FractionDivInteger => "fraction-div-integer", 6, Fraction, Neutral, 2, "分数÷整数";
  CircleArea => "circle-area", 6, Life, Ja, 2, "円の面積";
  SpeedDistance => "speed-distance", 6, Life, Ja, 2, "速さと道のり";
  WordEnSpeedDistance => "word-en-speed-distance", 6, Word, En, 2, "Word problems: speed and distance";
}

impl fmt::Display for CalculationPattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}

impl FromStr for CalculationPattern {
  type Err = EngineError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let key = s.trim();
    CalculationPattern::ALL
      .iter()
      .copied()
      .find(|p| p.key() == key)
      .ok_or_else(|| EngineError::PatternNotImplemented(key.to_string()))
  }
}

pub fn pattern_info(pattern: CalculationPattern) -> PatternInfo {
  pattern.info()
}

pub fn all_patterns() -> Vec<PatternInfo> {
  CalculationPattern::ALL.iter().map(|p| p.info()).collect()
}

pub fn patterns_for_grade(grade: u8) -> Vec<PatternInfo> {
  all_patterns().into_iter().filter(|i| i.grade == grade).collect()
}

pub fn category_config() -> Vec<CategoryConfig> {
  Category::ALL
    .iter()
    .map(|&category| CategoryConfig {
      category,
      label: category.label(),
      patterns: all_patterns()
        .into_iter()
        .filter(|i| i.category == category)
        .map(|i| i.key)
        .collect(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn keys_are_unique_and_round_trip() {
    let keys: HashSet<&str> = CalculationPattern::ALL.iter().map(|p| p.key()).collect();
    assert_eq!(keys.len(), CalculationPattern::ALL.len());
    for p in CalculationPattern::ALL {
      assert_eq!(p.key().parse::<CalculationPattern>().unwrap(), *p);
      let json = serde_json::to_string(p).unwrap();
      assert_eq!(json, format!("\"{}\"", p.key()));
    }
  }

  #[test]
  fn unknown_key_is_not_implemented() {
    let err = "add-7d-with-magic".parse::<CalculationPattern>().unwrap_err();
    assert!(matches!(err, EngineError::PatternNotImplemented(k) if k == "add-7d-with-magic"));
  }

  #[test]
  fn metadata_is_well_formed() {
    assert!(CalculationPattern::ALL.len() >= 60);
    for info in all_patterns() {
      assert!((1..=6).contains(&info.grade), "{}", info.key);
      assert!((1..=3).contains(&info.difficulty), "{}", info.key);
      if info.key.starts_with("word-en-") {
        assert_eq!(info.language, Language::En);
      }
      if info.key.starts_with("hissan-") {
        assert_eq!(info.category, Category::Hissan);
      }
    }
    let total: usize = category_config().iter().map(|c| c.patterns.len()).sum();
    assert_eq!(total, CalculationPattern::ALL.len());
    assert!(patterns_for_grade(1).iter().all(|i| i.grade == 1));
  }
}

//! Named calculation patterns: the catalog, the integer rule table, the
//! hand-written generators and the router between them.

pub mod catalog;
pub mod dispatch;
pub mod rules;
pub mod special;

pub use catalog::{
  all_patterns, category_config, pattern_info, patterns_for_grade, CalculationPattern, Category, CategoryConfig,
  PatternInfo,
};
pub use dispatch::{generate_pattern_problems, generate_pattern_problems_by_key};

//! Alert rules and their per-rule pattern and sound cache.

mod cache;
mod error;
mod literal;
mod rule;

pub use cache::{compile_pattern, AudioSource, PatternCache, PatternSource};
pub use error::PatternError;
pub use literal::{compile_folded_literal, find_literal};
pub use rule::{Rule, RuleChange};

//! Health scoring and gamification rules.

pub mod badges;
mod engine;

pub use badges::BadgeEvaluator;
pub use engine::{ScoreOutcome, ScoringEngine};

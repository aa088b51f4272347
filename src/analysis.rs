//! The analysis engine.
//!
//! Data flows one way: facts, classified branches, flow config, blockers,
//! score, report. Every function here is pure over already-collected facts;
//! the only optional side channel is the merge-conflict probe.

pub mod analyzer;
pub mod blockers;
pub mod classify;
pub mod flow;
pub mod plan;
pub mod score;
pub mod thresholds;

pub use analyzer::{build_branches, Analyzer};
pub use blockers::detect_blockers;
pub use classify::classify;
pub use flow::detect_flow;
pub use plan::{build_plan, DEFAULT_ARCHIVE_EOL_DAYS};
pub use score::readiness_score;
pub use thresholds::{AnalysisThresholds, ScoreWeights};

#[cfg(test)]
pub(crate) mod test_support;

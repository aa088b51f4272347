//! Readiness score.

use crate::analysis::ScoreWeights;
use crate::data::{Blocker, Branch, FlowConfig};

/// Computes the 0-100 readiness score.
///
/// Any blocker, or a missing develop branch, forces 0. Otherwise deductions
/// are applied to 100 and the result is clamped once at the end, so the
/// uncapped feature and environment deductions may push it to 0.
pub fn readiness_score(
    config: &FlowConfig,
    blockers: &[Blocker],
    branches: &[Branch],
    weights: &ScoreWeights,
) -> u8 {
    if !blockers.is_empty() || !config.has_develop {
        return 0;
    }

    let mut score: i64 = 100;

    let stale = count(branches.iter().filter(|b| b.is_stale));
    score -= (stale * i64::from(weights.stale_penalty)).min(i64::from(weights.stale_penalty_cap));

    let active_features = count(config.feature_branches.iter().filter(|b| b.is_active()));
    let allowance = i64::try_from(weights.feature_allowance).unwrap_or(i64::MAX);
    if active_features > allowance {
        score -= (active_features - allowance) * i64::from(weights.feature_penalty);
    }

    score -= count(config.environment_branches.iter()) * i64::from(weights.environment_penalty);

    let other_active = count(config.other_branches.iter().filter(|b| b.is_active()));
    score -= (other_active * i64::from(weights.other_penalty))
        .min(i64::from(weights.other_penalty_cap));

    // Clamped to 0..=100, so the narrowing cannot fail.
    u8::try_from(score.clamp(0, 100)).unwrap_or(0)
}

fn count<'a>(branches: impl Iterator<Item = &'a Branch>) -> i64 {
    i64::try_from(branches.count()).unwrap_or(i64::MAX)
}

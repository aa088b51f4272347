//! Tunable constants of the blocker rules and the readiness score.

use serde::{Deserialize, Serialize};

/// Days without a commit after which a branch is stale.
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 90;

/// Active feature branches allowed before `too-many-features` fires.
pub const DEFAULT_MAX_ACTIVE_FEATURES: usize = 10;

/// Limits used by blocker detection and scoring.
///
/// Every field is optional in serialized form; missing fields keep their
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisThresholds {
    /// A branch is stale when its age in days is strictly greater than this.
    pub stale_after_days: i64,
    /// `too-many-features` fires when active feature branches exceed this.
    pub max_active_features: usize,
    /// Readiness score deductions.
    pub score: ScoreWeights,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            stale_after_days: DEFAULT_STALE_AFTER_DAYS,
            max_active_features: DEFAULT_MAX_ACTIVE_FEATURES,
            score: ScoreWeights::default(),
        }
    }
}

impl AnalysisThresholds {
    /// Returns whether a branch of the given age counts as stale.
    pub fn is_stale(&self, age_in_days: i64) -> bool {
        age_in_days > self.stale_after_days
    }
}

/// Point deductions applied by [`crate::analysis::readiness_score`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreWeights {
    /// Points per stale branch.
    pub stale_penalty: i32,
    /// Maximum total stale deduction.
    pub stale_penalty_cap: i32,
    /// Active feature branches tolerated without deduction.
    pub feature_allowance: usize,
    /// Points per active feature branch beyond the allowance. Uncapped.
    pub feature_penalty: i32,
    /// Points per environment branch. Uncapped.
    pub environment_penalty: i32,
    /// Points per active unclassified branch.
    pub other_penalty: i32,
    /// Maximum total unclassified deduction.
    pub other_penalty_cap: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            stale_penalty: 2,
            stale_penalty_cap: 20,
            feature_allowance: 5,
            feature_penalty: 5,
            environment_penalty: 5,
            other_penalty: 3,
            other_penalty_cap: 15,
        }
    }
}

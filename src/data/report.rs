//! Flow configuration, blockers and the final analysis report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Branch;

/// Git Flow layout detected from a classified branch list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowConfig {
    /// Whether a `main`/`master` branch exists.
    pub has_main: bool,
    /// Whether a `develop`/`dev` branch exists; the Git Flow marker.
    pub has_develop: bool,
    /// Name of the trunk, `"main"` when none was found.
    #[serde(rename = "mainBranch")]
    pub main_branch_name: String,
    /// Name of the integration branch, `"develop"` when none was found.
    #[serde(rename = "developBranch")]
    pub develop_branch_name: String,
    /// Branches classified as feature, in input order.
    pub feature_branches: Vec<Branch>,
    /// Branches classified as release, in input order.
    pub release_branches: Vec<Branch>,
    /// Branches classified as hotfix, in input order.
    pub hotfix_branches: Vec<Branch>,
    /// Branches classified as environment, in input order.
    pub environment_branches: Vec<Branch>,
    /// Branches classified as other, in input order.
    pub other_branches: Vec<Branch>,
}

/// Blocker severity. Every blocker is currently critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Prevents migration until resolved.
    Critical,
}

/// Structured extra data attached to some blockers.
///
/// Serialized untagged, so each variant appears as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockerDetails {
    /// Details of the `too-many-features` blocker.
    FeatureFlood {
        /// Number of active feature branches.
        count: usize,
        /// Configured limit that was exceeded.
        threshold: usize,
    },
}

/// A condition that must be fixed before migrating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blocker {
    /// Stable identifier, unique within one report.
    pub id: String,
    /// Severity level.
    pub severity: Severity,
    /// One-line summary.
    pub title: String,
    /// What was found.
    pub description: String,
    /// How to fix it.
    pub remediation: String,
    /// Optional structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BlockerDetails>,
}

/// The complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Path or URL of the analyzed repository.
    pub repo_path: String,
    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,
    /// Mirrors `git_flow_config.has_develop`.
    pub git_flow_detected: bool,
    /// Detected flow layout.
    pub git_flow_config: FlowConfig,
    /// Every analyzed branch, in source order.
    pub all_branches: Vec<Branch>,
    /// Number of branches.
    pub total_branches: usize,
    /// Branches that are not stale.
    pub active_branches: usize,
    /// Branches that are stale.
    pub stale_branches: usize,
    /// Heuristic readiness score, 0 to 100.
    pub readiness_score: u8,
    /// Detected blockers, in rule order.
    pub blockers: Vec<Blocker>,
    /// True exactly when there are no blockers.
    pub is_ready: bool,
}

impl AnalysisReport {
    /// Returns the ids of all blockers, in report order.
    pub fn blocker_ids(&self) -> Vec<&str> {
        self.blockers.iter().map(|b| b.id.as_str()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn blocker_without_details_omits_the_key() {
        let blocker = Blocker {
            id: "not-gitflow".to_string(),
            severity: Severity::Critical,
            title: "t".to_string(),
            description: "d".to_string(),
            remediation: "r".to_string(),
            details: None,
        };

        let value = serde_json::to_value(&blocker).unwrap();

        assert_eq!(value["severity"], "critical");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn feature_flood_details_serialize_as_plain_object() {
        let details = BlockerDetails::FeatureFlood {
            count: 11,
            threshold: 10,
        };

        let value = serde_json::to_value(&details).unwrap();

        assert_eq!(value, serde_json::json!({ "count": 11, "threshold": 10 }));
    }

    #[test]
    fn flow_config_uses_dashboard_key_names() {
        let config = FlowConfig {
            has_main: true,
            has_develop: false,
            main_branch_name: "master".to_string(),
            develop_branch_name: "develop".to_string(),
            feature_branches: Vec::new(),
            release_branches: Vec::new(),
            hotfix_branches: Vec::new(),
            environment_branches: Vec::new(),
            other_branches: Vec::new(),
        };

        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["mainBranch"], "master");
        assert_eq!(value["developBranch"], "develop");
        assert_eq!(value["hasDevelop"], false);
        assert!(value["environmentBranches"].as_array().unwrap().is_empty());
    }
}

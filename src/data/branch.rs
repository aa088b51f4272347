//! Raw branch observations and their classified form.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A single branch as observed by a [`crate::source::BranchSource`].
///
/// Produced once by the source and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchFact {
    /// Branch name, already stripped of any `origin/` prefix.
    pub name: String,
    /// Author date of the tip commit, keeping its original offset.
    pub last_commit_date: DateTime<FixedOffset>,
    /// Full hash of the tip commit.
    pub last_commit_hash: String,
    /// Message of the tip commit.
    pub last_commit_message: String,
    /// Author name of the tip commit.
    pub author: String,
    /// Commits on this branch that are not on the trunk.
    pub ahead_of_main: usize,
    /// Commits on the trunk that are not on this branch.
    pub behind_main: usize,
    /// Whether the tip is already contained in the trunk.
    pub is_merged: bool,
}

/// Semantic category of a branch under the Git Flow convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchType {
    /// `main` or `master`.
    Main,
    /// `develop` or `dev`.
    Develop,
    /// `feature/*`.
    Feature,
    /// `release/*`.
    Release,
    /// `hotfix/*`.
    Hotfix,
    /// Long-lived deployment branches such as `staging` or `qa`.
    Environment,
    /// Anything else.
    Other,
}

impl BranchType {
    /// Returns the lowercase label used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            BranchType::Main => "main",
            BranchType::Develop => "develop",
            BranchType::Feature => "feature",
            BranchType::Release => "release",
            BranchType::Hotfix => "hotfix",
            BranchType::Environment => "environment",
            BranchType::Other => "other",
        }
    }

    /// Sort rank used when listing branches: long-lived first, clutter last.
    pub fn display_rank(self) -> u8 {
        match self {
            BranchType::Main => 0,
            BranchType::Develop => 1,
            BranchType::Release => 2,
            BranchType::Hotfix => 3,
            BranchType::Feature => 4,
            BranchType::Environment => 5,
            BranchType::Other => 6,
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A [`BranchFact`] enriched with its classification and age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// The observation this branch was derived from.
    #[serde(flatten)]
    pub fact: BranchFact,
    /// Classification of the branch name.
    #[serde(rename = "type")]
    pub branch_type: BranchType,
    /// Whole days elapsed since the tip commit, rounded down.
    pub age_in_days: i64,
    /// Whether the branch is older than the staleness threshold.
    pub is_stale: bool,
}

impl Branch {
    /// Returns the branch name.
    pub fn name(&self) -> &str {
        &self.fact.name
    }

    /// Returns whether the branch is already merged into the trunk.
    pub fn is_merged(&self) -> bool {
        self.fact.is_merged
    }

    /// Returns whether the branch has seen a commit within the staleness window.
    pub fn is_active(&self) -> bool {
        !self.is_stale
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn fact(name: &str) -> BranchFact {
        BranchFact {
            name: name.to_string(),
            last_commit_date: DateTime::parse_from_rfc3339("2024-03-01T12:00:00+02:00").unwrap(),
            last_commit_hash: "a".repeat(40),
            last_commit_message: "Initial commit".to_string(),
            author: "Ada".to_string(),
            ahead_of_main: 2,
            behind_main: 1,
            is_merged: false,
        }
    }

    #[test]
    fn branch_serializes_flat_with_camel_case_keys() {
        let branch = Branch {
            fact: fact("feature/login"),
            branch_type: BranchType::Feature,
            age_in_days: 4,
            is_stale: false,
        };

        let value = serde_json::to_value(&branch).unwrap();

        assert_eq!(value["name"], "feature/login");
        assert_eq!(value["type"], "feature");
        assert_eq!(value["aheadOfMain"], 2);
        assert_eq!(value["behindMain"], 1);
        assert_eq!(value["isMerged"], false);
        assert_eq!(value["isStale"], false);
        assert_eq!(value["ageInDays"], 4);
        assert_eq!(value["lastCommitDate"], "2024-03-01T12:00:00+02:00");
        assert!(value.get("fact").is_none());
    }

    #[test]
    fn branch_deserializes_from_dashboard_shape() {
        let json = r#"{
            "name": "release/1.2",
            "type": "release",
            "lastCommitDate": "2024-01-10T08:30:00Z",
            "lastCommitHash": "abc",
            "lastCommitMessage": "Bump version",
            "author": "Grace",
            "aheadOfMain": 3,
            "behindMain": 0,
            "isStale": false,
            "isMerged": true,
            "ageInDays": 12
        }"#;

        let branch: Branch = serde_json::from_str(json).unwrap();

        assert_eq!(branch.name(), "release/1.2");
        assert_eq!(branch.branch_type, BranchType::Release);
        assert!(branch.is_merged());
        assert!(branch.is_active());
    }

    #[test]
    fn display_rank_orders_long_lived_branches_first() {
        let mut types = vec![
            BranchType::Other,
            BranchType::Feature,
            BranchType::Main,
            BranchType::Environment,
            BranchType::Hotfix,
            BranchType::Develop,
            BranchType::Release,
        ];
        types.sort_by_key(|t| t.display_rank());

        let labels: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            labels,
            ["main", "develop", "release", "hotfix", "feature", "environment", "other"]
        );
    }
}

//! Migration plan: a description of the steps a migration would take.
//!
//! Nothing here touches a repository. The plan is a report for humans and for
//! the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AnalysisReport;

/// Prefix of the backup tags a migration would create.
pub const BACKUP_TAG_PREFIX: &str = "backup/pre-migration";

/// Kind of action a migration step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationAction {
    /// Create a backup tag.
    Backup,
    /// Merge one branch into another.
    Merge,
    /// Rebase a branch onto the trunk.
    Rebase,
    /// Tag then remove a branch.
    Archive,
    /// Remove a branch.
    Delete,
}

/// One step of a migration plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStep {
    /// Position in the plan, starting at 1.
    pub order: usize,
    /// What the step does.
    pub action: MigrationAction,
    /// Human-readable summary.
    pub description: String,
    /// Branch the step reads from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_branch: Option<String>,
    /// Branch the step writes to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_branch: Option<String>,
    /// Whether the step rewrites or removes history.
    pub is_destructive: bool,
}

/// Ordered migration plan derived from a ready report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlan {
    /// The report the plan was built from.
    pub report: AnalysisReport,
    /// Steps in execution order.
    pub steps: Vec<MigrationStep>,
    /// Prefix for backup tags.
    pub backup_tag_prefix: String,
    /// When the plan was built.
    pub created_at: DateTime<Utc>,
    /// Date after which archived branches' backup tags may be removed.
    pub archive_eol: DateTime<Utc>,
}

impl MigrationPlan {
    /// Returns the number of steps that rewrite or remove history.
    pub fn destructive_step_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_destructive).count()
    }
}

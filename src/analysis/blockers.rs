//! Migration blocker rules.
//!
//! Rules run in a fixed order and blockers come out in rule order, then in
//! branch input order within a rule. A repository without a develop branch
//! short-circuits after the first rule.

use tracing::debug;

use crate::analysis::AnalysisThresholds;
use crate::data::{Blocker, BlockerDetails, Branch, BranchType, FlowConfig, Severity};
use crate::source::{MergeConflictProbe, MergeProbe};

/// Id of the blocker emitted when no develop branch exists.
pub const NOT_GITFLOW_ID: &str = "not-gitflow";
/// Id of the blocker emitted when develop does not merge cleanly into main.
pub const MERGE_CONFLICTS_ID: &str = "merge-conflicts";
/// Id of the blocker emitted when too many feature branches are active.
pub const TOO_MANY_FEATURES_ID: &str = "too-many-features";

/// Evaluates every blocker rule against a flow layout.
///
/// `probe` is consulted only when present; a probe that cannot run is treated
/// as "no conflict" and never produces a blocker of its own.
pub fn detect_blockers(
    config: &FlowConfig,
    branches: &[Branch],
    probe: Option<&dyn MergeConflictProbe>,
    thresholds: &AnalysisThresholds,
) -> Vec<Blocker> {
    if !config.has_develop {
        return vec![not_gitflow()];
    }

    let mut blockers = Vec::new();

    if let Some(probe) = probe {
        match probe.probe(&config.main_branch_name, &config.develop_branch_name) {
            MergeProbe::Conflicted => blockers.push(merge_conflicts(config)),
            MergeProbe::Clean => {
                debug!(
                    main = %config.main_branch_name,
                    develop = %config.develop_branch_name,
                    "develop merges cleanly into main"
                );
            }
            MergeProbe::Unsupported => {
                debug!(
                    main = %config.main_branch_name,
                    develop = %config.develop_branch_name,
                    "Merge conflict check unavailable, skipping"
                );
            }
        }
    }

    let active_features = branches
        .iter()
        .filter(|b| b.branch_type == BranchType::Feature && b.is_active())
        .count();
    if active_features > thresholds.max_active_features {
        blockers.push(too_many_features(
            active_features,
            thresholds.max_active_features,
        ));
    }

    blockers.extend(
        config
            .release_branches
            .iter()
            .filter(|b| !b.is_merged())
            .map(|b| unmerged("release", "Release", b, config)),
    );

    blockers.extend(
        config
            .hotfix_branches
            .iter()
            .filter(|b| !b.is_merged())
            .map(|b| unmerged("hotfix", "Hotfix", b, config)),
    );

    blockers
}

fn not_gitflow() -> Blocker {
    Blocker {
        id: NOT_GITFLOW_ID.to_string(),
        severity: Severity::Critical,
        title: "Not a Git Flow repository".to_string(),
        description:
            "No develop branch found. This repository does not appear to use Git Flow.".to_string(),
        remediation: "This tool is designed for Git Flow repositories. Ensure a \"develop\" branch exists."
            .to_string(),
        details: None,
    }
}

fn merge_conflicts(config: &FlowConfig) -> Blocker {
    let main = &config.main_branch_name;
    let develop = &config.develop_branch_name;
    Blocker {
        id: MERGE_CONFLICTS_ID.to_string(),
        severity: Severity::Critical,
        title: "Unresolved merge conflicts".to_string(),
        description: format!(
            "{develop} and {main} have merge conflicts that must be resolved before migration."
        ),
        remediation: format!(
            "Resolve merge conflicts between \"{develop}\" and \"{main}\" manually, then re-run analysis."
        ),
        details: None,
    }
}

fn too_many_features(count: usize, threshold: usize) -> Blocker {
    Blocker {
        id: TOO_MANY_FEATURES_ID.to_string(),
        severity: Severity::Critical,
        title: "Too many active feature branches".to_string(),
        description: format!(
            "{count} active feature branches detected (threshold: {threshold})."
        ),
        remediation:
            "Reduce in-flight work by merging or closing feature branches before migrating."
                .to_string(),
        details: Some(BlockerDetails::FeatureFlood { count, threshold }),
    }
}

/// Blocker for a release or hotfix branch that never made it into the trunk.
fn unmerged(kind: &str, label: &str, branch: &Branch, config: &FlowConfig) -> Blocker {
    let name = branch.name();
    let main = &config.main_branch_name;
    let develop = &config.develop_branch_name;
    Blocker {
        id: format!("unmerged-{kind}-{name}"),
        severity: Severity::Critical,
        title: format!("Active {kind} branch: {name}"),
        description: format!("{label} branch \"{name}\" has not been merged into {main}."),
        remediation: format!(
            "Complete the {kind} by merging \"{name}\" into \"{main}\" and \"{develop}\"."
        ),
        details: None,
    }
}

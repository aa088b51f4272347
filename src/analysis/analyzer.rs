//! Orchestration of one analysis pass.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::analysis::{
    classify, detect_blockers, detect_flow, readiness_score, AnalysisThresholds,
};
use crate::data::{AnalysisReport, Branch, BranchFact};
use crate::source::MergeConflictProbe;

const SECONDS_PER_DAY: i64 = 86_400;

/// Runs the classification, detection and scoring pipeline over a fact list.
///
/// Holds no state between runs; one analyzer can analyze any number of
/// repositories.
pub struct Analyzer<'a> {
    thresholds: AnalysisThresholds,
    probe: Option<&'a dyn MergeConflictProbe>,
}

impl Default for Analyzer<'_> {
    fn default() -> Self {
        Self::new(AnalysisThresholds::default())
    }
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer without a merge-conflict probe.
    pub fn new(thresholds: AnalysisThresholds) -> Self {
        Self {
            thresholds,
            probe: None,
        }
    }

    /// Enables the merge-conflict rule using `probe`.
    pub fn with_probe(mut self, probe: &'a dyn MergeConflictProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Returns the thresholds in use.
    pub fn thresholds(&self) -> &AnalysisThresholds {
        &self.thresholds
    }

    /// Analyzes `facts` as of the current time.
    pub fn analyze(&self, repo_path: &str, facts: Vec<BranchFact>) -> AnalysisReport {
        self.analyze_at(repo_path, facts, Utc::now())
    }

    /// Analyzes `facts` as of `now`.
    ///
    /// Two calls with the same facts and the same `now` produce equal reports.
    pub fn analyze_at(
        &self,
        repo_path: &str,
        facts: Vec<BranchFact>,
        now: DateTime<Utc>,
    ) -> AnalysisReport {
        let branches = build_branches(facts, now, &self.thresholds);
        let config = detect_flow(&branches);
        let blockers = detect_blockers(&config, &branches, self.probe, &self.thresholds);
        let readiness_score = readiness_score(&config, &blockers, &branches, &self.thresholds.score);

        let total_branches = branches.len();
        let stale_branches = branches.iter().filter(|b| b.is_stale).count();

        debug!(
            repo = %repo_path,
            total = total_branches,
            stale = stale_branches,
            blockers = blockers.len(),
            score = readiness_score,
            "Analysis complete"
        );

        AnalysisReport {
            repo_path: repo_path.to_string(),
            analyzed_at: now,
            git_flow_detected: config.has_develop,
            git_flow_config: config,
            all_branches: branches,
            total_branches,
            active_branches: total_branches - stale_branches,
            stale_branches,
            readiness_score,
            is_ready: blockers.is_empty(),
            blockers,
        }
    }
}

/// Classifies facts and computes their age.
///
/// Keeps the first fact for each name and drops facts with an empty name or
/// the name `HEAD`.
pub fn build_branches(
    facts: Vec<BranchFact>,
    now: DateTime<Utc>,
    thresholds: &AnalysisThresholds,
) -> Vec<Branch> {
    let mut seen = HashSet::new();
    let mut branches = Vec::with_capacity(facts.len());

    for fact in facts {
        if fact.name.is_empty() || fact.name == "HEAD" {
            warn!(name = %fact.name, "Skipping branch with unusable name");
            continue;
        }
        if !seen.insert(fact.name.clone()) {
            debug!(name = %fact.name, "Skipping duplicate branch");
            continue;
        }

        let age_in_days = age_in_days(&fact, now);
        branches.push(Branch {
            branch_type: classify(&fact.name),
            is_stale: thresholds.is_stale(age_in_days),
            age_in_days,
            fact,
        });
    }

    branches
}

/// Whole days between the tip commit and `now`, rounded toward negative infinity.
fn age_in_days(fact: &BranchFact, now: DateTime<Utc>) -> i64 {
    let elapsed = now.signed_duration_since(fact.last_commit_date);
    elapsed.num_seconds().div_euclid(SECONDS_PER_DAY)
}

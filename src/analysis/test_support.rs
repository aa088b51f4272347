//! Builders shared by the engine's unit tests.

use chrono::{DateTime, Duration, Utc};

use crate::analysis::classify;
use crate::data::{Branch, BranchFact};

/// Fixed clock used by engine tests.
pub(crate) fn frozen_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_default()
}

/// A fact whose tip commit is `age_in_days` whole days before [`frozen_now`].
pub(crate) fn fact(name: &str, age_in_days: i64) -> BranchFact {
    let date = frozen_now() - Duration::days(age_in_days);
    BranchFact {
        name: name.to_string(),
        last_commit_date: date.fixed_offset(),
        last_commit_hash: format!("{:040x}", name.len()),
        last_commit_message: format!("Work on {name}"),
        author: "Test User".to_string(),
        ahead_of_main: 0,
        behind_main: 0,
        is_merged: false,
    }
}

/// A classified branch using the default 90-day staleness threshold.
pub(crate) fn branch(name: &str, age_in_days: i64) -> Branch {
    Branch {
        fact: fact(name, age_in_days),
        branch_type: classify(name),
        age_in_days,
        is_stale: age_in_days > 90,
    }
}

/// Same as [`branch`], already merged into the trunk.
pub(crate) fn merged_branch(name: &str, age_in_days: i64) -> Branch {
    let mut branch = branch(name, age_in_days);
    branch.fact.is_merged = true;
    branch
}

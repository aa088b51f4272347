//! Migration plan construction from a ready report.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

use crate::data::{
    AnalysisReport, MigrationAction, MigrationPlan, MigrationStep, BACKUP_TAG_PREFIX,
};
use crate::Gf2tError;

/// Days archived branches keep their backup tags by default.
pub const DEFAULT_ARCHIVE_EOL_DAYS: i64 = 90;

/// Describes the migration of a ready repository to trunk-based development.
///
/// Fails with [`Gf2tError::NotReady`] while the report still has blockers,
/// and with [`Gf2tError::InvalidEolDays`] when `eol_days` is negative or the
/// resulting date is out of range.
pub fn build_plan(
    report: &AnalysisReport,
    eol_days: i64,
    now: DateTime<Utc>,
) -> Result<MigrationPlan> {
    if !report.is_ready {
        return Err(Gf2tError::NotReady {
            blockers: report.blockers.len(),
        }
        .into());
    }

    let archive_eol = (eol_days >= 0)
        .then(|| Duration::try_days(eol_days))
        .flatten()
        .and_then(|eol| now.checked_add_signed(eol))
        .ok_or(Gf2tError::InvalidEolDays(eol_days))?;

    let config = &report.git_flow_config;
    let main = config.main_branch_name.as_str();
    let develop = config.develop_branch_name.as_str();
    let mut steps = StepList::default();

    for branch in &report.all_branches {
        steps.push(
            MigrationAction::Backup,
            format!(
                "Tag \"{}\" as {BACKUP_TAG_PREFIX}/{}",
                branch.name(),
                branch.name()
            ),
            Some(branch.name()),
            None,
            false,
        );
    }

    steps.push(
        MigrationAction::Merge,
        format!("Merge \"{develop}\" into \"{main}\""),
        Some(develop),
        Some(main),
        false,
    );

    for feature in &config.feature_branches {
        if feature.is_merged() {
            steps.push(
                MigrationAction::Archive,
                format!("Archive merged feature branch \"{}\"", feature.name()),
                Some(feature.name()),
                None,
                true,
            );
        } else {
            steps.push(
                MigrationAction::Rebase,
                format!("Rebase \"{}\" onto \"{main}\"", feature.name()),
                Some(feature.name()),
                Some(main),
                true,
            );
        }
    }

    for branch in config.release_branches.iter().chain(&config.hotfix_branches) {
        steps.push(
            MigrationAction::Archive,
            format!("Archive \"{}\"", branch.name()),
            Some(branch.name()),
            None,
            true,
        );
    }

    steps.push(
        MigrationAction::Delete,
        format!("Delete \"{develop}\"; all work now targets \"{main}\""),
        Some(develop),
        None,
        true,
    );

    Ok(MigrationPlan {
        report: report.clone(),
        steps: steps.0,
        backup_tag_prefix: BACKUP_TAG_PREFIX.to_string(),
        created_at: now,
        archive_eol,
    })
}

#[derive(Default)]
struct StepList(Vec<MigrationStep>);

impl StepList {
    fn push(
        &mut self,
        action: MigrationAction,
        description: String,
        source: Option<&str>,
        target: Option<&str>,
        is_destructive: bool,
    ) {
        let order = self.0.len() + 1;
        self.0.push(MigrationStep {
            order,
            action,
            description,
            source_branch: source.map(str::to_string),
            target_branch: target.map(str::to_string),
            is_destructive,
        });
    }
}

//! Branch sources and the merge-conflict probe.
//!
//! A source turns some repository location into a finished list of
//! [`BranchFact`]s. The engine never sees the transport.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use tracing::debug;

use crate::analysis::{AnalysisThresholds, Analyzer};
use crate::data::{AnalysisReport, BranchFact};

/// Outcome of a dry-run merge between two branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeProbe {
    /// The branches merge cleanly.
    Clean,
    /// The merge would leave conflicts.
    Conflicted,
    /// The probe could not run (missing branch, no shared history, ...).
    Unsupported,
}

/// Capability to test whether `develop` merges cleanly into the trunk.
///
/// Only sources with a local object database can offer it.
pub trait MergeConflictProbe {
    /// Attempts a merge without writing anything.
    fn probe(&self, trunk: &str, develop: &str) -> MergeProbe;
}

/// A provider of raw branch facts.
pub trait BranchSource: Send + Sync {
    /// Collects one fact per distinct branch name.
    ///
    /// Fails only when the source as a whole is unusable; unreadable
    /// individual branches are left out.
    fn list_branches<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<BranchFact>>> + Send + 'a>>;

    /// Path or URL reported as the repository identifier.
    fn repo_path(&self) -> String;

    /// Returns the merge-conflict probe, when this source has one.
    fn merge_conflict_probe(&self) -> Option<&dyn MergeConflictProbe> {
        None
    }
}

/// Collects facts from `source` and runs a full analysis on them.
pub async fn analyze_source(
    source: &dyn BranchSource,
    thresholds: AnalysisThresholds,
) -> Result<AnalysisReport> {
    let repo_path = source.repo_path();
    debug!(repo = %repo_path, "Collecting branch facts");

    let facts = source.list_branches().await?;
    debug!(repo = %repo_path, count = facts.len(), "Collected branch facts");

    let mut analyzer = Analyzer::new(thresholds);
    if let Some(probe) = source.merge_conflict_probe() {
        analyzer = analyzer.with_probe(probe);
    }

    Ok(analyzer.analyze(&repo_path, facts))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::analysis::test_support::fact;

    struct StaticSource {
        facts: Vec<BranchFact>,
        conflicted: bool,
    }

    impl MergeConflictProbe for StaticSource {
        fn probe(&self, _trunk: &str, _develop: &str) -> MergeProbe {
            if self.conflicted {
                MergeProbe::Conflicted
            } else {
                MergeProbe::Clean
            }
        }
    }

    impl BranchSource for StaticSource {
        fn list_branches<'a>(
            &'a self,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<BranchFact>>> + Send + 'a>> {
            Box::pin(async move { Ok(self.facts.clone()) })
        }

        fn repo_path(&self) -> String {
            "memory://static".to_string()
        }

        fn merge_conflict_probe(&self) -> Option<&dyn MergeConflictProbe> {
            Some(self)
        }
    }

    struct FailingSource;

    impl BranchSource for FailingSource {
        fn list_branches<'a>(
            &'a self,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<BranchFact>>> + Send + 'a>> {
            Box::pin(async move { Err(crate::Gf2tError::NoBranches("nowhere".to_string()).into()) })
        }

        fn repo_path(&self) -> String {
            "nowhere".to_string()
        }
    }

    #[tokio::test]
    async fn probe_from_source_is_used() {
        let source = StaticSource {
            facts: vec![fact("main", 1), fact("develop", 1)],
            conflicted: true,
        };

        let report = analyze_source(&source, AnalysisThresholds::default())
            .await
            .unwrap();

        assert_eq!(report.repo_path, "memory://static");
        assert_eq!(report.blocker_ids(), ["merge-conflicts"]);
    }

    #[tokio::test]
    async fn source_failure_is_fatal_and_typed() {
        let err = analyze_source(&FailingSource, AnalysisThresholds::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<crate::Gf2tError>(),
            Some(crate::Gf2tError::NoBranches(_))
        ));
    }
}

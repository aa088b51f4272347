//! Git repository operations

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{BranchType, Commit, FetchOptions, FetchPrune, Oid, ReferenceType, Repository};
use tracing::{debug, warn};

use crate::data::BranchFact;
use crate::source::MergeProbe;
use crate::Gf2tError;

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open repository at specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path)
            .map_err(|e| {
                debug!("Failed to open {}: {e}", path.display());
                Gf2tError::NotARepository(path.to_path_buf())
            })?;

        Ok(Self { repo })
    }

    /// Clone `url` into `into` without a working tree
    pub fn clone_bare<P: AsRef<Path>>(url: &str, into: P) -> Result<Self> {
        let repo = git2::build::RepoBuilder::new()
            .bare(true)
            .clone(url, into.as_ref())
            .with_context(|| format!("Failed to clone {url}"))?;

        Ok(Self { repo })
    }

    /// Fetch every configured remote, pruning tracking branches deleted upstream
    pub fn fetch_all(&self) -> Result<()> {
        let remotes = self.repo.remotes().context("Failed to list remotes")?;

        for name in remotes.iter().flatten() {
            let mut remote = self
                .repo
                .find_remote(name)
                .with_context(|| format!("Failed to load remote {name}"))?;
            let mut options = FetchOptions::new();
            options.prune(FetchPrune::On);

            remote
                .fetch(&[] as &[&str], Some(&mut options), None)
                .with_context(|| format!("Failed to fetch remote {name}"))?;
            debug!(remote = %name, "Fetched remote");
        }

        Ok(())
    }

    /// Get repository path
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Trunk name used for ahead/behind counts: `main` when it exists, else `master`
    pub fn detect_trunk(&self, remote: &str) -> String {
        if self.resolve_commit("main", remote).is_ok() {
            "main".to_string()
        } else {
            "master".to_string()
        }
    }

    /// Collect one fact per branch: local branches first, then remote-tracking
    /// branches whose name is not already taken
    pub fn branch_facts(&self, remote: &str) -> Result<Vec<BranchFact>> {
        let trunk = self.detect_trunk(remote);
        let trunk_tip = self.resolve_commit(&trunk, remote).ok().map(|c| c.id());
        if trunk_tip.is_none() {
            warn!(trunk = %trunk, "Trunk branch not found; ahead/behind counts will be 0");
        }

        let mut seen = HashSet::new();
        let mut facts = Vec::new();

        for kind in [BranchType::Local, BranchType::Remote] {
            let branches = self
                .repo
                .branches(Some(kind))
                .context("Failed to list branches")?;

            for entry in branches {
                let (branch, _) = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Skipping unreadable branch: {e}");
                        continue;
                    }
                };

                if branch.get().kind() == Some(ReferenceType::Symbolic) {
                    continue;
                }

                let raw_name = match branch.name() {
                    Ok(Some(name)) => name.to_string(),
                    Ok(None) | Err(_) => {
                        warn!("Skipping branch with a non UTF-8 name");
                        continue;
                    }
                };

                let name = match kind {
                    BranchType::Local => raw_name,
                    BranchType::Remote => strip_remote(&raw_name, remote).to_string(),
                };
                if name == "HEAD" || seen.contains(&name) {
                    continue;
                }

                let commit = match branch.get().peel_to_commit() {
                    Ok(commit) => commit,
                    Err(e) => {
                        warn!(branch = %name, "Skipping branch without a readable tip: {e}");
                        continue;
                    }
                };

                match self.fact_for(&name, &commit, trunk_tip) {
                    Ok(fact) => {
                        debug!(
                            branch = %fact.name,
                            ahead = fact.ahead_of_main,
                            behind = fact.behind_main,
                            merged = fact.is_merged,
                            "Collected branch"
                        );
                        seen.insert(name);
                        facts.push(fact);
                    }
                    Err(e) => warn!(branch = %name, "Skipping branch: {e:#}"),
                }
            }
        }

        Ok(facts)
    }

    /// Build the fact for one branch tip
    fn fact_for(&self, name: &str, commit: &Commit, trunk_tip: Option<Oid>) -> Result<BranchFact> {
        let author = commit.author();
        let when = author.when();
        let offset = FixedOffset::east_opt(when.offset_minutes() * 60).unwrap_or(Utc.fix());
        let last_commit_date: DateTime<FixedOffset> = DateTime::from_timestamp(when.seconds(), 0)
            .context("Invalid commit timestamp")?
            .with_timezone(&offset);

        let (ahead_of_main, behind_main, is_merged) = match trunk_tip {
            Some(trunk) => self.compare_with_trunk(commit.id(), trunk),
            None => (0, 0, false),
        };

        Ok(BranchFact {
            name: name.to_string(),
            last_commit_date,
            last_commit_hash: commit.id().to_string(),
            last_commit_message: commit.summary().unwrap_or("").to_string(),
            author: author.name().unwrap_or("Unknown").to_string(),
            ahead_of_main,
            behind_main,
            is_merged,
        })
    }

    /// Ahead/behind counts and merged status of `tip` relative to `trunk`
    fn compare_with_trunk(&self, tip: Oid, trunk: Oid) -> (usize, usize, bool) {
        let (ahead, behind) = self.repo.graph_ahead_behind(tip, trunk).unwrap_or_else(|e| {
            debug!("No shared history between {tip} and trunk: {e}");
            (0, 0)
        });

        let is_merged = tip == trunk || self.repo.graph_descendant_of(trunk, tip).unwrap_or(false);

        (ahead, behind, is_merged)
    }

    /// Resolve a branch name to its tip, trying the local branch first, then
    /// the tracking branch on `remote`
    pub fn resolve_commit(&self, name: &str, remote: &str) -> Result<Commit<'_>> {
        let branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .or_else(|_| {
                self.repo
                    .find_branch(&format!("{remote}/{name}"), BranchType::Remote)
            })
            .with_context(|| format!("Branch not found: {name}"))?;

        branch
            .get()
            .peel_to_commit()
            .with_context(|| format!("Failed to peel {name} to a commit"))
    }

    /// Dry-run merge of `develop` into `trunk`, entirely in memory
    pub fn probe_merge(&self, trunk: &str, develop: &str, remote: &str) -> MergeProbe {
        match self.merge_has_conflicts(trunk, develop, remote) {
            Ok(true) => MergeProbe::Conflicted,
            Ok(false) => MergeProbe::Clean,
            Err(e) => {
                debug!("Merge probe of {develop} into {trunk} unavailable: {e:#}");
                MergeProbe::Unsupported
            }
        }
    }

    fn merge_has_conflicts(&self, trunk: &str, develop: &str, remote: &str) -> Result<bool> {
        let ours = self.resolve_commit(trunk, remote)?;
        let theirs = self.resolve_commit(develop, remote)?;

        self.repo
            .merge_base(ours.id(), theirs.id())
            .context("Branches share no history")?;

        let index = self
            .repo
            .merge_commits(&ours, &theirs, None)
            .context("Failed to merge commits in memory")?;

        Ok(index.has_conflicts())
    }
}

/// Strip the `<remote>/` prefix from a remote-tracking branch name; names on
/// other remotes are kept whole
fn strip_remote<'a>(name: &'a str, remote: &str) -> &'a str {
    name.strip_prefix(remote)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_configured_remote_only() {
        assert_eq!(strip_remote("origin/develop", "origin"), "develop");
        assert_eq!(strip_remote("origin/feature/x", "origin"), "feature/x");
        assert_eq!(strip_remote("upstream/develop", "origin"), "upstream/develop");
        assert_eq!(strip_remote("originals/x", "origin"), "originals/x");
    }
}

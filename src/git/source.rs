//! Branch source backed by a repository on disk

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use anyhow::Result;
use tracing::debug;

use super::{GitRepository, DEFAULT_REMOTE};
use crate::data::BranchFact;
use crate::source::{BranchSource, MergeConflictProbe, MergeProbe};

/// Reads branch facts from a local repository and offers the merge probe
pub struct LocalSource {
    path: PathBuf,
    remote: String,
    display: String,
    fetch: bool,
}

impl LocalSource {
    /// Source for the repository at `path`, folding in `origin` tracking branches
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        // Fail early on anything that is not a repository.
        GitRepository::open_at(path)?;

        let display = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            remote: DEFAULT_REMOTE.to_string(),
            display,
            fetch: false,
        })
    }

    /// Use a different remote for tracking-branch folding
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Fetch and prune all remotes before reading branches
    pub fn with_fetch(mut self, fetch: bool) -> Self {
        self.fetch = fetch;
        self
    }

    /// Report `display` as the repository identifier instead of the path
    pub fn with_display_name(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }
}

impl BranchSource for LocalSource {
    fn list_branches<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<BranchFact>>> + Send + 'a>> {
        Box::pin(async move {
            debug!(path = %self.path.display(), remote = %self.remote, "Reading local branches");
            let repo = GitRepository::open_at(&self.path)?;
            if self.fetch {
                repo.fetch_all()?;
            }
            repo.branch_facts(&self.remote)
        })
    }

    fn repo_path(&self) -> String {
        self.display.clone()
    }

    fn merge_conflict_probe(&self) -> Option<&dyn MergeConflictProbe> {
        Some(self)
    }
}

impl MergeConflictProbe for LocalSource {
    fn probe(&self, trunk: &str, develop: &str) -> MergeProbe {
        match GitRepository::open_at(&self.path) {
            Ok(repo) => repo.probe_merge(trunk, develop, &self.remote),
            Err(e) => {
                debug!("Merge probe could not reopen repository: {e}");
                MergeProbe::Unsupported
            }
        }
    }
}

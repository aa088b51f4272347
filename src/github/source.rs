//! Branch source backed by the GitHub REST API.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use chrono::DateTime;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};
use url::form_urlencoded;

use super::client::{ApiBranch, ApiCommit, ApiComparison};
use super::{GitHubClient, GitHubRepo};
use crate::data::BranchFact;
use crate::source::BranchSource;
use crate::Gf2tError;

/// Branches requested per listing page; also the API maximum.
pub const PAGE_SIZE: usize = 100;

/// Per-branch lookups kept in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Reads branch facts for one GitHub repository.
pub struct GitHubSource {
    client: GitHubClient,
    repo: GitHubRepo,
    concurrency: usize,
}

impl GitHubSource {
    /// Creates a source for `repo` using `client`.
    pub fn new(client: GitHubClient, repo: GitHubRepo) -> Self {
        Self {
            client,
            repo,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets how many per-branch lookups run concurrently (at least one).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    fn repo_api_path(&self) -> String {
        format!("/repos/{}/{}", self.repo.owner, self.repo.repo)
    }

    /// Lists every branch, following pages until a short or empty one.
    async fn list_all_branches(&self) -> Result<Vec<ApiBranch>> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let batch: Vec<ApiBranch> = self
                .client
                .get_json(&format!(
                    "{}/branches?per_page={PAGE_SIZE}&page={page}",
                    self.repo_api_path()
                ))
                .await?;

            let len = batch.len();
            all.extend(batch);
            if len < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        debug!(repo = %self.repo, count = all.len(), pages = page, "Listed GitHub branches");
        Ok(all)
    }

    /// Builds one fact, or `None` when the tip commit cannot be read.
    async fn branch_fact(&self, branch: &ApiBranch, trunk: &str) -> Option<BranchFact> {
        let base = self.repo_api_path();

        let commit: ApiCommit = match self
            .client
            .get_json(&format!("{base}/commits/{}", branch.commit.sha))
            .await
        {
            Ok(commit) => commit,
            Err(e) => {
                warn!(branch = %branch.name, "Skipping branch: {e:#}");
                return None;
            }
        };

        let author = commit.commit.author.as_ref();
        let date = author.and_then(|a| a.date.as_deref());
        let last_commit_date = match date.map(DateTime::parse_from_rfc3339) {
            Some(Ok(date)) => date,
            _ => {
                warn!(branch = %branch.name, "Skipping branch: incomplete commit data");
                return None;
            }
        };

        let (ahead_of_main, behind_main, is_merged) = if branch.name == trunk {
            (0, 0, false)
        } else {
            match self
                .client
                .get_json::<ApiComparison>(&format!(
                    "{base}/compare/{}...{}",
                    encode_ref(trunk),
                    encode_ref(&branch.name)
                ))
                .await
            {
                Ok(cmp) => (cmp.ahead_by, cmp.behind_by, cmp.ahead_by == 0),
                Err(e) => {
                    debug!(branch = %branch.name, "Compare with {trunk} unavailable: {e:#}");
                    (0, 0, false)
                }
            }
        };

        Some(BranchFact {
            name: branch.name.clone(),
            last_commit_date,
            last_commit_hash: commit.sha,
            last_commit_message: commit.commit.message.lines().next().unwrap_or("").to_string(),
            author: author
                .and_then(|a| a.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            ahead_of_main,
            behind_main,
            is_merged,
        })
    }
}

/// Trunk used for comparisons: `main`, else `master`, else the first branch.
fn pick_trunk(branches: &[ApiBranch]) -> Option<&str> {
    ["main", "master"]
        .into_iter()
        .find(|name| branches.iter().any(|b| b.name == *name))
        .or_else(|| branches.first().map(|b| b.name.as_str()))
}

/// Percent-encodes each `/`-separated component of a ref name for use in a URL path.
fn encode_ref(name: &str) -> String {
    name.split('/')
        .map(|part| form_urlencoded::byte_serialize(part.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}

impl BranchSource for GitHubSource {
    fn list_branches<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<BranchFact>>> + Send + 'a>> {
        Box::pin(async move {
            let branches = self.list_all_branches().await?;
            let Some(trunk) = pick_trunk(&branches) else {
                return Err(Gf2tError::NoBranches(self.repo.to_string()).into());
            };
            debug!(repo = %self.repo, trunk = %trunk, "Comparing branches against trunk");

            let lookups: Vec<_> = branches
                .iter()
                .map(|branch| self.branch_fact(branch, trunk))
                .collect();
            let facts: Vec<Option<BranchFact>> = stream::iter(lookups)
                .buffered(self.concurrency)
                .collect()
                .await;

            Ok(facts.into_iter().flatten().collect())
        })
    }

    fn repo_path(&self) -> String {
        self.repo.html_url()
    }
}

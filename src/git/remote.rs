//! Analysis targets: local paths and remote repository URLs

use std::path::PathBuf;

use anyhow::Result;
use url::Url;

use crate::github::GitHubRepo;
use crate::Gf2tError;

/// Where the repository to analyze lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoTarget {
    /// A working copy or bare repository on disk
    Local(PathBuf),
    /// A clonable URL (`https://`, `http://`, `ssh://` or scp-like `git@host:path`)
    Remote(String),
}

impl RepoTarget {
    /// Classify a command-line target
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Gf2tError::InvalidTarget("empty target".to_string()).into());
        }

        if input.starts_with("http") || input.starts_with("git@") || input.starts_with("ssh://") {
            Ok(RepoTarget::Remote(input.to_string()))
        } else {
            Ok(RepoTarget::Local(PathBuf::from(input)))
        }
    }

    /// GitHub owner and repository, when this target is a GitHub URL
    pub fn github_repo(&self) -> Option<GitHubRepo> {
        match self {
            RepoTarget::Remote(uri) => extract_github_repo(uri).ok(),
            RepoTarget::Local(_) => None,
        }
    }
}

/// Extract the owner and repository name from a GitHub SSH or HTTPS URI
pub fn extract_github_repo(uri: &str) -> Result<GitHubRepo> {
    let path = if let Some(rest) = uri.strip_prefix("git@github.com:") {
        rest.to_string()
    } else {
        let url = Url::parse(uri).map_err(|_| Gf2tError::InvalidTarget(uri.to_string()))?;
        if url.host_str() != Some("github.com") {
            return Err(Gf2tError::InvalidTarget(format!("not a GitHub URI: {uri}")).into());
        }
        url.path().trim_start_matches('/').to_string()
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    GitHubRepo::parse_slug(path)
}

//! Remote branch source over the GitHub REST API.
//!
//! No clone is needed; branch tips come from the branch listing and
//! ahead/behind counts from the compare endpoint. There is no merge probe.

pub mod client;
pub mod source;

use std::fmt;

use anyhow::Result;

pub use client::GitHubClient;
pub use source::GitHubSource;

use crate::Gf2tError;

/// Public API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Environment variable overriding [`DEFAULT_API_BASE`], e.g. for GitHub Enterprise.
pub const API_BASE_ENV_VAR: &str = "GITHUB_API_URL";

/// A repository on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepo {
    /// User or organization.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl GitHubRepo {
    /// Parses `owner/repo`.
    pub fn parse_slug(slug: &str) -> Result<Self> {
        let mut parts = slug.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(Gf2tError::InvalidTarget(format!(
                "invalid GitHub repository '{slug}', expected owner/repo"
            ))
            .into()),
        }
    }

    /// Browser URL used as the report's repository identifier.
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trips_through_display() {
        let repo = GitHubRepo::parse_slug("acme/widgets").unwrap();
        assert_eq!(repo.to_string(), "acme/widgets");
        assert_eq!(repo.html_url(), "https://github.com/acme/widgets");
    }

    #[test]
    fn malformed_slugs_are_rejected() {
        for slug in ["acme", "acme/", "/widgets", "a/b/c", ""] {
            assert!(GitHubRepo::parse_slug(slug).is_err(), "{slug}");
        }
    }
}

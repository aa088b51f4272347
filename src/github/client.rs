//! Minimal GitHub REST client.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::DEFAULT_API_BASE;
use crate::Gf2tError;

/// HTTP timeout applied to every API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_VERSION: &str = "2022-11-28";

/// One entry of `GET /repos/{owner}/{repo}/branches`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiBranch {
    /// Branch name.
    pub name: String,
    /// Tip commit reference.
    pub commit: ApiCommitRef,
}

/// Commit reference inside a branch listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommitRef {
    /// Commit SHA.
    pub sha: String,
}

/// Response of `GET /repos/{owner}/{repo}/commits/{sha}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommit {
    /// Commit SHA.
    pub sha: String,
    /// Git-level commit data.
    pub commit: ApiCommitDetail,
}

/// Git-level commit data.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommitDetail {
    /// Author signature; absent for some imported commits.
    pub author: Option<ApiSignature>,
    /// Full commit message.
    pub message: String,
}

/// Commit signature.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSignature {
    /// Author name.
    pub name: Option<String>,
    /// ISO 8601 author date.
    pub date: Option<String>,
}

/// Response of `GET /repos/{owner}/{repo}/compare/{base}...{head}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiComparison {
    /// Commits on head not on base.
    pub ahead_by: usize,
    /// Commits on base not on head.
    pub behind_by: usize,
}

/// Authenticated GitHub API client.
pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client for the public API.
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("gf2t/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            token,
        })
    }

    /// Points the client at another API root.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Issues a GET for `path` (relative to the API root) and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.api_base);
        info!(url = %url, authenticated = self.token.is_some(), "Sending request to GitHub API");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Gf2tError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!("Failed to read error response body: {e}");
                String::new()
            });
            return Err(Gf2tError::GitHubApi {
                status: status.as_u16(),
                path: path.to_string(),
                body,
            }
            .into());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode GitHub response for {path}"))
    }
}

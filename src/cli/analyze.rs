//! Analyze command: classifies branches and reports migration readiness.

use std::future::Future;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use super::{formatting, OutputFormat, ThresholdArgs};
use crate::analysis::AnalysisThresholds;
use crate::data::AnalysisReport;
use crate::git::{GitRepository, LocalSource, RepoTarget};
use crate::github::{GitHubClient, GitHubRepo, GitHubSource, API_BASE_ENV_VAR, TOKEN_ENV_VAR};
use crate::source::analyze_source;
use crate::utils::Settings;
use crate::Gf2tError;

/// Analyze command options.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// Local path or remote Git URL to analyze.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Reads a GitHub URL through the REST API instead of cloning it.
    #[arg(long)]
    pub github_api: bool,

    /// Fetches and prunes all remotes of a local repository before analyzing.
    #[arg(long)]
    pub fetch: bool,

    /// Threshold overrides.
    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load()?;
        let thresholds = self.thresholds.apply(settings.thresholds.clone());
        let target = RepoTarget::parse(&self.target)?;

        let report = analyze_target(&target, self.github_api, self.fetch, &settings, thresholds)?;

        match self.format {
            OutputFormat::Text => formatting::print_report(&report)?,
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            ),
            OutputFormat::Yaml => print!(
                "{}",
                serde_yaml::to_string(&report).context("Failed to serialize report")?
            ),
        }

        Ok(())
    }
}

/// Analyzes a local path or remote URL.
///
/// Remote URLs are cloned into a temporary directory that is removed
/// afterwards, unless `via_api` asks for the GitHub API source. `fetch`
/// refreshes a local repository's remotes first.
pub(crate) fn analyze_target(
    target: &RepoTarget,
    via_api: bool,
    fetch: bool,
    settings: &Settings,
    thresholds: AnalysisThresholds,
) -> Result<AnalysisReport> {
    match target {
        RepoTarget::Local(path) => {
            let source = LocalSource::new(path)?.with_fetch(fetch);
            block_on(analyze_source(&source, thresholds))
        }
        RepoTarget::Remote(url) if via_api => {
            let repo = target.github_repo().ok_or_else(|| {
                Gf2tError::InvalidTarget(format!("--github-api needs a GitHub URL, got {url}"))
            })?;
            analyze_github(repo, settings, thresholds)
        }
        RepoTarget::Remote(url) => {
            let temp_dir = tempfile::Builder::new()
                .prefix("gf2t-")
                .tempdir()
                .context("Failed to create temporary clone directory")?;
            eprintln!("🔄 Cloning {url}...");
            GitRepository::clone_bare(url, temp_dir.path())?;
            debug!(url = %url, dir = %temp_dir.path().display(), "Cloned repository");

            let source = LocalSource::new(temp_dir.path())?.with_display_name(url.as_str());
            block_on(analyze_source(&source, thresholds))
        }
    }
}

/// Analyzes a GitHub repository through the REST API.
pub(crate) fn analyze_github(
    repo: GitHubRepo,
    settings: &Settings,
    thresholds: AnalysisThresholds,
) -> Result<AnalysisReport> {
    let mut client = GitHubClient::new(settings.get_env_var(TOKEN_ENV_VAR))?;
    if let Some(api_base) = settings.get_env_var(API_BASE_ENV_VAR) {
        client = client.with_api_base(api_base);
    }

    let source = GitHubSource::new(client, repo);
    block_on(analyze_source(&source, thresholds))
}

fn block_on<T>(future: impl Future<Output = Result<T>>) -> Result<T> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(future)
}

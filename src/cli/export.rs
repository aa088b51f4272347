//! Export command: writes the analysis as JSON for the web dashboard.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::info;

use super::analyze::{analyze_github, analyze_target};
use super::ThresholdArgs;
use crate::data::{RepoExportData, DEFAULT_EXPORT_FILE};
use crate::git::RepoTarget;
use crate::github::GitHubRepo;
use crate::utils::Settings;

/// Export command options.
#[derive(Parser)]
pub struct ExportCommand {
    /// Repository path or remote URL to analyze.
    #[arg(long, default_value = ".")]
    pub path: String,

    /// File the export is written to.
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    pub output: PathBuf,

    /// Reads `owner/repo` through the GitHub API instead of `--path`.
    #[arg(long, value_name = "OWNER/REPO")]
    pub github: Option<String>,

    /// Fetches and prunes all remotes of a local repository before analyzing.
    #[arg(long)]
    pub fetch: bool,

    /// Threshold overrides.
    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

impl ExportCommand {
    /// Executes the export command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load()?;
        let thresholds = self.thresholds.apply(settings.thresholds.clone());

        let report = match &self.github {
            Some(slug) => analyze_github(GitHubRepo::parse_slug(slug)?, &settings, thresholds)?,
            None => analyze_target(
                &RepoTarget::parse(&self.path)?,
                false,
                self.fetch,
                &settings,
                thresholds,
            )?,
        };

        let export = RepoExportData::from_report(report, Utc::now());
        export.save_to_file(&self.output)?;
        info!(
            output = %self.output.display(),
            branches = export.branches.len(),
            "Wrote export"
        );

        println!("✅ Exported to {}", self.output.display());
        println!("   Load this file in the web dashboard to explore the results.");
        Ok(())
    }
}

//! CLI interface for gf2t.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::analysis::AnalysisThresholds;

pub mod analyze;
pub mod export;
pub mod formatting;
pub mod learn;
pub mod plan;

/// gf2t: Git Flow to trunk-based development migration assistant.
#[derive(Parser)]
#[command(name = "gf2t")]
#[command(
    about = "Analyze a Git Flow repository and assess its readiness for trunk-based development",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Analyzes a repository for Git Flow patterns and migration readiness.
    Analyze(analyze::AnalyzeCommand),
    /// Exports the analysis as JSON for the web dashboard.
    Export(export::ExportCommand),
    /// Describes the migration steps for a ready repository.
    Plan(plan::PlanCommand),
    /// Prints reading material on trunk-based development.
    Learn(learn::LearnCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze(cmd) => cmd.execute(),
            Commands::Export(cmd) => cmd.execute(),
            Commands::Plan(cmd) => cmd.execute(),
            Commands::Learn(cmd) => cmd.execute(),
        }
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Per-run threshold overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct ThresholdArgs {
    /// Days without a commit before a branch counts as stale.
    #[arg(long, value_name = "DAYS")]
    pub stale_days: Option<i64>,
    /// Active feature branches allowed before migration is blocked.
    #[arg(long, value_name = "COUNT")]
    pub max_features: Option<usize>,
}

impl ThresholdArgs {
    /// Applies the flags on top of `base`.
    pub fn apply(&self, mut base: AnalysisThresholds) -> AnalysisThresholds {
        if let Some(days) = self.stale_days {
            base.stale_after_days = days;
        }
        if let Some(count) = self.max_features {
            base.max_active_features = count;
        }
        base
    }
}

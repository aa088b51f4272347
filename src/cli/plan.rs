//! Plan command: lists the steps that move a ready repository to trunk-based development.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use super::analyze::analyze_target;
use super::{formatting, OutputFormat, ThresholdArgs};
use crate::analysis::{build_plan, DEFAULT_ARCHIVE_EOL_DAYS};
use crate::git::RepoTarget;
use crate::utils::Settings;

const MAX_EOL_DAYS: i64 = 36_500;

/// Plan command options.
#[derive(Parser)]
pub struct PlanCommand {
    /// Local path or remote Git URL to plan for.
    #[arg(value_name = "TARGET", default_value = ".")]
    pub target: String,

    /// Days archived branches keep their backup tags (at most 100 years).
    #[arg(
        long,
        value_name = "DAYS",
        default_value_t = DEFAULT_ARCHIVE_EOL_DAYS,
        value_parser = clap::value_parser!(i64).range(0..=MAX_EOL_DAYS)
    )]
    pub eol_days: i64,

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

impl PlanCommand {
    /// Executes the plan command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load()?;
        let thresholds = self.thresholds.apply(settings.thresholds.clone());
        let target = RepoTarget::parse(&self.target)?;

        let report = analyze_target(&target, self.github_api, self.fetch, &settings, thresholds)?;
        let plan = build_plan(&report, self.eol_days, Utc::now())
            .context("Resolve the blockers reported by `gf2t analyze` first")?;

        match self.format {
            OutputFormat::Text => formatting::print_plan(&plan)?,
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?
            ),
            OutputFormat::Yaml => print!(
                "{}",
                serde_yaml::to_string(&plan).context("Failed to serialize plan")?
            ),
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::super::{Cli, Commands, OutputFormat};
    use clap::Parser;

    #[test]
    fn plan_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["gf2t", "plan"]).unwrap();
        let Commands::Plan(cmd) = cli.command else {
            panic!("expected plan");
        };

        assert_eq!(cmd.target, ".");
        assert_eq!(cmd.eol_days, 90);
        assert_eq!(cmd.format, OutputFormat::Text);
    }

    #[test]
    fn plan_accepts_eol_override() {
        let cli =
            Cli::try_parse_from(["gf2t", "plan", "/repo", "--eol-days", "30", "--format", "json"])
                .unwrap();
        let Commands::Plan(cmd) = cli.command else {
            panic!("expected plan");
        };

        assert_eq!(cmd.eol_days, 30);
        assert_eq!(cmd.format, OutputFormat::Json);
    }

    #[test]
    fn plan_rejects_out_of_range_eol() {
        for days in ["-1", "100000000"] {
            let parsed = Cli::try_parse_from(["gf2t", "plan", "/repo", "--eol-days", days]);
            assert!(parsed.is_err(), "{days}");
        }
    }
}

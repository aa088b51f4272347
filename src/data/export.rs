//! Versioned export envelope read by the web dashboard.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnalysisReport, Branch, FlowConfig};

/// Version of the export envelope format.
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";

/// Default file name used by `gf2t export`.
pub const DEFAULT_EXPORT_FILE: &str = "gf2t-export.json";

/// Export file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoExportData {
    /// Envelope format version.
    pub version: String,
    /// When the export was written.
    pub exported_at: DateTime<Utc>,
    /// Path or URL of the analyzed repository.
    pub repo_path: String,
    /// Copy of `report.all_branches`.
    pub branches: Vec<Branch>,
    /// Copy of `report.git_flow_config`.
    pub git_flow_config: FlowConfig,
    /// The full report.
    pub report: AnalysisReport,
}

impl RepoExportData {
    /// Wraps a report in an export envelope stamped with `exported_at`.
    pub fn from_report(report: AnalysisReport, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION.to_string(),
            exported_at,
            repo_path: report.repo_path.clone(),
            branches: report.all_branches.clone(),
            git_flow_config: report.git_flow_config.clone(),
            report,
        }
    }

    /// Renders the envelope as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize export data to JSON")
    }

    /// Writes the envelope to `path` as pretty-printed JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;

        fs::write(&path, json).with_context(|| {
            format!("Failed to write export file: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Loads an envelope previously written by [`Self::save_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read export file: {}", path.as_ref().display())
        })?;

        serde_json::from_str(&content).context("Failed to parse export file")
    }
}

//! Fatal errors surfaced to callers.

use std::path::PathBuf;

use thiserror::Error;

/// Terminal failures of an analysis run.
///
/// Per-branch and per-check problems never become one of these; they are
/// logged and the affected branch or rule is skipped.
#[derive(Error, Debug)]
pub enum Gf2tError {
    /// The local path does not hold a git repository.
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// The GitHub API answered with a non-success status.
    #[error("GitHub API error: HTTP {status} for {path}: {body}")]
    GitHubApi {
        /// HTTP status code.
        status: u16,
        /// Request path relative to the API base.
        path: String,
        /// Response body, possibly empty.
        body: String,
    },

    /// The remote could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The source listed no branches at all.
    #[error("No branches found for {0}")]
    NoBranches(String),

    /// The analysis target could not be understood.
    #[error("Invalid analysis target: {0}")]
    InvalidTarget(String),

    /// The archive retention period is negative or too large to represent.
    #[error("Invalid archive retention of {0} days")]
    InvalidEolDays(i64),

    /// A migration plan was requested for a repository that still has blockers.
    #[error("Repository is not ready for migration: {blockers} blocker(s) must be resolved first")]
    NotReady {
        /// Number of outstanding blockers.
        blockers: usize,
    },
}

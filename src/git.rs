//! Local repository access through libgit2.

pub mod remote;
pub mod repository;
pub mod source;

pub use remote::RepoTarget;
pub use repository::GitRepository;
pub use source::LocalSource;

/// Remote whose tracking branches are folded into local names.
pub const DEFAULT_REMOTE: &str = "origin";

//! # gf2t
//!
//! Inspects a Git Flow repository and decides how ready it is to move to
//! trunk-based development.
//!
//! ## Features
//!
//! - Branch classification against the Git Flow naming convention
//! - Blocker detection and a 0-100 readiness score
//! - Local (libgit2) and GitHub REST API branch sources
//! - JSON export for the web dashboard
//!
//! ## Quick Start
//!
//! ```rust
//! use gf2t::analysis::classify;
//! use gf2t::data::BranchType;
//!
//! assert_eq!(classify("feature/login"), BranchType::Feature);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod data;
pub mod education;
pub mod error;
pub mod git;
pub mod github;
pub mod source;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::error::Gf2tError;

/// The current version of gf2t.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Branch name classification.

use crate::data::BranchType;

const MAIN_NAMES: &[&str] = &["main", "master"];
const DEVELOP_NAMES: &[&str] = &["develop", "dev"];
const ENVIRONMENT_NAMES: &[&str] = &["qa", "staging", "uat", "test", "pre-prod", "preprod"];

/// Classifies a branch name under the Git Flow convention.
///
/// Matching is exact and case-sensitive; the first matching rule wins. A
/// prefix only counts with its slash, so `feature` alone is [`BranchType::Other`].
pub fn classify(name: &str) -> BranchType {
    if MAIN_NAMES.contains(&name) {
        BranchType::Main
    } else if DEVELOP_NAMES.contains(&name) {
        BranchType::Develop
    } else if name.starts_with("feature/") {
        BranchType::Feature
    } else if name.starts_with("release/") {
        BranchType::Release
    } else if name.starts_with("hotfix/") {
        BranchType::Hotfix
    } else if ENVIRONMENT_NAMES.contains(&name) {
        BranchType::Environment
    } else {
        BranchType::Other
    }
}

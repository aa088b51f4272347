//! Git Flow layout detection.

use crate::data::{Branch, BranchType, FlowConfig};

const DEFAULT_MAIN_NAME: &str = "main";
const DEFAULT_DEVELOP_NAME: &str = "develop";

/// Derives the flow layout from a classified branch list.
///
/// The first `main`-typed and first `develop`-typed branches in input order
/// name the trunk and integration branch. Groupings keep input order.
pub fn detect_flow(branches: &[Branch]) -> FlowConfig {
    let first_of = |kind: BranchType| branches.iter().find(|b| b.branch_type == kind);
    let group = |kind: BranchType| -> Vec<Branch> {
        branches
            .iter()
            .filter(|b| b.branch_type == kind)
            .cloned()
            .collect()
    };

    let main = first_of(BranchType::Main);
    let develop = first_of(BranchType::Develop);

    FlowConfig {
        has_main: main.is_some(),
        has_develop: develop.is_some(),
        main_branch_name: main.map_or(DEFAULT_MAIN_NAME, Branch::name).to_string(),
        develop_branch_name: develop
            .map_or(DEFAULT_DEVELOP_NAME, Branch::name)
            .to_string(),
        feature_branches: group(BranchType::Feature),
        release_branches: group(BranchType::Release),
        hotfix_branches: group(BranchType::Hotfix),
        environment_branches: group(BranchType::Environment),
        other_branches: group(BranchType::Other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::analysis::test_support::branch;

    fn names(branches: &[Branch]) -> Vec<&str> {
        branches.iter().map(Branch::name).collect()
    }

    #[test]
    fn empty_input_uses_default_names() {
        let config = detect_flow(&[]);

        assert!(!config.has_main);
        assert!(!config.has_develop);
        assert_eq!(config.main_branch_name, "main");
        assert_eq!(config.develop_branch_name, "develop");
        assert!(config.feature_branches.is_empty());
    }

    #[test]
    fn detects_master_and_dev() {
        let branches = vec![branch("master", 0), branch("dev", 0)];

        let config = detect_flow(&branches);

        assert!(config.has_main);
        assert!(config.has_develop);
        assert_eq!(config.main_branch_name, "master");
        assert_eq!(config.develop_branch_name, "dev");
    }

    #[test]
    fn first_trunk_in_input_order_wins() {
        let branches = vec![branch("master", 0), branch("main", 0)];

        let config = detect_flow(&branches);

        assert_eq!(config.main_branch_name, "master");
    }

    #[test]
    fn groups_preserve_input_order() {
        let branches = vec![
            branch("feature/b", 0),
            branch("main", 0),
            branch("staging", 0),
            branch("feature/a", 0),
            branch("release/2.0", 0),
            branch("hotfix/crash", 0),
            branch("spike", 0),
            branch("release/1.0", 0),
        ];

        let config = detect_flow(&branches);

        assert_eq!(names(&config.feature_branches), ["feature/b", "feature/a"]);
        assert_eq!(names(&config.release_branches), ["release/2.0", "release/1.0"]);
        assert_eq!(names(&config.hotfix_branches), ["hotfix/crash"]);
        assert_eq!(names(&config.environment_branches), ["staging"]);
        assert_eq!(names(&config.other_branches), ["spike"]);
    }

    #[test]
    fn trunk_and_develop_are_not_grouped() {
        let branches = vec![branch("main", 0), branch("develop", 0)];

        let config = detect_flow(&branches);

        assert!(config.other_branches.is_empty());
        assert!(config.feature_branches.is_empty());
    }
}

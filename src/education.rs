//! Reading list on trunk-based development and the practices around it.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Topic a reference link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    /// Trunk-based development itself.
    TrunkBasedDev,
    /// The Git Flow model being migrated away from.
    GitFlow,
    /// Feature flags, which make trunk-based development workable.
    FeatureFlags,
    /// Continuous integration and delivery.
    CiCd,
}

impl Topic {
    /// All topics in display order.
    pub const ALL: [Topic; 4] = [
        Topic::TrunkBasedDev,
        Topic::GitFlow,
        Topic::FeatureFlags,
        Topic::CiCd,
    ];

    /// Heading printed above the topic's links.
    pub fn heading(self) -> &'static str {
        match self {
            Topic::TrunkBasedDev => "🌳 Trunk-Based Development",
            Topic::GitFlow => "🔀 Git Flow",
            Topic::FeatureFlags => "🚩 Feature Flags",
            Topic::CiCd => "🔄 CI/CD Best Practices",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Topic::TrunkBasedDev => "trunk-based-dev",
            Topic::GitFlow => "git-flow",
            Topic::FeatureFlags => "feature-flags",
            Topic::CiCd => "ci-cd",
        };
        f.write_str(label)
    }
}

/// An external article or guide.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReferenceLink {
    /// Link title.
    pub title: &'static str,
    /// Target URL.
    pub url: &'static str,
    /// Topic the link belongs to.
    pub category: Topic,
    /// One-line summary.
    pub description: &'static str,
}

/// The full reading list.
pub const REFERENCE_LINKS: &[ReferenceLink] = &[
    ReferenceLink {
        title: "Trunk Based Development",
        url: "https://trunkbaseddevelopment.com",
        category: Topic::TrunkBasedDev,
        description: "The definitive guide by Paul Hammant",
    },
    ReferenceLink {
        title: "Google Cloud — Trunk-Based Development",
        url: "https://cloud.google.com/architecture/devops/devops-tech-trunk-based-development",
        category: Topic::TrunkBasedDev,
        description: "DORA research on trunk-based development and its impact on delivery performance",
    },
    ReferenceLink {
        title: "Atlassian — Trunk-Based Development",
        url: "https://www.atlassian.com/continuous-delivery/continuous-integration/trunk-based-development",
        category: Topic::TrunkBasedDev,
        description: "Atlassian's overview of trunk-based development practices",
    },
    ReferenceLink {
        title: "Branching Patterns — Martin Fowler",
        url: "https://martinfowler.com/articles/branching-patterns.html",
        category: Topic::TrunkBasedDev,
        description: "Comprehensive analysis of branching patterns including trunk-based development",
    },
    ReferenceLink {
        title: "A Successful Git Branching Model",
        url: "https://nvie.com/posts/a-successful-git-branching-model/",
        category: Topic::GitFlow,
        description: "Original Git Flow post by Vincent Driessen (includes 2020 reflection recommending simpler models)",
    },
    ReferenceLink {
        title: "Atlassian — Gitflow Workflow",
        url: "https://www.atlassian.com/git/tutorials/comparing-workflows/gitflow-workflow",
        category: Topic::GitFlow,
        description: "Atlassian Git Flow tutorial and workflow explanation",
    },
    ReferenceLink {
        title: "Feature Toggles — Martin Fowler",
        url: "https://martinfowler.com/articles/feature-toggles.html",
        category: Topic::FeatureFlags,
        description: "Comprehensive guide to feature toggles (flags), a key enabler for trunk-based development",
    },
    ReferenceLink {
        title: "What Are Feature Flags?",
        url: "https://launchdarkly.com/blog/what-are-feature-flags/",
        category: Topic::FeatureFlags,
        description: "Introduction to feature flags and how they enable continuous delivery",
    },
    ReferenceLink {
        title: "Minimum Viable CD",
        url: "https://minimumcd.org",
        category: Topic::CiCd,
        description: "Minimum Viable Continuous Delivery checklist, prerequisites for trunk-based development",
    },
    ReferenceLink {
        title: "DORA — DevOps Research and Assessment",
        url: "https://dora.dev",
        category: Topic::CiCd,
        description: "DORA metrics and research on DevOps performance and delivery capabilities",
    },
];

/// Links for one topic, in catalogue order.
pub fn links_for(topic: Topic) -> impl Iterator<Item = &'static ReferenceLink> {
    REFERENCE_LINKS.iter().filter(move |l| l.category == topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_links() {
        let counts: Vec<usize> = Topic::ALL.iter().map(|t| links_for(*t).count()).collect();
        assert_eq!(counts, [4, 2, 2, 2]);
        assert_eq!(counts.iter().sum::<usize>(), REFERENCE_LINKS.len());
    }

    #[test]
    fn topics_display_as_kebab_case() {
        let labels: Vec<String> = Topic::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(labels, ["trunk-based-dev", "git-flow", "feature-flags", "ci-cd"]);
    }

    #[test]
    fn links_are_https() {
        assert!(REFERENCE_LINKS.iter().all(|l| l.url.starts_with("https://")));
    }
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use anyhow::Result;
use gf2t::analysis::AnalysisThresholds;
use gf2t::github::{GitHubClient, GitHubRepo, GitHubSource};
use gf2t::source::{analyze_source, BranchSource};
use gf2t::Gf2tError;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO: &str = "/repos/acme/widgets";

fn source_for(server: &MockServer) -> Result<GitHubSource> {
    let client = GitHubClient::new(None)?.with_api_base(server.uri());
    Ok(GitHubSource::new(client, GitHubRepo::parse_slug("acme/widgets")?))
}

fn listing(names: &[String]) -> Value {
    Value::Array(
        names
            .iter()
            .map(|name| json!({ "name": name, "commit": { "sha": format!("sha-{name}").replace(['/', '#'], "-") } }))
            .collect(),
    )
}

fn commit_body(message: &str) -> Value {
    json!({
        "sha": "0123456789abcdef0123456789abcdef01234567",
        "commit": {
            "author": { "name": "Octo Cat", "date": "2025-05-01T10:00:00Z" },
            "message": message
        }
    })
}

async fn mount_listing(server: &MockServer, page: &str, names: &[String]) {
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/branches")))
        .and(query_param("per_page", "100"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(names)))
        .mount(server)
        .await;
}

async fn mount_commits(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(format!("^{REPO}/commits/.+$")))
        .respond_with(ResponseTemplate::new(200).set_body_json(commit_body("Do work\n\nDetails")))
        .mount(server)
        .await;
}

async fn mount_compare(server: &MockServer, ahead: usize, behind: usize) {
    Mock::given(method("GET"))
        .and(path_regex(format!("^{REPO}/compare/.+$")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ahead_by": ahead, "behind_by": behind })),
        )
        .mount(server)
        .await;
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn follows_pages_until_a_short_page() -> Result<()> {
    let server = MockServer::start().await;
    let first: Vec<String> = (0..100).map(|i| format!("feature/f{i}")).collect();
    mount_listing(&server, "1", &first).await;
    mount_listing(&server, "2", &names(&["main", "develop"])).await;
    mount_commits(&server).await;
    mount_compare(&server, 3, 1).await;

    let facts = source_for(&server)?.list_branches().await?;

    assert_eq!(facts.len(), 102);
    assert_eq!(facts[0].name, "feature/f0");
    assert_eq!(facts[99].name, "feature/f99");
    assert_eq!(facts[101].name, "develop");
    assert_eq!(facts[0].last_commit_message, "Do work");
    assert_eq!(facts[0].author, "Octo Cat");
    assert_eq!((facts[0].ahead_of_main, facts[0].behind_main), (3, 1));

    let main = facts.iter().find(|f| f.name == "main").unwrap();
    assert_eq!((main.ahead_of_main, main.behind_main, main.is_merged), (0, 0, false));

    Ok(())
}

#[tokio::test]
async fn skips_branches_whose_commit_cannot_be_read() -> Result<()> {
    let server = MockServer::start().await;
    mount_listing(&server, "1", &names(&["main", "develop", "broken"])).await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/commits/sha-broken")))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_commits(&server).await;
    mount_compare(&server, 1, 0).await;

    let facts = source_for(&server)?.list_branches().await?;

    let got: Vec<&str> = facts.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(got, ["main", "develop"]);
    Ok(())
}

#[tokio::test]
async fn branch_with_nothing_ahead_counts_as_merged() -> Result<()> {
    let server = MockServer::start().await;
    mount_listing(&server, "1", &names(&["master", "develop", "release/1.0"])).await;
    mount_commits(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/compare/master...release/1.0")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ahead_by": 0, "behind_by": 4 })))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_compare(&server, 2, 0).await;

    let source = source_for(&server)?;
    let report = analyze_source(&source, AnalysisThresholds::default()).await?;

    assert_eq!(report.repo_path, "https://github.com/acme/widgets");
    assert_eq!(report.git_flow_config.main_branch_name, "master");
    let release = report
        .all_branches
        .iter()
        .find(|b| b.name() == "release/1.0")
        .unwrap();
    assert!(release.is_merged());
    assert_eq!(release.fact.behind_main, 4);

    let develop = report.all_branches.iter().find(|b| b.name() == "develop").unwrap();
    assert!(!develop.is_merged());

    // No merge probe over the API, and the merged release does not block.
    assert!(report.blockers.is_empty());
    Ok(())
}

#[tokio::test]
async fn branch_names_are_encoded_in_compare_path() -> Result<()> {
    let server = MockServer::start().await;
    mount_listing(&server, "1", &names(&["main", "develop", "hotfix/#42"])).await;
    mount_commits(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/compare/main...hotfix/%2342")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ahead_by": 0, "behind_by": 2 })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_compare(&server, 1, 0).await;

    let source = source_for(&server)?;
    let report = analyze_source(&source, AnalysisThresholds::default()).await?;

    let hotfix = report
        .all_branches
        .iter()
        .find(|b| b.name() == "hotfix/#42")
        .unwrap();
    assert!(hotfix.is_merged());
    assert_eq!(hotfix.fact.behind_main, 2);
    assert!(report.blockers.is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_compare_falls_back_to_zero_counts() -> Result<()> {
    let server = MockServer::start().await;
    mount_listing(&server, "1", &names(&["main", "feature/x"])).await;
    mount_commits(&server).await;
    Mock::given(method("GET"))
        .and(path_regex(format!("^{REPO}/compare/.+$")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let facts = source_for(&server)?.list_branches().await?;

    let feature = facts.iter().find(|f| f.name == "feature/x").unwrap();
    assert_eq!(
        (feature.ahead_of_main, feature.behind_main, feature.is_merged),
        (0, 0, false)
    );
    Ok(())
}

#[tokio::test]
async fn empty_listing_is_no_branches() -> Result<()> {
    let server = MockServer::start().await;
    mount_listing(&server, "1", &[]).await;

    let err = source_for(&server)?.list_branches().await.unwrap_err();

    match err.downcast_ref::<Gf2tError>() {
        Some(Gf2tError::NoBranches(repo)) => assert_eq!(repo, "acme/widgets"),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn listing_failure_is_an_api_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/branches")))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = source_for(&server)?.list_branches().await.unwrap_err();

    match err.downcast_ref::<Gf2tError>() {
        Some(Gf2tError::GitHubApi { status, body, .. }) => {
            assert_eq!(*status, 404);
            assert_eq!(body, "Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn token_is_sent_as_bearer_auth() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/branches")))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&names(&["main"]))))
        .expect(1)
        .mount(&server)
        .await;
    mount_commits(&server).await;

    let client = GitHubClient::new(Some("t0ken".to_string()))?.with_api_base(server.uri());
    let source = GitHubSource::new(client, GitHubRepo::parse_slug("acme/widgets")?)
        .with_concurrency(1);
    let facts = source.list_branches().await?;

    assert_eq!(facts.len(), 1);
    Ok(())
}

use release_maker::cli::{self, WorkflowArgs, WorkflowOutcome};
use release_maker::config::Config;
use release_maker::domain::{ReleaseType, Version};
use release_maker::forge::{query, GitHubRepo, MockForge};
use release_maker::vcs::{RecordingVcs, VcsCall};
use release_maker::ReleaseMakerError;
use serde_json::{json, Value};

const API: &str = "https://api.test/repos/org/repo";
const OLD_CHANGELOG: &str = "# Repo Change History\n\n# Repo Release 1.4.0\n\nold notes\n";

fn config() -> Config {
    Config {
        api_url: "https://api.test".to_string(),
        web_url: "https://forge.test".to_string(),
        ..Config::default()
    }
}

fn pull(number: u64, title: &str, merged_at: &str) -> Value {
    json!({
        "number": number,
        "title": title,
        "merged_at": merged_at,
        "html_url": format!("https://forge.test/org/repo/pull/{}", number),
        "merge_commit_sha": format!("{:040x}", number),
        "user": {"login": "octocat", "html_url": "https://forge.test/octocat"}
    })
}

/// Forge with release 1.4.0, two merged pull requests and the given open ones
fn forge(open_pulls: Value) -> MockForge {
    let forge = MockForge::new();
    forge.add_response(
        &format!("{}/tags", API),
        Vec::new(),
        json!([{"name": "1.4.0", "commit": {"sha": "abc", "url": format!("{}/commits/abc", API)}}]),
    );
    forge.add_response(
        &format!("{}/commits/abc", API),
        Vec::new(),
        json!({"commit": {"committer": {"date": "2021-01-01T00:00:00Z"}}}),
    );
    forge.add_pages(
        &format!("{}/pulls", API),
        query([("base", "master"), ("state", "closed")]),
        vec![json!([
            pull(12, "✨ add X", "2021-02-02T00:00:00Z"),
            pull(11, "🐛fix Y", "2021-02-01T00:00:00Z")
        ])],
    );
    forge.add_pages(
        &format!("{}/pulls", API),
        query([("base", "master"), ("state", "open")]),
        vec![open_pulls],
    );
    forge
}

fn forced_args() -> WorkflowArgs {
    WorkflowArgs {
        force: true,
        ..WorkflowArgs::new("org/repo", ReleaseType::Minor)
    }
}

fn no_prompt(_: &str) -> release_maker::Result<bool> {
    panic!("confirmation must not be requested");
}

#[test]
fn test_publish_creates_labeled_pull_request() {
    let forge = forge(json!([]));
    forge.on_post(
        &format!("{}/pulls", API),
        json!({"number": 42, "title": "🔖 Release 1.5.0", "html_url": "https://forge.test/org/repo/pull/42"}),
    );
    forge.on_post(&format!("{}/issues/42/labels", API), json!([{"name": "release"}]));
    let vcs = RecordingVcs::new().with_file("CHANGELOG.md", OLD_CHANGELOG);
    let repo = GitHubRepo::new(&forge, "org/repo", &config()).unwrap();

    let (notes, outcome) =
        cli::publish(&repo, &vcs, &config(), &forced_args(), "tok", no_prompt).unwrap();

    let WorkflowOutcome::Published {
        version,
        pull_request,
    } = outcome
    else {
        panic!("expected a published release");
    };
    assert_eq!(version, Version::new(1, 5, 0));
    assert_eq!(pull_request.number, 42);

    let calls = vcs.calls();
    assert!(matches!(
        &calls[0],
        VcsCall::Clone { url, .. } if url == "https://tok@forge.test/org/repo.git"
    ));
    assert_eq!(
        calls[1..].to_vec(),
        vec![
            VcsCall::CheckoutNewBranch {
                branch: "release-1.5.0".to_string()
            },
            VcsCall::AddAll,
            VcsCall::Commit {
                message: "🔖 Release 1.5.0".to_string()
            },
            VcsCall::Push {
                remote: "origin".to_string(),
                branch: "release-1.5.0".to_string()
            },
        ]
    );

    let posts = forge.posts();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].0, format!("{}/pulls", API));
    assert_eq!(posts[0].1["title"], "🔖 Release 1.5.0");
    assert_eq!(posts[0].1["head"], "release-1.5.0");
    assert_eq!(posts[0].1["base"], "master");
    assert_eq!(posts[0].1["body"], notes.markdown.as_str());
    assert_eq!(posts[1].0, format!("{}/issues/42/labels", API));
    assert_eq!(posts[1].1, json!({"labels": ["release"]}));
}

#[test]
fn test_publish_reuses_open_pull_request() {
    let forge = forge(json!([
        {"number": 8, "title": "✨ unrelated", "html_url": "https://forge.test/org/repo/pull/8"},
        {"number": 7, "title": "🔖 Release 1.5.0", "html_url": "https://forge.test/org/repo/pull/7"}
    ]));
    forge.on_post(&format!("{}/issues/7/labels", API), json!([{"name": "release"}]));
    let vcs = RecordingVcs::new();
    let repo = GitHubRepo::new(&forge, "org/repo", &config()).unwrap();

    let (_, outcome) =
        cli::publish(&repo, &vcs, &config(), &forced_args(), "tok", no_prompt).unwrap();

    let WorkflowOutcome::Published { pull_request, .. } = outcome else {
        panic!("expected a published release");
    };
    assert_eq!(pull_request.number, 7);
    let posts = forge.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, format!("{}/issues/7/labels", API));
}

#[test]
fn test_publish_is_noop_when_release_already_in_changelog() {
    let forge = forge(json!([]));
    let existing = "# Repo Change History\n\n# Repo Release 1.5.0\n\nalready released\n";
    let vcs = RecordingVcs::new().with_file("CHANGELOG.md", existing);
    let repo = GitHubRepo::new(&forge, "org/repo", &config()).unwrap();

    let (_, outcome) =
        cli::publish(&repo, &vcs, &config(), &forced_args(), "tok", no_prompt).unwrap();

    assert_eq!(
        outcome,
        WorkflowOutcome::AlreadyPresent {
            version: Version::new(1, 5, 0)
        }
    );
    assert_eq!(vcs.calls().len(), 1);
    assert!(!vcs.pushed());
    assert!(forge.posts().is_empty());
}

#[test]
fn test_declined_confirmation_does_not_push() {
    let forge = forge(json!([]));
    let vcs = RecordingVcs::new();
    let repo = GitHubRepo::new(&forge, "org/repo", &config()).unwrap();
    let args = WorkflowArgs::new("org/repo", ReleaseType::Minor);

    let mut asked = None;
    let (_, outcome) = cli::publish(&repo, &vcs, &config(), &args, "tok", |prompt: &str| {
        asked = Some(prompt.to_string());
        Ok(false)
    })
    .unwrap();

    assert!(matches!(outcome, WorkflowOutcome::Cancelled { .. }));
    assert!(asked.unwrap().contains("release-1.5.0"));
    assert!(!vcs.pushed());
    assert!(forge.posts().is_empty());
}

#[test]
fn test_push_failure_stops_before_pull_request() {
    let forge = forge(json!([]));
    let vcs = RecordingVcs::new().fail_on("push");
    let repo = GitHubRepo::new(&forge, "org/repo", &config()).unwrap();

    let err = cli::publish(&repo, &vcs, &config(), &forced_args(), "tok", no_prompt).unwrap_err();

    assert!(matches!(err, ReleaseMakerError::Git(_)));
    assert!(forge.posts().is_empty());
}

#[cfg(unix)]
#[test]
fn test_pre_release_script_sees_merged_changelog() {
    let forge = forge(json!([]));
    forge.on_post(
        &format!("{}/pulls", API),
        json!({"number": 42, "title": "🔖 Release 1.5.0", "html_url": "https://forge.test/org/repo/pull/42"}),
    );
    forge.on_post(&format!("{}/issues/42/labels", API), json!([]));
    let vcs = RecordingVcs::new().with_file("CHANGELOG.md", OLD_CHANGELOG);
    let repo = GitHubRepo::new(&forge, "org/repo", &config()).unwrap();

    let scratch = tempfile::tempdir().unwrap();
    let copy = scratch.path().join("changelog-copy.md");
    let env_dump = scratch.path().join("env.txt");
    let script = scratch.path().join("pre-release.sh");
    std::fs::write(
        &script,
        format!(
            "#!/bin/sh\ncp CHANGELOG.md '{}'\necho \"$RELEASE_PREVIOUS_VERSION $RELEASE_VERSION $RELEASE_REPO\" > '{}'\n",
            copy.display(),
            env_dump.display()
        ),
    )
    .unwrap();

    let args = WorkflowArgs {
        pre_release_script: Some(script),
        ..forced_args()
    };
    cli::publish(&repo, &vcs, &config(), &args, "tok", no_prompt).unwrap();

    let changelog = std::fs::read_to_string(copy).unwrap();
    assert!(changelog.starts_with("# Repo Change History\n\n# Repo Release 1.5.0\n"));
    assert_eq!(changelog.matches("Change History").count(), 1);
    assert!(changelog.ends_with("# Repo Release 1.4.0\n\nold notes\n"));
    assert_eq!(
        std::fs::read_to_string(env_dump).unwrap(),
        "1.4.0 1.5.0 org/repo\n"
    );
}

#[cfg(unix)]
#[test]
fn test_failing_pre_release_script_aborts_before_commit() {
    let forge = forge(json!([]));
    let vcs = RecordingVcs::new();
    let repo = GitHubRepo::new(&forge, "org/repo", &config()).unwrap();

    let scratch = tempfile::tempdir().unwrap();
    let script = scratch.path().join("fail.sh");
    std::fs::write(&script, "#!/bin/sh\nexit 1\n").unwrap();

    let args = WorkflowArgs {
        pre_release_script: Some(script),
        ..forced_args()
    };
    let err = cli::publish(&repo, &vcs, &config(), &args, "tok", no_prompt).unwrap_err();

    assert!(matches!(err, ReleaseMakerError::Hook(_)));
    assert_eq!(vcs.calls().len(), 1);
}

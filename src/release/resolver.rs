use crate::domain::{LatestRelease, Tag};
use crate::error::Result;
use crate::forge::{ForgeApi, GitHubRepo};
use tracing::{debug, info};

/// First tag, in listing order, whose name parses as a release version.
pub fn latest_release_tag(tags: &[Tag]) -> Option<&Tag> {
    tags.iter().find(|tag| {
        let parsed = tag.version().is_some();
        if !parsed {
            debug!(tag = %tag.name, "Skipping non-release tag");
        }
        parsed
    })
}

/// Resolve the previous release of a repository.
///
/// The tag list is fetched once and assumed newest-first. The first release
/// tag wins and its commit date is fetched. Without any release tag the
/// result is version 0.0.0 with no date.
pub fn resolve_latest_release<A: ForgeApi>(repo: &GitHubRepo<A>) -> Result<LatestRelease> {
    let tags = repo.tags()?;

    let Some(tag) = latest_release_tag(&tags) else {
        info!(tags = tags.len(), "No release tag found");
        return Ok(LatestRelease::none());
    };

    let commit_date = repo.commit_date(&tag.commit.url)?;
    info!(
        tag = %tag.name,
        sha = %tag.commit.sha,
        %commit_date,
        "Resolved latest release"
    );

    Ok(LatestRelease {
        version: tag.version().unwrap_or_default(),
        tag: Some(tag.clone()),
        commit_date: Some(commit_date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::Version;
    use crate::forge::MockForge;
    use serde_json::json;

    fn repo(forge: &MockForge) -> GitHubRepo<&MockForge> {
        let config = Config {
            api_url: "https://api.test".to_string(),
            ..Config::default()
        };
        GitHubRepo::new(forge, "org/repo", &config).unwrap()
    }

    #[test]
    fn test_latest_release_tag_skips_non_release() {
        let tags = vec![
            Tag::new("not-a-tag", "a", "ua"),
            Tag::new("v2.1.0", "b", "ub"),
            Tag::new("v2.0.0", "c", "uc"),
        ];
        assert_eq!(latest_release_tag(&tags).map(|t| t.name.as_str()), Some("v2.1.0"));
    }

    #[test]
    fn test_resolves_first_parsable_tag() {
        let forge = MockForge::new();
        forge.add_response(
            "https://api.test/repos/org/repo/tags",
            Vec::new(),
            json!([
                {"name": "v2.1.0", "commit": {"sha": "b", "url": "https://api.test/commits/b"}},
                {"name": "v2.0.0", "commit": {"sha": "c", "url": "https://api.test/commits/c"}},
                {"name": "not-a-tag", "commit": {"sha": "d", "url": "https://api.test/commits/d"}}
            ]),
        );
        forge.add_response(
            "https://api.test/commits/b",
            Vec::new(),
            json!({"commit": {"committer": {"date": "2021-01-02T03:04:05Z"}}}),
        );

        let release = resolve_latest_release(&repo(&forge)).unwrap();
        assert_eq!(release.tag.as_ref().map(|t| t.name.as_str()), Some("v2.1.0"));
        assert_eq!(release.version, Version::new(2, 1, 0).with_prefix("v"));
        assert!(release.commit_date.is_some());
        assert_eq!(forge.get_count("https://api.test/commits/c"), 0);
    }

    #[test]
    fn test_no_tags_gives_sentinel() {
        let forge = MockForge::new();
        forge.add_response("https://api.test/repos/org/repo/tags", Vec::new(), json!([]));

        let release = resolve_latest_release(&repo(&forge)).unwrap();
        assert_eq!(release, LatestRelease::none());
        assert_eq!(release.version.to_string(), "0.0.0");
    }

    #[test]
    fn test_only_unparsable_tags_gives_sentinel() {
        let forge = MockForge::new();
        forge.add_response(
            "https://api.test/repos/org/repo/tags",
            Vec::new(),
            json!([{"name": "nightly", "commit": {"sha": "a", "url": "https://api.test/commits/a"}}]),
        );

        let release = resolve_latest_release(&repo(&forge)).unwrap();
        assert!(!release.exists());
        assert_eq!(release.commit_date, None);
    }

    #[test]
    fn test_tag_listing_failure_propagates() {
        let forge = MockForge::new();
        forge.fail("https://api.test/repos/org/repo/tags", 401, "Bad credentials");

        let err = resolve_latest_release(&repo(&forge)).unwrap_err();
        assert!(err.to_string().contains("Bad credentials"));
    }
}

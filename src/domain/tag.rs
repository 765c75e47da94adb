use crate::domain::version::Version;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A tag as listed by the forge API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit: TagCommit,
}

/// Commit reference embedded in a tag listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagCommit {
    pub sha: String,
    pub url: String,
}

impl Tag {
    /// Create a tag pointing at a commit
    pub fn new(name: impl Into<String>, sha: impl Into<String>, url: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit: TagCommit {
                sha: sha.into(),
                url: url.into(),
            },
        }
    }

    /// Semantic version carried by the tag name, if it is a release tag
    pub fn version(&self) -> Option<Version> {
        Version::from_tag_name(&self.name)
    }
}

/// The release that new notes are computed against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    /// The tag, or `None` when the repository has no release yet
    pub tag: Option<Tag>,
    pub version: Version,
    /// Commit date of the tag; `None` means "include every merged pull request"
    pub commit_date: Option<DateTime<Utc>>,
}

impl LatestRelease {
    /// Sentinel for repositories without any release tag
    pub fn none() -> Self {
        LatestRelease {
            tag: None,
            version: Version::initial(),
            commit_date: None,
        }
    }

    pub fn exists(&self) -> bool {
        self.tag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_deserialize() {
        let json = r#"{
            "name": "v1.2.3",
            "zipball_url": "https://api.github.com/repos/o/r/zipball/v1.2.3",
            "commit": {"sha": "abc123", "url": "https://api.github.com/repos/o/r/commits/abc123"}
        }"#;
        let tag: Tag = serde_json::from_str(json).unwrap();
        assert_eq!(tag.name, "v1.2.3");
        assert_eq!(tag.commit.sha, "abc123");
    }

    #[test]
    fn test_tag_version() {
        let tag = Tag::new("v1.2.3", "abc", "url");
        assert_eq!(tag.version(), Some(Version::new(1, 2, 3).with_prefix("v")));
        assert_eq!(Tag::new("nightly", "abc", "url").version(), None);
    }

    #[test]
    fn test_latest_release_none() {
        let release = LatestRelease::none();
        assert!(!release.exists());
        assert_eq!(release.version.to_string(), "0.0.0");
        assert_eq!(release.commit_date, None);
    }
}

use crate::error::{ReleaseMakerError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;

/// A pull request as returned by the forge API.
///
/// Only `title` is ever modified, when the classifier repairs a missing space.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// `None` for pull requests closed without merging
    pub merged_at: Option<DateTime<Utc>>,
    pub user: Author,
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub login: String,
    pub html_url: String,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }

    /// First eight characters of the merge commit
    pub fn short_sha(&self) -> Option<&str> {
        self.merge_commit_sha
            .as_deref()
            .map(|sha| sha.get(..8).unwrap_or(sha))
    }
}

/// Matches titles of release pull requests, e.g. "🔖 Release 1.2.0 into master".
#[derive(Debug, Clone)]
pub struct ReleaseMarker {
    regex: Regex,
}

impl ReleaseMarker {
    /// Build the matcher for a release emoji.
    ///
    /// The emoji may be followed by a variation selector and whitespace; the
    /// word "release" is matched case-insensitively.
    pub fn new(release_emoji: &str) -> Result<Self> {
        let emoji = release_emoji.trim_end_matches('\u{FE0F}');
        if emoji.is_empty() {
            return Err(ReleaseMakerError::config("Release emoji must not be empty"));
        }

        let pattern = format!(r"^{}\x{{FE0F}}?\s*(?i:release)\b", regex::escape(emoji));
        let regex = Regex::new(&pattern)
            .map_err(|e| ReleaseMakerError::config(format!("Invalid release marker: {}", e)))?;

        Ok(ReleaseMarker { regex })
    }

    pub fn matches(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}

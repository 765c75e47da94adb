use crate::config::Config;
use crate::domain::{PullRequest, Tag};
use crate::error::{ReleaseMakerError, Result};
use crate::forge::paginate::Paginator;
use crate::forge::{query, ForgeApi};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// Reference to a pull request created or found on the forge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestRef {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

/// Repository endpoints of a GitHub-compatible forge
pub struct GitHubRepo<A> {
    api: A,
    slug: String,
    base_url: String,
    web_url: String,
}

impl<A: ForgeApi> GitHubRepo<A> {
    /// Bind an API client to an `owner/name` repository
    pub fn new(api: A, slug: &str, config: &Config) -> Result<Self> {
        let valid = matches!(
            slug.split_once('/'),
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/')
        );
        if !valid {
            return Err(ReleaseMakerError::config(format!(
                "Repository must look like 'organization/repository', got '{}'",
                slug
            )));
        }

        Ok(GitHubRepo {
            api,
            slug: slug.to_string(),
            base_url: format!("{}/repos/{}", config.api_url.trim_end_matches('/'), slug),
            web_url: config.web_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// `owner/name`
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Repository name without the owner
    pub fn short_name(&self) -> &str {
        self.slug
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.slug)
    }

    /// API root of the repository, e.g. `https://api.github.com/repos/o/r`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pulls_url(&self) -> String {
        format!("{}/pulls", self.base_url)
    }

    pub fn tags_url(&self) -> String {
        format!("{}/tags", self.base_url)
    }

    /// Browser URL prefix of commits; append a SHA to link one
    pub fn commit_base_url(&self) -> String {
        format!("{}/{}/commit", self.web_url, self.slug)
    }

    pub fn commit_web_url(&self, sha: &str) -> String {
        format!("{}/{}", self.commit_base_url(), sha)
    }

    /// Clone URL, with the token embedded when one is given
    pub fn clone_url(&self, token: Option<&str>) -> String {
        let (scheme, host) = self
            .web_url
            .split_once("://")
            .unwrap_or(("https", self.web_url.as_str()));
        match token {
            Some(token) => format!("{}://{}@{}/{}.git", scheme, token, host, self.slug),
            None => format!("{}://{}/{}.git", scheme, host, self.slug),
        }
    }

    /// All tags in the order the forge lists them (newest first in practice)
    pub fn tags(&self) -> Result<Vec<Tag>> {
        let url = self.tags_url();
        debug!(%url, "Fetching tags");
        let body = self.api.get(&url, &[])?;
        let tags: Vec<Tag> = serde_json::from_value(body)?;
        debug!(count = tags.len(), "Found tags");
        Ok(tags)
    }

    /// Committer date of the commit behind an API commit URL
    pub fn commit_date(&self, commit_url: &str) -> Result<DateTime<Utc>> {
        let body = self.api.get(commit_url, &[])?;
        let raw = body["commit"]["committer"]["date"].as_str().ok_or_else(|| {
            ReleaseMakerError::forge(format!("Commit {} has no committer date", commit_url))
        })?;

        DateTime::parse_from_rfc3339(raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| ReleaseMakerError::forge(format!("Invalid commit date '{}': {}", raw, e)))
    }

    /// Text of the file at `path` on `branch`, `None` when it does not exist
    pub fn file_contents(&self, path: &str, branch: &str) -> Result<Option<String>> {
        let url = format!("{}/contents/{}", self.base_url, path.trim_start_matches('/'));
        let body = match self.api.get(&url, &query([("ref", branch)])) {
            Ok(body) => body,
            Err(ReleaseMakerError::Http { status: 404, .. }) => {
                debug!(%url, %branch, "File not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if body["encoding"].as_str() != Some("base64") {
            return Err(ReleaseMakerError::forge(format!(
                "{} is not base64 encoded: {}",
                url, body["encoding"]
            )));
        }
        // The forge wraps the encoded content at 60 columns
        let encoded: String = body["content"]
            .as_str()
            .ok_or_else(|| ReleaseMakerError::forge(format!("{} has no content", url)))?
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| ReleaseMakerError::forge(format!("Invalid content of {}: {}", url, e)))?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| ReleaseMakerError::forge(format!("{} is not UTF-8: {}", url, e)))
    }

    /// Closed pull requests against `base`, lazily, in forge order
    pub fn closed_pulls<'a>(
        &'a self,
        base: &str,
    ) -> impl Iterator<Item = Result<PullRequest>> + 'a {
        let params = query([("base", base), ("state", "closed")]);
        Paginator::new(&self.api, self.pulls_url(), params).map(|item| {
            item.and_then(|value| serde_json::from_value::<PullRequest>(value).map_err(Into::into))
        })
    }

    /// Open pull request against `base` whose title is exactly `title`
    pub fn find_open_pull(&self, base: &str, title: &str) -> Result<Option<PullRequestRef>> {
        let params = query([("base", base), ("state", "open")]);
        for item in Paginator::new(&self.api, self.pulls_url(), params) {
            let pull: PullRequestRef = serde_json::from_value(item?)?;
            if pull.title == title {
                return Ok(Some(pull));
            }
        }
        Ok(None)
    }

    pub fn create_pull(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<PullRequestRef> {
        let payload = json!({
            "title": title,
            "head": head,
            "base": base,
            "body": body,
        });
        let response = self.api.post(&self.pulls_url(), &payload)?;
        Ok(serde_json::from_value(response)?)
    }

    pub fn add_labels(&self, number: u64, labels: &[&str]) -> Result<Value> {
        let url = format!("{}/issues/{}/labels", self.base_url, number);
        self.api.post(&url, &json!({ "labels": labels }))
    }
}

use crate::config::Config;
use crate::domain::{
    EmojiCategoryMap, LatestRelease, PullRequest, ReleaseCounts, ReleaseMarker, ReleaseType,
    Version,
};
use crate::error::Result;
use crate::forge::{ForgeApi, GitHubRepo};
use crate::release::collector::collect_pull_requests;
use crate::release::notes::{self, NotesDocument};
use crate::release::resolver::resolve_latest_release;
use tracing::info;

/// Inputs of a release notes build that are not repository data
#[derive(Debug, Clone, PartialEq)]
pub struct NotesOptions {
    pub release_type: ReleaseType,
    pub blurb: Option<String>,
    /// Overrides the title derived from the repository name
    pub project_title: Option<String>,
}

impl NotesOptions {
    pub fn new(release_type: ReleaseType) -> Self {
        NotesOptions {
            release_type,
            blurb: None,
            project_title: None,
        }
    }
}

/// Output of a release notes build
#[derive(Debug, Clone)]
pub struct ReleaseNotes {
    pub previous: LatestRelease,
    pub release_type: ReleaseType,
    pub version: Version,
    pub title: String,
    /// Included pull requests with repaired titles, in forge order
    pub pull_requests: Vec<PullRequest>,
    pub counts: ReleaseCounts,
    pub markdown: String,
}

impl ReleaseNotes {
    /// `<repo-short-name>-<version>.md`
    pub fn file_name(&self, short_name: &str) -> String {
        format!("{}-{}.md", short_name, self.version)
    }
}

/// Build the release notes of the next release.
///
/// Resolves the previous release, collects the pull requests merged since,
/// classifies their titles, bumps the version and renders Markdown.
pub fn build_release_notes<A: ForgeApi>(
    repo: &GitHubRepo<A>,
    config: &Config,
    options: &NotesOptions,
) -> Result<ReleaseNotes> {
    let marker = ReleaseMarker::new(&config.markers.release_emoji)?;
    let categories = EmojiCategoryMap::from_config(config);

    let previous = resolve_latest_release(repo)?;

    let mut pull_requests = collect_pull_requests(
        repo.closed_pulls(&config.default_branch),
        previous.commit_date,
        &marker,
    )?;

    let mut counts = ReleaseCounts::new();
    for pull in &mut pull_requests {
        let classified = categories.classify(&pull.title);
        counts.record(&classified, &categories);
        pull.title = classified.title;
    }

    let version = previous.version.bump(options.release_type)?;
    info!(
        previous = %previous.version,
        next = %version,
        release_type = %options.release_type,
        pull_requests = pull_requests.len(),
        "Computed next release"
    );

    let title = options
        .project_title
        .clone()
        .unwrap_or_else(|| notes::title_from_repo(repo.short_name()));

    let commit_base_url = repo.commit_base_url();
    let markdown = notes::render(&NotesDocument {
        title: &title,
        version: &version,
        blurb: options.blurb.as_deref(),
        counts: &counts,
        pull_requests: &pull_requests,
        commit_base_url: &commit_base_url,
    });

    Ok(ReleaseNotes {
        previous,
        release_type: options.release_type,
        version,
        title,
        pull_requests,
        counts,
        markdown,
    })
}

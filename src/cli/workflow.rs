use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{ReleaseType, Version};
use crate::error::{ReleaseMakerError, Result};
use crate::forge::{ForgeApi, GitHubRepo, PullRequestRef};
use crate::hooks::{HookContext, HookExecutor};
use crate::release::notes::release_marker_text;
use crate::release::{
    build_release_notes, merge_changelog, update_changelog_file, ChangelogUpdate, NotesOptions,
    ReleaseNotes,
};
use crate::vcs::VersionControl;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Remote the release branch is pushed to
const REMOTE: &str = "origin";

/// Arguments shared by the release workflows
///
/// Mirrors the CLI arguments without depending on clap, so the workflows can
/// be called programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// `owner/name` of the repository
    pub repo: String,
    pub release_type: ReleaseType,
    /// Markdown placed under the release heading
    pub blurb_file: Option<PathBuf>,
    pub project_title: Option<String>,
    /// Script run in the clone before the release commit
    pub pre_release_script: Option<PathBuf>,
    pub gh_token: Option<String>,
    /// Directory the notes file is written to
    pub output_dir: PathBuf,
    /// Skip the confirmation prompt before pushing
    pub force: bool,
}

impl WorkflowArgs {
    pub fn new(repo: impl Into<String>, release_type: ReleaseType) -> Self {
        WorkflowArgs {
            repo: repo.into(),
            release_type,
            blurb_file: None,
            project_title: None,
            pre_release_script: None,
            gh_token: None,
            output_dir: PathBuf::from("."),
            force: false,
        }
    }

    fn notes_options(&self) -> Result<NotesOptions> {
        let blurb = match &self.blurb_file {
            Some(path) => Some(fs::read_to_string(path).map_err(|e| {
                ReleaseMakerError::config(format!(
                    "Could not read blurb file {}: {}",
                    path.display(),
                    e
                ))
            })?),
            None => None,
        };

        Ok(NotesOptions {
            release_type: self.release_type,
            blurb,
            project_title: self.project_title.clone(),
        })
    }
}

/// How a workflow ended
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// Notes were computed and nothing was written
    Previewed { version: Version, markdown: String },
    /// Notes were saved to a file
    NotesWritten { version: Version, path: PathBuf },
    /// The release branch was pushed and a pull request opened or reused
    Published {
        version: Version,
        pull_request: PullRequestRef,
    },
    /// The changelog already has this release; nothing was pushed
    AlreadyPresent { version: Version },
    /// The user declined the push
    Cancelled { version: Version },
}

/// Title of the release commit and pull request, e.g. `🔖 Release 1.5.0`
pub fn release_title(config: &Config, version: &Version) -> String {
    format!(
        "{} {}",
        config.markers.release_emoji,
        release_marker_text(version)
    )
}

/// Compute the release notes of the next release.
pub fn build_notes<A: ForgeApi>(
    repo: &GitHubRepo<A>,
    config: &Config,
    args: &WorkflowArgs,
) -> Result<ReleaseNotes> {
    build_release_notes(repo, config, &args.notes_options()?)
}

/// Non-fatal conditions of a computed release, in display order
pub fn boundary_warnings(notes: &ReleaseNotes) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();
    if !notes.previous.exists() {
        warnings.push(BoundaryWarning::NoPreviousRelease);
    }
    if notes.pull_requests.is_empty() {
        warnings.push(BoundaryWarning::NoPullRequests {
            since: notes.previous.tag.as_ref().map(|tag| tag.name.clone()),
        });
    }
    warnings
}

/// Compute the notes without writing or publishing anything.
///
/// The changelog on the default branch is read through the forge. When it
/// already has the release the outcome is `AlreadyPresent`, otherwise the
/// section publishing would add is previewed.
pub fn preview<A: ForgeApi>(
    repo: &GitHubRepo<A>,
    config: &Config,
    args: &WorkflowArgs,
) -> Result<(ReleaseNotes, WorkflowOutcome)> {
    let notes = build_notes(repo, config, args)?;
    let version = notes.version.clone();

    let existing = repo
        .file_contents(&config.changelog_file, &config.default_branch)?
        .unwrap_or_default();
    let outcome = match merge_changelog(&notes.title, &notes.markdown, &version, &existing)? {
        ChangelogUpdate::AlreadyPresent => {
            info!(
                changelog = %config.changelog_file,
                "{} already in changelog",
                release_marker_text(&version)
            );
            WorkflowOutcome::AlreadyPresent { version }
        }
        ChangelogUpdate::Updated(_) => WorkflowOutcome::Previewed {
            version,
            markdown: notes.markdown.clone(),
        },
    };
    Ok((notes, outcome))
}

/// Compute the notes and save them as `<repo-short-name>-<version>.md`.
pub fn write_notes<A: ForgeApi>(
    repo: &GitHubRepo<A>,
    config: &Config,
    args: &WorkflowArgs,
) -> Result<(ReleaseNotes, WorkflowOutcome)> {
    let notes = build_notes(repo, config, args)?;

    fs::create_dir_all(&args.output_dir)?;
    let path = args.output_dir.join(notes.file_name(repo.short_name()));
    fs::write(&path, &notes.markdown)?;
    info!(path = %path.display(), "Saved release notes");

    let outcome = WorkflowOutcome::NotesWritten {
        version: notes.version.clone(),
        path,
    };
    Ok((notes, outcome))
}

/// Compute the notes and publish them as a release pull request.
///
/// Clones the repository into a temporary directory, merges the notes into
/// the changelog, runs the pre-release script, commits on `release-<version>`
/// and pushes. An open pull request with the release title is reused,
/// otherwise one is created; either way it gets the release label.
///
/// Nothing is pushed when the changelog already has the release or when
/// `confirm` returns false. `confirm` is not called with `args.force`.
pub fn publish<A, V, F>(
    repo: &GitHubRepo<A>,
    vcs: &V,
    config: &Config,
    args: &WorkflowArgs,
    token: &str,
    confirm: F,
) -> Result<(ReleaseNotes, WorkflowOutcome)>
where
    A: ForgeApi,
    V: VersionControl + ?Sized,
    F: FnOnce(&str) -> Result<bool>,
{
    let notes = build_notes(repo, config, args)?;
    let version = notes.version.clone();

    let workspace = tempfile::tempdir()?;
    let clone_dir = workspace.path().join(repo.short_name());
    info!(repo = %repo.slug(), dir = %clone_dir.display(), "Cloning repository");
    vcs.clone_repo(&repo.clone_url(Some(token)), &clone_dir)?;

    let changelog = clone_dir.join(&config.changelog_file);
    match update_changelog_file(&changelog, &notes.title, &notes.markdown, &version)? {
        ChangelogUpdate::AlreadyPresent => {
            return Ok((notes, WorkflowOutcome::AlreadyPresent { version }));
        }
        ChangelogUpdate::Updated(_) => debug!(file = %config.changelog_file, "Merged changelog"),
    }

    if let Some(script) = &args.pre_release_script {
        let context = HookContext::new(
            version.to_string(),
            notes.previous.version.to_string(),
            repo.slug(),
        );
        HookExecutor::execute(script, &clone_dir, &context)?;
    }

    let title = release_title(config, &version);
    let branch = format!("release-{}", version);
    vcs.checkout_new_branch(&clone_dir, &branch)?;
    vcs.add_all(&clone_dir)?;
    vcs.commit(&clone_dir, &title)?;

    if !args.force {
        let prompt = format!("Push {} to {} and open a pull request?", branch, repo.slug());
        if !confirm(&prompt)? {
            return Ok((notes, WorkflowOutcome::Cancelled { version }));
        }
    }

    vcs.push(&clone_dir, REMOTE, &branch)?;
    info!(%branch, "Pushed release branch");

    let pull_request = match repo.find_open_pull(&config.default_branch, &title)? {
        Some(existing) => {
            info!(number = existing.number, "Reusing open release pull request");
            existing
        }
        None => repo.create_pull(&title, &branch, &config.default_branch, &notes.markdown)?,
    };
    repo.add_labels(pull_request.number, &[config.release_label.as_str()])?;

    Ok((
        notes,
        WorkflowOutcome::Published {
            version,
            pull_request,
        },
    ))
}

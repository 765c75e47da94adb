//! Release notes pipeline: previous release, pull requests, notes, changelog

pub mod builder;
pub mod changelog;
pub mod collector;
pub mod notes;
pub mod resolver;

pub use builder::{build_release_notes, NotesOptions, ReleaseNotes};
pub use changelog::{merge_changelog, update_changelog_file, ChangelogUpdate};
pub use collector::collect_pull_requests;
pub use resolver::{latest_release_tag, resolve_latest_release};

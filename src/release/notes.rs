//! Markdown rendering of release notes

use crate::domain::{PullRequest, ReleaseCounts, Version};
use std::fmt::Write;

/// Everything the release notes document is rendered from
#[derive(Debug, Clone)]
pub struct NotesDocument<'a> {
    pub title: &'a str,
    pub version: &'a Version,
    pub blurb: Option<&'a str>,
    pub counts: &'a ReleaseCounts,
    pub pull_requests: &'a [PullRequest],
    /// Browser URL prefix for commit links, without trailing slash
    pub commit_base_url: &'a str,
}

/// Text that marks a document as the notes of `version`
pub fn release_marker_text(version: &Version) -> String {
    format!("Release {}", version)
}

pub fn heading(title: &str, version: &Version) -> String {
    format!("# {} {}", title, release_marker_text(version))
}

/// Human title derived from a repository name: "kf-lib-data" -> "Kf Lib Data"
pub fn title_from_repo(short_name: &str) -> String {
    short_name
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the release notes.
///
/// Layout: heading, optional blurb, emoji and category summary, then one
/// bullet per pull request. Output ends with a newline.
pub fn render(doc: &NotesDocument<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading(doc.title, doc.version));
    out.push('\n');

    if let Some(blurb) = doc.blurb.map(str::trim).filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "{}", blurb);
        out.push('\n');
    }

    out.push_str("### Summary\n\n");
    let _ = writeln!(out, "- Emojis: {}", summary_line(doc.counts.emoji.iter()));
    let _ = writeln!(
        out,
        "- Categories: {}",
        summary_line(doc.counts.categories.iter())
    );
    out.push_str("\n---\n\n");

    for pull in doc.pull_requests {
        let _ = writeln!(out, "{}", bullet(pull, doc.commit_base_url));
    }

    out
}

fn summary_line<'a>(entries: impl Iterator<Item = (&'a String, &'a usize)>) -> String {
    let parts: Vec<String> = entries
        .map(|(key, count)| format!("{} x{}", key, count))
        .collect();
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

fn bullet(pull: &PullRequest, commit_base_url: &str) -> String {
    let mut line = format!("- [#{}]({}) - {}", pull.number, pull.html_url, pull.title);
    if let (Some(short), Some(sha)) = (pull.short_sha(), pull.merge_commit_sha.as_deref()) {
        let _ = write!(line, " - [{}]({}/{})", short, commit_base_url, sha);
    }
    let _ = write!(line, " by [{}]({})", pull.user.login, pull.user.html_url);
    line
}

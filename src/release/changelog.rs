//! Changelog file maintenance

use crate::domain::Version;
use crate::error::{ReleaseMakerError, Result};
use crate::release::notes::release_marker_text;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Outcome of merging a release section into a changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogUpdate {
    /// New changelog content, release section first
    Updated(String),
    /// The version is already recorded; nothing must be written
    AlreadyPresent,
}

/// Title line written at the top of every merged changelog
pub fn history_title(title: &str) -> String {
    format!("# {} Change History", title)
}

/// Whether `text` already mentions the release of `version`.
///
/// The version must end the mention: it may be followed by whitespace,
/// closing punctuation, a sentence-ending period or the end of the text.
/// `Release 1.5.0-rc.1` and `Release 1.5.0.1` do not mention `1.5.0`.
pub fn mentions_release(text: &str, version: &Version) -> bool {
    let pattern = format!(
        r"\b{}(?:\.?(?:\s|$)|[)\],;:!])",
        regex::escape(&release_marker_text(version))
    );
    Regex::new(&pattern)
        .map(|re| re.is_match(text))
        .unwrap_or_else(|_| text.contains(&release_marker_text(version)))
}

/// Whether a line reads like "... Release 1.2.3"
fn is_release_heading(line: &str) -> bool {
    Regex::new(r"\bRelease\s+\S*\d+\.\d+\.\d+")
        .map(|re| re.is_match(line))
        .unwrap_or(false)
}

/// Drop a leading `# ...` title line that is not itself a release heading
fn strip_title_line(existing: &str) -> &str {
    let trimmed = existing.trim_start();
    let first_line = trimmed.lines().next().unwrap_or_default();
    if first_line.starts_with("# ") && !is_release_heading(first_line) {
        trimmed[first_line.len()..].trim_start()
    } else {
        trimmed
    }
}

/// Put a release section above the existing changelog content.
///
/// The section must start with a heading naming `Release <version>`. When the
/// existing content already names that release the merge is a no-op.
pub fn merge_changelog(
    title: &str,
    section: &str,
    version: &Version,
    existing: &str,
) -> Result<ChangelogUpdate> {
    let heading = section.lines().next().unwrap_or_default();
    if !heading.starts_with('#') || !mentions_release(heading, version) {
        return Err(ReleaseMakerError::changelog(format!(
            "Release notes heading '{}' does not name {}",
            heading,
            release_marker_text(version)
        )));
    }

    if mentions_release(existing, version) {
        debug!(%version, "Version already in changelog");
        return Ok(ChangelogUpdate::AlreadyPresent);
    }

    let previous = strip_title_line(existing);
    let mut content = format!("{}\n\n{}\n", history_title(title), section.trim_end());
    if !previous.is_empty() {
        content.push('\n');
        content.push_str(previous.trim_end());
        content.push('\n');
    }

    Ok(ChangelogUpdate::Updated(content))
}

/// Merge a release section into the changelog file at `path`.
///
/// A missing file counts as empty. The file is only written on
/// [ChangelogUpdate::Updated].
pub fn update_changelog_file(
    path: &Path,
    title: &str,
    section: &str,
    version: &Version,
) -> Result<ChangelogUpdate> {
    let existing = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let update = merge_changelog(title, section, version, &existing)?;
    if let ChangelogUpdate::Updated(content) = &update {
        fs::write(path, content)?;
        debug!(path = %path.display(), "Wrote changelog");
    }
    Ok(update)
}

//! Version-control driver used by the publish path
//!
//! The publish flow only needs a handful of porcelain operations on a fresh
//! clone. [VersionControl] abstracts them so the flow can run against:
//!
//! - [shell::GitCli]: the `git` executable on `PATH`
//! - [mock::RecordingVcs]: an in-memory recorder for tests

pub mod mock;
pub mod shell;

pub use mock::{RecordingVcs, VcsCall};
pub use shell::GitCli;

use crate::error::Result;
use regex::Regex;
use std::path::Path;

/// Operations the publish path performs on a working copy
pub trait VersionControl {
    /// Clone `url` into the empty or missing directory `dest`
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Create and switch to a new branch
    fn checkout_new_branch(&self, dir: &Path, branch: &str) -> Result<()>;

    /// Stage every change in the working tree
    fn add_all(&self, dir: &Path) -> Result<()>;

    fn commit(&self, dir: &Path, message: &str) -> Result<()>;

    /// Push `branch` to `remote`, setting upstream
    fn push(&self, dir: &Path, remote: &str, branch: &str) -> Result<()>;
}

impl<T: VersionControl + ?Sized> VersionControl for &T {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        (**self).clone_repo(url, dest)
    }

    fn checkout_new_branch(&self, dir: &Path, branch: &str) -> Result<()> {
        (**self).checkout_new_branch(dir, branch)
    }

    fn add_all(&self, dir: &Path) -> Result<()> {
        (**self).add_all(dir)
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        (**self).commit(dir, message)
    }

    fn push(&self, dir: &Path, remote: &str, branch: &str) -> Result<()> {
        (**self).push(dir, remote, branch)
    }
}

/// Replace credentials embedded in URLs (`https://TOKEN@host`) with `***`
pub fn redact_credentials(text: &str) -> String {
    match Regex::new(r"://[^/@\s]+@") {
        Ok(re) => re.replace_all(text, "://***@").into_owned(),
        Err(_) => text.to_string(),
    }
}

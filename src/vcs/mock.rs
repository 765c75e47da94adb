use crate::error::{ReleaseMakerError, Result};
use crate::vcs::VersionControl;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One call made against a [RecordingVcs]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Clone { url: String, dest: PathBuf },
    CheckoutNewBranch { branch: String },
    AddAll,
    Commit { message: String },
    Push { remote: String, branch: String },
}

impl VcsCall {
    /// Short operation name, as used by [RecordingVcs::fail_on]
    pub fn name(&self) -> &'static str {
        match self {
            VcsCall::Clone { .. } => "clone",
            VcsCall::CheckoutNewBranch { .. } => "checkout",
            VcsCall::AddAll => "add",
            VcsCall::Commit { .. } => "commit",
            VcsCall::Push { .. } => "push",
        }
    }
}

/// [VersionControl] that records calls instead of running git.
///
/// Cloning creates the destination directory and seeds it with the files
/// registered through [RecordingVcs::with_file].
#[derive(Debug, Default)]
pub struct RecordingVcs {
    calls: RefCell<Vec<VcsCall>>,
    seed_files: HashMap<String, String>,
    failing: Option<&'static str>,
}

impl RecordingVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// File present in every clone
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.seed_files.insert(name.into(), content.into());
        self
    }

    /// Make the named operation fail (`clone`, `checkout`, `add`, `commit`, `push`)
    pub fn fail_on(mut self, operation: &'static str) -> Self {
        self.failing = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }

    pub fn pushed(&self) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|call| matches!(call, VcsCall::Push { .. }))
    }

    fn record(&self, call: VcsCall) -> Result<()> {
        let name = call.name();
        self.calls.borrow_mut().push(call);
        if self.failing == Some(name) {
            return Err(ReleaseMakerError::git(format!("git {} failed", name)));
        }
        Ok(())
    }
}

impl VersionControl for RecordingVcs {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        self.record(VcsCall::Clone {
            url: url.to_string(),
            dest: dest.to_path_buf(),
        })?;
        fs::create_dir_all(dest)?;
        for (name, content) in &self.seed_files {
            fs::write(dest.join(name), content)?;
        }
        Ok(())
    }

    fn checkout_new_branch(&self, _dir: &Path, branch: &str) -> Result<()> {
        self.record(VcsCall::CheckoutNewBranch {
            branch: branch.to_string(),
        })
    }

    fn add_all(&self, _dir: &Path) -> Result<()> {
        self.record(VcsCall::AddAll)
    }

    fn commit(&self, _dir: &Path, message: &str) -> Result<()> {
        self.record(VcsCall::Commit {
            message: message.to_string(),
        })
    }

    fn push(&self, _dir: &Path, remote: &str, branch: &str) -> Result<()> {
        self.record(VcsCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
    }
}

use crate::error::{ReleaseMakerError, Result};
use crate::vcs::{redact_credentials, VersionControl};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// [VersionControl] backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        GitCli {
            program: "git".to_string(),
        }
    }

    /// Use another executable, e.g. an absolute path to git
    pub fn with_program(program: impl Into<String>) -> Self {
        GitCli {
            program: program.into(),
        }
    }

    fn run<I, S>(&self, dir: Option<&Path>, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let shown = redact_credentials(
            &args
                .iter()
                .map(|a| a.as_ref().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" "),
        );
        debug!(command = %format!("{} {}", self.program, shown), "Running git");

        let mut cmd = Command::new(&self.program);
        cmd.args(&args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        // Never block on a credential prompt
        cmd.env("GIT_TERMINAL_PROMPT", "0");

        let output = cmd.output().map_err(|e| {
            ReleaseMakerError::git(format!("Failed to run {} {}: {}", self.program, shown, e))
        })?;

        if !output.status.success() {
            return Err(ReleaseMakerError::git(format!(
                "{} {} failed with exit code {}\nStdout: {}\nStderr: {}",
                self.program,
                shown,
                output.status.code().unwrap_or(-1),
                redact_credentials(&String::from_utf8_lossy(&output.stdout)),
                redact_credentials(&String::from_utf8_lossy(&output.stderr)),
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        self.run(
            None,
            [
                OsStr::new("clone"),
                OsStr::new("--quiet"),
                OsStr::new(url),
                dest.as_os_str(),
            ],
        )?;
        Ok(())
    }

    fn checkout_new_branch(&self, dir: &Path, branch: &str) -> Result<()> {
        self.run(Some(dir), ["checkout", "-b", branch])?;
        Ok(())
    }

    fn add_all(&self, dir: &Path) -> Result<()> {
        self.run(Some(dir), ["add", "-A"])?;
        Ok(())
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        self.run(Some(dir), ["commit", "--quiet", "-m", message])?;
        Ok(())
    }

    fn push(&self, dir: &Path, remote: &str, branch: &str) -> Result<()> {
        self.run(Some(dir), ["push", "--quiet", "-u", remote, branch])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_git_error() {
        let git = GitCli::with_program("/nonexistent/bin/git");
        let dir = tempfile::tempdir().unwrap();
        let err = git.add_all(dir.path()).unwrap_err();
        assert!(matches!(err, ReleaseMakerError::Git(_)));
    }

    #[test]
    fn test_failure_redacts_token() {
        let git = GitCli::new();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("clone");
        // Cloning a local path that does not exist fails without network access
        let Err(err) = git.clone_repo("file://ghp_secret@/nonexistent/repo.git", &dest) else {
            return;
        };
        assert!(!err.to_string().contains("ghp_secret"));
    }
}

use crate::error::{ReleaseMakerError, Result};
use crate::hooks::HookContext;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Runs the pre-release script
pub struct HookExecutor;

impl HookExecutor {
    /// Execute a script inside `work_dir`.
    ///
    /// The script is made executable first (mode 0755 on Unix), then run with
    /// the context exported as environment variables. A non-zero exit is an
    /// error carrying the script's output.
    pub fn execute(script_path: &Path, work_dir: &Path, context: &HookContext) -> Result<()> {
        if !script_path.exists() {
            return Err(ReleaseMakerError::hook(format!(
                "Pre-release script not found: {}",
                script_path.display()
            )));
        }

        if !script_path.is_file() {
            return Err(ReleaseMakerError::hook(format!(
                "Pre-release script path is not a file: {}",
                script_path.display()
            )));
        }

        // Relative paths are given from the caller's directory, the script runs
        // from the clone
        let script = fs::canonicalize(script_path)?;
        make_executable(&script)?;

        info!(script = %script.display(), version = %context.version, "Running pre-release script");
        let output = Command::new(&script)
            .current_dir(work_dir)
            .envs(context.to_env_vars())
            .output()
            .map_err(|e| {
                ReleaseMakerError::hook(format!(
                    "Failed to execute {}: {}",
                    script.display(),
                    e
                ))
            })?;

        debug!(
            stdout = %String::from_utf8_lossy(&output.stdout),
            "Pre-release script finished"
        );

        if !output.status.success() {
            return Err(ReleaseMakerError::hook(format!(
                "{} failed with exit code {}\nStdout: {}\nStderr: {}",
                script.display(),
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

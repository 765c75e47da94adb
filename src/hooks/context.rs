use std::collections::HashMap;

/// Release information handed to the pre-release script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    /// Version being released, e.g. `1.5.0`
    pub version: String,
    /// Previous release version, `0.0.0` when there was none
    pub previous_version: String,
    /// `owner/name` of the repository
    pub repo: String,
}

impl HookContext {
    pub fn new(
        version: impl Into<String>,
        previous_version: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        HookContext {
            version: version.into(),
            previous_version: previous_version.into(),
            repo: repo.into(),
        }
    }

    /// Environment variables exported to the script
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("RELEASE_VERSION".to_string(), self.version.clone());
        env.insert(
            "RELEASE_PREVIOUS_VERSION".to_string(),
            self.previous_version.clone(),
        );
        env.insert("RELEASE_REPO".to_string(), self.repo.clone());
        env
    }
}

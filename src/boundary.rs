use std::fmt;

/// Conditions at the edges of a release run that are reported to the user
/// but do not stop it.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag parses as a release; every merged pull request is included
    NoPreviousRelease,
    /// Nothing was merged since the previous release
    NoPullRequests { since: Option<String> },
    /// The computed version is already in the changelog; nothing is written
    VersionAlreadyPresent { version: String, file: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoPreviousRelease => {
                write!(f, "No release tags exist yet, starting from 0.0.0")
            }
            BoundaryWarning::NoPullRequests { since: Some(tag) } => {
                write!(f, "No pull requests merged since {}", tag)
            }
            BoundaryWarning::NoPullRequests { since: None } => {
                write!(f, "No merged pull requests found")
            }
            BoundaryWarning::VersionAlreadyPresent { version, file } => {
                write!(
                    f,
                    "Release {} is already present in {}, nothing to do",
                    version, file
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_present_message() {
        let warning = BoundaryWarning::VersionAlreadyPresent {
            version: "1.5.0".to_string(),
            file: "CHANGELOG.md".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("already present"));
        assert!(msg.contains("1.5.0"));
        assert!(msg.contains("CHANGELOG.md"));
    }

    #[test]
    fn test_no_pull_requests_messages() {
        let since = BoundaryWarning::NoPullRequests {
            since: Some("v1.0.0".to_string()),
        };
        assert!(since.to_string().contains("v1.0.0"));
        let none = BoundaryWarning::NoPullRequests { since: None };
        assert_eq!(none.to_string(), "No merged pull requests found");
    }

    #[test]
    fn test_no_previous_release_message() {
        assert!(BoundaryWarning::NoPreviousRelease
            .to_string()
            .contains("0.0.0"));
    }
}

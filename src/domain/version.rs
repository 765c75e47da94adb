use crate::error::{ReleaseMakerError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation, with the non-digit prefix of the tag it
/// came from (e.g. "v" or a product code). Compare through [`Version::to_semver`],
/// which ignores the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub prefix: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version without prefix
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            prefix: String::new(),
            major,
            minor,
            patch,
        }
    }

    /// Seed version used when no previous release exists
    pub fn initial() -> Self {
        Version::new(0, 0, 0)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Parse a strict dotted triple ("1.2.3"); no prefix is allowed.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseMakerError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                input
            )));
        }

        let component = |name: &str, raw: &str| {
            raw.parse::<u64>().map_err(|_| {
                ReleaseMakerError::version(format!("Invalid {} version: '{}'", name, raw))
            })
        };

        Ok(Version::new(
            component("major", parts[0])?,
            component("minor", parts[1])?,
            component("patch", parts[2])?,
        ))
    }

    /// Parse a tag name such as "v1.2.3" or "kf-lib-2.0.1".
    ///
    /// Everything before the first ASCII digit is the prefix; the remainder
    /// must be a plain semantic version without pre-release or build metadata.
    /// Returns `None` for tags that are not releases.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        let split = name.find(|c: char| c.is_ascii_digit())?;
        let (prefix, rest) = name.split_at(split);

        let parsed = semver::Version::parse(rest).ok()?;
        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return None;
        }

        Some(Version::new(parsed.major, parsed.minor, parsed.patch).with_prefix(prefix))
    }

    /// Bump version according to release type.
    ///
    /// Fails when the bumped component would overflow `u64`.
    pub fn bump(&self, release_type: ReleaseType) -> Result<Self> {
        let increment = |component: u64| {
            component.checked_add(1).ok_or_else(|| {
                ReleaseMakerError::version(format!(
                    "Cannot make a {} release after {}: version component overflows",
                    release_type, self
                ))
            })
        };

        let (major, minor, patch) = match release_type {
            ReleaseType::Major => (increment(self.major)?, 0, 0),
            ReleaseType::Minor => (self.major, increment(self.minor)?, 0),
            ReleaseType::Patch => (self.major, self.minor, increment(self.patch)?),
        };
        Ok(Version {
            prefix: self.prefix.clone(),
            major,
            minor,
            patch,
        })
    }

    /// The dotted triple without prefix
    pub fn triple(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}",
            self.prefix, self.major, self.minor, self.patch
        )
    }
}

/// Kind of release being cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
}

impl ReleaseType {
    pub fn name(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReleaseType {
    type Err = ReleaseMakerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(ReleaseType::Major),
            "minor" => Ok(ReleaseType::Minor),
            "patch" => Ok(ReleaseType::Patch),
            other => Err(ReleaseMakerError::config(format!(
                "Invalid release type: '{}'! Release type must be one of major, minor, patch",
                other
            ))),
        }
    }
}

/// Computes the next release version from a previous dotted triple.
///
/// ```
/// use release_maker::domain::next_release_version;
///
/// assert_eq!(next_release_version("1.4.0", "minor").unwrap(), "1.5.0");
/// assert!(next_release_version("1.4.0", "prerelease").is_err());
/// ```
pub fn next_release_version(prev_version: &str, release_type: &str) -> Result<String> {
    let release_type: ReleaseType = release_type.parse()?;
    let version = Version::parse(prev_version)?;
    Ok(version.bump(release_type)?.triple())
}

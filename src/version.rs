use std::fmt;
use std::str::FromStr;

use crate::error::TaskError;

/// Represents the semantic version segment handed to the bump tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
}

impl VersionPart {
    /// Every accepted part, in the order shown to the operator
    pub const ALL: [VersionPart; 3] = [VersionPart::Major, VersionPart::Minor, VersionPart::Patch];

    /// Canonical lower-case name passed on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionPart::Major => "major",
            VersionPart::Minor => "minor",
            VersionPart::Patch => "patch",
        }
    }

    fn allowed() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(VersionPart::as_str).collect();
        format!("[{}]", names.join(", "))
    }
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionPart {
    type Err = TaskError;

    /// Parses a version part case-insensitively.
    ///
    /// # Example
    /// ```
    /// # use repo_tasks::version::VersionPart;
    /// assert_eq!("Minor".parse::<VersionPart>().unwrap(), VersionPart::Minor);
    /// assert!("build".parse::<VersionPart>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(VersionPart::Major),
            "minor" => Ok(VersionPart::Minor),
            "patch" => Ok(VersionPart::Patch),
            _ => Err(TaskError::invalid_argument(format!(
                "Version Part must be one of {} not {}",
                Self::allowed(),
                s
            ))),
        }
    }
}

/// Predicts the version the bump tool will write.
///
/// Applies semver bump rules to `current`: major resets minor and patch, minor
/// resets patch, and any pre-release or build metadata is dropped.
///
/// # Returns
/// * `Some(String)` - The predicted next version
/// * `None` - If `current` is not a semantic version
pub fn predict_next(current: &str, part: VersionPart) -> Option<String> {
    let mut version = semver::Version::parse(current.trim()).ok()?;

    match part {
        VersionPart::Major => {
            version.major += 1;
            version.minor = 0;
            version.patch = 0;
        }
        VersionPart::Minor => {
            version.minor += 1;
            version.patch = 0;
        }
        VersionPart::Patch => {
            version.patch += 1;
        }
    }
    version.pre = semver::Prerelease::EMPTY;
    version.build = semver::BuildMetadata::EMPTY;

    Some(version.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_parts() {
        assert_eq!("major".parse::<VersionPart>().unwrap(), VersionPart::Major);
        assert_eq!("minor".parse::<VersionPart>().unwrap(), VersionPart::Minor);
        assert_eq!("patch".parse::<VersionPart>().unwrap(), VersionPart::Patch);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("PATCH".parse::<VersionPart>().unwrap(), VersionPart::Patch);
        assert_eq!("Major".parse::<VersionPart>().unwrap(), VersionPart::Major);
    }

    #[test]
    fn test_invalid_part_lists_allowed_values() {
        for input in ["build", "", "majorr", "1"] {
            let err = input.parse::<VersionPart>().unwrap_err();
            assert!(matches!(err, TaskError::InvalidArgument(_)));
            let msg = err.to_string();
            assert!(msg.contains("[major, minor, patch]"), "got: {}", msg);
        }
    }

    #[test]
    fn test_invalid_part_echoes_input() {
        let err = "release".parse::<VersionPart>().unwrap_err();
        assert!(err.to_string().ends_with("not release"));
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(VersionPart::Minor.to_string(), "minor");
    }

    #[test]
    fn test_predict_next() {
        assert_eq!(predict_next("1.2.3", VersionPart::Patch).as_deref(), Some("1.2.4"));
        assert_eq!(predict_next("1.2.3", VersionPart::Minor).as_deref(), Some("1.3.0"));
        assert_eq!(predict_next("1.2.3", VersionPart::Major).as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_predict_next_drops_prerelease() {
        assert_eq!(
            predict_next("1.0.0-rc.1+build.5", VersionPart::Patch).as_deref(),
            Some("1.0.1")
        );
    }

    #[test]
    fn test_predict_next_non_semver() {
        assert_eq!(predict_next("2024.10", VersionPart::Minor), None);
        assert_eq!(predict_next("", VersionPart::Patch), None);
    }
}

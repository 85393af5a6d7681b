//! Read-only view of the bump2version configuration file.
//!
//! The file is ini-like: `[section]` headers followed by `key = value` (or
//! `key: value`) lines. Only `current_version` in `[bumpversion]` is consumed,
//! but every section is kept so lookups behave the way the tool itself reads
//! the file.

use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, TaskError};

pub const SECTION: &str = "bumpversion";
pub const CURRENT_VERSION_KEY: &str = "current_version";

/// Parsed key/value sections of a `.bumpversion.cfg`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionConfig {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| TaskError::config(format!("Invalid pattern: {}", e)))
}

impl VersionConfig {
    /// Parses ini-like content.
    ///
    /// Keys are case-insensitive and stored lower-cased. Indented lines
    /// continue the previous value. Repeated sections merge and a repeated
    /// key keeps its last value.
    pub fn parse(contents: &str) -> Result<Self> {
        let section_re = compile(r"^\[([^\]]+)\]\s*$")?;
        let option_re = compile(r"^([^=:\s][^=:]*?)\s*[=:]\s*(.*?)\s*$")?;

        let mut config = VersionConfig::default();
        let mut current_section: Option<String> = None;
        let mut last_key: Option<String> = None;

        for (index, raw_line) in contents.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = raw_line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw_line.starts_with(' ') || raw_line.starts_with('\t');
            if indented {
                if let (Some(section), Some(key)) = (&current_section, &last_key) {
                    if let Some(value) = config
                        .sections
                        .get_mut(section)
                        .and_then(|options| options.get_mut(key))
                    {
                        if !value.is_empty() {
                            value.push('\n');
                        }
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if let Some(caps) = section_re.captures(trimmed) {
                let name = caps[1].trim().to_string();
                config.sections.entry(name.clone()).or_default();
                current_section = Some(name);
                last_key = None;
                continue;
            }

            let Some(section) = &current_section else {
                return Err(TaskError::VersionConfigParse {
                    line: line_number,
                    reason: "key/value pair before any section header".to_string(),
                });
            };

            let Some(caps) = option_re.captures(trimmed) else {
                return Err(TaskError::VersionConfigParse {
                    line: line_number,
                    reason: format!("expected `key = value`, found '{}'", trimmed),
                });
            };

            let key = caps[1].trim().to_lowercase();
            let value = caps[2].to_string();
            config
                .sections
                .entry(section.clone())
                .or_default()
                .insert(key.clone(), value);
            last_key = Some(key);
        }

        Ok(config)
    }

    /// Reads and parses the file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    /// Looks up a value; the key is matched case-insensitively
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|options| options.get(&key.to_lowercase()))
            .map(String::as_str)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// The `current_version` of the `[bumpversion]` section
    ///
    /// # Returns
    /// * `Ok(&str)` - The version string, as written in the file
    /// * `Err(ConfigurationMissing)` - If the section or key is absent or empty
    pub fn current_version(&self) -> Result<&str> {
        if !self.has_section(SECTION) {
            return Err(TaskError::config_missing(format!(
                "Section [{}] not found in version config",
                SECTION
            )));
        }

        match self.get(SECTION, CURRENT_VERSION_KEY) {
            Some(version) if !version.is_empty() => Ok(version),
            _ => Err(TaskError::config_missing(format!(
                "'{}' not set in [{}]",
                CURRENT_VERSION_KEY, SECTION
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[bumpversion]
current_version = 1.2.3
commit = True
tag = True

[bumpversion:file:setup.py]
search = version="{current_version}"
replace = version="{new_version}"
"#;

    #[test]
    fn test_current_version() {
        let config = VersionConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.current_version().unwrap(), "1.2.3");
    }

    #[test]
    fn test_file_sections_are_kept() {
        let config = VersionConfig::parse(SAMPLE).unwrap();
        assert!(config.has_section("bumpversion"));
        assert!(config.has_section("bumpversion:file:setup.py"));
        assert!(!config.has_section("bumpversion:file"));
        assert_eq!(
            config.get("bumpversion:file:setup.py", "replace"),
            Some("version=\"{new_version}\"")
        );
    }

    #[test]
    fn test_colon_separator_and_case_insensitive_keys() {
        let config = VersionConfig::parse("[bumpversion]\nCurrent_Version: 0.9.0\n").unwrap();
        assert_eq!(config.get("bumpversion", "CURRENT_VERSION"), Some("0.9.0"));
        assert_eq!(config.current_version().unwrap(), "0.9.0");
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let config = VersionConfig::parse(
            "# release settings\n\n[bumpversion]\n; pinned\ncurrent_version = 2.0.0\n",
        )
        .unwrap();
        assert_eq!(config.current_version().unwrap(), "2.0.0");
    }

    #[test]
    fn test_continuation_lines() {
        let config = VersionConfig::parse(
            "[bumpversion]\ncurrent_version = 1.0.0\nserialize =\n    {major}.{minor}.{patch}\n    {major}.{minor}\n",
        )
        .unwrap();
        assert_eq!(
            config.get("bumpversion", "serialize"),
            Some("{major}.{minor}.{patch}\n{major}.{minor}")
        );
    }

    #[test]
    fn test_last_duplicate_key_wins() {
        let config =
            VersionConfig::parse("[bumpversion]\ncurrent_version = 1.0.0\ncurrent_version = 1.0.1\n")
                .unwrap();
        assert_eq!(config.current_version().unwrap(), "1.0.1");
    }

    #[test]
    fn test_missing_section() {
        let config = VersionConfig::parse("[metadata]\nname = demo\n").unwrap();
        let err = config.current_version().unwrap_err();
        assert!(matches!(err, TaskError::ConfigurationMissing(_)));
        assert!(err.to_string().contains("[bumpversion]"));
    }

    #[test]
    fn test_missing_key() {
        let config = VersionConfig::parse("[bumpversion]\ncommit = True\n").unwrap();
        assert!(matches!(
            config.current_version(),
            Err(TaskError::ConfigurationMissing(_))
        ));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let config = VersionConfig::parse("[bumpversion]\ncurrent_version =\n").unwrap();
        assert!(config.current_version().is_err());
    }

    #[test]
    fn test_key_before_section_is_parse_error() {
        let err = VersionConfig::parse("current_version = 1.0.0\n").unwrap_err();
        match err {
            TaskError::VersionConfigParse { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_line_without_separator_is_parse_error() {
        let err = VersionConfig::parse("[bumpversion]\njust some words\n").unwrap_err();
        assert!(matches!(err, TaskError::VersionConfigParse { line: 2, .. }));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = VersionConfig::load("/nonexistent/.bumpversion.cfg");
        assert!(matches!(result, Err(TaskError::Io(_))));
    }
}

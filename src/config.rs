use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskError};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "repo-tasks.toml";

/// Represents the complete configuration for repo-tasks.
///
/// Every section is optional; missing keys fall back to the conventional
/// bump2version / github_changelog_generator / black setup.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub release: ReleaseSettings,

    #[serde(default)]
    pub format: FormatSettings,

    #[serde(default)]
    pub lint: LintSettings,
}

fn default_bumpversion_config() -> PathBuf {
    PathBuf::from(".bumpversion.cfg")
}

fn default_changelog_config() -> PathBuf {
    PathBuf::from(".github_changelog_generator")
}

fn default_username_env() -> String {
    "GITHUB_USERNAME".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_bump_command() -> String {
    "bump2version".to_string()
}

fn default_changelog_command() -> String {
    "github_changelog_generator".to_string()
}

/// Settings for the release and revert workflows.
///
/// Config paths are resolved relative to the repository root. Tool settings
/// may carry leading arguments (`"python -m bumpversion"`), split on
/// whitespace.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseSettings {
    #[serde(default = "default_bumpversion_config")]
    pub bumpversion_config: PathBuf,

    #[serde(default = "default_changelog_config")]
    pub changelog_config: PathBuf,

    /// Environment variable holding the changelog generator's user
    #[serde(default = "default_username_env")]
    pub username_env: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_bump_command")]
    pub bump_command: String,

    #[serde(default = "default_changelog_command")]
    pub changelog_command: String,
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        ReleaseSettings {
            bumpversion_config: default_bumpversion_config(),
            changelog_config: default_changelog_config(),
            username_env: default_username_env(),
            remote: default_remote(),
            bump_command: default_bump_command(),
            changelog_command: default_changelog_command(),
        }
    }
}

fn default_line_length() -> u32 {
    79
}

fn default_formatter() -> String {
    "black".to_string()
}

/// Settings for `format-python`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FormatSettings {
    #[serde(default = "default_line_length")]
    pub line_length: u32,

    #[serde(default = "default_formatter")]
    pub formatter: String,
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            line_length: default_line_length(),
            formatter: default_formatter(),
        }
    }
}

fn default_markdown_linter() -> String {
    "markdownlint".to_string()
}

fn default_flake8() -> String {
    "flake8".to_string()
}

fn default_pylint() -> String {
    "pylint".to_string()
}

/// Settings for the lint tasks. Each tool may include leading arguments,
/// split on whitespace.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LintSettings {
    #[serde(default = "default_markdown_linter")]
    pub markdown_linter: String,

    #[serde(default = "default_flake8")]
    pub flake8: String,

    #[serde(default = "default_pylint")]
    pub pylint: String,
}

impl Default for LintSettings {
    fn default() -> Self {
        LintSettings {
            markdown_linter: default_markdown_linter(),
            flake8: default_flake8(),
            pylint: default_pylint(),
        }
    }
}

/// Parses settings from a TOML string.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| TaskError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `repo-tasks.toml` in the repository root
/// 3. `repo-tasks.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_root` - Repository the tasks run in
///
/// # Returns
/// * `Ok(Settings)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, repo_root: &Path) -> Result<Settings> {
    let local = repo_root.join(CONFIG_FILE_NAME);

    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(CONFIG_FILE_NAME);
        if user_config.exists() {
            user_config
        } else {
            return Ok(Settings::default());
        }
    } else {
        return Ok(Settings::default());
    };

    log::debug!("loading settings from {}", config_file.display());
    let contents = fs::read_to_string(&config_file).map_err(|e| {
        TaskError::config(format!("Cannot read {}: {}", config_file.display(), e))
    })?;

    parse_settings(&contents)
}

//! Repository maintenance tasks.
//!
//! Each task is a linear sequence of external commands issued through a
//! [CommandRunner](crate::runner::CommandRunner). Everything a task reads
//! from the outside world (repository root, settings, the changelog user) is
//! carried by [TaskContext] so callers can substitute it.

pub mod lint;
pub mod release;
pub mod revert;

pub use lint::{format_python, lint_markdown, lint_python};
pub use release::{new_release, ReleaseRequest, ReleaseSummary};
pub use revert::{revert_last, RevertOutcome, RevertState};

use std::path::{Path, PathBuf};

use crate::config::Settings;

/// Inputs shared by all tasks
#[derive(Debug, Clone, PartialEq)]
pub struct TaskContext {
    /// Directory commands run in and config paths are resolved against
    pub repo_root: PathBuf,
    pub settings: Settings,
    /// Changelog generator user, usually from `GITHUB_USERNAME`
    pub username: Option<String>,
}

impl TaskContext {
    pub fn new<P: AsRef<Path>>(repo_root: P, settings: Settings) -> Self {
        TaskContext {
            repo_root: repo_root.as_ref().to_path_buf(),
            settings,
            username: None,
        }
    }

    /// Reads the username from the environment variable named in the settings
    pub fn from_env<P: AsRef<Path>>(repo_root: P, settings: Settings) -> Self {
        let username = std::env::var(&settings.release.username_env).ok();
        Self::new(repo_root, settings).with_username(username)
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// The username, unless unset or blank
    pub fn username(&self) -> Option<&str> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn bumpversion_config_path(&self) -> PathBuf {
        self.repo_root.join(&self.settings.release.bumpversion_config)
    }

    pub fn changelog_config_path(&self) -> PathBuf {
        self.repo_root.join(&self.settings.release.changelog_config)
    }
}

//! `new-release`: bump the version, push, and optionally commit a changelog.

use crate::bumpversion::VersionConfig;
use crate::error::{Result, TaskError};
use crate::history::CHANGELOG_COMMIT_PREFIX;
use crate::runner::{run_checked, CommandRunner, ShellCommand};
use crate::tasks::TaskContext;
use crate::ui;
use crate::version::{predict_next, VersionPart};

/// Placeholder for the version in a dry-run plan when it cannot be predicted
pub const UNKNOWN_VERSION: &str = "<next>";

/// Parameters of a release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRequest {
    pub version_part: VersionPart,
    /// Generate and commit a changelog after the bump
    pub changelog: bool,
    /// Check preconditions and report the plan without running anything
    pub dry_run: bool,
}

impl ReleaseRequest {
    pub fn new(version_part: VersionPart) -> Self {
        ReleaseRequest {
            version_part,
            changelog: false,
            dry_run: false,
        }
    }

    /// Validates a raw version part from the command line
    ///
    /// # Returns
    /// * `Err(InvalidArgument)` - If the part is not major, minor or patch
    pub fn parse(version_part: &str, changelog: bool) -> Result<Self> {
        Ok(Self::new(version_part.parse()?).with_changelog(changelog))
    }

    pub fn with_changelog(mut self, changelog: bool) -> Self {
        self.changelog = changelog;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What a release did, or would do for a dry run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSummary {
    pub version_part: VersionPart,
    /// Version after the bump; read back only when a changelog is generated,
    /// predicted for a dry run
    pub version: Option<String>,
    pub changelog_committed: bool,
    pub dry_run: bool,
    /// Commands executed, or planned for a dry run, in order
    pub commands: Vec<ShellCommand>,
}

fn bump_command(ctx: &TaskContext, part: VersionPart) -> ShellCommand {
    ShellCommand::tool(&ctx.settings.release.bump_command).arg(part.as_str())
}

fn push_command() -> ShellCommand {
    ShellCommand::git(["push"])
}

fn changelog_command(ctx: &TaskContext, username: &str) -> ShellCommand {
    ShellCommand::tool(&ctx.settings.release.changelog_command).args(["--user", username])
}

fn stage_command() -> ShellCommand {
    ShellCommand::git(["add", "--all"])
}

fn commit_command(version: &str) -> ShellCommand {
    let message = format!("--message={} v{}", CHANGELOG_COMMIT_PREFIX, version);
    ShellCommand::git(["commit".to_string(), message])
}

/// Verifies every precondition before anything runs.
///
/// Returns the changelog username when a changelog was requested.
fn check_preconditions(request: &ReleaseRequest, ctx: &TaskContext) -> Result<Option<String>> {
    let username = if request.changelog {
        let username = ctx.username().ok_or_else(|| {
            TaskError::config_missing(format!(
                "Environment variable '{}' not set",
                ctx.settings.release.username_env
            ))
        })?;

        let changelog_config = ctx.changelog_config_path();
        if !changelog_config.exists() {
            return Err(TaskError::config_missing(format!(
                "Github Changelog Generator config not found: {}",
                changelog_config.display()
            )));
        }

        Some(username.to_string())
    } else {
        None
    };

    let bumpversion_config = ctx.bumpversion_config_path();
    if !bumpversion_config.exists() {
        return Err(TaskError::config_missing(format!(
            "Bumpversion config not found: {}",
            bumpversion_config.display()
        )));
    }

    Ok(username)
}

/// Runs the release workflow.
///
/// Order: bump, push, then (with a changelog) generate, stage, commit and
/// push again. All preconditions are checked before the first command. A
/// failing command stops the sequence; earlier steps are not rolled back.
///
/// # Arguments
/// * `request` - Version part and flags
/// * `ctx` - Repository root, settings and changelog user
/// * `runner` - Executes the commands
pub fn new_release<R: CommandRunner + ?Sized>(
    request: &ReleaseRequest,
    ctx: &TaskContext,
    runner: &R,
) -> Result<ReleaseSummary> {
    let username = check_preconditions(request, ctx)?;

    if request.dry_run {
        return plan_release(request, ctx, username.as_deref());
    }

    let mut executed = Vec::new();
    let mut step = |command: ShellCommand| -> Result<()> {
        run_checked(runner, &command)?;
        executed.push(command);
        Ok(())
    };

    ui::display_status(&format!("Bumping {} version", request.version_part));
    step(bump_command(ctx, request.version_part))?;
    step(push_command())?;

    let mut version = None;
    if let Some(username) = username {
        let config = VersionConfig::load(ctx.bumpversion_config_path())?;
        let current = config.current_version()?.to_string();
        log::debug!("version after bump: {}", current);

        ui::display_status(&format!("Generating changelog for v{}", current));
        step(changelog_command(ctx, &username))?;
        step(stage_command())?;
        step(commit_command(&current))?;
        step(push_command())?;
        version = Some(current);
    }

    match &version {
        Some(v) => ui::display_success(&format!("Released v{} with changelog", v)),
        None => ui::display_success(&format!("Released {} bump", request.version_part)),
    }

    Ok(ReleaseSummary {
        version_part: request.version_part,
        changelog_committed: version.is_some(),
        version,
        dry_run: false,
        commands: executed,
    })
}

fn plan_release(
    request: &ReleaseRequest,
    ctx: &TaskContext,
    username: Option<&str>,
) -> Result<ReleaseSummary> {
    let config = VersionConfig::load(ctx.bumpversion_config_path())?;
    let predicted = config
        .current_version()
        .ok()
        .and_then(|current| predict_next(current, request.version_part));

    let mut commands = vec![bump_command(ctx, request.version_part), push_command()];
    if let Some(username) = username {
        let version = predicted.as_deref().unwrap_or(UNKNOWN_VERSION);
        commands.push(changelog_command(ctx, username));
        commands.push(stage_command());
        commands.push(commit_command(version));
        commands.push(push_command());
    }

    Ok(ReleaseSummary {
        version_part: request.version_part,
        version: predicted,
        changelog_committed: false,
        dry_run: true,
        commands,
    })
}

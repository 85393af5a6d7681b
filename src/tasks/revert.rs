//! `revert-last`: undo the most recent release.
//!
//! The revert discards the last one or two commits, deletes the latest tag
//! locally and on the remote, and force-pushes. Nothing destructive runs until
//! the operator confirms the exact command list.
//!
//! The workflow assumes the newest commits are the release commits (the bump
//! commit, plus the changelog commit when one was made). That assumption is
//! checked and any mismatch is shown before the prompt, but the commands are
//! never adjusted: confirming with a mismatched history is the operator's call.

use crate::error::{Result, TaskError};
use crate::history::{check_release_history, HistoryWarning};
use crate::runner::{run_checked, CommandRunner, ShellCommand};
use crate::tasks::TaskContext;
use crate::ui::{self, Confirm};

/// Lifecycle of a single revert.
///
/// `AwaitingConfirmation → {Aborted | Executing → Completed | Failed}`.
/// Terminal states absorb any further event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertState {
    AwaitingConfirmation,
    Aborted,
    Executing,
    Completed,
    Failed,
}

impl RevertState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RevertState::Aborted | RevertState::Completed | RevertState::Failed
        )
    }

    /// Applies the operator's answer
    pub fn on_confirmation(self, accepted: bool) -> Self {
        match self {
            RevertState::AwaitingConfirmation if accepted => RevertState::Executing,
            RevertState::AwaitingConfirmation => RevertState::Aborted,
            other => other,
        }
    }

    /// Records how the command sequence ended
    pub fn on_finished(self, succeeded: bool) -> Self {
        match self {
            RevertState::Executing if succeeded => RevertState::Completed,
            RevertState::Executing => RevertState::Failed,
            other => other,
        }
    }
}

/// How a revert ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertOutcome {
    /// The operator declined; nothing destructive ran
    Aborted,
    Completed { tag: String, commits_removed: usize },
}

/// Commits to discard: the bump commit, plus the changelog commit if any
pub fn unwind_depth(changelog: bool) -> usize {
    if changelog {
        2
    } else {
        1
    }
}

/// The destructive sequence, in execution order
pub fn revert_commands(tag: &str, depth: usize, remote: &str) -> Vec<ShellCommand> {
    let target = format!("HEAD~{}", depth);
    vec![
        ShellCommand::git(["reset", "--hard", target.as_str()]),
        ShellCommand::git(["tag", "--delete", tag]),
        ShellCommand::git(["push", "--delete", remote, tag]),
        ShellCommand::git(["push", "--force"]),
    ]
}

/// Most recent tag reachable from HEAD
pub fn latest_tag<R: CommandRunner + ?Sized>(runner: &R) -> Result<String> {
    let command = ShellCommand::git(["describe", "--abbrev=0", "--tags"]).hidden();
    let output = run_checked(runner, &command)?;

    let tag = output.stdout.trim();
    if tag.is_empty() {
        return Err(TaskError::unexpected_output(
            command.to_string(),
            "no tag name returned",
        ));
    }

    Ok(tag.to_string())
}

/// Reads the subjects of the commits about to be discarded and compares them
/// with the expected release commits. Read failures become a warning.
pub fn inspect_history<R: CommandRunner + ?Sized>(
    runner: &R,
    changelog: bool,
) -> Vec<HistoryWarning> {
    let depth = unwind_depth(changelog);
    let command = ShellCommand::git([
        "log".to_string(),
        format!("-{}", depth),
        "--format=%s".to_string(),
    ])
    .hidden();

    match runner.run(&command) {
        Ok(output) if output.is_success() => {
            let subjects: Vec<String> = output.stdout.lines().map(str::to_string).collect();
            check_release_history(&subjects, changelog)
        }
        Ok(output) => vec![HistoryWarning::HistoryUnavailable {
            reason: format!(
                "`{}` exited with {}: {}",
                command,
                output.exit_code,
                output.stderr.trim()
            ),
        }],
        Err(e) => vec![HistoryWarning::HistoryUnavailable {
            reason: e.to_string(),
        }],
    }
}

/// Runs the revert workflow.
///
/// Queries the latest tag, shows the destructive commands and asks for
/// confirmation. Declining returns [RevertOutcome::Aborted]. On confirmation
/// the commands run in order and the first failure stops the rest.
///
/// # Arguments
/// * `changelog` - The release being reverted included a changelog commit
/// * `ctx` - Settings (remote name)
/// * `runner` - Executes the commands
/// * `confirm` - Asks the operator
pub fn revert_last<R, C>(
    changelog: bool,
    ctx: &TaskContext,
    runner: &R,
    confirm: &C,
) -> Result<RevertOutcome>
where
    R: CommandRunner + ?Sized,
    C: Confirm + ?Sized,
{
    let tag = latest_tag(runner)?;
    let depth = unwind_depth(changelog);
    log::debug!("reverting tag {} ({} commit(s))", tag, depth);

    for warning in inspect_history(runner, changelog) {
        ui::display_history_warning(&warning);
    }

    let commands = revert_commands(&tag, depth, &ctx.settings.release.remote);
    let mut state = RevertState::AwaitingConfirmation;

    let accepted = confirm.confirm(&ui::format_revert_prompt(&commands))?;
    state = state.on_confirmation(accepted);
    if state == RevertState::Aborted {
        log::debug!("revert declined");
        return Ok(RevertOutcome::Aborted);
    }

    for command in &commands {
        if let Err(e) = run_checked(runner, command) {
            state = state.on_finished(false);
            log::debug!("revert stopped at `{}` ({:?})", command, state);
            return Err(e);
        }
    }
    state = state.on_finished(true);
    log::debug!("revert finished ({:?})", state);

    ui::display_success(&format!("Reverted release {}", tag));
    Ok(RevertOutcome::Completed {
        tag,
        commits_removed: depth,
    })
}

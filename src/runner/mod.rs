//! Command execution abstraction layer
//!
//! Every task is a sequence of external tool invocations. This module
//! describes those invocations as plain values ([ShellCommand]) and runs them
//! through the [CommandRunner] trait, so the workflows never touch
//! `std::process` directly.
//!
//! - [system::SystemRunner]: spawns real processes in the repository root
//! - [mock::RecordingRunner]: records commands and replays scripted results for tests
//!
//! ```rust
//! # use repo_tasks::runner::{run_checked, CommandRunner, ShellCommand};
//! # fn example<R: CommandRunner>(runner: &R) -> repo_tasks::Result<()> {
//! let output = run_checked(runner, &ShellCommand::git(["describe", "--abbrev=0", "--tags"]).hidden())?;
//! println!("latest tag: {}", output.stdout.trim());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod system;

pub use mock::RecordingRunner;
pub use system::SystemRunner;

use std::fmt;

use crate::error::{Result, TaskError};

/// A single external command: program, arguments and echo preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Captured output is not echoed to the operator
    pub hide: bool,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>) -> Self {
        ShellCommand {
            program: program.into(),
            args: Vec::new(),
            hide: false,
        }
    }

    /// Builds a command from a configured tool setting such as
    /// `"python -m pylint"`: the first word is the program, the rest are
    /// leading arguments. No shell quoting is interpreted.
    pub fn tool(setting: &str) -> Self {
        let mut words = setting.split_whitespace();
        let program = words.next().unwrap_or_default();
        ShellCommand::new(program).args(words)
    }

    /// Shorthand for a `git` invocation
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ShellCommand::new("git").args(args)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Capture output without echoing it
    pub fn hidden(mut self) -> Self {
        self.hide = true;
        self
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of running a [ShellCommand] to completion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Pluggable command execution
///
/// Implementations only report what happened; a non-zero exit code is not an
/// error at this level. Use [run_checked] to turn failures into
/// [TaskError::CommandFailed].
pub trait CommandRunner {
    /// Run the command to completion and return its exit code and output
    ///
    /// # Returns
    /// * `Ok(CommandOutput)` - The process ran, whatever its exit code
    /// * `Err` - The process could not be started
    fn run(&self, command: &ShellCommand) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &ShellCommand) -> Result<CommandOutput> {
        (**self).run(command)
    }
}

/// Run a command and fail with [TaskError::CommandFailed] on a non-zero exit
pub fn run_checked<R: CommandRunner + ?Sized>(
    runner: &R,
    command: &ShellCommand,
) -> Result<CommandOutput> {
    let output = runner.run(command)?;

    if !output.is_success() {
        return Err(TaskError::CommandFailed {
            command: command.to_string(),
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_plain_arguments() {
        let cmd = ShellCommand::git(["reset", "--hard", "HEAD~2"]);
        assert_eq!(cmd.to_string(), "git reset --hard HEAD~2");
    }

    #[test]
    fn test_display_quotes_whitespace() {
        let cmd = ShellCommand::git(["commit", "--message=Generate changelog: v1.2.4"]);
        assert_eq!(
            cmd.to_string(),
            "git commit \"--message=Generate changelog: v1.2.4\""
        );
    }

    #[test]
    fn test_builder_preserves_order() {
        let cmd = ShellCommand::new("black")
            .arg("-l")
            .arg("79")
            .args(["src", "tests"]);
        assert_eq!(cmd.args, vec!["-l", "79", "src", "tests"]);
        assert!(!cmd.hide);
        assert!(cmd.hidden().hide);
    }

    #[test]
    fn test_tool_setting_splits_leading_arguments() {
        let cmd = ShellCommand::tool("python -m  pylint").arg("setup.py");
        assert_eq!(cmd.program, "python");
        assert_eq!(cmd.args, vec!["-m", "pylint", "setup.py"]);

        assert_eq!(ShellCommand::tool("flake8"), ShellCommand::new("flake8"));
    }

    #[test]
    fn test_run_checked_rejects_non_zero() {
        let runner = RecordingRunner::new();
        runner.fail("git push", 1, "rejected");

        let err = run_checked(&runner, &ShellCommand::git(["push"])).unwrap_err();
        match err {
            TaskError::CommandFailed {
                command,
                exit_code,
                stderr,
                ..
            } => {
                assert_eq!(command, "git push");
                assert_eq!(exit_code, 1);
                assert_eq!(stderr, "rejected");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_checked_returns_output() {
        let runner = RecordingRunner::new();
        runner.respond("git status", "nothing to commit");

        let output = run_checked(&runner, &ShellCommand::git(["status"])).unwrap();
        assert_eq!(output.stdout, "nothing to commit");
    }
}

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::error::{Result, TaskError};
use crate::runner::{CommandOutput, CommandRunner, ShellCommand};
use crate::ui;

/// Runs commands as real child processes inside the repository root
pub struct SystemRunner {
    working_dir: PathBuf,
}

impl SystemRunner {
    pub fn new<P: AsRef<Path>>(working_dir: P) -> Self {
        SystemRunner {
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ShellCommand) -> Result<CommandOutput> {
        log::debug!("running `{}` in {}", command, self.working_dir.display());

        if !command.hide {
            ui::display_command(&command.to_string());
        }

        let mut process = Command::new(&command.program);
        process.args(&command.args).current_dir(&self.working_dir);
        let spawn_error = |source: std::io::Error| TaskError::CommandSpawn {
            command: command.to_string(),
            source,
        };

        // Visible commands share our stdio so progress and tool prompts show
        // live; their output is not captured.
        let output = if command.hide {
            let output = process.output().map_err(spawn_error)?;
            CommandOutput {
                exit_code: exit_code(output.status),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
        } else {
            let status = process.status().map_err(spawn_error)?;
            CommandOutput {
                exit_code: exit_code(status),
                stdout: String::new(),
                stderr: String::new(),
            }
        };

        log::debug!("`{}` exited with {}", command, output.exit_code);
        Ok(output)
    }
}

/// Killed by a signal when there is no code
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

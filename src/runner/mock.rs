use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;
use crate::runner::{CommandOutput, CommandRunner, ShellCommand};

type Effect = Box<dyn Fn()>;

/// Recording runner for testing without spawning processes
///
/// Every command is recorded in order. Results are scripted by the command
/// line as rendered by `Display`; unscripted commands succeed with empty output.
#[derive(Default)]
pub struct RecordingRunner {
    recorded: RefCell<Vec<ShellCommand>>,
    responses: RefCell<HashMap<String, CommandOutput>>,
    effects: RefCell<HashMap<String, Effect>>,
}

impl RecordingRunner {
    /// Create a new runner with no scripted results
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful result with the given stdout
    pub fn respond(&self, command_line: impl Into<String>, stdout: impl Into<String>) {
        self.responses
            .borrow_mut()
            .insert(command_line.into(), CommandOutput::success(stdout));
    }

    /// Script a failing result
    pub fn fail(&self, command_line: impl Into<String>, exit_code: i32, stderr: impl Into<String>) {
        self.responses.borrow_mut().insert(
            command_line.into(),
            CommandOutput {
                exit_code,
                stdout: String::new(),
                stderr: stderr.into(),
            },
        );
    }

    /// Run a side effect whenever the command is executed, e.g. rewriting a
    /// config file the way the real tool would
    pub fn on_run(&self, command_line: impl Into<String>, effect: impl Fn() + 'static) {
        self.effects
            .borrow_mut()
            .insert(command_line.into(), Box::new(effect));
    }

    /// Command lines executed so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.recorded.borrow().iter().map(ToString::to_string).collect()
    }

    /// Full command values executed so far, in order
    pub fn recorded(&self) -> Vec<ShellCommand> {
        self.recorded.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ShellCommand) -> Result<CommandOutput> {
        let line = command.to_string();
        self.recorded.borrow_mut().push(command.clone());

        if let Some(effect) = self.effects.borrow().get(&line) {
            effect();
        }

        Ok(self
            .responses
            .borrow()
            .get(&line)
            .cloned()
            .unwrap_or_default())
    }
}

use thiserror::Error;

/// Unified error type for repo-tasks operations
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Command `{command}` failed with exit code {exit_code}{}", render_output(.stdout, .stderr))]
    CommandFailed {
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to start `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected output from `{command}`: {reason}")]
    UnexpectedOutput { command: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version config parse error on line {line}: {reason}")]
    VersionConfigParse { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in repo-tasks
pub type Result<T> = std::result::Result<T, TaskError>;

fn render_output(stdout: &str, stderr: &str) -> String {
    let mut rendered = String::new();
    if !stdout.trim().is_empty() {
        rendered.push_str("\nStdout: ");
        rendered.push_str(stdout.trim_end());
    }
    if !stderr.trim().is_empty() {
        rendered.push_str("\nStderr: ");
        rendered.push_str(stderr.trim_end());
    }
    rendered
}

impl TaskError {
    /// Create an invalid argument error with context
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TaskError::InvalidArgument(msg.into())
    }

    /// Create a missing configuration error with context
    pub fn config_missing(msg: impl Into<String>) -> Self {
        TaskError::ConfigurationMissing(msg.into())
    }

    /// Create a settings error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TaskError::Config(msg.into())
    }

    /// Create an unexpected output error for the given command line
    pub fn unexpected_output(command: impl Into<String>, reason: impl Into<String>) -> Self {
        TaskError::UnexpectedOutput {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code the binary should use when surfacing this error.
    ///
    /// Failed commands forward the child's own exit code so wrappers see the
    /// same status the underlying tool returned.
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskError::CommandFailed { exit_code, .. } if *exit_code > 0 => *exit_code,
            _ => 1,
        }
    }
}

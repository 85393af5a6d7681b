//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_command, display_error, display_history_warning, display_plan, display_status,
    display_success, format_revert_prompt,
};

/// Pluggable yes/no confirmation.
///
/// Workflows that perform destructive actions ask through this trait so tests
/// can answer deterministically. Any `Fn(&str) -> Result<bool>` qualifies.
pub trait Confirm {
    /// Show `prompt` and return whether the operator agreed
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> Result<bool>,
{
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self(prompt)
    }
}

/// Returns true when the answer starts with `y` or `Y`.
///
/// Everything else declines, including an empty line and an answer with
/// leading whitespace.
pub fn is_affirmative(input: &str) -> bool {
    input
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

/// Writes the prompt to `output` and reads one answer line from `input`.
///
/// End of input reads as an empty answer and declines.
pub fn ask<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

/// Asks on stdout and reads the answer from stdin, piped or not.
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub fn new() -> Self {
        ConsolePrompt
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for ConsolePrompt {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        ask(prompt, &mut io::stdin().lock(), &mut io::stdout())
    }
}

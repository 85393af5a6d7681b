//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here have no I/O side effects beyond printing.

use console::style;

use crate::history::HistoryWarning;
use crate::runner::ShellCommand;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Echo a command line before it runs.
pub fn display_command(command_line: &str) {
    println!("{} {}", style("$").dim(), style(command_line).cyan());
}

/// Display a history warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_history_warning(warning: &HistoryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Builds the confirmation text shown before a revert.
///
/// Lists every destructive command, one per line, followed by the `[y/N]`
/// hint. Kept free of styling so the exact text can be asserted on.
pub fn format_revert_prompt(commands: &[ShellCommand]) -> String {
    let mut prompt = String::from(">>> Are you sure?? You're about to run these commands:\n");
    for command in commands {
        prompt.push_str(&command.to_string());
        prompt.push('\n');
    }
    prompt.push_str(">>> [y/N] ");
    prompt
}

/// Display the command plan of a dry run.
///
/// # Arguments
/// * `title` - Heading for the plan
/// * `commands` - Commands in execution order
pub fn display_plan(title: &str, commands: &[ShellCommand]) {
    println!("\n{}", style(title).bold());
    for (i, command) in commands.iter().enumerate() {
        println!("  Step {}: {}", i + 1, style(command).cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stdout
        display_status("test status");
    }

    #[test]
    fn test_format_revert_prompt_lists_commands() {
        let commands = vec![
            ShellCommand::git(["reset", "--hard", "HEAD~1"]),
            ShellCommand::git(["tag", "--delete", "v1.2.4"]),
        ];

        let prompt = format_revert_prompt(&commands);
        assert_eq!(
            prompt,
            ">>> Are you sure?? You're about to run these commands:\n\
             git reset --hard HEAD~1\n\
             git tag --delete v1.2.4\n\
             >>> [y/N] "
        );
    }

    #[test]
    fn test_format_revert_prompt_without_commands() {
        let prompt = format_revert_prompt(&[]);
        assert!(prompt.starts_with(">>> Are you sure??"));
        assert!(prompt.ends_with("[y/N] "));
    }
}

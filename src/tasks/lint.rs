//! Formatter and linter wrappers.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::runner::{run_checked, CommandRunner, ShellCommand};
use crate::tasks::TaskContext;
use crate::ui;

/// Collects files under `root` whose extension matches `extension`
/// case-insensitively.
///
/// The `.git` directory is skipped. Paths are returned relative to `root`,
/// sorted, so the command line is stable between runs.
pub fn find_files_with_extension(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !(entry.file_type().is_dir() && entry.file_name() == ".git"));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            files.push(relative.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn path_args(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect()
}

/// Formats Python sources, then optionally stages everything and shows status.
///
/// # Arguments
/// * `paths` - Files or directories to format; the repository root when empty
/// * `git_add` - Run `git add --all` and `git status` afterwards
pub fn format_python<R: CommandRunner + ?Sized>(
    paths: &[String],
    git_add: bool,
    ctx: &TaskContext,
    runner: &R,
) -> Result<()> {
    let format = &ctx.settings.format;
    let targets: Vec<String> = if paths.is_empty() {
        vec![".".to_string()]
    } else {
        paths.to_vec()
    };

    let formatter = ShellCommand::tool(&format.formatter)
        .arg("-l")
        .arg(format.line_length.to_string())
        .args(targets);
    run_checked(runner, &formatter)?;

    if git_add {
        run_checked(runner, &ShellCommand::git(["add", "--all"]))?;
        run_checked(runner, &ShellCommand::git(["status"]))?;
    }

    Ok(())
}

/// Lints every markdown file in the repository.
pub fn lint_markdown<R: CommandRunner + ?Sized>(ctx: &TaskContext, runner: &R) -> Result<()> {
    let files = find_files_with_extension(&ctx.repo_root, "md")?;
    if files.is_empty() {
        ui::display_status("No markdown files found, skipping markdown lint");
        return Ok(());
    }

    log::debug!("linting {} markdown file(s)", files.len());
    let linter = ShellCommand::tool(&ctx.settings.lint.markdown_linter).args(path_args(&files));
    run_checked(runner, &linter)?;

    ui::display_success(&format!("Linted {} markdown file(s)", files.len()));
    Ok(())
}

/// Runs flake8 on the repository, then pylint on every Python file.
pub fn lint_python<R: CommandRunner + ?Sized>(ctx: &TaskContext, runner: &R) -> Result<()> {
    let lint = &ctx.settings.lint;
    run_checked(runner, &ShellCommand::tool(&lint.flake8))?;

    let files = find_files_with_extension(&ctx.repo_root, "py")?;
    if files.is_empty() {
        ui::display_status("No Python files found, skipping pylint");
        return Ok(());
    }

    run_checked(runner, &ShellCommand::tool(&lint.pylint).args(path_args(&files)))?;

    ui::display_success(&format!("Linted {} Python file(s)", files.len()));
    Ok(())
}

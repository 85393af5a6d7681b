use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use repo_tasks::config;
use repo_tasks::runner::SystemRunner;
use repo_tasks::tasks::{self, ReleaseRequest, RevertOutcome, TaskContext};
use repo_tasks::ui::{self, ConsolePrompt};
use repo_tasks::version::VersionPart;
use repo_tasks::TaskError;

#[derive(clap::Parser)]
#[command(
    name = "repo-tasks",
    version,
    about = "Release, revert, format and lint tasks for a repository"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Repository root to run in (defaults to the current directory)"
    )]
    repo: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bump the version and push, optionally committing a changelog
    NewRelease {
        #[arg(help = "Version part to bump: major, minor or patch")]
        version_part: VersionPart,

        #[arg(long, help = "Generate and commit a changelog after the bump")]
        changelog: bool,

        #[arg(long, help = "Check preconditions and show the commands without running them")]
        dry_run: bool,
    },

    /// Undo the last release: reset, delete its tag and force push
    RevertLast {
        #[arg(long, help = "The release included a changelog commit")]
        changelog: bool,
    },

    /// Format Python sources, then stage all changes
    FormatPython {
        #[arg(long, num_args = 1.., help = "Paths to format (defaults to the repository root)")]
        paths: Vec<String>,

        #[arg(long, help = "Do not run git add/status after formatting")]
        no_git_add: bool,
    },

    /// Lint every markdown file
    LintMarkdown,

    /// Run flake8 and pylint
    LintPython,
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("repo_tasks")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn run(args: Args) -> Result<()> {
    let repo_root = match args.repo {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    log::debug!("repository root: {}", repo_root.display());

    let settings = config::load_config(args.config.as_deref(), &repo_root)?;

    let ctx = TaskContext::from_env(&repo_root, settings);
    let runner = SystemRunner::new(&repo_root);

    match args.command {
        Command::NewRelease {
            version_part,
            changelog,
            dry_run,
        } => {
            let request = ReleaseRequest::new(version_part)
                .with_changelog(changelog)
                .with_dry_run(dry_run);
            let summary = tasks::new_release(&request, &ctx, &runner)?;

            if summary.dry_run {
                ui::display_plan("Dry run: new-release would run", &summary.commands);
            }
        }
        Command::RevertLast { changelog } => {
            match tasks::revert_last(changelog, &ctx, &runner, &ConsolePrompt::new())? {
                RevertOutcome::Aborted => println!("Revert cancelled by user."),
                RevertOutcome::Completed { .. } => {}
            }
        }
        Command::FormatPython { paths, no_git_add } => {
            tasks::format_python(&paths, !no_git_add, &ctx, &runner)?;
        }
        Command::LintMarkdown => tasks::lint_markdown(&ctx, &runner)?,
        Command::LintPython => tasks::lint_python(&ctx, &runner)?,
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logger(args.debug) {
        eprintln!("Could not initialize logging: {}", e);
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        let code = e
            .downcast_ref::<TaskError>()
            .map(TaskError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

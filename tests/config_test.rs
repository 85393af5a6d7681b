// tests/config_test.rs
use repo_tasks::config::{load_config, Settings};
use repo_tasks::tasks::TaskContext;
use serial_test::serial;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[test]
fn test_load_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.release.bump_command, "bump2version");
    assert_eq!(settings.release.changelog_command, "github_changelog_generator");
    assert_eq!(settings.format.formatter, "black");
    assert_eq!(settings.lint.flake8, "flake8");
    assert_eq!(settings.lint.pylint, "pylint");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[release]
username_env = "CHANGELOG_USER"
changelog_command = "github_changelog_generator"

[lint]
pylint = "python -m pylint"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let settings = load_config(Some(temp_file.path()), Path::new(".")).unwrap();
    assert_eq!(settings.release.username_env, "CHANGELOG_USER");
    assert_eq!(settings.release.remote, "origin");
    assert_eq!(settings.lint.pylint, "python -m pylint");
}

#[test]
fn test_load_fixture() {
    let settings = load_config(Some(Path::new("tests/fixtures/repo-tasks.toml")), Path::new("."))
        .expect("Failed to load test config");

    assert_eq!(
        settings.release.bumpversion_config,
        PathBuf::from("setup/.bumpversion.cfg")
    );
    assert_eq!(settings.release.remote, "upstream");
    assert_eq!(settings.format.line_length, 100);
    assert_eq!(settings.lint.markdown_linter, "mdl");

    let ctx = TaskContext::new("/srv/app", settings);
    assert_eq!(
        ctx.bumpversion_config_path(),
        PathBuf::from("/srv/app/setup/.bumpversion.cfg")
    );
}

#[test]
fn test_malformed_file_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[release]\nremote = \n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path()), Path::new(".")).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_settings_file_found_in_repo_root() {
    let repo = tempfile::tempdir().unwrap();
    std::fs::write(
        repo.path().join("repo-tasks.toml"),
        "[release]\nremote = \"upstream\"\n",
    )
    .unwrap();

    let settings = load_config(None, repo.path()).unwrap();
    assert_eq!(settings.release.remote, "upstream");
}

#[test]
#[serial]
fn test_context_reads_username_from_environment() {
    std::env::set_var("GITHUB_USERNAME", "octocat");
    let ctx = TaskContext::from_env(".", Settings::default());
    std::env::remove_var("GITHUB_USERNAME");

    assert_eq!(ctx.username(), Some("octocat"));
}

#[test]
#[serial]
fn test_context_without_username() {
    std::env::remove_var("GITHUB_USERNAME");
    let ctx = TaskContext::from_env(".", Settings::default());
    assert_eq!(ctx.username(), None);
}

#[test]
#[serial]
fn test_context_honours_configured_variable() {
    let mut settings = Settings::default();
    settings.release.username_env = "REPO_TASKS_TEST_USER".to_string();
    std::env::set_var("GITHUB_USERNAME", "ignored");
    std::env::set_var("REPO_TASKS_TEST_USER", "release-bot");

    let ctx = TaskContext::from_env(".", settings);
    std::env::remove_var("GITHUB_USERNAME");
    std::env::remove_var("REPO_TASKS_TEST_USER");

    assert_eq!(ctx.username(), Some("release-bot"));
}

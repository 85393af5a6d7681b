use std::fmt;

/// Subject prefix of the commit `new-release --changelog` creates
pub const CHANGELOG_COMMIT_PREFIX: &str = "Generate changelog:";

/// Subject prefix of bump2version's default commit message
pub const BUMP_COMMIT_PREFIX: &str = "Bump version:";

/// Warnings about the commits a revert is about to discard.
/// These are non-fatal: the operator decides at the confirmation prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryWarning {
    /// A commit that will be discarded does not look like a release commit
    UnexpectedCommit {
        depth: usize,
        expected_prefix: String,
        subject: String,
    },
    /// History is shorter than the number of commits to unwind
    MissingCommit { depth: usize, expected_prefix: String },
    /// Recent history could not be read
    HistoryUnavailable { reason: String },
}

impl fmt::Display for HistoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryWarning::UnexpectedCommit {
                depth,
                expected_prefix,
                subject,
            } => {
                write!(
                    f,
                    "HEAD~{} is '{}', expected a commit starting with '{}'",
                    depth, subject, expected_prefix
                )
            }
            HistoryWarning::MissingCommit {
                depth,
                expected_prefix,
            } => {
                write!(
                    f,
                    "HEAD~{} does not exist, expected a commit starting with '{}'",
                    depth, expected_prefix
                )
            }
            HistoryWarning::HistoryUnavailable { reason } => {
                write!(f, "Could not inspect recent commits: {}", reason)
            }
        }
    }
}

/// Subject prefixes expected from HEAD backwards for the last release
pub fn expected_release_commits(changelog: bool) -> Vec<&'static str> {
    if changelog {
        vec![CHANGELOG_COMMIT_PREFIX, BUMP_COMMIT_PREFIX]
    } else {
        vec![BUMP_COMMIT_PREFIX]
    }
}

/// Compares recent commit subjects (newest first) with the release layout.
///
/// Reverting assumes the last commits are exactly the release commits. This
/// only reports deviations; it never changes what the revert does.
pub fn check_release_history(subjects: &[String], changelog: bool) -> Vec<HistoryWarning> {
    expected_release_commits(changelog)
        .into_iter()
        .enumerate()
        .filter_map(|(depth, prefix)| match subjects.get(depth) {
            Some(subject) if subject.trim_start().starts_with(prefix) => None,
            Some(subject) => Some(HistoryWarning::UnexpectedCommit {
                depth,
                expected_prefix: prefix.to_string(),
                subject: subject.trim().to_string(),
            }),
            None => Some(HistoryWarning::MissingCommit {
                depth,
                expected_prefix: prefix.to_string(),
            }),
        })
        .collect()
}

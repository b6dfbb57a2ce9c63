//! Git metadata.
//!
//! This does not link against `libgit`, the `git` binary
//! found in `PATH` is invoked directly.

//---------------------------------------------------------------------------------------------------- Use
use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};

//---------------------------------------------------------------------------------------------------- Const
/// The shortest abbreviated commit hash `git` will output.
pub const MIN_HASH_LENGTH: usize = 4;

/// The length of a full (SHA-1) commit hash.
pub const MAX_HASH_LENGTH: usize = 40;

//---------------------------------------------------------------------------------------------------- GitError
/// An error that occurred while querying `git`.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// `git` could not be started, e.g. it is not installed.
    #[error("failed to run `git {args}`: {source}")]
    Spawn {
        /// The arguments passed to `git`.
        args: String,
        /// The underlying IO error.
        source: io::Error,
    },

    /// `git` exited with a non-zero status.
    #[error("`git {args}` exited with {code:?}: {stderr}")]
    Status {
        /// The arguments passed to `git`.
        args: String,
        /// The exit code, [`None`] if killed by a signal.
        code: Option<i32>,
        /// Trimmed `stderr` of the process.
        stderr: String,
    },

    /// `git` output was not valid UTF-8.
    #[error("`git {args}` output was not UTF-8")]
    Utf8 {
        /// The arguments passed to `git`.
        args: String,
    },

    /// `git` succeeded but printed nothing, e.g. a detached `HEAD` has no branch.
    #[error("`git {args}` output was empty")]
    Empty {
        /// The arguments passed to `git`.
        args: String,
    },
}

//---------------------------------------------------------------------------------------------------- GitSource
/// A source of version-control metadata.
///
/// [`GitCli`] is the real implementation, tests substitute their own.
pub trait GitSource {
    /// The abbreviated hash of `HEAD`, at least `len` characters long.
    ///
    /// # Errors
    /// Returns an error if the hash could not be determined.
    fn short_commit(&self, len: usize) -> Result<String, GitError>;

    /// The name of the currently checked out branch.
    ///
    /// # Errors
    /// Returns an error if the branch could not be determined.
    fn branch(&self) -> Result<String, GitError>;
}

//---------------------------------------------------------------------------------------------------- GitCli
/// Queries the `git` binary, operating on a repository directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    /// Create a [`GitCli`] operating on `repo` (or any directory inside of it).
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    /// Run `git -C <repo> <args>` and return its trimmed `stdout`.
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let joined = args.join(" ");

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()
            .map_err(|source| GitError::Spawn {
                args: joined.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Status {
                args: joined,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| GitError::Utf8 {
            args: joined.clone(),
        })?;

        let stdout = stdout.trim();
        if stdout.is_empty() {
            return Err(GitError::Empty { args: joined });
        }

        Ok(stdout.to_owned())
    }
}

impl GitSource for GitCli {
    fn short_commit(&self, len: usize) -> Result<String, GitError> {
        let len = len.clamp(MIN_HASH_LENGTH, MAX_HASH_LENGTH);
        let short = format!("--short={len}");
        self.run(&["rev-parse", &short, "HEAD"])
    }

    fn branch(&self) -> Result<String, GitError> {
        self.run(&["branch", "--show-current"])
    }
}

/// Files that change whenever `HEAD` moves inside the repository at `repo`.
///
/// Used for `cargo:rerun-if-changed`, these may not exist
/// (e.g. a source tarball), which `cargo` tolerates.
pub fn head_paths(repo: &Path) -> [PathBuf; 2] {
    let git_dir = repo.join(".git");
    [git_dir.join("HEAD"), git_dir.join("refs").join("heads")]
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn not_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path());

        // Either `git` is missing (`Spawn`) or the directory is not a repo (`Status`).
        let err = git.short_commit(8).unwrap_err();
        assert!(
            matches!(err, GitError::Spawn { .. } | GitError::Status { .. }),
            "{err}"
        );
        assert!(git.branch().is_err());
    }

    #[test]
    fn head_paths_are_inside_dot_git() {
        let [head, heads] = head_paths(Path::new("/repo"));
        assert_eq!(head, Path::new("/repo/.git/HEAD"));
        assert_eq!(heads, Path::new("/repo/.git/refs/heads"));
    }

    #[test]
    fn error_display() {
        let err = GitError::Status {
            args: "rev-parse --short=8 HEAD".into(),
            code: Some(128),
            stderr: "fatal: not a git repository".into(),
        };
        assert_eq!(
            err.to_string(),
            "`git rev-parse --short=8 HEAD` exited with Some(128): fatal: not a git repository"
        );
    }
}

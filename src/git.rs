//! Thin wrapper over the `git` executable.
//!
//! Structure:
//! - Types: error states (sum type)
//! - Effect functions: one per git invocation
//! - Trait: the index operations staging needs, so they can be faked

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

/// Name of the executable looked up on PATH.
pub const GIT_PROGRAM: &str = "git";

// ============================================================================
// TYPES
// ============================================================================

/// Error running git.
#[derive(Debug)]
pub enum GitError {
    /// The process could not be started (git missing, bad working dir).
    Spawn { args: String, source: io::Error },

    /// git ran and exited non-zero.
    Failed { args: String, stderr: String },

    /// The working directory is not inside a git work tree.
    NotARepository,
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::Spawn { args, source } => {
                write!(f, "Could not run `git {}`: {}", args, source)
            }
            GitError::Failed { args, stderr } => {
                write!(f, "`git {}` failed: {}", args, stderr.trim())
            }
            GitError::NotARepository => write!(f, "This is not a git repository."),
        }
    }
}

impl std::error::Error for GitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GitError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// A git repository, addressed by the top of its work tree.
///
/// Porcelain output lists paths relative to the top, so every command runs
/// there.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Find the work tree containing `start`.
    ///
    /// # Errors
    /// [`GitError::NotARepository`] outside a work tree.
    pub fn discover(start: impl Into<PathBuf>) -> Result<Self, GitError> {
        let here = Self::new(start);
        if !here.is_inside_work_tree()? {
            return Err(GitError::NotARepository);
        }
        let top = here.run(&["rev-parse", "--show-toplevel"])?;
        debug!(top = %top.trim(), "found work tree");
        Ok(Self::new(top.trim_end_matches(['\n', '\r'])))
    }

    /// Directory commands run in.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn command<S: AsRef<str>>(&self, args: &[S]) -> Command {
        let mut cmd = Command::new(GIT_PROGRAM);
        cmd.args(args.iter().map(AsRef::as_ref))
            .current_dir(&self.workdir);
        cmd
    }

    /// Run git and capture stdout.
    fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<String, GitError> {
        let joined = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        debug!(args = %joined, workdir = %self.workdir.display(), "running git");

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                args: joined.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            debug!(args = %joined, status = ?output.status, "git failed");
            return Err(GitError::Failed {
                args: joined,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// True if the directory is inside a work tree.
    ///
    /// A git failure means "no"; only a spawn failure is an error.
    pub fn is_inside_work_tree(&self) -> Result<bool, GitError> {
        match self.run(&["rev-parse", "--is-inside-work-tree"]) {
            Ok(out) => Ok(out.trim() == "true"),
            Err(GitError::Failed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Raw `git status --porcelain` output.
    pub fn status_porcelain(&self) -> Result<String, GitError> {
        self.run(&["status", "--porcelain"])
    }

    /// `git status`, printed straight to the user's terminal.
    pub fn show_status(&self) -> Result<(), GitError> {
        let status = self
            .command(&["status"])
            .status()
            .map_err(|source| GitError::Spawn {
                args: "status".into(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(GitError::Failed {
                args: "status".into(),
                stderr: String::new(),
            })
        }
    }
}

// ============================================================================
// INDEX OPERATIONS
// ============================================================================

/// Operations that change what is staged.
pub trait StagingArea {
    /// Stage the path's current worktree state.
    fn add(&self, path: &str) -> Result<(), GitError>;

    /// Reset the path's index entry to HEAD.
    fn restore_staged(&self, path: &str) -> Result<(), GitError>;
}

impl StagingArea for Git {
    fn add(&self, path: &str) -> Result<(), GitError> {
        self.run(&["add", "--", path]).map(drop)
    }

    fn restore_staged(&self, path: &str) -> Result<(), GitError> {
        self.run(&["restore", "--staged", "--", path]).map(drop)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::parse_porcelain;
    use std::error::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn failed_display_trims_stderr() {
        let err = GitError::Failed {
            args: "add -- x".into(),
            stderr: "fatal: pathspec 'x' did not match any files\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "`git add -- x` failed: fatal: pathspec 'x' did not match any files"
        );
    }

    #[test]
    fn spawn_error_keeps_source() {
        let err = GitError::Spawn {
            args: "status".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no git"),
        };
        assert!(err.to_string().contains("git status"));
        assert!(err.source().is_some());
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new(GIT_PROGRAM)
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    fn repo_with_subdir() -> TempDir {
        let dir = TempDir::new().unwrap();
        git(dir.path(), &["init", "--quiet"]);
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("a.txt"), "hello\n").unwrap();
        dir
    }

    #[test]
    fn discover_from_subdirectory_finds_top() {
        let repo = repo_with_subdir();
        let git = Git::discover(repo.path().join("sub")).unwrap();

        let top = fs::canonicalize(repo.path()).unwrap();
        assert_eq!(fs::canonicalize(git.workdir()).unwrap(), top);
    }

    #[test]
    fn staging_from_subdirectory_uses_root_relative_paths() {
        let repo = repo_with_subdir();
        let git = Git::discover(repo.path().join("sub")).unwrap();

        let files = parse_porcelain(&git.status_porcelain().unwrap());
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["sub/"]);

        git.add("sub/").unwrap();
        let files = parse_porcelain(&git.status_porcelain().unwrap());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "sub/a.txt");
        assert!(files[0].is_staged());
    }

    #[test]
    fn discover_outside_repository_fails() {
        let dir = TempDir::new().unwrap();
        match Git::discover(dir.path()) {
            Err(GitError::NotARepository) => {}
            other => panic!("Expected NotARepository, got {:?}", other),
        }
    }

    #[test]
    fn not_a_repository_message() {
        assert_eq!(
            GitError::NotARepository.to_string(),
            "This is not a git repository."
        );
    }
}

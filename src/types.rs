//! Domain types for gitadd.

use serde::Serialize;

// ============================================================================
// ENUMS
// ============================================================================

/// Whether a path has changes recorded in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Staging {
    Staged,
    Unstaged,
}

/// What happened to a path, from one porcelain status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Modified,
    Deleted,
    Added,
    Renamed,
    Copied,
    Untracked,
    Ignored,
    /// Unmerged path.
    Conflict,
}

impl ChangeKind {
    /// Decode a porcelain status letter. Space and unknown letters yield None.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(ChangeKind::Modified),
            'D' => Some(ChangeKind::Deleted),
            'A' => Some(ChangeKind::Added),
            'R' => Some(ChangeKind::Renamed),
            'C' => Some(ChangeKind::Copied),
            '?' => Some(ChangeKind::Untracked),
            '!' => Some(ChangeKind::Ignored),
            'U' => Some(ChangeKind::Conflict),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Added => "added",
            ChangeKind::Renamed => "renamed",
            ChangeKind::Copied => "copied",
            ChangeKind::Untracked => "untracked",
            ChangeKind::Ignored => "ignored",
            ChangeKind::Conflict => "conflict",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// STRUCTS
// ============================================================================

/// One line of `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    /// Current path, relative to the repository root.
    pub path: String,
    /// Source path of a rename or copy.
    pub original_path: Option<String>,
    /// The two-letter status code, e.g. "M " or "??".
    pub code: String,
    pub staging: Staging,
    /// Decoded from the index column when staged, else the worktree column.
    pub change: Option<ChangeKind>,
}

impl FileStatus {
    pub fn is_staged(&self) -> bool {
        self.staging == Staging::Staged
    }

    /// Short description: the change kind, or the staging state when unknown.
    pub fn describe(&self) -> &'static str {
        match (self.change, self.staging) {
            (Some(change), _) => change.as_str(),
            (None, Staging::Staged) => "staged",
            (None, Staging::Unstaged) => "unstaged",
        }
    }
}

/// What applying a selection will do to the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StagePlan {
    /// Paths to `git add`.
    pub stage: Vec<String>,
    /// Paths to `git restore --staged`.
    pub unstage: Vec<String>,
    /// Unselected paths with nothing staged; left alone.
    pub unchanged: Vec<String>,
}

/// Result of executing a [`StagePlan`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageOutcome {
    pub staged: Vec<String>,
    pub unstaged: Vec<String>,
    /// Paths git refused, with its error message.
    pub failed: Vec<(String, String)>,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for plans and outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// How the staging prompt behaves.
#[derive(Debug, Clone)]
pub struct StageOptions {
    /// Rows visible at once.
    pub page_size: usize,
    /// Wrap the cursor around the list ends.
    pub loop_navigation: bool,
    /// Refuse an empty selection.
    pub required: bool,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            loop_navigation: false,
            required: false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

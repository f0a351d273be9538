//! Turning a checkbox selection into index changes.
//!
//! Structure:
//! - Prompt wiring: choices, relabel hook, prompt config
//! - Pure functions: selection → StagePlan
//! - Effect functions: applying the plan through a StagingArea

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::checkbox::{CheckboxConfig, Choice, Instructions, Item, ToggleHook, accept_all};
use crate::git::StagingArea;
use crate::status::status_label;
use crate::types::{FileStatus, StageOptions, StageOutcome, StagePlan};

/// Question shown above the file list.
pub const PROMPT_MESSAGE: &str = "Select for staging:";

/// Header prefix.
pub const PROMPT_PREFIX: &str = "🏗️";

/// Help text shown until the first key press.
pub const PROMPT_INSTRUCTIONS: &str = " > press <a> to toggle all";

/// Printed instead of prompting when the work tree is clean.
pub const NOTHING_TO_DO: &str = "There are no files to stage or unstage.";

// ============================================================================
// PROMPT WIRING
// ============================================================================

/// One choice per file, pre-checked when something is already staged.
pub fn choices(files: &[FileStatus]) -> Vec<Choice<String>> {
    files
        .iter()
        .map(|file| {
            Item::new(file.path.clone())
                .label(status_label(file, file.is_staged()))
                .checked(file.is_staged())
        })
        .collect()
}

/// Toggle hook that recolors each label to match its checkbox.
///
/// Items arrive in the same order as `files`.
pub fn relabel_hook(files: Vec<FileStatus>) -> ToggleHook<String> {
    Box::new(move |items: Vec<Item<String>>| {
        items
            .into_iter()
            .zip(files.iter())
            .map(|(item, file)| {
                let label = status_label(file, item.checked);
                item.label(label)
            })
            .collect()
    })
}

/// The full prompt configuration for a list of files.
pub fn checkbox_config(files: &[FileStatus], options: &StageOptions) -> CheckboxConfig<String> {
    CheckboxConfig {
        message: PROMPT_MESSAGE.to_string(),
        choices: choices(files),
        page_size: options.page_size,
        loop_navigation: options.loop_navigation,
        required: options.required,
        validate: accept_all(),
        instructions: Instructions::Custom(PROMPT_INSTRUCTIONS.to_string()),
        prefix: Some(PROMPT_PREFIX.to_string()),
        on_toggle: Some(relabel_hook(files.to_vec())),
    }
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Decide what to do with every file.
///
/// Selected files are staged. Unselected files with staged changes are
/// unstaged, along with the source side of a staged rename. Everything else
/// is left as it is.
pub fn plan(files: &[FileStatus], selected: &[String]) -> StagePlan {
    let selected: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let mut plan = StagePlan::default();

    for file in files {
        if selected.contains(file.path.as_str()) {
            plan.stage.push(file.path.clone());
        } else if file.is_staged() {
            plan.unstage.push(file.path.clone());
            if let Some(original) = &file.original_path {
                plan.unstage.push(original.clone());
            }
        } else {
            plan.unchanged.push(file.path.clone());
        }
    }

    plan
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Apply a plan, one path at a time.
///
/// A failing path is recorded and the rest still run. `on_step` is called
/// after every path, for progress display.
pub fn execute_with_progress<S, F>(plan: &StagePlan, area: &S, mut on_step: F) -> StageOutcome
where
    S: StagingArea + ?Sized,
    F: FnMut(&str),
{
    let mut outcome = StageOutcome::default();

    for path in &plan.stage {
        match area.add(path) {
            Ok(()) => {
                debug!(path = %path, "staged");
                outcome.staged.push(path.clone());
            }
            Err(e) => {
                warn!(path = %path, error = %e, "stage failed");
                outcome.failed.push((path.clone(), e.to_string()));
            }
        }
        on_step(path);
    }

    for path in &plan.unstage {
        match area.restore_staged(path) {
            Ok(()) => {
                debug!(path = %path, "unstaged");
                outcome.unstaged.push(path.clone());
            }
            Err(e) => {
                warn!(path = %path, error = %e, "unstage failed");
                outcome.failed.push((path.clone(), e.to_string()));
            }
        }
        on_step(path);
    }

    outcome
}

/// Apply a plan without progress reporting.
pub fn execute<S: StagingArea + ?Sized>(plan: &StagePlan, area: &S) -> StageOutcome {
    execute_with_progress(plan, area, |_| {})
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitError;
    use crate::status::{parse_line, parse_porcelain};
    use ratatui::style::Color;
    use std::cell::RefCell;

    /// Records calls; fails any path listed in `broken`.
    #[derive(Default)]
    struct FakeIndex {
        calls: RefCell<Vec<String>>,
        broken: Vec<&'static str>,
    }

    impl FakeIndex {
        fn record(&self, op: &str, path: &str) -> Result<(), GitError> {
            self.calls.borrow_mut().push(format!("{} {}", op, path));
            if self.broken.iter().any(|broken| *broken == path) {
                return Err(GitError::Failed {
                    args: format!("{} {}", op, path),
                    stderr: "fatal: nope".into(),
                });
            }
            Ok(())
        }
    }

    impl StagingArea for FakeIndex {
        fn add(&self, path: &str) -> Result<(), GitError> {
            self.record("add", path)
        }

        fn restore_staged(&self, path: &str) -> Result<(), GitError> {
            self.record("restore", path)
        }
    }

    fn sample_files() -> Vec<FileStatus> {
        parse_porcelain("M  staged.rs\n M edited.rs\n?? new.txt\nR  old.rs -> moved.rs\n")
    }

    #[test]
    fn choices_follow_staged_state() {
        let choices = choices(&sample_files());
        let checked: Vec<(&str, bool)> = choices
            .iter()
            .map(|c| (c.value.as_str(), c.checked))
            .collect();
        assert_eq!(
            checked,
            vec![
                ("edited.rs", false),
                ("moved.rs", true),
                ("new.txt", false),
                ("staged.rs", true),
            ]
        );
        assert!(choices.iter().all(|c| c.label.is_some()));
    }

    #[test]
    fn relabel_hook_recolors_code() {
        let files = vec![parse_line(" M edited.rs").unwrap()];
        let hook = relabel_hook(files.clone());

        let items = vec![Item::new("edited.rs".to_string()).checked(true)];
        let relabeled = hook(items);
        let label = relabeled[0].label.as_ref().unwrap();
        assert_eq!(label.spans[0].style.fg, Some(Color::Green));

        let items = vec![Item::new("edited.rs".to_string())];
        let relabeled = hook(items);
        let label = relabeled[0].label.as_ref().unwrap();
        assert_eq!(label.spans[0].style.fg, Some(Color::Blue));
    }

    #[test]
    fn config_carries_prompt_settings() {
        let options = StageOptions {
            page_size: 5,
            loop_navigation: true,
            required: true,
        };
        let config = checkbox_config(&sample_files(), &options);
        assert_eq!(config.message, PROMPT_MESSAGE);
        assert_eq!(config.page_size, 5);
        assert!(config.loop_navigation);
        assert!(config.required);
        assert_eq!(config.prefix.as_deref(), Some(PROMPT_PREFIX));
        assert!(config.on_toggle.is_some());
        assert_eq!(config.choices.len(), 4);
    }

    #[test]
    fn plan_splits_by_selection_and_staging() {
        let files = sample_files();
        let selected = vec!["edited.rs".to_string(), "staged.rs".to_string()];
        let plan = plan(&files, &selected);

        assert_eq!(plan.stage, vec!["edited.rs", "staged.rs"]);
        assert_eq!(plan.unstage, vec!["moved.rs", "old.rs"]);
        assert_eq!(plan.unchanged, vec!["new.txt"]);
    }

    #[test]
    fn plan_with_empty_selection_unstages_everything_staged() {
        let plan = plan(&sample_files(), &[]);
        assert!(plan.stage.is_empty());
        assert_eq!(plan.unstage, vec!["moved.rs", "old.rs", "staged.rs"]);
        assert_eq!(plan.unchanged, vec!["edited.rs", "new.txt"]);
    }

    #[test]
    fn execute_runs_adds_then_restores() {
        let plan = StagePlan {
            stage: vec!["a".into(), "b".into()],
            unstage: vec!["c".into()],
            unchanged: vec!["d".into()],
        };
        let index = FakeIndex::default();
        let mut steps = Vec::new();
        let outcome = execute_with_progress(&plan, &index, |path| steps.push(path.to_string()));

        assert_eq!(*index.calls.borrow(), vec!["add a", "add b", "restore c"]);
        assert_eq!(steps, vec!["a", "b", "c"]);
        assert_eq!(outcome.staged, vec!["a", "b"]);
        assert_eq!(outcome.unstaged, vec!["c"]);
        assert!(outcome.failed.is_empty());
    }

    #[test]
    fn execute_continues_past_failures() {
        let plan = StagePlan {
            stage: vec!["a".into(), "b".into()],
            unstage: vec!["c".into()],
            unchanged: vec![],
        };
        let index = FakeIndex {
            broken: vec!["a"],
            ..FakeIndex::default()
        };
        let outcome = execute(&plan, &index);

        assert_eq!(outcome.staged, vec!["b"]);
        assert_eq!(outcome.unstaged, vec!["c"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "a");
        assert!(outcome.failed[0].1.contains("fatal: nope"));
    }
}

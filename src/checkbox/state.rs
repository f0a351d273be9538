//! Checkbox state algebra: pure types, zero effects.
//!
//! A prompt is split three ways:
//! - `PromptState`: the snapshot that changes on every keypress
//! - `Options`: read-only settings the transitions consult
//! - the validator, which only the effects layer touches
//!
//! `update` maps (PromptState, Action) to a Transition. The view projects a
//! PromptState into lines. Neither holds hidden state of its own.

use super::error::PromptError;
use super::items::{Bounds, Choice, Item, selection};
use super::paginate::{Window, paginate};
use super::validate::{Validator, accept_all};

/// Default number of visible rows.
pub const DEFAULT_PAGE_SIZE: usize = 7;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Rewrites the list after every Space toggle.
///
/// Only labels and checked flags of the result are adopted. Values,
/// disabled markers, order and length always come from the list it was given.
pub type ToggleHook<V> = Box<dyn Fn(Vec<Item<V>>) -> Vec<Item<V>> + Send + Sync>;

/// The help line shown under the prompt message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Instructions {
    /// Built-in keybinding legend.
    #[default]
    Default,
    /// No help line.
    Hidden,
    /// Caller-supplied text.
    Custom(String),
}

impl From<bool> for Instructions {
    fn from(show: bool) -> Self {
        if show { Instructions::Default } else { Instructions::Hidden }
    }
}

impl From<String> for Instructions {
    fn from(text: String) -> Self {
        Instructions::Custom(text)
    }
}

/// Everything a caller can configure on a checkbox prompt.
pub struct CheckboxConfig<V> {
    pub message: String,
    pub choices: Vec<Choice<V>>,
    pub page_size: usize,
    /// Wrap the cursor around the list ends.
    pub loop_navigation: bool,
    /// Reject an empty selection before the validator runs.
    pub required: bool,
    pub validate: Validator<V>,
    pub instructions: Instructions,
    /// Replaces the default `?` / `✔` status glyph.
    pub prefix: Option<String>,
    pub on_toggle: Option<ToggleHook<V>>,
}

impl<V: 'static> Default for CheckboxConfig<V> {
    fn default() -> Self {
        Self {
            message: String::new(),
            choices: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            loop_navigation: true,
            required: false,
            validate: accept_all(),
            instructions: Instructions::Default,
            prefix: None,
            on_toggle: None,
        }
    }
}

/// Read-only settings consulted by `update` and `view`.
pub struct Options<V> {
    pub message: String,
    pub prefix: Option<String>,
    pub instructions: Instructions,
    pub page_size: usize,
    pub loop_navigation: bool,
    pub required: bool,
    pub on_toggle: Option<ToggleHook<V>>,
}

// ============================================================================
// STATE
// ============================================================================

/// Lifecycle of a prompt. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Done,
}

/// One immutable snapshot of the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptState<V> {
    pub items: Vec<Item<V>>,
    /// Cursor. Always on a selectable item.
    pub active: usize,
    pub bounds: Bounds,
    pub window: Window,
    pub status: Status,
    /// Last rejection message, shown under the list.
    pub error: Option<String>,
    /// Cleared by the first keypress.
    pub show_help: bool,
}

impl<V: Clone> PromptState<V> {
    /// Build the initial snapshot from the caller's choices.
    ///
    /// Choices are copied. Disabled choices are forced unchecked.
    ///
    /// # Errors
    /// `NoSelectableChoices` when every choice is disabled,
    /// `InvalidPageSize` when `page_size` is zero.
    pub fn new(
        choices: &[Choice<V>],
        page_size: usize,
        loop_navigation: bool,
    ) -> Result<Self, PromptError> {
        if page_size == 0 {
            return Err(PromptError::InvalidPageSize);
        }

        let items: Vec<Item<V>> = choices
            .iter()
            .map(|choice| Item {
                checked: choice.is_checked(),
                ..choice.clone()
            })
            .collect();

        let bounds = Bounds::of(&items).ok_or(PromptError::NoSelectableChoices)?;
        let window = paginate(
            items.len(),
            bounds.first,
            Window::default(),
            page_size,
            loop_navigation,
        );

        Ok(PromptState {
            items,
            active: bounds.first,
            bounds,
            window,
            status: Status::Pending,
            error: None,
            show_help: true,
        })
    }

    /// Values of the checked items, in list order.
    pub fn selection(&self) -> Vec<V> {
        selection(&self.items)
    }
}

impl<V: Clone + 'static> CheckboxConfig<V> {
    /// Validate the configuration and split it into snapshot, settings and validator.
    ///
    /// # Errors
    /// See [`PromptState::new`].
    pub fn into_parts(self) -> Result<(PromptState<V>, Options<V>, Validator<V>), PromptError> {
        let state = PromptState::new(&self.choices, self.page_size, self.loop_navigation)?;
        let options = Options {
            message: self.message,
            prefix: self.prefix,
            instructions: self.instructions,
            page_size: self.page_size,
            loop_navigation: self.loop_navigation,
            required: self.required,
            on_toggle: self.on_toggle,
        };
        Ok((state, options, self.validate))
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Space: toggle the active item.
    Toggle,
    /// Check all, or uncheck all when nothing is left unchecked.
    SelectAll,
    Invert,
    /// Digit key, 1-based position.
    Jump(u8),
    /// Enter.
    Submit,
    /// Ctrl+C.
    Abort,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition<V> {
    /// Render this snapshot.
    State(PromptState<V>),
    /// Render this snapshot, then run the effect.
    Effect(PromptState<V>, Effect<V>),
    /// Tear down without a selection.
    Abort,
}

/// Side effect requested by a pure transition.
#[derive(Debug, PartialEq)]
pub enum Effect<V> {
    /// Await the validator on this selection, then call `resolve_validation`.
    Validate { selection: Vec<V> },
}

// ============================================================================
// TESTS
// ============================================================================

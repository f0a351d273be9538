//! Pure state transitions: (PromptState, Action) → Transition.
//!
//! This is the core logic of the prompt. Fully testable without a terminal.
//! Once the prompt is `Done` every action is a no-op.

use tracing::warn;

use super::items::{
    Direction, Item, invert, jump_and_toggle, move_active, select_all_toggle, toggle,
};
use super::paginate::paginate;
use super::state::{Action, Effect, Options, PromptState, Status, ToggleHook, Transition};
use super::validate::Validation;

/// Shown when `required` is set and nothing is checked.
pub const REQUIRED_MESSAGE: &str = "At least one choice must be selected";

/// Shown when the validator rejects without a message.
pub const INVALID_MESSAGE: &str = "You must select a valid value";

/// Pure state transition function.
///
/// Submit never resolves here: it either sets an error or asks the effects
/// layer to run the validator, whose verdict comes back through
/// [`resolve_validation`].
pub fn update<V: Clone>(state: PromptState<V>, action: &Action, options: &Options<V>) -> Transition<V> {
    if state.status == Status::Done {
        return Transition::State(state);
    }

    let state = PromptState {
        show_help: false,
        ..state
    };

    match action {
        Action::Submit => submit(state, options),
        Action::MoveUp => Transition::State(navigate(state, Direction::Up, options)),
        Action::MoveDown => Transition::State(navigate(state, Direction::Down, options)),
        Action::Toggle => {
            let toggled = toggle(&state.items, state.active);
            let items = apply_toggle_hook(toggled, options.on_toggle.as_ref());
            Transition::State(PromptState {
                items,
                error: None,
                ..state
            })
        }
        Action::SelectAll => Transition::State(PromptState {
            items: select_all_toggle(&state.items),
            error: None,
            ..state
        }),
        Action::Invert => Transition::State(PromptState {
            items: invert(&state.items),
            error: None,
            ..state
        }),
        Action::Jump(digit) => Transition::State(jump(state, *digit, options)),
        Action::Abort => Transition::Abort,
    }
}

/// Adopt the validator's verdict for a pending submit.
pub fn resolve_validation<V>(state: PromptState<V>, verdict: Validation) -> PromptState<V> {
    match verdict {
        Validation::Valid => PromptState {
            status: Status::Done,
            error: None,
            ..state
        },
        Validation::Invalid => PromptState {
            error: Some(INVALID_MESSAGE.to_string()),
            ..state
        },
        Validation::Rejected(message) if message.is_empty() => PromptState {
            error: Some(INVALID_MESSAGE.to_string()),
            ..state
        },
        Validation::Rejected(message) => PromptState {
            error: Some(message),
            ..state
        },
    }
}

// ============================================================================
// PER-ACTION HANDLERS
// ============================================================================

fn submit<V: Clone>(state: PromptState<V>, options: &Options<V>) -> Transition<V> {
    let selection = state.selection();
    if options.required && selection.is_empty() {
        return Transition::State(PromptState {
            error: Some(REQUIRED_MESSAGE.to_string()),
            ..state
        });
    }
    Transition::Effect(state, Effect::Validate { selection })
}

fn navigate<V>(state: PromptState<V>, direction: Direction, options: &Options<V>) -> PromptState<V> {
    let active = move_active(
        &state.items,
        state.active,
        state.bounds,
        direction,
        options.loop_navigation,
    );
    reframe(PromptState { active, ..state }, options)
}

/// Digit keys are 1-based. `0` and anything past the list are ignored.
fn jump<V: Clone>(state: PromptState<V>, digit: u8, options: &Options<V>) -> PromptState<V> {
    let Some(position) = usize::from(digit).checked_sub(1) else {
        return state;
    };
    match jump_and_toggle(&state.items, position) {
        Some((active, items)) => reframe(
            PromptState {
                items,
                active,
                error: None,
                ..state
            },
            options,
        ),
        None => state,
    }
}

/// Recompute the visible window around the active item.
fn reframe<V>(state: PromptState<V>, options: &Options<V>) -> PromptState<V> {
    let window = paginate(
        state.items.len(),
        state.active,
        state.window,
        options.page_size,
        options.loop_navigation,
    );
    PromptState { window, ..state }
}

/// Run the toggle hook and keep only what it may change.
///
/// A result of a different length is discarded.
fn apply_toggle_hook<V>(items: Vec<Item<V>>, hook: Option<&ToggleHook<V>>) -> Vec<Item<V>>
where
    V: Clone,
{
    let Some(hook) = hook else {
        return items;
    };

    let rewritten = hook(items.clone());
    if rewritten.len() != items.len() {
        warn!(
            expected = items.len(),
            got = rewritten.len(),
            "toggle hook changed the list length, ignoring its result"
        );
        return items;
    }

    items
        .into_iter()
        .zip(rewritten)
        .map(|(original, new)| {
            let selectable = original.is_selectable();
            Item {
                label: new.label,
                checked: selectable && new.checked,
                ..original
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

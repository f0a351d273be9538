//! Item model: checkable entries and the pure transitions over them.
//!
//! Every function here takes a slice and returns a fresh list. Nothing is
//! mutated in place, so each keypress produces a new snapshot that the
//! rendering layer can project without coordination.
//!
//! Structure:
//! - Types: Item, Disabled, Bounds, Direction
//! - Pure functions: toggle, set_checked, invert, select_all_toggle,
//!   jump_and_toggle, move_active

use std::fmt::Display;

use ratatui::text::Line;

// ============================================================================
// TYPES
// ============================================================================

/// Whether an item can be checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Disabled {
    /// Selectable.
    #[default]
    No,
    /// Not selectable, shown with the default "(disabled)" marker.
    Yes,
    /// Not selectable, shown with a custom reason. An empty reason shows nothing.
    Reason(String),
}

impl Disabled {
    /// Text shown next to a disabled item, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Disabled::No => None,
            Disabled::Yes => Some("(disabled)"),
            Disabled::Reason(reason) if reason.is_empty() => None,
            Disabled::Reason(reason) => Some(reason),
        }
    }
}

/// One entry of the checkbox list.
///
/// `label` is decorative: when absent the value's `Display` is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<V> {
    pub value: V,
    pub label: Option<Line<'static>>,
    pub disabled: Disabled,
    pub checked: bool,
}

/// Caller-facing name for an item before the prompt copies it.
pub type Choice<V> = Item<V>;

/// Indices of the first and last selectable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub first: usize,
    pub last: usize,
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

// ============================================================================
// ITEM
// ============================================================================

impl<V> Item<V> {
    /// A selectable, unchecked item with no custom label.
    pub fn new(value: V) -> Self {
        Item {
            value,
            label: None,
            disabled: Disabled::No,
            checked: false,
        }
    }

    pub fn label(mut self, label: impl Into<Line<'static>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: Disabled) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_selectable(&self) -> bool {
        self.disabled == Disabled::No
    }

    /// Checked and selectable. Disabled items never count as checked.
    pub fn is_checked(&self) -> bool {
        self.is_selectable() && self.checked
    }
}

impl<V: Display> Item<V> {
    /// Styled label, falling back to the value.
    pub fn display_line(&self) -> Line<'static> {
        match &self.label {
            Some(line) => line.clone(),
            None => Line::from(self.value.to_string()),
        }
    }

    /// Plain-text label with styling stripped.
    pub fn display_text(&self) -> String {
        match &self.label {
            Some(line) => line.spans.iter().map(|span| span.content.as_ref()).collect(),
            None => self.value.to_string(),
        }
    }
}

impl<V: Clone> Item<V> {
    fn toggled(&self) -> Self {
        self.with_checked(!self.checked)
    }

    /// Copy with `checked` set, leaving disabled items untouched.
    fn with_checked(&self, checked: bool) -> Self {
        if self.is_selectable() {
            Item {
                checked,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }
}

// ============================================================================
// PURE FUNCTIONS (Transitions)
// ============================================================================

/// Flip the item at `index` if it is selectable.
pub fn toggle<V: Clone>(items: &[Item<V>], index: usize) -> Vec<Item<V>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| if i == index { item.toggled() } else { item.clone() })
        .collect()
}

/// Set every selectable item to `value`.
pub fn set_checked<V: Clone>(items: &[Item<V>], value: bool) -> Vec<Item<V>> {
    items.iter().map(|item| item.with_checked(value)).collect()
}

/// Flip every selectable item.
pub fn invert<V: Clone>(items: &[Item<V>]) -> Vec<Item<V>> {
    items.iter().map(Item::toggled).collect()
}

/// Check everything if anything selectable is unchecked, otherwise uncheck everything.
///
/// The direction is decided from the list as it is now, on every call.
pub fn select_all_toggle<V: Clone>(items: &[Item<V>]) -> Vec<Item<V>> {
    let any_unchecked = items
        .iter()
        .any(|item| item.is_selectable() && !item.checked);
    set_checked(items, any_unchecked)
}

/// Move to `position` and toggle it.
///
/// Returns the new active index and list, or None when `position` is out of
/// range or disabled.
pub fn jump_and_toggle<V: Clone>(items: &[Item<V>], position: usize) -> Option<(usize, Vec<Item<V>>)> {
    let item = items.get(position)?;
    if !item.is_selectable() {
        return None;
    }
    Some((position, toggle(items, position)))
}

/// Values of the checked items, in list order.
pub fn selection<V: Clone>(items: &[Item<V>]) -> Vec<V> {
    items
        .iter()
        .filter(|item| item.is_checked())
        .map(|item| item.value.clone())
        .collect()
}

impl Bounds {
    /// Compute bounds, or None when nothing is selectable.
    pub fn of<V>(items: &[Item<V>]) -> Option<Bounds> {
        let first = items.iter().position(Item::is_selectable)?;
        let last = items.iter().rposition(Item::is_selectable)?;
        Some(Bounds { first, last })
    }
}

/// Step the cursor to the next selectable item in `direction`.
///
/// Without looping, moving past `bounds` is a no-op. With looping the scan
/// wraps around the list ends. Runs of disabled items are skipped.
pub fn move_active<V>(
    items: &[Item<V>],
    active: usize,
    bounds: Bounds,
    direction: Direction,
    loop_navigation: bool,
) -> usize {
    let blocked = match direction {
        Direction::Up => active == bounds.first,
        Direction::Down => active == bounds.last,
    };
    if items.is_empty() || (blocked && !loop_navigation) {
        return active;
    }

    let len = items.len();
    let mut next = active;
    loop {
        next = match direction {
            Direction::Up => (next + len - 1) % len,
            Direction::Down => (next + 1) % len,
        };
        if items[next].is_selectable() || next == active {
            return next;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

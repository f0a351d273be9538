//! Prompt color semantics, glyphs and style constants.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Color semantics:
//! - Green: checked boxes, status prefix
//! - Cyan: active row, keybinding hints, final answer
//! - Red: validation errors
//! - Dim: disabled rows, pagination hint

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// GLYPHS
// ============================================================================

/// Leading marker of the active row.
pub const POINTER: &str = "❯";

/// Checked box.
pub const CHECKBOX_ON: &str = "◉";

/// Unchecked box.
pub const CHECKBOX_OFF: &str = "◯";

/// Status prefix while the prompt is pending.
pub const PREFIX_PENDING: &str = "?";

/// Status prefix once the prompt is answered.
pub const PREFIX_DONE: &str = "✔";

// ============================================================================
// STYLES
// ============================================================================

/// Status prefix.
pub const STYLE_PREFIX: Style = Style::new().fg(Color::Green);

/// Prompt message.
pub const STYLE_MESSAGE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Keybinding names in the help line.
pub const STYLE_KEY: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Active row.
pub const STYLE_ACTIVE: Style = Style::new().fg(Color::Cyan);

/// Checkbox: checked.
pub const STYLE_CHECKED: Style = Style::new().fg(Color::Green);

/// Checkbox: unchecked.
pub const STYLE_UNCHECKED: Style = Style::new().fg(Color::DarkGray);

/// Disabled rows and secondary hints.
pub const STYLE_DIM: Style = Style::new().add_modifier(Modifier::DIM);

/// Validation error footer.
pub const STYLE_ERROR: Style = Style::new().fg(Color::Red);

/// Selection summary after submit.
pub const STYLE_ANSWER: Style = Style::new().fg(Color::Cyan);

// ============================================================================
// TESTS
// ============================================================================

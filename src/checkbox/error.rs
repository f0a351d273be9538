//! Errors that end a checkbox prompt.

use std::io;

/// Why a prompt did not resolve with a selection.
#[derive(Debug)]
pub enum PromptError {
    /// Every choice is disabled. Raised before anything is drawn.
    NoSelectableChoices,
    /// A page must show at least one row.
    InvalidPageSize,
    /// The user pressed Ctrl+C.
    Aborted,
    /// The key reader stopped before the prompt resolved.
    InputClosed,
    /// The validator itself failed.
    Validator(anyhow::Error),
    /// Terminal I/O failed.
    Io(io::Error),
}

impl std::fmt::Display for PromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptError::NoSelectableChoices => {
                write!(f, "No selectable choices. All choices are disabled.")
            }
            PromptError::InvalidPageSize => write!(f, "Page size must be at least 1"),
            PromptError::Aborted => write!(f, "Prompt aborted"),
            PromptError::InputClosed => write!(f, "Keyboard input closed"),
            PromptError::Validator(e) => write!(f, "Validation failed: {:#}", e),
            PromptError::Io(e) => write!(f, "Terminal error: {}", e),
        }
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PromptError::Validator(e) => Some(&**e),
            PromptError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::Io(e)
    }
}

//! Interactive multi-select list prompt.
//!
//! Organized along FP/Unix boundaries:
//! - `items`: the item model and its pure transitions
//! - `paginate`: visible window computation
//! - `state`: pure data types (PromptState, Action, Transition)
//! - `update`: pure transitions
//! - `view`: pure rendering
//! - `validate`: submit gating
//! - `run`: effects (terminal, key reader, event loop)

pub mod error;
pub mod items;
pub mod paginate;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod validate;
pub mod view;

pub use error::PromptError;
pub use items::{Choice, Disabled, Item};
pub use run::prompt;
pub use state::{CheckboxConfig, Instructions, ToggleHook};
pub use validate::{Validation, Validator, accept_all, validator};

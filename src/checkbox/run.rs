//! Prompt effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Architecture: a key reader thread forwards crossterm key events into an
//! unbounded channel. The event loop takes one event at a time, and awaiting
//! the validator is its only suspension point. Keys pressed while the
//! validator runs stay queued and are applied to the post-validation
//! snapshot; once the prompt is done they are dropped.

use std::fmt::Display;
use std::io;
use std::sync::Once;
use std::thread;
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Position;
use ratatui::{Terminal, TerminalOptions, Viewport};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::error::PromptError;
use super::state::{Action, CheckboxConfig, Effect, Options, PromptState, Status, Transition};
use super::update::{resolve_validation, update};
use super::validate::Validator;
use super::view::{render, viewport_height};

/// How often the key reader checks whether the prompt is gone.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

static PANIC_HOOK: Once = Once::new();

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Ctrl+C always aborts
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Abort);
    }

    match key.code {
        KeyCode::Enter => Some(Action::Submit),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),

        // Selection
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('a') => Some(Action::SelectAll),
        KeyCode::Char('i') => Some(Action::Invert),
        KeyCode::Char(c @ '0'..='9') => Some(Action::Jump(c as u8 - b'0')),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

type PromptTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Set up an inline viewport of `height` rows below the cursor.
///
/// Raw mode is switched back off if the viewport cannot be created.
fn setup_terminal(height: u16) -> io::Result<PromptTerminal> {
    enable_raw_mode()?;
    let backend = CrosstermBackend::new(io::stdout());
    let options = TerminalOptions {
        viewport: Viewport::Inline(height),
    };
    match Terminal::with_options(backend, options) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = disable_raw_mode();
            Err(e)
        }
    }
}

/// Leave raw mode and put the cursor under the last line we drew.
fn restore_terminal(terminal: &mut PromptTerminal, answered: bool) -> io::Result<()> {
    let area = terminal.get_frame().area();
    if answered {
        terminal.set_cursor_position(Position::new(0, area.y + 1))?;
    } else {
        terminal.clear()?;
        terminal.set_cursor_position(Position::new(0, area.y))?;
    }
    terminal.show_cursor()?;
    disable_raw_mode()
}

/// Keep the prompt's result even when the terminal could not be restored.
fn settle<T>(result: Result<T, PromptError>, restored: io::Result<()>) -> Result<T, PromptError> {
    if let Err(e) = restored {
        warn!(error = %e, "could not restore terminal");
    }
    result
}

/// Install a panic hook that restores the terminal before printing the panic.
///
/// Installed once per process, however many prompts run.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // Best-effort terminal restoration
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(Show);
            original_hook(panic_info);
        }));
    });
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key events to the channel.
///
/// The thread exits once the receiver is dropped, so it stops consuming
/// keystrokes as soon as the prompt resolves.
fn spawn_key_reader(tx: mpsc::UnboundedSender<KeyEvent>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(_) => break,
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(key).is_err() {
                        break; // receiver dropped, prompt is done
                    }
                }
                Ok(_) => {} // ignore mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run a checkbox prompt on the real terminal.
///
/// Resolves with the checked values in list order.
///
/// # Errors
/// Configuration errors are returned before the terminal is touched.
/// Abort, validator failures and terminal I/O errors are returned after
/// the terminal has been restored.
pub async fn prompt<V>(config: CheckboxConfig<V>) -> Result<Vec<V>, PromptError>
where
    V: Clone + Display + Send + 'static,
{
    let (state, options, validator) = config.into_parts()?;

    install_panic_hook();
    let mut terminal = setup_terminal(viewport_height(&state))?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_key_reader(tx);

    let result = drive(state, &options, &validator, &mut rx, |snapshot| {
        terminal
            .draw(|frame| render(snapshot, &options, frame))
            .map(|_| ())
    })
    .await;
    drop(rx);

    let restored = restore_terminal(&mut terminal, result.is_ok());
    settle(result, restored)
}

/// The event loop, independent of any terminal.
///
/// Draws every snapshot, maps each key to an action, applies it, and awaits
/// the validator when a submit asks for it. Returns once the prompt is done.
///
/// # Errors
/// `Aborted` on Ctrl+C, `InputClosed` when `keys` runs dry, `Validator`
/// when the validator fails, `Io` when drawing fails.
pub async fn drive<V, D>(
    mut state: PromptState<V>,
    options: &Options<V>,
    validator: &Validator<V>,
    keys: &mut mpsc::UnboundedReceiver<KeyEvent>,
    mut draw: D,
) -> Result<Vec<V>, PromptError>
where
    V: Clone,
    D: FnMut(&PromptState<V>) -> io::Result<()>,
{
    loop {
        draw(&state)?;

        if state.status == Status::Done {
            return Ok(state.selection());
        }

        let key = keys.recv().await.ok_or(PromptError::InputClosed)?;
        let Some(action) = map_key(key) else {
            continue;
        };
        debug!(?action, active = state.active, "dispatch");

        state = match update(state, &action, options) {
            Transition::State(next) => next,
            Transition::Abort => return Err(PromptError::Aborted),
            Transition::Effect(pending, Effect::Validate { selection }) => {
                draw(&pending)?;
                let count = selection.len();
                let verdict = validator(selection)
                    .await
                    .map_err(PromptError::Validator)?;
                debug!(?verdict, selected = count, "validated");
                resolve_validation(pending, verdict)
            }
        };
    }
}

// ============================================================================
// TESTS
// ============================================================================

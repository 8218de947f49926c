//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only TUI module with side effects. It wires the pure layers
//! (machine, update, view) to the real terminal via crossterm and ratatui.
//!
//! A key reader thread feeds a single mpsc channel. The event loop owns the
//! machine and processes one event to completion (transition, effects,
//! redraw) before taking the next.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::config::WidgetConfig;
use crate::effects::run_effects;
use crate::types::MachineState;

use super::state::{Action, App, AppEvent, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Focus decides the mapping. With the notice open every key dismisses it.
/// With the form field focused, keys edit text and Escape is swallowed so
/// the container's Escape-to-close never sees it. Otherwise the container
/// shortcuts apply. Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent, app: &App) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.notice.is_some() {
        return Some(Action::DismissNotice);
    }

    if app.field_focused() {
        return map_field_key(key, ctrl);
    }

    match key.code {
        // Container shortcuts
        KeyCode::Esc | KeyCode::Char('x') => Some(Action::Close),
        KeyCode::Char('q') => Some(Action::Quit),

        // Question buttons
        KeyCode::Char('g') if app.state() == MachineState::Question => Some(Action::Good),
        KeyCode::Char('b') if app.state() == MachineState::Question => Some(Action::Bad),

        _ => None,
    }
}

/// Keys while the text field has focus.
fn map_field_key(key: KeyEvent, ctrl: bool) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Consumed),
        KeyCode::Char('s') if ctrl => Some(Action::Submit),
        KeyCode::Char('x') if ctrl => Some(Action::Close),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Action::Input(c)),
        KeyCode::Enter => Some(Action::Newline),
        KeyCode::Backspace => Some(Action::Backspace),
        _ => None,
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Run one action through update and apply the result to the app.
pub fn dispatch(app: &mut App, action: &Action) {
    let transition = update(app.state(), &app.draft, action);
    apply(app, transition);
}

/// Apply a transition: feed the machine, execute its effects, sync the draft.
fn apply(app: &mut App, transition: Transition) {
    match transition {
        Transition::Send(event) => {
            let effects = app.machine.send(event);
            let notice = app.config.invalid_notice.clone();
            run_effects(&effects, &notice, app);

            // The draft belongs to the form; it goes when the form does
            if app.state() != MachineState::Form {
                app.draft.clear();
            }
        }
        Transition::Draft(draft) => app.draft = draft,
        Transition::DismissNotice => app.notice = None,
        Transition::Stay => {}
        Transition::Quit => app.should_quit = true,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let app_event = match event::read() {
                Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(TermEvent::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue, // ignore mouse, focus, key release
                Err(_) => break,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the widget until the user quits.
pub fn run(config: WidgetConfig) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);

    info!("widget mounted");

    loop {
        debug!(
            state = %app.state(),
            response = %app.machine.context().response,
            "rendered"
        );
        terminal.draw(|frame| render(&app, frame))?;

        if app.should_quit {
            break;
        }

        // Block on next event
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // reader thread gone
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key, &app) {
                    dispatch(&mut app, &action);
                }
            }
            AppEvent::Resize => {}
        }
    }

    info!(state = %app.state(), "widget unmounted");
    restore_terminal()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

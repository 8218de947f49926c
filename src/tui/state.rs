//! TUI state algebra: pure types, zero effects.
//!
//! The discrete widget state lives in the [`FeedbackMachine`]. Everything
//! here is renderer-owned: the form draft, the notice modal, the quit flag.
//! The machine never sees the draft until it is packaged into a `Submit`.

use crossterm::event::KeyEvent;

use crate::config::WidgetConfig;
use crate::effects::Notifier;
use crate::machine::FeedbackMachine;
use crate::types::{Event, MachineState};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key press from the crossterm reader thread.
    Key(KeyEvent),
    /// The terminal was resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// The feedback state machine. Sole owner.
    pub machine: FeedbackMachine,

    /// Text typed into the form field. Survives invalid submissions.
    pub draft: String,

    /// Blocking validation notice, if one is open.
    pub notice: Option<String>,

    /// Screen texts.
    pub config: WidgetConfig,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    pub fn new(config: WidgetConfig) -> Self {
        App {
            machine: FeedbackMachine::new(),
            draft: String::new(),
            notice: None,
            config,
            should_quit: false,
        }
    }

    pub fn state(&self) -> MachineState {
        self.machine.current_state()
    }

    /// Whether keyboard focus is inside the form's text field.
    pub fn field_focused(&self) -> bool {
        self.state() == MachineState::Form && self.notice.is_none()
    }
}

/// The notice opens as a modal over the current screen.
impl Notifier for App {
    fn notify(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions (focus-aware).
/// The update function decides what each Action means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// "Good" button.
    Good,
    /// "Bad" button.
    Bad,
    /// Close button, or the container's Escape shortcut.
    Close,
    /// Submit the form with the current draft.
    Submit,
    /// Type a character into the field.
    Input(char),
    /// Insert a line break into the field.
    Newline,
    /// Delete the last character of the field.
    Backspace,
    /// A key the field swallowed (Escape). Goes nowhere.
    Consumed,
    /// Acknowledge the validation notice.
    DismissNotice,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure update.
///
/// Describes what should happen; the effects boundary applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Send this event to the machine.
    Send(Event),
    /// Replace the renderer-owned draft.
    Draft(String),
    /// Close the notice modal.
    DismissNotice,
    /// Nothing to do.
    Stay,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TESTS
// ============================================================================

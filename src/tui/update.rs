//! Pure updates: (MachineState, draft, Action) → Transition.
//!
//! Packages raw user input into machine events. No validation happens
//! here: an empty draft is submitted as-is and the machine's guard decides.

use crate::types::{Event, MachineState};

use super::state::{Action, Transition};

/// Pure update function.
///
/// Field-editing actions only mean something on the Form screen; elsewhere
/// they are no-ops. Button actions always become events, and the machine
/// ignores the ones the current state does not handle.
pub fn update(state: MachineState, draft: &str, action: &Action) -> Transition {
    match action {
        Action::Good => Transition::Send(Event::Good),
        Action::Bad => Transition::Send(Event::Bad),
        Action::Close => Transition::Send(Event::Close),
        Action::Quit => Transition::Quit,
        Action::DismissNotice => Transition::DismissNotice,
        Action::Consumed => Transition::Stay,
        Action::Submit | Action::Input(_) | Action::Newline | Action::Backspace => {
            if state == MachineState::Form {
                update_form(draft, action)
            } else {
                Transition::Stay
            }
        }
    }
}

/// Form: edit the draft or package it into a Submit.
fn update_form(draft: &str, action: &Action) -> Transition {
    match action {
        Action::Submit => Transition::Send(Event::submit(draft)),
        Action::Input(c) => {
            let mut next = draft.to_string();
            next.push(*c);
            Transition::Draft(next)
        }
        Action::Newline => Transition::Draft(format!("{}\n", draft)),
        Action::Backspace => {
            let mut next = draft.to_string();
            next.pop();
            Transition::Draft(next)
        }
        _ => Transition::Stay,
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Effects boundary for machine output.
//!
//! The machine only describes what should happen. This module does it:
//! log effects go to `tracing`, the validation notice goes to whatever
//! [`Notifier`] the caller supplies (a modal in the TUI, a list in replay).

use tracing::{debug, info};

use crate::machine::Effect;

/// Receives the blocking "invalid form" notice.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Collects notices in order. Used by headless replay and tests.
impl Notifier for Vec<String> {
    fn notify(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Execute effects in the order the machine emitted them.
///
/// `notice` is the text shown for [`Effect::NotifyInvalid`].
pub fn run_effects<N: Notifier + ?Sized>(effects: &[Effect], notice: &str, notifier: &mut N) {
    for effect in effects {
        run_effect(effect, notice, notifier);
    }
}

fn run_effect<N: Notifier + ?Sized>(effect: &Effect, notice: &str, notifier: &mut N) {
    match effect {
        Effect::LogExit { state, event } => {
            info!(target: "feedback", %state, event = event.kind(), "exited");
        }
        Effect::LogGood => {
            info!(target: "feedback", choice = "good", "good");
        }
        Effect::LogEntry { state } => {
            info!(target: "feedback", %state, "entered");
        }
        Effect::LogResponse { value } => {
            info!(target: "feedback", response = %value, "RESPONSE: {}", value);
        }
        Effect::NotifyInvalid => {
            debug!(target: "feedback", "invalid form submission");
            notifier.notify(notice);
        }
        Effect::Ignored { state, event } => {
            debug!(target: "feedback", %state, event = event.kind(), "event ignored");
        }
    }
}

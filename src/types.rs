//! Domain types for the feedback widget.
//!
//! States, context and events of the feedback state machine. Pure data:
//! the transition logic lives in [`crate::machine`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// STATES
// ============================================================================

/// The discrete state of the widget. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineState {
    /// "How was your experience?" — the initial state.
    #[default]
    Question,
    /// Soliciting a written comment.
    Form,
    /// Showing the captured response.
    Thanks,
    /// Terminal. Absorbs every event.
    Closed,
}

impl MachineState {
    /// All states, in lifecycle order.
    pub const ALL: [MachineState; 4] = [
        MachineState::Question,
        MachineState::Form,
        MachineState::Thanks,
        MachineState::Closed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MachineState::Question => "question",
            MachineState::Form => "form",
            MachineState::Thanks => "thanks",
            MachineState::Closed => "closed",
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Auxiliary data carried alongside the discrete state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Context {
    /// Free-text response captured from a valid submission. Empty until then.
    pub response: String,
}

// ============================================================================
// EVENTS
// ============================================================================

/// Something the user did.
///
/// Serialized internally tagged: `{"type":"GOOD"}`,
/// `{"type":"SUBMIT","value":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Event {
    Good,
    Bad,
    Close,
    Submit {
        #[serde(default)]
        value: String,
    },
}

impl Event {
    /// Convenience constructor for a submission.
    pub fn submit(value: impl Into<String>) -> Self {
        Event::Submit { value: value.into() }
    }

    /// Upper-case tag, as used in logs and JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Good => "GOOD",
            Event::Bad => "BAD",
            Event::Close => "CLOSE",
            Event::Submit { .. } => "SUBMIT",
        }
    }
}

/// Error parsing a textual event such as `submit=great service`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEventError {
    #[error("empty event")]
    Empty,
    #[error("unknown event '{0}' (expected good, bad, close, submit or submit=<text>)")]
    Unknown(String),
    #[error("event '{0}' takes no value")]
    UnexpectedValue(String),
}

impl FromStr for Event {
    type Err = ParseEventError;

    /// Parse `good`, `bad`, `close`, `submit` or `submit=<text>`.
    ///
    /// The keyword is case-insensitive; the submitted text is kept verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (keyword, value) = match s.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v)),
            None => (s.trim(), None),
        };

        if keyword.is_empty() {
            return Err(ParseEventError::Empty);
        }

        match (keyword.to_ascii_lowercase().as_str(), value) {
            ("submit", value) => Ok(Event::submit(value.unwrap_or_default())),
            ("good", None) => Ok(Event::Good),
            ("bad", None) => Ok(Event::Bad),
            ("close", None) => Ok(Event::Close),
            ("good" | "bad" | "close", Some(_)) => {
                Err(ParseEventError::UnexpectedValue(keyword.to_string()))
            }
            _ => Err(ParseEventError::Unknown(keyword.to_string())),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Good => f.write_str("good"),
            Event::Bad => f.write_str("bad"),
            Event::Close => f.write_str("close"),
            Event::Submit { value } if value.is_empty() => f.write_str("submit"),
            Event::Submit { value } => write!(f, "submit={}", value),
        }
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Observable machine state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: MachineState,
    pub context: Context,
}

/// Output format for headless reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// Machine-parseable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================

//! Headless replay: drive the machine from a scripted event list.
//!
//! Scripts come from the command line (`good`, `submit=ok`, ...) or from a
//! JSON file holding an array of events (`[{"type":"BAD"}, ...]`).

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::effects::run_effects;
use crate::machine::{Effect, FeedbackMachine};
use crate::types::{Event, ParseEventError, Snapshot};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("cannot read event script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid event script {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("event #{index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: ParseEventError,
    },
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    /// Events in the order they were sent.
    pub events: Vec<Event>,
    /// Effects in the order they were emitted.
    pub effects: Vec<Effect>,
    /// Validation notices raised, one per invalid submission.
    pub notices: Vec<String>,
    /// Final state and context.
    pub snapshot: Snapshot,
}

/// Parse textual events, reporting the 1-based position of the first bad one.
pub fn parse_events<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Event>, ReplayError> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            s.as_ref()
                .parse::<Event>()
                .map_err(|source| ReplayError::Parse { index: i + 1, source })
        })
        .collect()
}

/// Load a JSON array of events.
pub fn load_script(path: &Path) -> Result<Vec<Event>, ReplayError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ReplayError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Run `events` through a fresh machine, executing every effect.
pub fn replay(events: Vec<Event>, notice: &str) -> ReplayOutcome {
    let mut machine = FeedbackMachine::new();
    let mut effects = Vec::new();
    let mut notices: Vec<String> = Vec::new();

    for event in &events {
        let emitted = machine.send(event.clone());
        run_effects(&emitted, notice, &mut notices);
        effects.extend(emitted);
    }

    ReplayOutcome {
        events,
        effects,
        notices,
        snapshot: machine.snapshot(),
    }
}

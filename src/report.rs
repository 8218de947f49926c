//! Report formatting for replay results.
//!
//! Pure functions — (ReplayOutcome, OutputFormat) → String.
//! No I/O, no side effects.

use crate::machine::Effect;
use crate::replay::ReplayOutcome;
use crate::types::OutputFormat;

/// Format a replay outcome for output.
pub fn format_report(outcome: &ReplayOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(outcome),
        OutputFormat::Json => format_json(outcome),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(outcome: &ReplayOutcome) -> String {
    let mut out = String::new();

    if !outcome.events.is_empty() {
        out.push_str("=== Events ===\n");
        for (i, event) in outcome.events.iter().enumerate() {
            out.push_str(&format!("  {:>2}. {}\n", i + 1, event));
        }
        out.push('\n');
    }

    let visible: Vec<String> = outcome.effects.iter().filter_map(describe_effect).collect();
    if !visible.is_empty() {
        out.push_str("=== Effects ===\n");
        for line in &visible {
            out.push_str(&format!("  {}\n", line));
        }
        out.push('\n');
    }

    out.push_str("=== Final State ===\n");
    out.push_str(&format!("State:    {}\n", outcome.snapshot.state));
    if outcome.snapshot.context.response.is_empty() {
        out.push_str("Response: (none)\n");
    } else {
        out.push_str(&format!("Response: {}\n", outcome.snapshot.context.response));
    }
    out.push_str(&format!("Notices:  {}\n", outcome.notices.len()));

    out
}

/// One line per effect. Ignored events are diagnostics and stay out.
fn describe_effect(effect: &Effect) -> Option<String> {
    match effect {
        Effect::LogExit { state, event } => Some(format!("exited {} on {}", state, event.kind())),
        Effect::LogGood => Some("chose good".to_string()),
        Effect::LogEntry { state } => Some(format!("entered {}", state)),
        Effect::LogResponse { value } => Some(format!("RESPONSE: {:?}", value)),
        Effect::NotifyInvalid => Some("notice: invalid form".to_string()),
        Effect::Ignored { .. } => None,
    }
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(outcome: &ReplayOutcome) -> String {
    serde_json::to_string_pretty(outcome).unwrap_or_else(|e| {
        // This should never happen with our types, but fail explicitly
        panic!("Failed to serialize replay outcome to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================

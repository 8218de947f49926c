//! TUI color semantics and style constants.
//!
//! Pure data — consumed by the rendering layer for visual consistency.
//!
//! Color semantics:
//! - Green: the "Good" answer, thanks
//! - Red: the "Bad" answer
//! - Yellow: the validation notice
//! - Cyan: interactive elements (keybinding hints)
//! - Dim: placeholder text, close buttons

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// "Good" button / thanks — green.
pub const STYLE_GOOD: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// "Bad" button — red.
pub const STYLE_BAD: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Interactive element / keybinding hint — cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized text — dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Screen header ("How was your experience?").
pub const STYLE_HEADER: Style = Style::new().add_modifier(Modifier::BOLD);

/// Empty field placeholder.
pub const STYLE_PLACEHOLDER: Style = Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);

/// Focused text field border.
pub const STYLE_FIELD_FOCUSED: Style = Style::new().fg(Color::Cyan);

/// Notice modal border and text.
pub const STYLE_NOTICE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================

//! feedback-widget: a Good/Bad feedback prompt driven by a small state machine.
//!
//! The [`machine`] module is headless and pure; [`tui`] renders it in a
//! terminal and [`replay`] drives it from a script.

pub mod config;
pub mod effects;
pub mod logging;
pub mod machine;
pub mod replay;
pub mod report;
pub mod tui;
pub mod types;

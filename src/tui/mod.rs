//! TUI module: the screen renderer for the feedback widget.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Action, Transition)
//! - `update`: Pure input packaging (Action → Transition)
//! - `view`: Pure rendering (App → widgets)
//! - `theme`: Style constants
//! - `run`: Effects (terminal, key reader, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;

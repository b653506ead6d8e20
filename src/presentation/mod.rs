//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the login form, the role dashboards and the sign-out
//! screens using ratatui, and maps key presses to application actions.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;

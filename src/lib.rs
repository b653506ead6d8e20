//! CapTrack - Capstone Project Tracker
//!
//! Session core and terminal client for a demo-mode capstone tracking
//! application with student, faculty and admin dashboards.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod cli;

pub use domain::*;
pub use application::*;

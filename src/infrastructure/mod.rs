//! Infrastructure layer providing external service integrations.
//!
//! This module contains the session file used by `--remember` and the
//! logging setup.

pub mod logging;
pub mod persistence;

pub use logging::*;
pub use persistence::*;

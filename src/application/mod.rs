//! Application layer managing session state and screen workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the session state machine, the routing derived from it, and the state the
//! terminal screens read.

pub mod clock;
pub mod routing;
pub mod session;
pub mod state;

pub use clock::*;
pub use routing::*;
pub use session::*;
pub use state::*;

pub mod models;
pub mod accounts;
pub mod roles;
pub mod validation;
pub mod errors;

pub use models::*;
pub use accounts::*;
pub use roles::*;
pub use validation::*;
pub use errors::*;

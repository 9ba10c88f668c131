//! Request bodies and error type of the control surface.

mod error;
mod types;

pub use error::*;
pub use types::*;

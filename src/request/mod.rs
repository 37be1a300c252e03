//! Request layer: the object model and its assembly from validated parameters.

pub mod assemble;
pub mod model;

pub use assemble::{RequestBuilder, assemble};
pub use model::Request;

//! Parameter layer: declarations, binding and domain validation.
//!
//! Control flow is bind -> validate. Either step can stop the run with a
//! `ValidationReport`; nothing downstream runs unless both succeed.

pub mod bind;
pub mod catalog;
pub mod decl;
pub mod error;
pub mod validate;
pub mod value;

pub use bind::{Binder, RawParams, RawRange};
pub use catalog::{NodeType, RadioSite};
pub use error::{ErrorKind, ParameterError, ValidationReport};
pub use validate::{ValidatedParams, validate};
pub use value::{BoundParams, FrequencyRange, RadioSelection};

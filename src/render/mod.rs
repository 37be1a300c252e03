//! Output rendering for an assembled request.

pub mod rspec;

pub use rspec::render_request;

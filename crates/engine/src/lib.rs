//! Engine module - wires switch input into the controller.

pub mod session;

pub use makaton_match_core as core;
pub use makaton_match_input as input;
pub use makaton_match_types as types;

pub use session::{SelectError, Session};

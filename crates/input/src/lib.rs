//! Input module (engine-facing).
//!
//! Independent of any UI framework. [`scanner`] interprets abstract switch
//! presses; [`map`] turns `crossterm` key events into game commands and
//! switch presses; [`hold`] recovers long presses from terminals that only
//! report key repeats.

pub mod hold;
pub mod map;
pub mod scanner;

pub use makaton_match_types as types;

pub use hold::HoldTracker;
pub use map::{handle_key_event, should_quit, KeyCommand};
pub use scanner::{ScanEvent, SwitchScanner};

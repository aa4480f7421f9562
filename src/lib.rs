//! Makaton Match (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `makaton_match::{core,engine,input,term,types}` and adds
//! what the terminal binary needs on top: command-line and file configuration
//! ([`config`]) and a captioning [`player`].

pub mod config;
pub mod player;

pub use makaton_match_core as core;
pub use makaton_match_engine as engine;
pub use makaton_match_input as input;
pub use makaton_match_term as term;
pub use makaton_match_types as types;

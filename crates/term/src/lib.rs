//! Terminal hosting shell.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer ([`fb`]) by [`game_view`], and [`renderer`] flushes the changed
//! cells to the terminal with crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use makaton_match_core as core;
pub use makaton_match_types as types;

pub use fb::{BoxStyle, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport, PX_PER_COL, PX_PER_ROW};
pub use renderer::{changed_spans, encode_frame, Span, TerminalRenderer};

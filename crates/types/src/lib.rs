//! Shared types - cards, settings, geometry and timing constants
//!
//! Everything here is plain data. The crates layered on top (core, input,
//! engine, term) agree on these records and never reach into each other's
//! internals.
//!
//! # Timing Constants
//!
//! Base durations in milliseconds. The controller multiplies each one by the
//! configured speed multiplier (see [`Settings::scaled_ms`]).
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop timestep (~60 FPS) |
//! | `MATCH_MOVE_MS` | 450 | Match card glides into its slot |
//! | `SPRING_BACK_MS` | 300 | Mismatched card returns to rest |
//! | `FLIP_STAGE_MS` | 600 | One stage of a flip (half turn out, half turn in) |
//! | `MIN_DWELL_MS` | 1500 | Floor between arrival and clearing the match card |
//! | `NEXT_TARGET_DELAY_MS` | 300 | Gap before the next match card appears |
//! | `FADE_MS` | 350 | Page fade out / fade in |
//! | `SHAKE_LEAN_MS` / `SHAKE_COUNTER_MS` / `SHAKE_SETTLE_MS` | 110 / 160 / 110 | Reward shake phases |
//! | `DEFAULT_SCAN_DELAY_MS` | 2000 | Single-switch auto advance |
//! | `SWITCH_SETTLE_MS` | 100 | Re-entrancy guard between switch presses |
//! | `LOCK_HOLD_MS` | 3000 | Long press needed to toggle the lock |
//!
//! # Examples
//!
//! ```
//! use makaton_match_types::{CardsPerPage, Card, MatchProperty, Word};
//!
//! let per_page = CardsPerPage::from_count(4).unwrap();
//! assert_eq!(per_page.count(), 4);
//!
//! let ball = Card::from_word(0, &Word::new("ball.png", "ball"));
//! let other = Card::from_word(1, &Word::new("ball-red.png", "ball"));
//! assert!(ball.matches(&other, MatchProperty::Text));
//! assert!(!ball.matches(&other, MatchProperty::Image));
//! ```

pub mod card;
pub mod game;
pub mod geometry;
pub mod settings;

pub use card::{Card, Word};
pub use game::{CardFace, FlipKind, GameConfig, GameKind, MatchProperty, NavCommand, SwitchMode, SwitchPress};
pub use geometry::{DeviceClass, Orientation, Point, Rect, Size};
pub use settings::{CardsPerPage, InvalidCardsPerPage, Settings, ShuffleMode};

/// Host loop timestep (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Match card travel time from its position to the matched slot.
pub const MATCH_MOVE_MS: u32 = 450;

/// Spring back after a mismatch or a drop outside any slot.
pub const SPRING_BACK_MS: u32 = 300;

/// One flip stage; a double flip runs two of these back to back.
pub const FLIP_STAGE_MS: u32 = 600;

/// Minimum dwell after a successful match, counted from arrival.
pub const MIN_DWELL_MS: u32 = 1500;

/// Pause between clearing a solved match card and presenting the next one.
pub const NEXT_TARGET_DELAY_MS: u32 = 300;

/// Page fade duration (each direction).
pub const FADE_MS: u32 = 350;

/// Reward shake: lean toward the card's bias direction.
pub const SHAKE_LEAN_MS: u32 = 110;

/// Reward shake: lean further the other way.
pub const SHAKE_COUNTER_MS: u32 = 160;

/// Reward shake: settle back to neutral.
pub const SHAKE_SETTLE_MS: u32 = 110;

/// Single-switch auto advance delay.
pub const DEFAULT_SCAN_DELAY_MS: u32 = 2000;

/// Switch presses arriving within this window of the previous one are dropped.
pub const SWITCH_SETTLE_MS: u32 = 100;

/// Long press duration that toggles the screen lock.
pub const LOCK_HOLD_MS: u32 = 3000;

/// Card height / width (3:4 portrait cards).
pub const CARD_ASPECT_RATIO: f32 = 4.0 / 3.0;

/// Smallest vertical gap between card rows, in pixels.
pub const MIN_ROW_GAP_PX: f32 = 10.0;

/// Reference long side for tablet magnification.
pub const TABLET_REFERENCE_PX: f32 = 1024.0;

/// Reference short side for phone magnification.
pub const PHONE_REFERENCE_PX: f32 = 320.0;

/// Shortest side at which a container is treated as a tablet.
pub const TABLET_MIN_SHORT_SIDE_PX: f32 = 600.0;

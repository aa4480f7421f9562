//! Core game logic module - pure, deterministic, and testable
//!
//! Everything the matching game decides lives here: where cards go, what a
//! round contains, when the match card moves, flips and advances. There is no
//! terminal, audio device or clock in this crate. Time arrives through
//! [`GameState::tick`], audio goes out through the [`Player`] trait, and the
//! screen reads [`GameSnapshot`]s.
//!
//! # Module Structure
//!
//! - [`layout`]: card rectangles per page size, device class and orientation
//! - [`animation`]: flip and shake curves (2D scale or 3D rotation), tweens
//! - [`round`]: one page of cards, its target order and page arithmetic
//! - [`game_state`]: the round/game controller state machine
//! - [`timers`]: generation-tagged delayed continuations
//! - [`player`]: audio/speech collaborator and the single-playback wrapper
//! - [`images`]: image key resolution with a fallback
//! - [`rng`]: seeded shuffles
//! - [`snapshot`]: the render-surface contract
//!
//! # Example
//!
//! ```
//! use makaton_match_core::{GameState, MatchOutcome, NullPlayer, Phase};
//! use makaton_match_core::types::{DeviceClass, GameKind, Orientation, Settings, Word, TICK_MS};
//!
//! let words = vec![Word::new("ball.png", "ball"), Word::new("dog.png", "dog")];
//! let mut game = GameState::new(words, Settings::default(), GameKind::PictureToPicture, 1, NullPlayer);
//! game.set_viewport(1024.0, 768.0, DeviceClass::Tablet, Orientation::Landscape);
//! game.initialize_game(0);
//! assert_eq!(game.phase(), Phase::RoundActive);
//!
//! assert!(matches!(game.auto_match(), MatchOutcome::Matched { .. }));
//! for _ in 0..400 {
//!     game.tick(TICK_MS);
//! }
//! assert_eq!(game.level(), 2);
//! ```

pub mod animation;
pub mod game_state;
pub mod images;
pub mod layout;
pub mod player;
pub mod rng;
pub mod round;
pub mod snapshot;
pub mod timers;

pub use makaton_match_types as types;

// Re-export commonly used types for convenience
pub use animation::{animator_for, CardAnimator, Curve, RenderCapability, ShakeSequence};
pub use game_state::{GameState, MatchOutcome, Phase};
pub use images::{ImageCatalog, ImageResolver, ImageSource};
pub use layout::{compute_layout, Arrangement, Layout};
pub use player::{ExclusivePlayer, NullPlayer, Playback, PlaybackError, PlaybackTicket, Player, SpeechCue};
pub use rng::SimpleRng;
pub use round::{last_group_start, next_group_start, previous_group_start, RoundState};
pub use snapshot::{GameSnapshot, MatchCardView, StaticCardView, ToolbarState};

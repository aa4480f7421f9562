//! Render-surface contract: everything a view needs to draw one frame.
//!
//! Snapshots are owned values; the controller keeps no reference to them.

use serde::Serialize;

use crate::animation::RenderCapability;
use crate::game_state::Phase;
use crate::layout::Arrangement;
use crate::types::{CardFace, Rect};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticCardView {
    pub slot: usize,
    pub card_id: usize,
    pub image: String,
    /// Locale-resolved, case-adjusted label.
    pub text: String,
    pub face: CardFace,
    pub rect: Rect,
    pub is_matched: bool,
    /// Current flip curve output (scale X or Y rotation in degrees).
    pub flip: f32,
    /// Current shake curve output (X offset in px or Z rotation in degrees).
    pub shake: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCardView {
    pub card_id: usize,
    pub image: String,
    pub text: String,
    pub face: CardFace,
    /// Layout rectangle moved by the drag/glide offset and scaled.
    pub rect: Rect,
    pub flip: f32,
    pub scale: f32,
    pub dragging: bool,
}

/// Enabled state of each toolbar affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ToolbarState {
    pub start: bool,
    pub previous: bool,
    pub next: bool,
    pub end: bool,
    pub lock: bool,
    pub refresh: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub phase: Phase,
    pub generation: u32,
    pub group_start: usize,
    pub group_len: usize,
    pub word_count: usize,
    pub level: u32,
    pub target_index: usize,
    pub target_count: usize,
    pub arrangement: Option<Arrangement>,
    pub statics: Vec<StaticCardView>,
    pub match_card: Option<MatchCardView>,
    pub toolbar: ToolbarState,
    /// Page opacity, 0 while faded out.
    pub opacity: f32,
    pub is_animating: bool,
    pub locked: bool,
    pub large_text: bool,
    pub capability: RenderCapability,
    pub show_word: bool,
    pub can_show_text: bool,
    /// Switch-scanning highlight on a static slot; filled in by the session.
    pub highlight: Option<usize>,
    /// Single-switch highlight on the match card; filled in by the session.
    pub match_highlighted: bool,
}

impl GameSnapshot {
    pub fn static_at(&self, slot: usize) -> Option<&StaticCardView> {
        self.statics.iter().find(|s| s.slot == slot)
    }

    pub fn matched_count(&self) -> usize {
        self.statics.iter().filter(|s| s.is_matched).count()
    }
}

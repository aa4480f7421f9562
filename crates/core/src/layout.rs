//! Layout module - card rectangles for a container size
//!
//! [`compute_layout`] is a pure function of (cards per page, container size,
//! device class, orientation). It is cheap enough to call on every resize.
//!
//! Every arrangement is a grid. Static cards own one cell each; the match card
//! owns a cell (or a span of cells) no static card uses. A card never grows
//! past its cell, so containment and non-overlap hold for any positive
//! container, however small.
//!
//! Card size comes from the column count first (3:4 aspect), then
//! [`enforce_vertical_spacing`] shrinks it when the rows would not fit.

use arrayvec::ArrayVec;

use crate::types::{
    CardsPerPage, DeviceClass, Orientation, Point, Rect, Size, CARD_ASPECT_RATIO, MIN_ROW_GAP_PX,
    PHONE_REFERENCE_PX, TABLET_REFERENCE_PX,
};

pub const MAX_STATIC_CARDS: usize = 8;

/// Named sub-layouts, one per (cards per page, device, orientation) family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Arrangement {
    /// 1-up, static above the match card.
    PairColumn,
    /// 1-up, static beside the match card.
    PairRow,
    /// 2-up portrait: statics side by side, match card centered below.
    TwoOverOne,
    /// 2-up landscape: statics stacked, match card centered to the right.
    TwoBesideOne,
    /// 3-up: 2x2 grid, match card in the last cell.
    TripleGrid,
    QuadTabletLandscape,
    QuadTabletPortrait,
    QuadPhoneLandscape,
    QuadPhonePortrait,
    /// 6-up: 3x3 with the center for the match card and one axis pair left empty.
    SixAround,
    /// 8-up: 3x3 with every outer cell used.
    EightAround,
}

/// Solved rectangles for one container size.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub arrangement: Arrangement,
    pub match_rect: Rect,
    pub static_rects: ArrayVec<Rect, MAX_STATIC_CARDS>,
    pub card_size: Size,
    /// Scale relative to the reference resolution.
    pub magnification: f32,
}

impl Layout {
    /// Static slot whose rectangle contains `p`.
    pub fn slot_at(&self, p: Point) -> Option<usize> {
        self.static_rects.iter().position(|r| r.contains(p))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    col: u8,
    row: u8,
    col_span: u8,
    row_span: u8,
}

const fn cell(col: u8, row: u8) -> Slot {
    Slot {
        col,
        row,
        col_span: 1,
        row_span: 1,
    }
}

const fn span(col: u8, row: u8, col_span: u8, row_span: u8) -> Slot {
    Slot {
        col,
        row,
        col_span,
        row_span,
    }
}

#[derive(Debug, Clone, Copy)]
struct Plan {
    arrangement: Arrangement,
    cols: u8,
    rows: u8,
    match_slot: Slot,
    statics: &'static [Slot],
    /// Fraction of the fitted card size actually used (<= 1).
    card_scale: f32,
    /// Match card nudge in reference pixels, clamped to its cell slack.
    match_nudge: (f32, f32),
}

const PAIR_COLUMN: [Slot; 1] = [cell(0, 0)];
const PAIR_ROW: [Slot; 1] = [cell(0, 0)];
const TWO_OVER_ONE: [Slot; 2] = [cell(0, 0), cell(1, 0)];
const TWO_BESIDE_ONE: [Slot; 2] = [cell(0, 0), cell(0, 1)];
const TRIPLE: [Slot; 3] = [cell(0, 0), cell(1, 0), cell(0, 1)];
const QUAD_WIDE: [Slot; 4] = [cell(0, 0), cell(2, 0), cell(0, 1), cell(2, 1)];
const QUAD_TALL: [Slot; 4] = [cell(0, 0), cell(1, 0), cell(0, 2), cell(1, 2)];
const QUAD_STRIP: [Slot; 4] = [cell(0, 0), cell(1, 0), cell(3, 0), cell(4, 0)];
const SIX_PORTRAIT: [Slot; 6] = [
    cell(0, 0),
    cell(1, 0),
    cell(2, 0),
    cell(0, 2),
    cell(1, 2),
    cell(2, 2),
];
const SIX_LANDSCAPE: [Slot; 6] = [
    cell(0, 0),
    cell(2, 0),
    cell(0, 1),
    cell(2, 1),
    cell(0, 2),
    cell(2, 2),
];
const EIGHT: [Slot; 8] = [
    cell(0, 0),
    cell(1, 0),
    cell(2, 0),
    cell(0, 1),
    cell(2, 1),
    cell(0, 2),
    cell(1, 2),
    cell(2, 2),
];

fn plan(cards: CardsPerPage, device: DeviceClass, orientation: Orientation) -> Plan {
    let portrait = orientation.is_portrait();
    let tablet = device == DeviceClass::Tablet;
    let base_scale = if tablet { 0.92 } else { 1.0 };

    match cards {
        CardsPerPage::One if portrait => Plan {
            arrangement: Arrangement::PairColumn,
            cols: 1,
            rows: 2,
            match_slot: cell(0, 1),
            statics: &PAIR_COLUMN,
            card_scale: base_scale * 0.85,
            match_nudge: (0.0, 0.0),
        },
        CardsPerPage::One => Plan {
            arrangement: Arrangement::PairRow,
            cols: 2,
            rows: 1,
            match_slot: cell(1, 0),
            statics: &PAIR_ROW,
            card_scale: base_scale * 0.85,
            match_nudge: (0.0, 0.0),
        },
        CardsPerPage::Two if portrait => Plan {
            arrangement: Arrangement::TwoOverOne,
            cols: 2,
            rows: 2,
            match_slot: span(0, 1, 2, 1),
            statics: &TWO_OVER_ONE,
            card_scale: base_scale,
            match_nudge: (0.0, 0.0),
        },
        CardsPerPage::Two => Plan {
            arrangement: Arrangement::TwoBesideOne,
            cols: 2,
            rows: 2,
            match_slot: span(1, 0, 1, 2),
            statics: &TWO_BESIDE_ONE,
            card_scale: base_scale,
            match_nudge: (0.0, 0.0),
        },
        CardsPerPage::Three => Plan {
            arrangement: Arrangement::TripleGrid,
            cols: 2,
            rows: 2,
            match_slot: cell(1, 1),
            statics: &TRIPLE,
            card_scale: base_scale,
            match_nudge: (0.0, 0.0),
        },
        CardsPerPage::Four => match (tablet, portrait) {
            (true, false) => Plan {
                arrangement: Arrangement::QuadTabletLandscape,
                cols: 3,
                rows: 2,
                match_slot: span(1, 0, 1, 2),
                statics: &QUAD_WIDE,
                card_scale: 0.9,
                match_nudge: (0.0, 0.0),
            },
            (true, true) => Plan {
                arrangement: Arrangement::QuadTabletPortrait,
                cols: 2,
                rows: 3,
                match_slot: span(0, 1, 2, 1),
                statics: &QUAD_TALL,
                card_scale: 0.9,
                match_nudge: (0.0, -12.0),
            },
            (false, false) => Plan {
                arrangement: Arrangement::QuadPhoneLandscape,
                cols: 5,
                rows: 1,
                match_slot: cell(2, 0),
                statics: &QUAD_STRIP,
                card_scale: 1.0,
                match_nudge: (0.0, 8.0),
            },
            (false, true) => Plan {
                arrangement: Arrangement::QuadPhonePortrait,
                cols: 2,
                rows: 3,
                match_slot: span(0, 1, 2, 1),
                statics: &QUAD_TALL,
                card_scale: 0.95,
                match_nudge: (0.0, 0.0),
            },
        },
        CardsPerPage::Six => Plan {
            arrangement: Arrangement::SixAround,
            cols: 3,
            rows: 3,
            match_slot: cell(1, 1),
            statics: if portrait { &SIX_PORTRAIT } else { &SIX_LANDSCAPE },
            card_scale: base_scale,
            match_nudge: (0.0, 0.0),
        },
        CardsPerPage::Eight => Plan {
            arrangement: Arrangement::EightAround,
            cols: 3,
            rows: 3,
            match_slot: cell(1, 1),
            statics: &EIGHT,
            card_scale: base_scale,
            match_nudge: (0.0, 0.0),
        },
    }
}

/// Scale relative to the reference resolution: long side against 1024 on
/// tablets, short side against 320 on phones.
pub fn magnification(width: f32, height: f32, device: DeviceClass) -> f32 {
    match device {
        DeviceClass::Tablet => width.max(height) / TABLET_REFERENCE_PX,
        DeviceClass::Phone => width.min(height) / PHONE_REFERENCE_PX,
    }
}

fn base_gap(device: DeviceClass) -> f32 {
    match device {
        DeviceClass::Tablet => 20.0,
        DeviceClass::Phone => 12.0,
    }
}

/// Shrink `card` (keeping its aspect ratio) until `rows` rows plus
/// `rows + 1` gaps fit into `available_height`.
///
/// The gap never drops below [`MIN_ROW_GAP_PX`]; if not even the gaps fit,
/// the card collapses to zero height.
pub fn enforce_vertical_spacing(card: Size, rows: u8, available_height: f32, gap: f32) -> Size {
    let rows = rows.max(1) as f32;
    let gap = gap.max(MIN_ROW_GAP_PX);
    let needed = rows * card.height + (rows + 1.0) * gap;
    if needed <= available_height {
        return card;
    }
    let height = ((available_height - (rows + 1.0) * gap) / rows).max(0.0);
    Size::new(height / CARD_ASPECT_RATIO, height)
}

/// Solve card rectangles for a container.
///
/// Callers must pass positive dimensions; a zero-sized container means the
/// view is not ready yet and should not be laid out at all.
pub fn compute_layout(
    cards: CardsPerPage,
    width: f32,
    height: f32,
    device: DeviceClass,
    orientation: Orientation,
) -> Layout {
    let plan = plan(cards, device, orientation);
    let mag = magnification(width, height, device);
    let gap = (base_gap(device) * mag).max(MIN_ROW_GAP_PX);

    let cols = plan.cols as f32;
    let rows = plan.rows as f32;
    let cell_w = width / cols;
    let cell_h = height / rows;

    let fitted_w = ((width - (cols + 1.0) * gap) / cols).max(0.0) * plan.card_scale;
    let fitted = Size::new(fitted_w, fitted_w * CARD_ASPECT_RATIO);
    let card = enforce_vertical_spacing(fitted, plan.rows, height, gap);

    let region = |slot: Slot| {
        Rect::new(
            slot.col as f32 * cell_w,
            slot.row as f32 * cell_h,
            slot.col_span as f32 * cell_w,
            slot.row_span as f32 * cell_h,
        )
    };

    let static_rects = plan
        .statics
        .iter()
        .map(|&slot| Rect::centered(region(slot).center(), card))
        .collect();

    let match_region = region(plan.match_slot);
    let slack_x = ((match_region.width - card.width) / 2.0).max(0.0);
    let slack_y = ((match_region.height - card.height) / 2.0).max(0.0);
    let nudge_x = (plan.match_nudge.0 * mag).clamp(-slack_x, slack_x);
    let nudge_y = (plan.match_nudge.1 * mag).clamp(-slack_y, slack_y);
    let match_rect = Rect::centered(match_region.center(), card).translated(nudge_x, nudge_y);

    Layout {
        arrangement: plan.arrangement,
        match_rect,
        static_rects,
        card_size: card,
        magnification: mag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tablet_magnification_uses_long_side() {
        assert!((magnification(768.0, 1024.0, DeviceClass::Tablet) - 1.0).abs() < 1e-6);
        assert!((magnification(1536.0, 2048.0, DeviceClass::Tablet) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn phone_magnification_uses_short_side() {
        assert!((magnification(640.0, 1136.0, DeviceClass::Phone) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn vertical_spacing_leaves_fitting_cards_alone() {
        let card = Size::new(90.0, 120.0);
        assert_eq!(enforce_vertical_spacing(card, 2, 1000.0, 10.0), card);
    }

    #[test]
    fn vertical_spacing_shrinks_and_keeps_aspect() {
        let card = Size::new(300.0, 400.0);
        let fitted = enforce_vertical_spacing(card, 3, 430.0, 10.0);
        assert!((fitted.height - 130.0).abs() < 1e-4);
        assert!((fitted.height / fitted.width - CARD_ASPECT_RATIO).abs() < 1e-4);
    }

    #[test]
    fn vertical_spacing_gap_has_a_floor() {
        let card = Size::new(300.0, 400.0);
        // A 2px gap request still reserves 10px per gap.
        let fitted = enforce_vertical_spacing(card, 1, 220.0, 2.0);
        assert!((fitted.height - 200.0).abs() < 1e-4);
    }

    #[test]
    fn vertical_spacing_collapses_when_gaps_do_not_fit() {
        let fitted = enforce_vertical_spacing(Size::new(30.0, 40.0), 3, 20.0, 10.0);
        assert_eq!(fitted.height, 0.0);
        assert_eq!(fitted.width, 0.0);
    }

    #[test]
    fn four_up_picks_device_specific_arrangement() {
        let t = |d, o| compute_layout(CardsPerPage::Four, 1024.0, 768.0, d, o).arrangement;
        assert_eq!(
            t(DeviceClass::Tablet, Orientation::Landscape),
            Arrangement::QuadTabletLandscape
        );
        assert_eq!(
            t(DeviceClass::Tablet, Orientation::Portrait),
            Arrangement::QuadTabletPortrait
        );
        assert_eq!(
            t(DeviceClass::Phone, Orientation::Landscape),
            Arrangement::QuadPhoneLandscape
        );
        assert_eq!(
            t(DeviceClass::Phone, Orientation::Portrait),
            Arrangement::QuadPhonePortrait
        );
    }

    #[test]
    fn eight_up_reserves_the_center_for_the_match_card() {
        let layout = compute_layout(
            CardsPerPage::Eight,
            900.0,
            900.0,
            DeviceClass::Tablet,
            Orientation::Portrait,
        );
        let c = layout.match_rect.center();
        assert!((c.x - 450.0).abs() < 1e-3);
        assert!((c.y - 450.0).abs() < 1e-3);
        assert_eq!(layout.static_rects.len(), 8);
    }

    #[test]
    fn slot_at_finds_static_cards() {
        let layout = compute_layout(
            CardsPerPage::Two,
            400.0,
            600.0,
            DeviceClass::Phone,
            Orientation::Portrait,
        );
        let second = layout.static_rects[1].center();
        assert_eq!(layout.slot_at(second), Some(1));
        assert_eq!(layout.slot_at(layout.match_rect.center()), None);
    }
}

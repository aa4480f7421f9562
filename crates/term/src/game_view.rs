//! GameView: draws a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O). Layout rectangles are in pixels; one terminal cell stands
//! for [`PX_PER_COL`] × [`PX_PER_ROW`] pixels. The top row is a status line,
//! the bottom row the toolbar, and the play area sits in between.

use crate::core::{GameSnapshot, ImageCatalog, ImageResolver, MatchCardView, Phase, RenderCapability, StaticCardView};
use crate::fb::{BoxStyle, CellStyle, FrameBuffer, Rgb};
use crate::types::{CardFace, Point, Rect};

pub const PX_PER_COL: f32 = 8.0;
pub const PX_PER_ROW: f32 = 16.0;

const STATUS_ROWS: u16 = 1;
const TOOLBAR_ROWS: u16 = 1;

const BACKDROP: Rgb = Rgb::new(18, 18, 28);
const CARD_BG: Rgb = Rgb::new(38, 42, 62);
const CARD_FG: Rgb = Rgb::new(230, 230, 236);
const MATCHED_FG: Rgb = Rgb::new(120, 220, 140);
const MATCH_FG: Rgb = Rgb::new(110, 200, 240);
const HIGHLIGHT_FG: Rgb = Rgb::new(250, 210, 80);

/// Terminal viewport dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Size of the play area in layout pixels. Zero when the terminal is too
    /// small to hold anything between the status line and the toolbar.
    pub fn play_area_px(&self) -> (f32, f32) {
        let rows = self.height.saturating_sub(STATUS_ROWS + TOOLBAR_ROWS);
        (
            f32::from(self.width) * PX_PER_COL,
            f32::from(rows) * PX_PER_ROW,
        )
    }

    /// Layout-pixel center of terminal cell `(col, row)`, or `None` outside
    /// the play area.
    pub fn cell_to_px(&self, col: u16, row: u16) -> Option<Point> {
        let play_rows = self.height.saturating_sub(STATUS_ROWS + TOOLBAR_ROWS);
        if col >= self.width || row < STATUS_ROWS || row - STATUS_ROWS >= play_rows {
            return None;
        }
        Some(Point::new(
            (f32::from(col) + 0.5) * PX_PER_COL,
            (f32::from(row - STATUS_ROWS) + 0.5) * PX_PER_ROW,
        ))
    }
}

/// Cell-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRect {
    x: i32,
    y: i32,
    w: u16,
    h: u16,
}

impl CellRect {
    fn from_px(r: Rect) -> Self {
        let x0 = (r.x / PX_PER_COL).round() as i32;
        let y0 = (r.y / PX_PER_ROW).round() as i32;
        let x1 = (r.right() / PX_PER_COL).round() as i32;
        let y1 = (r.bottom() / PX_PER_ROW).round() as i32;
        Self {
            x: x0,
            y: y0 + i32::from(STATUS_ROWS),
            w: (x1 - x0).max(0) as u16,
            h: (y1 - y0).max(0) as u16,
        }
    }

    /// Narrow around the center (edge-on flip).
    fn squeezed(self, factor: f32) -> Self {
        if factor >= 1.0 || self.w == 0 {
            return self;
        }
        let w = ((f32::from(self.w) * factor.max(0.0)).round() as u16).max(1);
        Self {
            x: self.x + i32::from((self.w - w) / 2),
            w,
            ..self
        }
    }

    fn shifted(self, dx: i32) -> Self {
        Self {
            x: self.x + dx,
            ..self
        }
    }
}

/// Horizontal squash for a flip value.
fn flip_factor(capability: RenderCapability, flip: f32) -> f32 {
    match capability {
        RenderCapability::Renders2D => flip.abs().min(1.0),
        RenderCapability::Renders3D => flip.to_radians().cos().abs(),
    }
}

/// Column shift for a shake value.
fn shake_cols(capability: RenderCapability, shake: f32) -> i32 {
    let px = match capability {
        RenderCapability::Renders2D => shake,
        RenderCapability::Renders3D => shake * 2.0,
    };
    (px / PX_PER_COL).round() as i32
}

pub struct GameView {
    images: ImageCatalog,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(ImageCatalog::default())
    }
}

impl GameView {
    pub fn new(images: ImageCatalog) -> Self {
        Self { images }
    }

    pub fn images(&self) -> &ImageCatalog {
        &self.images
    }

    /// Render a frame. `caption` is what the player is currently saying, if anything.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        caption: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(CARD_FG, BACKDROP).into_cell(' '));

        self.draw_status(snap, caption, viewport, fb);
        self.draw_toolbar(snap, viewport, fb);

        if snap.phase == Phase::Idle {
            let style = CellStyle::new(CARD_FG, BACKDROP).dim();
            let y = i32::from(viewport.height / 2);
            fb.put_str_centered(0, y, viewport.width, "No words to play", style);
            return;
        }
        if snap.arrangement.is_none() {
            let style = CellStyle::new(CARD_FG, BACKDROP).dim();
            let y = i32::from(viewport.height / 2);
            fb.put_str_centered(0, y, viewport.width, "Window too small", style);
            return;
        }

        for card in &snap.statics {
            self.draw_static(snap, card, fb);
        }
        if let Some(card) = &snap.match_card {
            self.draw_match(snap, card, fb);
        }
    }

    fn style(&self, snap: &GameSnapshot, fg: Rgb) -> CellStyle {
        let mut style = CellStyle::new(fg, CARD_BG);
        if snap.large_text {
            style = style.bold();
        }
        style.faded(snap.opacity, BACKDROP)
    }

    fn draw_static(&self, snap: &GameSnapshot, card: &StaticCardView, fb: &mut FrameBuffer) {
        let rect = CellRect::from_px(card.rect)
            .squeezed(flip_factor(snap.capability, card.flip))
            .shifted(shake_cols(snap.capability, card.shake));

        let highlighted = snap.highlight == Some(card.slot);
        let fg = if highlighted {
            HIGHLIGHT_FG
        } else if card.is_matched {
            MATCHED_FG
        } else {
            CARD_FG
        };
        let border = if highlighted {
            BoxStyle::Heavy
        } else {
            BoxStyle::Light
        };
        let style = self.style(snap, fg);
        fb.fill_rect(rect.x, rect.y, rect.w, rect.h, ' ', style);
        fb.draw_box(rect.x, rect.y, rect.w, rect.h, border, style);
        self.draw_face(card.face, &card.image, &card.text, rect, style, fb);
        // Slot number for the tap keys.
        fb.put_str(rect.x + 1, rect.y, &format!("{}", card.slot + 1), 1, style);
    }

    fn draw_match(&self, snap: &GameSnapshot, card: &MatchCardView, fb: &mut FrameBuffer) {
        let rect = CellRect::from_px(card.rect).squeezed(flip_factor(snap.capability, card.flip));
        let fg = if snap.match_highlighted {
            HIGHLIGHT_FG
        } else {
            MATCH_FG
        };
        let mut style = self.style(snap, fg);
        if card.dragging {
            style = style.bold();
        }
        let border = if snap.match_highlighted {
            BoxStyle::Heavy
        } else {
            BoxStyle::Double
        };
        fb.fill_rect(rect.x, rect.y, rect.w, rect.h, ' ', style);
        fb.draw_box(rect.x, rect.y, rect.w, rect.h, border, style);
        self.draw_face(card.face, &card.image, &card.text, rect, style, fb);
    }

    fn draw_face(
        &self,
        face: CardFace,
        image: &str,
        text: &str,
        rect: CellRect,
        style: CellStyle,
        fb: &mut FrameBuffer,
    ) {
        if rect.w < 3 || rect.h < 3 {
            return;
        }
        let inner_w = rect.w - 2;
        let inner_x = rect.x + 1;
        let mid = rect.y + i32::from(rect.h / 2);
        let source = self.images.resolve(image);
        let glyph = format!("{} {}", source.glyph, source.label);

        match face {
            CardFace::Image => fb.put_str_centered(inner_x, mid, inner_w, &glyph, style),
            CardFace::Text => fb.put_str_centered(inner_x, mid, inner_w, text, style),
            CardFace::ImageAndText => {
                let top = if rect.h > 4 { mid - 1 } else { mid };
                fb.put_str_centered(inner_x, top, inner_w, &glyph, style);
                fb.put_str_centered(inner_x, top + 1, inner_w, text, style.bold());
            }
            CardFace::Blank => {
                fb.fill_rect(inner_x, rect.y + 1, inner_w, rect.h - 2, '░', style.dim());
                fb.put_str_centered(inner_x, mid, inner_w, "♪", style.bold());
            }
        }
    }

    fn draw_status(&self, snap: &GameSnapshot, caption: Option<&str>, viewport: Viewport, fb: &mut FrameBuffer) {
        let style = CellStyle::new(CARD_FG, Rgb::new(30, 30, 46));
        fb.fill_rect(0, 0, viewport.width, STATUS_ROWS, ' ', style);

        let mut line = if snap.group_len == 0 {
            String::from(" Makaton Match")
        } else {
            format!(
                " Makaton Match · words {}-{} of {} · card {}/{}",
                snap.group_start + 1,
                snap.group_start + snap.group_len,
                snap.word_count,
                snap.level,
                snap.target_count,
            )
        };
        if snap.phase == Phase::RoundComplete {
            line.push_str(" · well done!");
        }
        if snap.locked {
            line.push_str(" · LOCKED");
        }
        if let Some(caption) = caption {
            line.push_str(&format!(" · ♪ {caption}"));
        }
        fb.put_str(0, 0, &line, viewport.width as usize, style);
    }

    fn draw_toolbar(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let y = i32::from(viewport.height) - 1;
        if y < i32::from(STATUS_ROWS) {
            return;
        }
        let base = CellStyle::new(CARD_FG, Rgb::new(30, 30, 46));
        fb.fill_rect(0, y, viewport.width, TOOLBAR_ROWS, ' ', base);

        let t = snap.toolbar;
        let lock_label = if snap.locked { "[L] unlock" } else { "[L] lock" };
        let items = [
            ("[Home] start", t.start),
            ("[PgUp] prev", t.previous),
            ("[PgDn] next", t.next),
            ("[End] end", t.end),
            (lock_label, t.lock),
            ("[r] refresh", t.refresh),
        ];
        let mut x = 1;
        for (label, enabled) in items {
            let style = if enabled { base.bold() } else { base.dim() };
            let remaining = (i32::from(viewport.width) - x).max(0) as usize;
            fb.put_str(x, y, label, remaining, style);
            x += label.chars().count() as i32 + 2;
        }
    }
}

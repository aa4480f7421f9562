//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend towards `other`; `t = 0` keeps `self`, `t = 1` gives `other`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

/// Per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(225, 225, 225),
            bg: Rgb::new(18, 18, 28),
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }

    /// Fade both colors towards `backdrop` as `opacity` drops to 0.
    pub fn faded(self, opacity: f32, backdrop: Rgb) -> Self {
        if opacity >= 1.0 {
            return self;
        }
        let t = 1.0 - opacity.max(0.0);
        Self {
            fg: self.fg.mix(backdrop, t),
            bg: self.bg.mix(backdrop, t),
            ..self
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// Border glyph sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    Light,
    Heavy,
    Double,
}

impl BoxStyle {
    /// Corners and edges: top-left, top-right, bottom-left, bottom-right, horizontal, vertical.
    fn glyphs(self) -> [char; 6] {
        match self {
            BoxStyle::Light => ['┌', '┐', '└', '┘', '─', '│'],
            BoxStyle::Heavy => ['┏', '┓', '┗', '┛', '━', '┃'],
            BoxStyle::Double => ['╔', '╗', '╚', '╝', '═', '║'],
        }
    }
}

/// 2D grid of styled character cells. Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are unspecified
    /// afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(i32::from(x), i32::from(y)).map(|i| self.cells[i])
    }

    /// Set a cell at signed coordinates (cards may hang off the edge mid-drag).
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.set(x, y, style.into_cell(ch));
    }

    /// Write `s` starting at `x`, clipped to `max_width` characters.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, max_width: usize, style: CellStyle) {
        for (i, ch) in s.chars().take(max_width).enumerate() {
            self.put_char(x + i as i32, y, ch, style);
        }
    }

    /// Write `s` centered within `[x, x + width)`, clipped to fit.
    pub fn put_str_centered(&mut self, x: i32, y: i32, width: u16, s: &str, style: CellStyle) {
        let len = s.chars().count().min(width as usize);
        let pad = (width as usize - len) / 2;
        self.put_str(x + pad as i32, y, s, len, style);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..i32::from(h) {
            for dx in 0..i32::from(w) {
                self.put_char(x + dx, y + dy, ch, style);
            }
        }
    }

    /// Draw a border around `[x, x + w) × [y, y + h)`. Boxes narrower or
    /// shorter than two cells degrade to a filled bar.
    pub fn draw_box(&mut self, x: i32, y: i32, w: u16, h: u16, kind: BoxStyle, style: CellStyle) {
        if w == 0 || h == 0 {
            return;
        }
        let [tl, tr, bl, br, hz, vt] = kind.glyphs();
        if w < 2 || h < 2 {
            let ch = if w < 2 { vt } else { hz };
            self.fill_rect(x, y, w, h, ch, style);
            return;
        }
        let (right, bottom) = (x + i32::from(w) - 1, y + i32::from(h) - 1);
        for cx in x + 1..right {
            self.put_char(cx, y, hz, style);
            self.put_char(cx, bottom, hz, style);
        }
        for cy in y + 1..bottom {
            self.put_char(x, cy, vt, style);
            self.put_char(right, cy, vt, style);
        }
        self.put_char(x, y, tl, style);
        self.put_char(right, y, tr, style);
        self.put_char(x, bottom, bl, style);
        self.put_char(right, bottom, br, style);
    }
}

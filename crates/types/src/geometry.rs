//! Pixel-space geometry shared by the layout solver and the renderers.

use serde::{Deserialize, Serialize};

use crate::TABLET_MIN_SHORT_SIDE_PX;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive hit test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Interior overlap. Rectangles that only share an edge do not intersect;
    /// `epsilon` absorbs float noise from the solver.
    pub fn intersects(&self, other: &Rect, epsilon: f32) -> bool {
        self.x < other.right() - epsilon
            && other.x < self.right() - epsilon
            && self.y < other.bottom() - epsilon
            && other.y < self.bottom() - epsilon
    }

    pub fn within(&self, width: f32, height: f32, epsilon: f32) -> bool {
        self.x >= -epsilon
            && self.y >= -epsilon
            && self.right() <= width + epsilon
            && self.bottom() <= height + epsilon
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Scale around the center.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::centered(
            self.center(),
            Size::new(self.width * factor, self.height * factor),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Phone,
    Tablet,
}

impl DeviceClass {
    /// Classify by the shortest container side.
    pub fn from_size(width: f32, height: f32) -> Self {
        if width.min(height) >= TABLET_MIN_SHORT_SIDE_PX {
            DeviceClass::Tablet
        } else {
            DeviceClass::Phone
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "phone" => Some(DeviceClass::Phone),
            "tablet" => Some(DeviceClass::Tablet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Square containers count as portrait.
    pub fn from_size(width: f32, height: f32) -> Self {
        if height >= width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    pub fn is_portrait(self) -> bool {
        self == Orientation::Portrait
    }
}

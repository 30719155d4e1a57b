//! Rectangle geometry and playfield containment
//!
//! Every entity occupies an axis-aligned `Rect` described by its center and
//! size. The playfield is an explicit `Bounds` value handed to whoever needs
//! it.

use glam::Vec2;

/// Direction used when a source and target coincide
pub const FALLBACK_DIRECTION: Vec2 = Vec2::Y;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.size / 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Strict overlap test: rectangles that only share an edge do not touch
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// The visible playfield, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(crate::consts::FIELD_WIDTH, crate::consts::FIELD_HEIGHT)
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Per-axis containment: (horizontal inside, vertical inside)
    pub fn check(&self, rect: &Rect) -> (bool, bool) {
        let horizontal = rect.left() >= 0.0 && rect.right() <= self.width;
        let vertical = rect.top() >= 0.0 && rect.bottom() <= self.height;
        (horizontal, vertical)
    }

    /// Both extents lie inside the field
    pub fn contains(&self, rect: &Rect) -> bool {
        self.check(rect) == (true, true)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// A rectangle covering the whole field
    pub fn full_rect(&self) -> Rect {
        Rect::new(self.center(), Vec2::new(self.width, self.height))
    }
}

/// Unit vector pointing from `from` toward `to`.
///
/// Coincident points have no direction; they resolve to
/// [`FALLBACK_DIRECTION`] (straight down the screen).
pub fn orientation(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(FALLBACK_DIRECTION)
}

//! Axis-aligned geometry for the rectangular playing field
//!
//! Screen space: origin at the top-left, +x to the right, +y downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box described by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Overlap test. Boxes that only touch along an edge count as overlapping.
    ///
    /// The box is rejected as soon as it lies entirely left of, right of,
    /// above or below `other`; the order of those checks does not matter.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.right() < other.left() {
            return false;
        }
        if self.left() > other.right() {
            return false;
        }
        if self.bottom() < other.top() {
            return false;
        }
        if self.top() > other.bottom() {
            return false;
        }
        true
    }
}

/// Dimensions of the playing area, fixed for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl FieldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Clamp the top edge of a box of `height` so the box stays inside the field
    #[inline]
    pub fn clamp_top(&self, top: f32, height: f32) -> f32 {
        top.clamp(0.0, (self.height - height).max(0.0))
    }
}

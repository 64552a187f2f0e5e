//! Axis-aligned rectangle geometry for paddles and the ball
//!
//! Screen space: origin at the top-left of the field, y grows downward.
//! A rectangle is stored as its top-left corner plus its size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Overlap test; touching edges count as a hit
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }
}

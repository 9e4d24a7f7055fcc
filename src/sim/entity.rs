//! Axis-aligned geometry and the base moving entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Build from top-left position and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// True when both axes overlap by a non-zero amount.
    ///
    /// Touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// A positioned, sized, moving object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "entity size must be positive");
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Advance one frame along the current velocity
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

//! Shared transform component
//!
//! Every entity (tile, frog, tongue) embeds a `Transform`. The position is
//! the entity's pivot: the centre for the frog, the base for the tongue and
//! the top-left corner for tiles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate_about;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub pos: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Bounding width (never negative)
    pub width: f32,
    /// Bounding height (never negative)
    pub height: f32,
}

impl Transform {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            rotation: 0.0,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Map a local offset around `pos` into world space
    #[inline]
    pub fn rotate_point(&self, local: Vec2) -> Vec2 {
        rotate_about(self.pos, self.rotation, local)
    }

    /// Half of the bounding diagonal; a radius that covers the shape at any rotation
    #[inline]
    pub fn broad_radius(&self) -> f32 {
        Vec2::new(self.width, self.height).length() / 2.0
    }

    /// Set the bounding height, clamping at zero
    pub fn set_height(&mut self, height: f32) {
        self.height = height.max(0.0);
    }
}

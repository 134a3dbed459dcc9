//! Tiles: the blocks the frog grabs and throws

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Collider, Obb};
use super::transform::Transform;
use crate::config::TileParams;

/// Stable handle to a tile slot in the grid arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub usize);

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    /// Grabbable block
    #[default]
    Solid,
    /// Takes two projectile hits, cannot be grabbed
    Hardened,
    /// Carried by the tongue
    Held,
    /// Launched, moving freely
    Projectile,
    /// Destroyed; never drawn, never collides
    Empty,
}

impl TileKind {
    /// Kinds that projectiles hit and the tongue can touch
    #[inline]
    pub fn is_target(&self) -> bool {
        matches!(self, TileKind::Solid | TileKind::Hardened)
    }

    /// Whether the tongue can latch onto this kind
    #[inline]
    pub fn is_grabbable(&self) -> bool {
        matches!(self, TileKind::Solid)
    }
}

/// A single grid cell block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    /// Top-left corner; `width == height == size`
    pub transform: Transform,
    pub velocity: Vec2,
    /// Hit points (only hardened tiles lose them)
    pub hp: u8,
    pub is_moving: bool,
    pub bounce_count: u32,
    pub max_bounces: u32,
}

impl Tile {
    pub fn new(id: TileId, pos: Vec2, size: f32, kind: TileKind, params: &TileParams) -> Self {
        Self {
            id,
            kind,
            transform: Transform::new(pos, size, size),
            velocity: Vec2::ZERO,
            hp: if kind == TileKind::Hardened {
                params.hardened_hp
            } else {
                1
            },
            is_moving: false,
            bounce_count: 0,
            max_bounces: params.max_bounces,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.transform.pos
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.transform.width
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.transform.pos + Vec2::splat(self.size() / 2.0)
    }

    /// Place the tile so its centre sits on `point`
    pub fn center_on(&mut self, point: Vec2) {
        self.transform.pos = point - Vec2::splat(self.size() / 2.0);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == TileKind::Empty
    }

    pub fn obb(&self) -> Obb {
        Obb::new(
            self.center(),
            Vec2::splat(self.size()),
            self.transform.rotation,
        )
    }

    /// Linear motion; only moving tiles advance
    pub fn advance(&mut self, dt: f32) {
        if !self.is_moving {
            return;
        }
        self.transform.pos += self.velocity * dt;
    }

    /// Launch along `direction` (unit) at `speed`
    pub fn launch(&mut self, direction: Vec2, speed: f32) {
        self.velocity = direction * speed;
        self.is_moving = true;
        self.kind = TileKind::Projectile;
    }

    /// Count one bounce. Returns true if this bounce destroyed the tile.
    pub fn register_bounce(&mut self) -> bool {
        self.bounce_count += 1;
        if self.bounce_count >= self.max_bounces {
            self.destroy();
            return true;
        }
        false
    }

    /// Terminal: stop and vanish
    pub fn destroy(&mut self) {
        self.is_moving = false;
        self.velocity = Vec2::ZERO;
        self.kind = TileKind::Empty;
    }

    /// Take one projectile hit. Returns true when the hit empties the tile.
    pub fn absorb_hit(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.kind = TileKind::Empty;
            return true;
        }
        false
    }
}

impl Collider for Tile {
    fn vertices(&self) -> Vec<Vec2> {
        if self.is_empty() {
            return Vec::new();
        }
        self.obb().vertices()
    }

    fn broad_bounds(&self) -> Aabb {
        Aabb::around(self.center(), self.transform.broad_radius())
    }
}

/// Flip the projectile's velocity on the axis of greater centre delta.
///
/// Not a true surface-normal reflection: a tie between |dx| and |dy| flips Y.
pub fn reflect_dominant_axis(velocity: Vec2, projectile_center: Vec2, target_center: Vec2) -> Vec2 {
    let delta = projectile_center - target_center;
    if delta.x.abs() > delta.y.abs() {
        Vec2::new(-velocity.x, velocity.y)
    } else {
        Vec2::new(velocity.x, -velocity.y)
    }
}

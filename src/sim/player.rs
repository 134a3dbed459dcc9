//! The frog and its tongue
//!
//! The frog sweeps back and forth between its rotation bounds. The tongue
//! follows the frog's pivot and aim and runs a small state machine:
//!
//! ```text
//! Idle -> Extending -> Retracting -> Idle
//!                                 \-> Loaded -> (shoot) -> Idle
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Collider, Obb};
use super::grid::TileGrid;
use super::state::GameEvent;
use super::tile::{TileId, TileKind};
use super::transform::Transform;
use crate::config::{FrogParams, TongueParams};
use crate::facing;

/// Frog animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrogState {
    #[default]
    Idle,
    /// Reserved: only entered through `GameState::end_run`
    Dead,
}

impl FrogState {
    /// Sprite sheet frame names for this state, in playback order
    pub fn frames(&self) -> &'static [&'static str] {
        match self {
            FrogState::Idle => &["fwoggie 1.png", "fwoggie 2.png", "fwoggie 3.png"],
            FrogState::Dead => &["fwoggie dead.png"],
        }
    }

    pub fn loops(&self) -> bool {
        matches!(self, FrogState::Idle)
    }
}

/// The player: a rotating paddle that aims the tongue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frog {
    /// Pivot at the frog's centre
    pub transform: Transform,
    pub size: f32,
    pub min_rot: f32,
    pub max_rot: f32,
    /// +1 or -1
    pub rot_direction: f32,
    pub rot_speed: f32,
    /// Cleared while the tongue is out
    pub can_rotate: bool,
    pub state: FrogState,
    pub frame_index: usize,
    pub anim_timer: f32,
    pub anim_speed: f32,
}

impl Frog {
    pub fn new(params: &FrogParams) -> Self {
        Self {
            transform: Transform::new(
                Vec2::new(params.x, params.y),
                params.size + 10.0,
                params.size,
            ),
            size: params.size,
            min_rot: params.min_rot,
            max_rot: params.max_rot,
            rot_direction: 1.0,
            rot_speed: params.rot_speed,
            can_rotate: true,
            state: FrogState::Idle,
            frame_index: 0,
            anim_timer: 0.0,
            anim_speed: params.anim_speed,
        }
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    /// Current sprite frame name
    pub fn frame_name(&self) -> &'static str {
        let frames = self.state.frames();
        frames[self.frame_index.min(frames.len() - 1)]
    }

    /// Advance animation, then sweep rotation if unlocked
    pub fn update(&mut self, dt: f32) {
        self.animate(dt);

        if !self.can_rotate {
            return;
        }

        let rotation = self.transform.rotation + self.rot_direction * self.rot_speed * dt;
        self.transform.rotation = if rotation >= self.max_rot {
            self.rot_direction = -1.0;
            self.max_rot
        } else if rotation <= self.min_rot {
            self.rot_direction = 1.0;
            self.min_rot
        } else {
            rotation
        };
    }

    fn animate(&mut self, dt: f32) {
        self.anim_timer += dt;
        if self.anim_timer < self.anim_speed {
            return;
        }
        self.anim_timer = 0.0;

        let count = self.state.frames().len();
        self.frame_index += 1;
        if self.frame_index >= count {
            self.frame_index = if self.state.loops() { 0 } else { count - 1 };
        }
    }

    /// Switch to the death animation and stop aiming
    pub fn die(&mut self) {
        self.state = FrogState::Dead;
        self.frame_index = 0;
        self.anim_timer = 0.0;
        self.can_rotate = false;
    }
}

impl Collider for Frog {
    fn vertices(&self) -> Vec<Vec2> {
        Obb::new(self.transform.pos, Vec2::splat(self.size), self.rotation()).vertices()
    }

    fn broad_bounds(&self) -> Aabb {
        Aabb::around(self.transform.pos, self.transform.broad_radius())
    }
}

/// Tongue state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TongueState {
    #[default]
    Idle,
    Extending,
    Retracting,
    /// Back in the mouth with a tile ready to shoot
    Loaded,
}

/// The frog's tongue. Holds at most one tile, by handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tongue {
    /// Base at the frog's pivot; `height` tracks `length`
    pub transform: Transform,
    pub length: f32,
    pub state: TongueState,
    pub attached: Option<TileId>,
    pub params: TongueParams,
}

impl Tongue {
    pub fn new(frog: &Frog, params: TongueParams) -> Self {
        let mut transform = Transform::new(frog.transform.pos, params.width, 0.0);
        transform.rotation = frog.rotation();
        Self {
            transform,
            length: 0.0,
            state: TongueState::Idle,
            attached: None,
            params,
        }
    }

    /// World-space tip of the tongue
    pub fn tip(&self) -> Vec2 {
        self.transform.rotate_point(Vec2::new(0.0, -self.length))
    }

    /// Where a loaded tile is parked
    pub fn mouth(&self) -> Vec2 {
        self.transform
            .rotate_point(Vec2::new(0.0, -self.params.mouth_offset))
    }

    pub fn start_retracting(&mut self) {
        self.state = TongueState::Retracting;
    }

    /// Latch onto a tile and start reeling it in
    pub fn grab(&mut self, id: TileId, grid: &mut TileGrid) {
        if let Some(tile) = grid.get_mut(id) {
            tile.kind = TileKind::Held;
            self.attached = Some(id);
        }
        self.state = TongueState::Retracting;
    }

    /// Launch the attached tile along the frog's aim.
    ///
    /// Returns the launched tile, or `None` if nothing valid was attached.
    pub fn shoot_tile(&mut self, grid: &mut TileGrid) -> Option<TileId> {
        let id = self.attached.take()?;
        let tile = grid.get_mut(id).filter(|t| t.kind == TileKind::Held)?;
        tile.launch(facing(self.transform.rotation), self.params.shoot_speed);
        self.state = TongueState::Idle;
        Some(id)
    }

    /// Advance the state machine by one tick
    pub fn update(
        &mut self,
        dt: f32,
        action_pressed: bool,
        frog: &mut Frog,
        grid: &mut TileGrid,
        events: &mut Vec<GameEvent>,
    ) {
        self.transform.pos = frog.transform.pos;
        self.transform.rotation = frog.rotation();

        if action_pressed {
            match self.state {
                TongueState::Idle => {
                    self.state = TongueState::Extending;
                    events.push(GameEvent::TongueLaunched);
                }
                TongueState::Loaded => {
                    if let Some(id) = self.shoot_tile(grid) {
                        log::debug!("Shot tile {:?}", id);
                        events.push(GameEvent::TileShot { tile: id });
                        return;
                    }
                }
                _ => {}
            }
        }

        match self.state {
            TongueState::Idle => {}

            TongueState::Loaded => self.hold_at_mouth(grid),

            TongueState::Extending => {
                frog.can_rotate = false;
                self.length = (self.length + self.params.extend_speed * dt)
                    .clamp(0.0, self.params.max_length);
                if self.length >= self.params.max_length {
                    self.state = TongueState::Retracting;
                }
            }

            TongueState::Retracting => {
                self.length = (self.length - self.params.retract_speed * dt)
                    .clamp(0.0, self.params.max_length);
                self.carry_to(self.tip(), grid);

                if self.length <= 0.0 {
                    frog.can_rotate = true;
                    if let Some(id) = self.attached {
                        self.state = TongueState::Loaded;
                        self.hold_at_mouth(grid);
                        log::debug!("Tile {:?} loaded", id);
                        events.push(GameEvent::TileLoaded { tile: id });
                    } else {
                        self.state = TongueState::Idle;
                    }
                }
            }
        }

        self.transform.set_height(self.length);
    }

    /// Keep the loaded tile at the mouth; fall back to idle if it is gone
    fn hold_at_mouth(&mut self, grid: &mut TileGrid) {
        let mouth = self.mouth();
        if !self.carry_to(mouth, grid) {
            self.attached = None;
            self.state = TongueState::Idle;
        }
    }

    /// Centre the attached tile on `point`. Drops a stale handle and returns false.
    fn carry_to(&mut self, point: Vec2, grid: &mut TileGrid) -> bool {
        let Some(id) = self.attached else {
            return false;
        };
        match grid.get_mut(id).filter(|t| t.kind == TileKind::Held) {
            Some(tile) => {
                tile.center_on(point);
                true
            }
            None => {
                self.attached = None;
                false
            }
        }
    }
}

impl Collider for Tongue {
    fn vertices(&self) -> Vec<Vec2> {
        if self.length <= 0.0 {
            return Vec::new();
        }
        // Extends "up" (local -Y) from the base
        let half = self.params.width / 2.0;
        [
            Vec2::new(-half, 0.0),
            Vec2::new(half, 0.0),
            Vec2::new(half, -self.length),
            Vec2::new(-half, -self.length),
        ]
        .into_iter()
        .map(|v| self.transform.rotate_point(v))
        .collect()
    }

    /// Covers the full reach around the base at any rotation
    fn broad_bounds(&self) -> Aabb {
        Aabb::around(self.transform.pos, self.length + self.params.width)
    }
}

//! Tongue Punch - A frog-tongue tile arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, interactions, game state)
//! - `config`: Data-driven game tuning
//! - `atlas`: Sprite sheet frame lookup
//! - `renderer`: Read-only draw data for the canvas host

pub mod atlas;
pub mod config;
pub mod renderer;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use atlas::{AtlasError, FrameAtlas, FrameRect};
pub use config::{ConfigError, GameConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed to a single tick (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas and play area (the playable strip is centred in the canvas)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    pub const PLAY_WIDTH: f32 = 500.0;

    /// Frog defaults
    pub const FROG_X: f32 = 400.0;
    pub const FROG_Y: f32 = 350.0;
    pub const FROG_SIZE: f32 = 50.0;
    pub const FROG_MAX_ROT_DEG: f32 = 70.0;
    pub const FROG_ROT_SPEED: f32 = 2.5; // radians per second
    pub const FROG_ANIM_SPEED: f32 = 0.2; // seconds per frame

    /// Tongue defaults
    pub const TONGUE_WIDTH: f32 = 8.0;
    pub const TONGUE_EXTEND_SPEED: f32 = 400.0;
    pub const TONGUE_RETRACT_SPEED: f32 = 600.0;
    pub const TONGUE_MAX_LENGTH: f32 = 350.0;
    pub const TONGUE_SHOOT_SPEED: f32 = 600.0;
    /// Distance in front of the frog where a caught tile is parked
    pub const TONGUE_MOUTH_OFFSET: f32 = 20.0;
    /// Size of the probe box used for the tip-vs-wall test
    pub const TONGUE_TIP_PROBE: f32 = 10.0;

    /// Tile defaults
    pub const TILE_SIZE: f32 = 30.0;
    pub const TILE_GAP: f32 = 2.0;
    pub const TILE_MAX_BOUNCES: u32 = 5;
    pub const HARDENED_HP: u8 = 2;
    pub const HARDENED_CHANCE: f64 = 0.3;
}

/// Rotate a local offset by `rotation` and translate it to `origin`
#[inline]
pub fn rotate_about(origin: Vec2, rotation: f32, local: Vec2) -> Vec2 {
    let (sin, cos) = rotation.sin_cos();
    Vec2::new(
        origin.x + local.x * cos - local.y * sin,
        origin.y + local.x * sin + local.y * cos,
    )
}

/// Unit vector the frog faces for a given rotation (local "up" is -Y)
#[inline]
pub fn facing(rotation: f32) -> Vec2 {
    Vec2::new(rotation.sin(), -rotation.cos())
}

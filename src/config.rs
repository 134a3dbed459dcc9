//! Game tuning and configuration
//!
//! Every rate and size the simulation uses lives here. Defaults come from
//! [`crate::consts`]; hosts may override any subset from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{GridParams, PlayArea};

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("play area is empty (left {left}, right {right}, top {top}, bottom {bottom})")]
    InvalidPlayArea {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} is out of range: {value}")]
    InvalidRange { field: &'static str, value: f64 },
}

/// Frog placement, aiming sweep and animation timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrogParams {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Lower rotation bound (radians)
    pub min_rot: f32,
    /// Upper rotation bound (radians)
    pub max_rot: f32,
    /// Sweep speed (radians per second)
    pub rot_speed: f32,
    /// Seconds per animation frame
    pub anim_speed: f32,
}

impl Default for FrogParams {
    fn default() -> Self {
        Self {
            x: FROG_X,
            y: FROG_Y,
            size: FROG_SIZE,
            min_rot: -FROG_MAX_ROT_DEG.to_radians(),
            max_rot: FROG_MAX_ROT_DEG.to_radians(),
            rot_speed: FROG_ROT_SPEED,
            anim_speed: FROG_ANIM_SPEED,
        }
    }
}

/// Tongue rates. Fixed for the lifetime of a tongue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TongueParams {
    pub width: f32,
    pub extend_speed: f32,
    pub retract_speed: f32,
    pub max_length: f32,
    pub shoot_speed: f32,
    pub mouth_offset: f32,
    pub tip_probe: f32,
}

impl Default for TongueParams {
    fn default() -> Self {
        Self {
            width: TONGUE_WIDTH,
            extend_speed: TONGUE_EXTEND_SPEED,
            retract_speed: TONGUE_RETRACT_SPEED,
            max_length: TONGUE_MAX_LENGTH,
            shoot_speed: TONGUE_SHOOT_SPEED,
            mouth_offset: TONGUE_MOUTH_OFFSET,
            tip_probe: TONGUE_TIP_PROBE,
        }
    }
}

/// Per-tile tuning shared by every cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileParams {
    pub max_bounces: u32,
    pub hardened_hp: u8,
}

impl Default for TileParams {
    fn default() -> Self {
        Self {
            max_bounces: TILE_MAX_BOUNCES,
            hardened_hp: HARDENED_HP,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub play_area: PlayArea,
    pub grid: GridParams,
    pub frog: FrogParams,
    pub tongue: TongueParams,
    pub tile: TileParams,
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs the simulation cannot run with.
    ///
    /// Grid rows/cols are not checked: a non-positive count builds an
    /// empty grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let area = &self.play_area;
        if area.left >= area.right || area.top >= area.bottom {
            return Err(ConfigError::InvalidPlayArea {
                left: area.left,
                right: area.right,
                top: area.top,
                bottom: area.bottom,
            });
        }

        let positive = [
            ("frog.size", self.frog.size),
            ("frog.anim_speed", self.frog.anim_speed),
            ("tongue.width", self.tongue.width),
            ("tongue.extend_speed", self.tongue.extend_speed),
            ("tongue.retract_speed", self.tongue.retract_speed),
            ("tongue.max_length", self.tongue.max_length),
            ("tongue.shoot_speed", self.tongue.shoot_speed),
            ("tongue.tip_probe", self.tongue.tip_probe),
            ("grid.cell_size", self.grid.cell_size),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.frog.rot_speed.is_nan() || self.frog.rot_speed < 0.0 {
            return Err(ConfigError::InvalidRange {
                field: "frog.rot_speed",
                value: self.frog.rot_speed as f64,
            });
        }
        if self.frog.min_rot.is_nan() || self.frog.min_rot > self.frog.max_rot {
            return Err(ConfigError::InvalidRange {
                field: "frog.min_rot",
                value: self.frog.min_rot as f64,
            });
        }
        if !(0.0..=1.0).contains(&self.grid.hardened_chance) {
            return Err(ConfigError::InvalidRange {
                field: "grid.hardened_chance",
                value: self.grid.hardened_chance,
            });
        }

        Ok(())
    }
}

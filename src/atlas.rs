//! Sprite sheet frame lookup
//!
//! The asset loader hands us the sheet's JSON metadata (TexturePacker hash
//! format). Each frame name maps to a source rectangle in pixels:
//!
//! ```json
//! { "frames": { "fwoggie 1.png": { "frame": { "x": 0, "y": 0, "w": 64, "h": 64 } } } }
//! ```
//!
//! A lookup for a name that is not in the sheet is an asset mismatch and is
//! reported as an error, never skipped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("failed to parse atlas metadata: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sprite frame {0:?} is not in the atlas")]
    MissingFrame(String),
}

/// Source rectangle of one frame, in sheet pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Deserialize)]
struct AtlasFile {
    frames: HashMap<String, AtlasFrame>,
}

#[derive(Debug, Deserialize)]
struct AtlasFrame {
    frame: FrameRect,
}

#[derive(Debug, Clone, Default)]
pub struct FrameAtlas {
    frames: HashMap<String, FrameRect>,
}

impl FrameAtlas {
    pub fn from_json(json: &str) -> Result<Self, AtlasError> {
        let file: AtlasFile = serde_json::from_str(json)?;
        let frames = file
            .frames
            .into_iter()
            .map(|(name, entry)| (name, entry.frame))
            .collect::<HashMap<_, _>>();
        log::info!("Loaded atlas with {} frames", frames.len());
        Ok(Self { frames })
    }

    pub fn frame(&self, name: &str) -> Result<FrameRect, AtlasError> {
        self.frames
            .get(name)
            .copied()
            .ok_or_else(|| AtlasError::MissingFrame(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

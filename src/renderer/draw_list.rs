//! Draw list generation
//!
//! Flattens a `GameState` into paint-ordered items for a 2D canvas host.

use glam::Vec2;
use serde::Serialize;

use crate::atlas::{AtlasError, FrameAtlas, FrameRect};
use crate::consts::TILE_GAP;
use crate::sim::{GameState, Tile, TileKind};

const SOLID_COLOR: u32 = 0x2e7d32;
const HARDENED_FULL_COLOR: u32 = 0x5e501b;
const HARDENED_CRACKED_COLOR: u32 = 0x8d6e63;
const HELD_COLOR: u32 = 0x66bb6a;
const PROJECTILE_COLOR: u32 = 0xc62828;
const TONGUE_COLOR: u32 = 0xff80ab;
const TONGUE_TIP_COLOR: u32 = 0xff4081;

/// One paint operation, in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawItem {
    /// Axis-aligned filled square, already inset by the grid gap
    Tile { pos: Vec2, size: f32, color: u32 },
    /// Tongue strip from the base outwards along `rotation`, with a wider tip
    Tongue {
        base: Vec2,
        rotation: f32,
        width: f32,
        length: f32,
        color: u32,
        tip_color: u32,
    },
    /// Sprite frame centred on `center`
    Frog {
        center: Vec2,
        rotation: f32,
        size: f32,
        frame: FrameRect,
    },
}

fn tile_color(tile: &Tile) -> Option<u32> {
    match tile.kind {
        TileKind::Empty => None,
        TileKind::Solid => Some(SOLID_COLOR),
        TileKind::Hardened if tile.hp >= 2 => Some(HARDENED_FULL_COLOR),
        TileKind::Hardened => Some(HARDENED_CRACKED_COLOR),
        TileKind::Held => Some(HELD_COLOR),
        TileKind::Projectile => Some(PROJECTILE_COLOR),
    }
}

fn tile_item(tile: &Tile) -> Option<DrawItem> {
    let color = tile_color(tile)?;
    Some(DrawItem::Tile {
        pos: tile.pos() + Vec2::splat(TILE_GAP),
        size: (tile.size() - TILE_GAP * 2.0).max(0.0),
        color,
    })
}

/// Build the draw list for the current frame.
///
/// Order: board tiles, the tile on the tongue, the frog, the tongue. The frog
/// is left out until an atlas is available; a frame name the atlas does not
/// know is an error.
pub fn build_draw_list(
    state: &GameState,
    atlas: Option<&FrameAtlas>,
) -> Result<Vec<DrawItem>, AtlasError> {
    let mut items = Vec::with_capacity(state.grid.len() + 2);

    let on_top = |tile: &Tile| {
        tile.kind == TileKind::Held || state.tongue.attached == Some(tile.id)
    };

    items.extend(
        state
            .grid
            .tiles()
            .iter()
            .filter(|&tile| !on_top(tile))
            .filter_map(tile_item),
    );
    items.extend(
        state
            .grid
            .tiles()
            .iter()
            .filter(|&tile| on_top(tile))
            .filter_map(tile_item),
    );

    if let Some(atlas) = atlas {
        let frog = &state.frog;
        items.push(DrawItem::Frog {
            center: frog.transform.pos,
            rotation: frog.rotation(),
            size: frog.size,
            frame: atlas.frame(frog.frame_name())?,
        });
    }

    let tongue = &state.tongue;
    if tongue.length > 0.0 {
        items.push(DrawItem::Tongue {
            base: tongue.transform.pos,
            rotation: tongue.transform.rotation,
            width: tongue.params.width,
            length: tongue.length,
            color: TONGUE_COLOR,
            tip_color: TONGUE_TIP_COLOR,
        });
    }

    Ok(items)
}

//! Tile grid: a fixed lattice of tiles built once per level
//!
//! Topology never changes after construction. Tiles are addressed by
//! [`TileId`] (their index), so handles held elsewhere cannot dangle.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileId, TileKind};
use crate::config::TileParams;
use crate::consts::*;

/// Level layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// Top-left corner of the first cell
    pub origin: Vec2,
    pub cols: i32,
    pub rows: i32,
    pub cell_size: f32,
    /// Probability that a cell is seeded hardened instead of solid
    pub hardened_chance: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        // Fill the play strip with whole cells, centred, over the top half of the canvas
        let cols = (PLAY_WIDTH / TILE_SIZE).floor();
        let rows = (CANVAS_HEIGHT / 2.0 / TILE_SIZE).floor();
        let left = (CANVAS_WIDTH - PLAY_WIDTH) / 2.0;
        let grid_width = cols * TILE_SIZE;
        Self {
            origin: Vec2::new(left + (PLAY_WIDTH - grid_width) / 2.0, 0.0),
            cols: cols as i32,
            rows: rows as i32,
            cell_size: TILE_SIZE,
            hardened_chance: HARDENED_CHANCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    pub params: GridParams,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Build the grid row by row, rolling each cell's kind from `rng`.
    ///
    /// Non-positive rows or cols produce an empty grid.
    pub fn generate(params: GridParams, tile_params: &TileParams, rng: &mut impl Rng) -> Self {
        if params.rows <= 0 || params.cols <= 0 {
            log::warn!(
                "Grid {}x{} has no cells, building an empty grid",
                params.cols,
                params.rows
            );
            return Self {
                params,
                tiles: Vec::new(),
            };
        }

        let chance = if params.hardened_chance.is_nan() {
            0.0
        } else {
            params.hardened_chance.clamp(0.0, 1.0)
        };
        let mut tiles = Vec::with_capacity((params.rows * params.cols) as usize);
        for row in 0..params.rows {
            for col in 0..params.cols {
                let kind = if rng.random_bool(chance) {
                    TileKind::Hardened
                } else {
                    TileKind::Solid
                };
                let pos = params.origin
                    + Vec2::new(col as f32, row as f32) * params.cell_size;
                tiles.push(Tile::new(
                    TileId(tiles.len()),
                    pos,
                    params.cell_size,
                    kind,
                    tile_params,
                ));
            }
        }

        log::info!(
            "Built {}x{} grid: {} hardened",
            params.cols,
            params.rows,
            tiles.iter().filter(|t| t.kind == TileKind::Hardened).count()
        );

        Self { params, tiles }
    }

    /// Wrap an explicit tile list (level editors, tests). Ids are reassigned by index.
    pub fn from_tiles(params: GridParams, mut tiles: Vec<Tile>) -> Self {
        for (i, tile) in tiles.iter_mut().enumerate() {
            tile.id = TileId(i);
        }
        Self { params, tiles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.0)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn solid_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.of_kind(TileKind::Solid)
    }

    pub fn hardened_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.of_kind(TileKind::Hardened)
    }

    /// Projectiles currently in flight
    pub fn projectiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles
            .iter()
            .filter(|t| t.kind == TileKind::Projectile && t.is_moving)
    }

    /// Tiles that are not yet destroyed
    pub fn live_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_empty()).count()
    }

    fn of_kind(&self, kind: TileKind) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(move |t| t.kind == kind)
    }

    /// Move every moving tile by its velocity
    pub fn advance(&mut self, dt: f32) {
        for tile in &mut self.tiles {
            tile.advance(dt);
        }
    }
}

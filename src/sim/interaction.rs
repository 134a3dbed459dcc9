//! Per-tick interaction resolution
//!
//! Runs after the integrator, in a fixed order:
//! 1. tongue tip vs play-area walls
//! 2. projectiles vs walls
//! 3. projectiles vs solid/hardened tiles
//! 4. tongue vs tiles (grab)
//!
//! Within each step tiles are visited in grid order, so identical state
//! always resolves identically.

use glam::Vec2;

use super::collision::{PlayArea, Wall, boundary_check, check_aabb};
use super::grid::TileGrid;
use super::player::{Tongue, TongueState};
use super::state::{GameEvent, GameState};
use super::tile::{Tile, TileId, TileKind, reflect_dominant_axis};

/// Run every interaction step for this tick
pub fn resolve_interactions(state: &mut GameState) {
    let GameState {
        config,
        tongue,
        grid,
        events,
        ..
    } = state;

    tongue_vs_boundary(tongue, &config.play_area, events);
    projectiles_vs_boundary(grid, &config.play_area, events);
    projectiles_vs_tiles(grid, events);
    tongue_vs_tiles(tongue, grid, events);
}

/// Step 1: an extending tongue whose tip leaves the play area starts retracting
pub fn tongue_vs_boundary(tongue: &mut Tongue, area: &PlayArea, events: &mut Vec<GameEvent>) {
    if tongue.state != TongueState::Extending || tongue.length <= 0.0 {
        return;
    }

    let probe = Vec2::splat(tongue.params.tip_probe);
    if let Some(wall) = boundary_check(tongue.tip(), probe, area) {
        log::debug!("Tongue tip hit {:?} wall", wall);
        tongue.start_retracting();
        events.push(GameEvent::TongueRecoiled { wall });
    }
}

/// Step 2: projectiles reflect off walls, one bounce per crossing
pub fn projectiles_vs_boundary(grid: &mut TileGrid, area: &PlayArea, events: &mut Vec<GameEvent>) {
    for tile in grid.tiles_mut() {
        if tile.kind != TileKind::Projectile {
            continue;
        }
        let size = Vec2::splat(tile.size());
        let Some(wall) = boundary_check(tile.pos(), size, area) else {
            continue;
        };

        if wall.is_vertical() {
            tile.velocity.x = -tile.velocity.x;
        } else {
            tile.velocity.y = -tile.velocity.y;
        }
        clamp_inside(tile, wall, area);

        events.push(GameEvent::WallBounce { tile: tile.id, wall });
        bounce(tile, events);
    }
}

/// Push a tile back flush against the wall it crossed
fn clamp_inside(tile: &mut Tile, wall: Wall, area: &PlayArea) {
    let size = tile.size();
    let pos = &mut tile.transform.pos;
    match wall {
        Wall::Left => pos.x = area.left,
        Wall::Right => pos.x = area.right - size,
        Wall::Top => pos.y = area.top,
        Wall::Bottom => pos.y = area.bottom - size,
    }
}

/// Register a bounce and report a burn-out
fn bounce(tile: &mut Tile, events: &mut Vec<GameEvent>) {
    if tile.register_bounce() {
        log::debug!("Tile {:?} shattered after {} bounces", tile.id, tile.bounce_count);
        events.push(GameEvent::TileBurnedOut { tile: tile.id });
    }
}

/// Step 3: projectiles against every solid or hardened tile
pub fn projectiles_vs_tiles(grid: &mut TileGrid, events: &mut Vec<GameEvent>) {
    let projectiles: Vec<TileId> = grid
        .tiles()
        .iter()
        .filter(|t| t.kind == TileKind::Projectile)
        .map(|t| t.id)
        .collect();

    for pid in projectiles {
        for index in 0..grid.len() {
            let tid = TileId(index);
            if tid == pid {
                continue;
            }

            let tiles = grid.tiles();
            let (projectile, target) = (&tiles[pid.0], &tiles[index]);
            // Destroyed earlier in this pass (shatter or bounce limit)
            if projectile.kind != TileKind::Projectile {
                break;
            }
            if !target.kind.is_target() || !check_aabb(projectile, target) {
                continue;
            }

            let target_kind = target.kind;
            let projectile_center = projectile.center();
            let target_center = target.center();
            let velocity = projectile.velocity;

            let tiles = grid.tiles_mut();
            match target_kind {
                TileKind::Hardened => {
                    let target = &mut tiles[index];
                    target.absorb_hit();
                    let hp_left = target.hp;

                    let projectile = &mut tiles[pid.0];
                    projectile.velocity =
                        reflect_dominant_axis(velocity, projectile_center, target_center);

                    log::debug!("Projectile {:?} hit hardened {:?}, hp {}", pid, tid, hp_left);
                    events.push(GameEvent::HardenedHit {
                        projectile: pid,
                        target: tid,
                        hp_left,
                    });
                    bounce(projectile, events);
                }
                _ => {
                    tiles[index].destroy();
                    let projectile = &mut tiles[pid.0];
                    projectile.destroy();

                    log::debug!("Projectile {:?} shattered {:?}", pid, tid);
                    events.push(GameEvent::TilesShattered {
                        projectile: pid,
                        target: tid,
                    });
                    bounce(projectile, events);
                }
            }
        }
    }
}

/// Step 4: an extending tongue interacts with the tile nearest its tip
pub fn tongue_vs_tiles(tongue: &mut Tongue, grid: &mut TileGrid, events: &mut Vec<GameEvent>) {
    if tongue.state != TongueState::Extending || tongue.length <= 0.0 {
        return;
    }

    let Some(id) = nearest_touching_tile(tongue, grid) else {
        return;
    };
    let Some(kind) = grid.get(id).map(|t| t.kind) else {
        return;
    };

    if kind.is_grabbable() {
        log::debug!("Tongue grabbed tile {:?}", id);
        tongue.grab(id, grid);
        events.push(GameEvent::TileGrabbed { tile: id });
    } else if kind == TileKind::Hardened {
        log::debug!("Tongue clinked off hardened tile {:?}", id);
        tongue.start_retracting();
        events.push(GameEvent::TongueClink { tile: id });
    } else {
        tongue.start_retracting();
    }
}

/// Among tiles overlapping the tongue, the one whose centre is nearest the
/// tip. Ties go to the first in grid order.
pub fn nearest_touching_tile(tongue: &Tongue, grid: &TileGrid) -> Option<TileId> {
    let tip = tongue.tip();
    let mut closest: Option<(TileId, f32)> = None;

    for tile in grid.tiles() {
        if !tile.kind.is_target() || !check_aabb(tongue, tile) {
            continue;
        }
        let dist = tip.distance(tile.center());
        if closest.is_none_or(|(_, best)| dist < best) {
            closest = Some((tile.id, dist));
        }
    }

    closest.map(|(id, _)| id)
}

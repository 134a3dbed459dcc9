//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (grid order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod interaction;
pub mod player;
pub mod state;
pub mod tick;
pub mod tile;
pub mod transform;

pub use collision::{
    Aabb, Collider, Obb, PlayArea, Wall, boundary_check, broad_overlap, check_aabb,
    narrow_overlap,
};
pub use grid::{GridParams, TileGrid};
pub use interaction::resolve_interactions;
pub use player::{Frog, FrogState, Tongue, TongueState};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, integrate, tick};
pub use tile::{Tile, TileId, TileKind};
pub use transform::Transform;

//! Game state and core simulation types
//!
//! `GameState` is the whole simulation context: everything a tick reads or
//! writes is reachable from it, so a seed plus an input sequence replays
//! exactly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Wall;
use super::grid::TileGrid;
use super::player::{Frog, Tongue};
use super::tile::TileId;
use crate::config::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first press
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Things that happened during a tick, for effects and sound on the host side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TongueLaunched,
    /// Tongue tip left the play area
    TongueRecoiled { wall: Wall },
    TileGrabbed { tile: TileId },
    /// Tongue bounced off a tile it cannot hold
    TongueClink { tile: TileId },
    TileLoaded { tile: TileId },
    TileShot { tile: TileId },
    WallBounce { tile: TileId, wall: Wall },
    HardenedHit { projectile: TileId, target: TileId, hp_left: u8 },
    /// Projectile and a solid tile destroyed each other
    TilesShattered { projectile: TileId, target: TileId },
    /// Projectile used up its bounces
    TileBurnedOut { tile: TileId },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Level seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    pub frog: Frog,
    pub tongue: Tongue,
    pub grid: TileGrid,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the default config
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        let frog = Frog::new(&config.frog);
        let tongue = Tongue::new(&frog, config.tongue);
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = TileGrid::generate(config.grid, &config.tile, &mut rng);

        Self {
            seed,
            config,
            phase: GamePhase::Menu,
            time_ticks: 0,
            frog,
            tongue,
            grid,
            events: Vec::new(),
        }
    }

    /// Rebuild the level from the same seed and return to the menu
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config.clone(), self.seed);
    }

    /// End the run: the frog dies and the simulation freezes
    pub fn end_run(&mut self) {
        self.frog.die();
        self.phase = GamePhase::GameOver;
        log::info!("Run ended after {} ticks", self.time_ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::{FrogState, TongueState};

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.grid.len(), 16 * 6);
        assert_eq!(state.tongue.state, TongueState::Idle);
        assert_eq!(state.tongue.transform.pos, state.frog.transform.pos);
    }

    #[test]
    fn test_reset_rebuilds_same_level() {
        let mut state = GameState::new(777);
        let before: Vec<_> = state.grid.tiles().iter().map(|t| t.kind).collect();
        state.grid.tiles_mut()[0].destroy();
        state.phase = GamePhase::Playing;
        state.reset();
        let after: Vec<_> = state.grid.tiles().iter().map(|t| t.kind).collect();
        assert_eq!(before, after);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_end_run() {
        let mut state = GameState::new(1);
        state.end_run();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.frog.state, FrogState::Dead);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(5);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grid.len(), state.grid.len());
        assert_eq!(back.seed, 5);
    }
}

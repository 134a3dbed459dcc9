//! Tongue Punch entry point
//!
//! The browser build drives the game through `tongue_punch::web`. Natively
//! this runs a short scripted session headless and logs what happens.
//!
//! Usage: `tongue-punch [seed] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tongue Punch (native) starting...");

    if let Err(err) = headless::run(std::env::args().skip(1)) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use tongue_punch::consts::SIM_DT;
    use tongue_punch::renderer::build_draw_list;
    use tongue_punch::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use tongue_punch::{FrameAtlas, GameConfig};

    /// Ticks in the scripted session (30 seconds of play)
    const SESSION_TICKS: u64 = 1800;
    /// Press the action key every this many ticks
    const PRESS_INTERVAL: u64 = 45;

    pub fn run(mut args: impl Iterator<Item = String>) -> Result<(), Box<dyn Error>> {
        let seed = match args.next() {
            Some(arg) => arg.parse::<u64>()?,
            None => 12345,
        };
        let config = match args.next() {
            Some(path) => {
                let config = GameConfig::from_json(&std::fs::read_to_string(&path)?)?;
                log::info!("Loaded config from {path}");
                config
            }
            None => GameConfig::default(),
        };
        config.validate()?;

        let mut state = GameState::with_config(config, seed);
        log::info!(
            "Level seed {seed}: {} tiles ({} hardened)",
            state.grid.live_count(),
            state.grid.hardened_tiles().count()
        );

        let mut was_held = false;
        let mut shattered = 0usize;
        for frame in 0..SESSION_TICKS {
            let held = frame % PRESS_INTERVAL == 0;
            let input = TickInput::from_action_edges(was_held, held);
            was_held = held;

            tick(&mut state, &input, SIM_DT);

            for event in &state.events {
                log::debug!("tick {}: {event:?}", state.time_ticks);
                if matches!(event, GameEvent::TilesShattered { .. }) {
                    shattered += 1;
                }
            }
            if state.phase == GamePhase::Playing && state.grid.live_count() == 0 {
                log::info!("Board cleared");
                break;
            }
        }

        state.end_run();
        let items = build_draw_list(&state, None::<&FrameAtlas>)?;
        log::info!(
            "Session over: {} tiles left, {shattered} shattered, {} draw items",
            state.grid.live_count(),
            items.len()
        );
        Ok(())
    }
}

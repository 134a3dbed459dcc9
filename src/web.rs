//! Browser bindings
//!
//! The JS page owns the canvas, the sprite sheet and the
//! `requestAnimationFrame` loop. It calls `tick` once per frame and paints
//! whatever `draw_list_json` returns.

use wasm_bindgen::prelude::*;

use crate::atlas::FrameAtlas;
use crate::renderer::build_draw_list;
use crate::sim::{GameState, TickInput, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Tongue Punch starting...");
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Game instance exported to the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    atlas: Option<FrameAtlas>,
    was_held: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        log::info!("New game with seed {seed}");
        WebGame {
            state: GameState::new(seed),
            atlas: None,
            was_held: false,
        }
    }

    /// Parse the sprite sheet metadata once the sheet JSON has been fetched
    pub fn load_atlas(&mut self, json: &str) -> Result<(), JsValue> {
        self.atlas = Some(FrameAtlas::from_json(json).map_err(js_error)?);
        Ok(())
    }

    /// Advance one frame. `held` is the current action key state.
    pub fn tick(&mut self, dt: f32, held: bool, pause: bool) {
        let mut input = TickInput::from_action_edges(self.was_held, held);
        input.pause = pause;
        self.was_held = held;
        tick(&mut self.state, &input, dt);
    }

    pub fn draw_list_json(&self) -> Result<String, JsValue> {
        let items = build_draw_list(&self.state, self.atlas.as_ref()).map_err(js_error)?;
        serde_json::to_string(&items).map_err(js_error)
    }

    pub fn events_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.events).map_err(js_error)
    }

    pub fn phase(&self) -> String {
        self.state.phase.as_str().to_string()
    }

    pub fn end_run(&mut self) {
        self.state.end_run();
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }
}

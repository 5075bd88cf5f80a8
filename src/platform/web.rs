//! Browser bindings
//!
//! The page owns the three.js scene, the audio and the start button. It
//! hands us three callbacks and forwards key presses, the start gate, and
//! `requestAnimationFrame` deltas.

use glam::Vec2;
use js_sys::Function;
use wasm_bindgen::prelude::*;

use super::{Feedback, Frame, Presenter, course_layout};
use crate::game::{Command, Game};
use crate::sim::Move;
use crate::tuning::Tuning;

/// Presenter backed by JS callbacks
struct JsPresenter {
    on_frame: Function,
    on_feedback: Function,
    on_reset: Function,
}

impl Presenter for JsPresenter {
    fn render(&mut self, frame: &Frame) {
        match serde_json::to_string(frame) {
            Ok(json) => {
                if let Err(e) = self.on_frame.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("on_frame callback failed: {:?}", e);
                }
            }
            Err(e) => log::error!("Failed to serialize frame: {}", e),
        }
    }

    fn play(&mut self, feedback: Feedback) {
        let cue = JsValue::from_str(feedback.as_str());
        if let Err(e) = self.on_feedback.call1(&JsValue::NULL, &cue) {
            log::warn!("on_feedback callback failed: {:?}", e);
        }
    }

    fn reset_position(&mut self, to: Vec2) {
        let x = JsValue::from_f64(to.x as f64);
        let y = JsValue::from_f64(to.y as f64);
        if let Err(e) = self.on_reset.call2(&JsValue::NULL, &x, &y) {
            log::warn!("on_reset callback failed: {:?}", e);
        }
    }
}

/// Game handle exported to the page
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    presenter: JsPresenter,
}

#[wasm_bindgen]
impl WasmGame {
    /// `tuning_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(
        on_frame: Function,
        on_feedback: Function,
        on_reset: Function,
        tuning_json: &str,
    ) -> Result<WasmGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, tuning).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            game,
            presenter: JsPresenter {
                on_frame,
                on_feedback,
                on_reset,
            },
        })
    }

    pub fn move_up(&mut self) -> bool {
        self.game.command(Command::Move(Move::Up))
    }

    pub fn move_down(&mut self) -> bool {
        self.game.command(Command::Move(Move::Down))
    }

    pub fn move_left(&mut self) -> bool {
        self.game.command(Command::Move(Move::Left))
    }

    pub fn move_right(&mut self) -> bool {
        self.game.command(Command::Move(Move::Right))
    }

    pub fn set_started(&mut self, started: bool) {
        self.game.command(Command::SetStarted(started));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.game.command(Command::Resize { width, height });
    }

    /// Call once the player model (or its fallback mesh) is in the scene
    pub fn player_loaded(&mut self) {
        self.game.command(Command::PlayerLoaded);
    }

    /// Advance by `elapsed` seconds; returns ticks run
    pub fn frame(&mut self, elapsed: f32) -> u32 {
        self.game.frame(elapsed, &mut self.presenter)
    }

    /// Lane layout as JSON, for building the course meshes
    pub fn course_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&course_layout(self.game.state()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn restart(&mut self) -> Result<(), JsValue> {
        let seed = js_sys::Date::now() as u64;
        self.game
            .restart(seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Chicken Cross (web) ready");
}

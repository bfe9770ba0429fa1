//! Browser bindings
//!
//! A thin `wasm-bindgen` wrapper so a page can drive a [`Session`] from
//! `requestAnimationFrame` and wire its own DOM, canvas and audio.

use wasm_bindgen::prelude::*;

use crate::autopilot::Autopilot;
use crate::sim::{Command, GameEvent, Phase, Session, TickStatus, WorldSize};
use crate::tuning::{Preset, Tuning};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Session handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    demo: Option<Autopilot>,
}

#[wasm_bindgen]
impl WebGame {
    /// New idle game. `preset` is one of standard/classic/sticky/bonus.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, preset: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match preset {
            Some(name) => Tuning::from_preset(
                name.parse::<Preset>()
                    .map_err(|e| JsValue::from_str(&e.to_string()))?,
            ),
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Nyan Flap (web) seed {}", seed);
        Ok(Self {
            session: Session::new(tuning, WorldSize::new(width, height), seed),
            demo: None,
        })
    }

    /// Load tuning from a JSON string
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(width: f32, height: f32, json: &str) -> Result<WebGame, JsValue> {
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            session: Session::new(tuning, WorldSize::new(width, height), js_sys::Date::now() as u64),
            demo: None,
        })
    }

    /// Events lost because `drainEvents` was not called in time
    #[wasm_bindgen(getter, js_name = droppedEvents)]
    pub fn dropped_events(&self) -> usize {
        self.session.dropped_events()
    }

    /// Advance one frame. Returns `true` while another frame should be requested.
    pub fn advance(&mut self) -> bool {
        if let Some(pilot) = self.demo {
            if pilot.decide(&self.session) {
                self.session.request_jump();
            }
        }
        self.session.advance() == TickStatus::Continue
    }

    /// Space bar / tap: start when idle, flap when running
    #[wasm_bindgen(js_name = primaryAction)]
    pub fn primary_action(&mut self) -> bool {
        self.session.handle(Command::PrimaryAction)
    }

    pub fn restart(&mut self) -> bool {
        self.session.handle(Command::Restart)
    }

    #[wasm_bindgen(js_name = returnToStart)]
    pub fn return_to_start(&mut self) -> bool {
        self.session.handle(Command::ReturnToStart)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(WorldSize::new(width, height));
    }

    /// Let the autopilot play (attract mode)
    #[wasm_bindgen(js_name = setDemo)]
    pub fn set_demo(&mut self, enabled: bool) {
        self.demo = enabled.then(Autopilot::default);
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.session.score
    }

    #[wasm_bindgen(getter, js_name = highScore)]
    pub fn high_score(&self) -> u32 {
        self.session.high_score
    }

    #[wasm_bindgen(getter)]
    pub fn level(&self) -> u32 {
        self.session.level
    }

    /// "idle", "running" or "over"
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        match self.session.phase {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Over => "over",
        }
        .to_string()
    }

    #[wasm_bindgen(getter, js_name = actorY)]
    pub fn actor_y(&self) -> f32 {
        self.session.actor.y
    }

    #[wasm_bindgen(getter, js_name = actorX)]
    pub fn actor_x(&self) -> f32 {
        self.session.tuning.actor_x
    }

    #[wasm_bindgen(getter, js_name = actorSize)]
    pub fn actor_size(&self) -> f32 {
        self.session.tuning.actor_size
    }

    #[wasm_bindgen(getter, js_name = obstacleWidth)]
    pub fn obstacle_width(&self) -> f32 {
        self.session.tuning.obstacle_width
    }

    /// Obstacles flattened as `[x, gap_top, gap_bottom, ...]`
    pub fn obstacles(&self) -> Vec<f32> {
        self.session
            .obstacles()
            .flat_map(|o| [o.x, o.gap_top, o.gap_bottom])
            .collect()
    }

    /// Final score once the run is over
    #[wasm_bindgen(js_name = finalScore)]
    pub fn final_score(&self) -> Option<u32> {
        self.session.final_score()
    }

    /// Pending events as JSON (for UI/audio glue), clearing the queue.
    /// Call once per frame; only the newest `MAX_PENDING_EVENTS` are held.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        let events: Vec<GameEvent> = self.session.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }
}

pub mod runner;

pub use runner::TutorRunner;

use std::cell::RefCell;

use trace_engine::{InputEvent, TutorConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<TutorRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner, or log and return `None` before `tutor_init`.
fn with_runner<R>(f: impl FnOnce(&mut TutorRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("tutor not initialized, call tutor_init() first");
                None
            }
        }
    })
}

/// Build the runner from a (possibly partial, possibly empty) JSON config.
/// Returns false if the config fails to parse or validate, or the built-in
/// tables fail to load.
#[wasm_bindgen]
pub fn tutor_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        TutorConfig::default()
    } else {
        match TutorConfig::from_json(config_json) {
            Ok(config) => config,
            Err(err) => {
                log::error!("bad tutor config: {}", err);
                return false;
            }
        }
    };

    match TutorRunner::new(config) {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("trace-web: initialized");
            true
        }
        Err(err) => {
            log::error!("failed to start tutor: {}", err);
            false
        }
    }
}

#[wasm_bindgen]
pub fn tutor_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn tutor_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn tutor_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn tutor_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

/// Host button press: 1 = clear, 2 = next, 3 = back.
#[wasm_bindgen]
pub fn tutor_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

/// Open the tracing screen. False (and a console warning) if the script or
/// character does not exist.
#[wasm_bindgen]
pub fn tutor_start(script: &str, id: &str) -> bool {
    with_runner(|r| match r.start(script, id) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("cannot start tracing: {}", err);
            false
        }
    })
    .unwrap_or(false)
}

// ---- Menu data ----

#[wasm_bindgen]
pub fn tutor_scripts_json() -> String {
    with_runner(|r| r.scripts_json()).unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn tutor_characters_json(script: &str) -> String {
    with_runner(|r| {
        r.characters_json(script).unwrap_or_else(|err| {
            log::warn!("{}", err);
            "[]".to_string()
        })
    })
    .unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn tutor_character_json() -> String {
    with_runner(|r| r.character_json()).unwrap_or_else(|| "null".to_string())
}

// ---- Attempt state ----

#[wasm_bindgen]
pub fn tutor_score() -> f32 {
    with_runner(|r| r.completion().score).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn tutor_is_complete() -> bool {
    with_runner(|r| r.completion().is_complete).unwrap_or(false)
}

#[wasm_bindgen]
pub fn tutor_celebration_alpha() -> f32 {
    with_runner(|r| r.celebration_alpha()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn tutor_show_hint() -> bool {
    with_runner(|r| r.show_hint()).unwrap_or(false)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_vector_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vector_vertices_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_vector_vertex_count() -> u32 {
    with_runner(|r| r.vector_vertex_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_vector_vertices() -> u32 {
    with_runner(|r| r.max_vector_vertices()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or(0.0)
}

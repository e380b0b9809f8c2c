use serde::Serialize;
use trace_engine::{
    CharacterProvider, CompletionState, InputEvent, InputQueue, Result, ScreenAction, ScriptId, ScriptRegistry,
    TracingSession, TutorConfig, TutorEvent, VectorState,
};

/// Longest frame step the celebration timer will take.
const MAX_FRAME_DT: f32 = 0.25;

/// Owns the glyph registry and the active tracing screen, and packs each
/// frame's geometry and events into flat buffers for the page to read.
///
/// Lives in a `thread_local!` in `lib.rs`, because wasm-bindgen cannot
/// export a stateful struct's methods as free functions.
pub struct TutorRunner {
    config: TutorConfig,
    registry: ScriptRegistry,
    session: Option<TracingSession>,
    input: InputQueue,
    vectors: VectorState,
    /// Events raised during the last tick, capped at `max_events`.
    events: Vec<TutorEvent>,
}

impl TutorRunner {
    /// Validate `config` and load the built-in glyph tables.
    pub fn new(config: TutorConfig) -> Result<Self> {
        config.validate()?;
        let registry = ScriptRegistry::builtin()?;
        Ok(Self {
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            events: Vec::with_capacity(config.max_events),
            input: InputQueue::new(),
            session: None,
            registry,
            config,
        })
    }

    /// Open the tracing screen on `id` of the script named `script`.
    pub fn start(&mut self, script: &str, id: &str) -> Result<()> {
        let script: ScriptId = script.parse()?;
        let session = TracingSession::start(&self.registry, script, id, &self.config)?;
        self.session = Some(session);
        self.input.drain();
        Ok(())
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: feed queued input to the session, advance its timer,
    /// rebuild the vector buffer and collect events.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.events.clear();

        let pending = self.input.drain();
        let mut leave = false;
        if let Some(session) = self.session.as_mut() {
            for event in &pending {
                if session.handle_input(event, &self.registry) == Some(ScreenAction::BackToMenu) {
                    leave = true;
                    break;
                }
            }
            session.update(dt);
            self.events.extend(session.drain_events());
        }
        if leave {
            log::info!("leaving tracing screen");
            self.session = None;
        }

        if self.events.len() > self.config.max_events {
            log::warn!(
                "dropping {} events over the per-frame limit",
                self.events.len() - self.config.max_events
            );
            self.events.truncate(self.config.max_events);
        }

        self.vectors.clear();
        if let Some(session) = &self.session {
            session.render(&mut self.vectors);
        }
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn completion(&self) -> CompletionState {
        self.session
            .as_ref()
            .map_or(CompletionState::EMPTY, TracingSession::completion)
    }

    pub fn celebration_alpha(&self) -> f32 {
        self.session.as_ref().map_or(0.0, TracingSession::celebration_alpha)
    }

    pub fn show_hint(&self) -> bool {
        self.session.as_ref().is_some_and(TracingSession::show_hint)
    }

    pub fn events(&self) -> &[TutorEvent] {
        &self.events
    }

    // ---- JSON views for the menu and the title bar ----

    pub fn scripts_json(&self) -> String {
        let scripts: Vec<ScriptView> = self
            .registry
            .scripts()
            .into_iter()
            .filter_map(|script| {
                let provider = self.registry.provider(script).ok()?;
                Some(ScriptView {
                    slug: script.slug(),
                    label: provider.label(),
                    count: provider.len(),
                })
            })
            .collect();
        to_json(&scripts)
    }

    pub fn characters_json(&self, script: &str) -> Result<String> {
        let script: ScriptId = script.parse()?;
        let provider = self.registry.provider(script)?;
        let characters: Vec<CharacterView> = provider
            .character_ids()
            .into_iter()
            .filter_map(|id| provider.get_character(id))
            .map(|character| CharacterView {
                id: &character.id,
                name: &character.display_name,
                pronunciation: &character.pronunciation,
                strokes: None,
            })
            .collect();
        Ok(to_json(&characters))
    }

    /// The character on screen with its fitted guide strokes, or `null`.
    pub fn character_json(&self) -> String {
        let Some(session) = &self.session else {
            return "null".to_string();
        };
        let character = session.character();
        let strokes: Vec<Vec<[f32; 2]>> = session
            .engine()
            .guide()
            .strokes
            .iter()
            .map(|stroke| stroke.iter().map(|p| p.to_array()).collect())
            .collect();
        to_json(&CharacterView {
            id: &character.id,
            name: &character.display_name,
            pronunciation: &character.pronunciation,
            strokes: Some(strokes),
        })
    }

    // ---- Pointer accessors for the page's buffer reads ----

    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.vectors.max_vertices() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.screen_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.screen_height
    }
}

#[derive(Serialize)]
struct ScriptView<'a> {
    slug: &'static str,
    label: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct CharacterView<'a> {
    id: &'a str,
    name: &'a str,
    pronunciation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    strokes: Option<Vec<Vec<[f32; 2]>>>,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("failed to serialize view: {}", err);
        "null".to_string()
    })
}

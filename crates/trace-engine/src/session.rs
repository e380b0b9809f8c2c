//! The tracing screen: one character, one engine, one finger.

use glam::Vec2;

use crate::api::config::TutorConfig;
use crate::api::error::Result;
use crate::api::types::{CompletionState, Region, TutorEvent};
use crate::glyphs::{Character, ScriptId, ScriptRegistry};
use crate::input::capture::{TouchCapture, TouchFrame};
use crate::input::queue::InputEvent;
use crate::render::{RenderStyle, Surface};
use crate::tracing::TracingEngine;

/// `InputEvent::Custom` kinds sent by the host's buttons.
pub mod actions {
    /// Wipe the drawing and start over.
    pub const CLEAR: u32 = 1;
    /// Move on to the next character of the script.
    pub const NEXT: u32 = 2;
    /// Leave the tracing screen.
    pub const BACK: u32 = 3;
}

/// Something the session asks its owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    BackToMenu,
}

/// A tracing attempt on one character, fed by raw pointer events.
pub struct TracingSession {
    script: ScriptId,
    character: Character,
    engine: TracingEngine,
    capture: TouchCapture,
    style: RenderStyle,
    /// Screen areas owned by host widgets; touches there never draw.
    exclusion_zones: Vec<Region>,
    /// Set while a gesture that began in an exclusion zone is still down.
    gesture_excluded: bool,
    celebration_duration: f32,
    /// Seconds left on the "complete" celebration, if one is running.
    celebration: Option<f32>,
    events: Vec<TutorEvent>,
}

impl TracingSession {
    /// Look up `id` in `script` and fit it onto the configured tracing area.
    pub fn start(registry: &ScriptRegistry, script: ScriptId, id: &str, config: &TutorConfig) -> Result<Self> {
        let character = registry.get_character(script, id)?.clone();
        let engine = TracingEngine::with_character(&character, config.tracing_region(), config.trace_params());
        log::info!("tracing {} '{}' ({} guide points)", script, id, engine.guide().point_count());

        let mut session = Self {
            script,
            character,
            engine,
            capture: TouchCapture::new(config.touch_sensitivity),
            style: config.render_style(),
            exclusion_zones: config.exclusion_zones.clone(),
            gesture_excluded: false,
            celebration_duration: config.celebration_duration,
            celebration: None,
            events: Vec::new(),
        };
        session.announce_character();
        Ok(session)
    }

    /// Replace the configured exclusion zones (button areas) for this session.
    pub fn with_exclusion_zones(mut self, zones: Vec<Region>) -> Self {
        self.exclusion_zones = zones;
        self
    }

    pub fn handle_input(&mut self, event: &InputEvent, registry: &ScriptRegistry) -> Option<ScreenAction> {
        match *event {
            InputEvent::Custom { kind, .. } => self.handle_action(kind, registry),
            InputEvent::PointerDown { x, y } => {
                self.gesture_excluded = self.is_excluded(Vec2::new(x, y));
                if !self.gesture_excluded {
                    self.feed(event);
                }
                None
            }
            InputEvent::PointerMove { x, y } => {
                if !self.gesture_excluded && !self.is_excluded(Vec2::new(x, y)) {
                    self.feed(event);
                }
                None
            }
            InputEvent::PointerUp { .. } => {
                if !std::mem::take(&mut self.gesture_excluded) {
                    self.feed(event);
                }
                None
            }
        }
    }

    /// Advance the celebration timer.
    pub fn update(&mut self, dt: f32) {
        if let Some(remaining) = self.celebration.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.celebration = None;
            }
        }
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_some()
    }

    /// Opacity of the celebration overlay: 1 when it starts, fading to 0.
    pub fn celebration_alpha(&self) -> f32 {
        match self.celebration {
            Some(remaining) if self.celebration_duration > 0.0 => {
                (remaining / self.celebration_duration).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// True until the user has drawn something.
    pub fn show_hint(&self) -> bool {
        self.engine.user_path().is_empty()
    }

    pub fn completion(&self) -> CompletionState {
        self.engine.completion()
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn script(&self) -> ScriptId {
        self.script
    }

    pub fn engine(&self) -> &TracingEngine {
        &self.engine
    }

    /// Events raised since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<TutorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.engine.render(surface, &self.style);
    }

    fn is_excluded(&self, p: Vec2) -> bool {
        self.exclusion_zones.iter().any(|zone| zone.contains(p))
    }

    fn feed(&mut self, event: &InputEvent) {
        let Some(frame) = self.capture.handle(event) else {
            return;
        };
        self.apply_frame(frame);
    }

    fn apply_frame(&mut self, frame: TouchFrame) {
        if frame.touching {
            if let Some(pos) = frame.position {
                self.engine.append_point(pos);
            }
            return;
        }
        if frame.path.is_empty() {
            return;
        }

        // Lift: rescore from the filtered path.
        self.engine.replace_path(&frame.path);
        let state = self.engine.completion();
        log::debug!("stroke released: {} points, score {:.2}", frame.path.len(), state.score);
        if state.is_complete && self.celebration.is_none() {
            log::info!("completed '{}' with score {:.2}", self.character.id, state.score);
            self.celebration = Some(self.celebration_duration);
            self.events.push(TutorEvent::completed(state.score));
        }
    }

    fn handle_action(&mut self, kind: u32, registry: &ScriptRegistry) -> Option<ScreenAction> {
        match kind {
            actions::CLEAR => {
                self.reset_attempt();
                None
            }
            actions::NEXT => {
                if let Err(err) = self.advance(registry) {
                    log::warn!("cannot advance past '{}': {}", self.character.id, err);
                }
                None
            }
            actions::BACK => {
                self.events.push(TutorEvent::back_to_menu());
                Some(ScreenAction::BackToMenu)
            }
            other => {
                log::warn!("ignoring unknown action {}", other);
                None
            }
        }
    }

    fn advance(&mut self, registry: &ScriptRegistry) -> Result<()> {
        let next = registry.next_id(self.script, &self.character.id)?;
        let character = registry.get_character(self.script, next)?.clone();
        self.engine.load(&character, self.engine.region());
        self.character = character;
        self.reset_attempt();
        log::info!("tracing {} '{}'", self.script, self.character.id);
        self.announce_character();
        Ok(())
    }

    fn reset_attempt(&mut self) {
        self.engine.clear();
        self.capture.clear();
        self.gesture_excluded = false;
        self.celebration = None;
    }

    fn announce_character(&mut self) {
        self.events
            .push(TutorEvent::character_loaded(self.engine.guide().point_count()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ScriptRegistry {
        ScriptRegistry::builtin().unwrap()
    }

    fn start(registry: &ScriptRegistry, id: &str) -> TracingSession {
        TracingSession::start(registry, ScriptId::Numbers, id, &TutorConfig::default()).unwrap()
    }

    /// Drag a finger along the session's own guide points.
    fn trace_guide(session: &mut TracingSession, registry: &ScriptRegistry) {
        let points: Vec<Vec2> = session.engine().guide().points().collect();
        let (first, rest) = points.split_first().unwrap();
        session.handle_input(&InputEvent::PointerDown { x: first.x, y: first.y }, registry);
        for p in rest {
            session.handle_input(&InputEvent::PointerMove { x: p.x, y: p.y }, registry);
        }
        let last = points[points.len() - 1];
        session.handle_input(&InputEvent::PointerUp { x: last.x, y: last.y }, registry);
    }

    /// Drag a finger along one guide stroke.
    fn trace_stroke(session: &mut TracingSession, registry: &ScriptRegistry, stroke: usize) {
        let points = session.engine().guide().strokes[stroke].clone();
        let (first, rest) = points.split_first().unwrap();
        session.handle_input(&InputEvent::PointerDown { x: first.x, y: first.y }, registry);
        for p in rest {
            session.handle_input(&InputEvent::PointerMove { x: p.x, y: p.y }, registry);
        }
        let last = points[points.len() - 1];
        session.handle_input(&InputEvent::PointerUp { x: last.x, y: last.y }, registry);
    }

    fn custom(kind: u32) -> InputEvent {
        InputEvent::Custom { kind, a: 0.0, b: 0.0, c: 0.0 }
    }

    #[test]
    fn unknown_ids_fail_to_start() {
        let registry = registry();
        let config = TutorConfig::default();
        assert!(TracingSession::start(&registry, ScriptId::Numbers, "X", &config).is_err());
        assert!(TracingSession::start(&registry, ScriptId::English, "A", &config).is_ok());
    }

    #[test]
    fn start_announces_character() {
        let registry = registry();
        let mut session = start(&registry, "1");
        let events = session.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, TutorEvent::CHARACTER_LOADED);
        assert!(session.show_hint());
    }

    #[test]
    fn tracing_the_guide_completes_and_celebrates() {
        let registry = registry();
        let mut session = start(&registry, "1");
        session.drain_events();

        trace_guide(&mut session, &registry);
        assert!(session.completion().is_complete);
        assert!(!session.show_hint());
        assert_eq!(session.celebration_alpha(), 1.0);

        let events = session.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, TutorEvent::COMPLETED);

        session.update(1.0);
        assert!((session.celebration_alpha() - 0.5).abs() < 1e-6);
        session.update(1.0);
        assert!(!session.is_celebrating());
        assert_eq!(session.celebration_alpha(), 0.0);
    }

    #[test]
    fn completion_fires_once_per_celebration() {
        let registry = registry();
        let mut session = start(&registry, "1");
        session.drain_events();
        trace_guide(&mut session, &registry);
        trace_guide(&mut session, &registry);
        assert_eq!(session.drain_events().len(), 1);
    }

    #[test]
    fn each_gesture_replays_only_its_own_stroke() {
        let registry = registry();
        let mut session = TracingSession::start(&registry, ScriptId::Chinese, "二", &TutorConfig::default()).unwrap();
        session.drain_events();
        assert_eq!(session.engine().guide().strokes.len(), 2);

        // One of two equal strokes: every drawn point is on the guide, half the guide is covered.
        trace_stroke(&mut session, &registry, 0);
        assert_eq!(session.completion().score, 0.75);
        assert!(session.completion().is_complete);

        trace_stroke(&mut session, &registry, 1);
        let second = session.engine().guide().strokes[1].clone();
        assert_eq!(session.engine().user_path(), second.as_slice());
        assert_eq!(session.completion().score, 0.75);

        let completed = session
            .drain_events()
            .iter()
            .filter(|e| e.kind == TutorEvent::COMPLETED)
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn clear_action_resets_attempt() {
        let registry = registry();
        let mut session = start(&registry, "1");
        trace_guide(&mut session, &registry);
        session.handle_input(&custom(actions::CLEAR), &registry);
        assert_eq!(session.completion(), CompletionState::EMPTY);
        assert!(session.show_hint());
        assert!(!session.is_celebrating());
    }

    #[test]
    fn next_action_wraps_through_script() {
        let registry = registry();
        let mut session = start(&registry, "8");
        session.handle_input(&custom(actions::NEXT), &registry);
        assert_eq!(session.character().id, "9");
        session.handle_input(&custom(actions::NEXT), &registry);
        assert_eq!(session.character().id, "0");
        let loaded = session
            .drain_events()
            .iter()
            .filter(|e| e.kind == TutorEvent::CHARACTER_LOADED)
            .count();
        assert_eq!(loaded, 3);
    }

    #[test]
    fn back_action_leaves_screen() {
        let registry = registry();
        let mut session = start(&registry, "1");
        session.drain_events();
        let action = session.handle_input(&custom(actions::BACK), &registry);
        assert_eq!(action, Some(ScreenAction::BackToMenu));
        assert_eq!(session.drain_events()[0].kind, TutorEvent::BACK_TO_MENU);
    }

    #[test]
    fn touches_in_exclusion_zones_do_not_draw() {
        let registry = registry();
        let button = Region::new(0.0, 260.0, 100.0, 60.0);
        let mut session = start(&registry, "1").with_exclusion_zones(vec![button]);

        session.handle_input(&InputEvent::PointerDown { x: 50.0, y: 290.0 }, &registry);
        session.handle_input(&InputEvent::PointerMove { x: 200.0, y: 100.0 }, &registry);
        session.handle_input(&InputEvent::PointerUp { x: 200.0, y: 100.0 }, &registry);
        assert!(session.show_hint());

        session.handle_input(&InputEvent::PointerDown { x: 200.0, y: 100.0 }, &registry);
        session.handle_input(&InputEvent::PointerMove { x: 50.0, y: 290.0 }, &registry);
        assert_eq!(session.engine().user_path().len(), 1);
    }

    #[test]
    fn render_draws_onto_surface() {
        let registry = registry();
        let session = start(&registry, "1");
        let mut list = crate::render::DrawList::new();
        session.render(&mut list);
        assert!(!list.is_empty());
    }
}

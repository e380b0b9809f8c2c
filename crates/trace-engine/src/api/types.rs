use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Deserialize;

/// Axis-aligned rectangle in device coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height as a vector.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Inclusive hit test (edges count as inside).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Score of the current tracing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompletionState {
    /// Blend of accuracy and coverage, 0.0 to 1.0.
    pub score: f32,
    /// True once `score` reaches the completion threshold.
    pub is_complete: bool,
}

impl CompletionState {
    /// The state of an attempt with nothing drawn.
    pub const EMPTY: Self = Self {
        score: 0.0,
        is_complete: false,
    };

    pub fn from_score(score: f32, threshold: f32) -> Self {
        Self {
            score,
            is_complete: score >= threshold,
        }
    }
}

/// An event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TutorEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl TutorEvent {
    pub const FLOATS: usize = 4;

    /// A tracing attempt crossed the completion threshold. `a` = score.
    pub const COMPLETED: f32 = 1.0;
    /// A character was loaded into the engine. `a` = guide point count.
    pub const CHARACTER_LOADED: f32 = 2.0;
    /// The user asked to leave the tracing screen.
    pub const BACK_TO_MENU: f32 = 3.0;

    pub fn completed(score: f32) -> Self {
        Self { kind: Self::COMPLETED, a: score, ..Self::default() }
    }

    pub fn character_loaded(guide_points: usize) -> Self {
        Self { kind: Self::CHARACTER_LOADED, a: guide_points as f32, ..Self::default() }
    }

    pub fn back_to_menu() -> Self {
        Self { kind: Self::BACK_TO_MENU, ..Self::default() }
    }
}

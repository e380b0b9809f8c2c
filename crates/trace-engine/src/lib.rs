pub mod api;
pub mod glyphs;
pub mod input;
pub mod render;
pub mod session;
pub mod tracing;

// Re-export key types at crate root for convenience
pub use api::config::{DisplayPreset, Palette, TutorConfig};
pub use api::error::{Result, TraceError};
pub use api::types::{CompletionState, Region, TutorEvent};
pub use glyphs::{Character, CharacterProvider, ScriptId, ScriptRegistry, Stroke, StrokeSpec, TableProvider};
pub use input::capture::{TouchCapture, TouchFrame};
pub use input::queue::{InputEvent, InputQueue};
pub use render::{Color, DrawCommand, DrawList, ProgressBar, RenderStyle, Surface};
pub use session::{actions, ScreenAction, TracingSession};
pub use tracing::{GuideGeometry, ScoreBreakdown, SegmentClass, TraceParams, TracingEngine};

#[cfg(feature = "vectors")]
pub use render::{VectorState, VectorVertex};

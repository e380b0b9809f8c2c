mod color;
mod dashed;
mod progress;
mod surface;
#[cfg(feature = "vectors")]
mod vector;

pub use color::Color;
pub use dashed::{dash_segment, draw_dashed_polyline};
pub use progress::ProgressBar;
pub use surface::{DrawCommand, DrawList, Surface};
#[cfg(feature = "vectors")]
pub use vector::{VectorState, VectorVertex};

use crate::api::config::Palette;

/// Line styling and screen geometry needed to draw a tracing attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub dash_length: f32,
    pub dash_gap: f32,
    pub guide_line_width: f32,
    pub user_line_width: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub palette: Palette,
}

impl Default for RenderStyle {
    fn default() -> Self {
        crate::api::config::TutorConfig::default().render_style()
    }
}

use serde::Deserialize;

use crate::api::error::{Result, TraceError};
use crate::api::types::Region;
use crate::render::{Color, RenderStyle};
use crate::tracing::TraceParams;

/// Common touchscreen panels the tutor ships on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreset {
    /// 3.5" panel, 480x320.
    Small,
    /// 7" panel, 800x480.
    Medium,
    /// 10" panel, 1024x600.
    Large,
}

impl DisplayPreset {
    pub fn size(&self) -> (f32, f32) {
        match self {
            Self::Small => (480.0, 320.0),
            Self::Medium => (800.0, 480.0),
            Self::Large => (1024.0, 600.0),
        }
    }
}

/// Colors used by the tracing screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub primary: Color,
    pub success: Color,
    pub text: Color,
    pub guide: Color,
    pub user_drawing: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub bar_background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb8(240, 248, 255),
            primary: Color::rgb8(70, 130, 180),
            success: Color::rgb8(144, 238, 144),
            text: Color::rgb8(25, 25, 112),
            guide: Color::rgb8(200, 200, 200),
            user_drawing: Color::rgb8(70, 130, 180),
            correct: Color::rgb8(50, 205, 50),
            incorrect: Color::rgb8(255, 69, 0),
            bar_background: Color::rgb8(200, 200, 200),
        }
    }
}

/// Configuration for the tutor, injected by the host.
///
/// Every field has a default, so the host may pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// Screen width in device units (default: 480).
    pub screen_width: f32,
    /// Screen height in device units (default: 320).
    pub screen_height: f32,
    /// Side of the square area the guide is fitted into (default: 180).
    pub display_size: f32,
    /// Top edge of the guide area, below the title and pronunciation (default: 50).
    pub display_top: f32,
    /// Inner padding between the guide area edge and the glyph (default: 10).
    pub padding: f32,
    /// Max distance in device units for two points to match (default: 20).
    /// Not scaled with resolution: a 480-wide and an 800-wide panel share it.
    pub tolerance: f32,
    /// Score at which an attempt counts as complete (default: 0.7).
    pub completion_threshold: f32,
    pub dash_length: f32,
    pub dash_gap: f32,
    pub guide_line_width: f32,
    pub user_line_width: f32,
    /// Minimum finger travel before a new path point is recorded (default: 5).
    pub touch_sensitivity: f32,
    /// Seconds the "complete" celebration stays on screen (default: 2.0).
    pub celebration_duration: f32,
    /// Maximum number of tessellated vector vertices per frame (default: 65536).
    pub max_vector_vertices: usize,
    /// Maximum number of host events per frame (default: 32).
    pub max_events: usize,
    /// Screen areas covered by host buttons; touches there never draw.
    pub exclusion_zones: Vec<Region>,
    pub palette: Palette,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            screen_width: 480.0,
            screen_height: 320.0,
            display_size: 180.0,
            display_top: 50.0,
            padding: 10.0,
            tolerance: 20.0,
            completion_threshold: 0.7,
            dash_length: 10.0,
            dash_gap: 5.0,
            guide_line_width: 3.0,
            user_line_width: 4.0,
            touch_sensitivity: 5.0,
            celebration_duration: 2.0,
            max_vector_vertices: 65536,
            max_events: 32,
            exclusion_zones: Vec::new(),
            palette: Palette::default(),
        }
    }
}

impl TutorConfig {
    /// Parse a (possibly partial) config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject values that would break scoring or drawing.
    ///
    /// A non-positive `dash_length` is allowed and draws the guide solid.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("display_size", self.display_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "must be a positive number"));
            }
        }

        let non_negative = [
            ("display_top", self.display_top),
            ("padding", self.padding),
            ("tolerance", self.tolerance),
            ("dash_gap", self.dash_gap),
            ("guide_line_width", self.guide_line_width),
            ("user_line_width", self.user_line_width),
            ("touch_sensitivity", self.touch_sensitivity),
            ("celebration_duration", self.celebration_duration),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, "must be a non-negative number"));
            }
        }

        if !self.dash_length.is_finite() {
            return Err(invalid("dash_length", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.completion_threshold) {
            return Err(invalid("completion_threshold", "must lie in [0, 1]"));
        }
        Ok(())
    }

    /// Defaults sized for one of the stock panels.
    pub fn for_display(preset: DisplayPreset) -> Self {
        let (screen_width, screen_height) = preset.size();
        Self {
            screen_width,
            screen_height,
            ..Self::default()
        }
    }

    /// The square the guide is fitted into: horizontally centered, `display_size` wide.
    pub fn tracing_region(&self) -> Region {
        let x = ((self.screen_width - self.display_size) / 2.0).floor();
        Region::new(x, self.display_top, self.display_size, self.display_size)
    }

    pub fn trace_params(&self) -> TraceParams {
        TraceParams {
            tolerance: self.tolerance,
            completion_threshold: self.completion_threshold,
            padding: self.padding,
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            dash_length: self.dash_length,
            dash_gap: self.dash_gap,
            guide_line_width: self.guide_line_width,
            user_line_width: self.user_line_width,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            palette: self.palette.clone(),
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TraceError {
    TraceError::InvalidConfig { field, reason }
}

use glam::Vec2;

use super::feedback::{classify_segments, SegmentClass};
use super::guide::GuideGeometry;
use super::scoring::ScoreBreakdown;
use crate::api::types::{CompletionState, Region};
use crate::glyphs::{Character, Stroke};
use crate::render::{draw_dashed_polyline, ProgressBar, RenderStyle, Surface};

/// Scoring knobs for a tracing attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceParams {
    /// Max distance in device units for a user and a guide point to match.
    pub tolerance: f32,
    /// Score at which the attempt counts as complete.
    pub completion_threshold: f32,
    /// Space kept between the region edge and the fitted glyph.
    pub padding: f32,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            tolerance: 20.0,
            completion_threshold: 0.7,
            padding: 10.0,
        }
    }
}

/// Scores a freehand path against one character fitted onto a region.
///
/// The engine owns the user path; every mutation rescores it, so
/// `completion()` is always current.
#[derive(Debug, Clone)]
pub struct TracingEngine {
    params: TraceParams,
    region: Region,
    /// Normalized strokes of the loaded character, kept for region changes.
    source: Vec<Stroke>,
    guide: GuideGeometry,
    /// Flattened `guide.strokes`, rebuilt with the guide.
    guide_points: Vec<Vec2>,
    user_path: Vec<Vec2>,
    state: CompletionState,
}

impl TracingEngine {
    /// An engine with nothing loaded.
    pub fn new(params: TraceParams, region: Region) -> Self {
        Self {
            params,
            region,
            source: Vec::new(),
            guide: GuideGeometry::empty(),
            guide_points: Vec::new(),
            user_path: Vec::with_capacity(256),
            state: CompletionState::EMPTY,
        }
    }

    pub fn with_character(character: &Character, region: Region, params: TraceParams) -> Self {
        let mut engine = Self::new(params, region);
        engine.load(character, region);
        engine
    }

    /// Fit `character` onto `region` and start a fresh attempt.
    pub fn load(&mut self, character: &Character, region: Region) {
        self.region = region;
        self.source = character.strokes.clone();
        self.rebuild_guide();
        self.user_path.clear();
        self.state = CompletionState::EMPTY;
        log::debug!(
            "loaded '{}': {} guide points, scale {:.3}",
            character.id,
            self.guide_points.len(),
            self.guide.scale_factor
        );
    }

    /// Refit the loaded character to a new region. The user path is kept and
    /// rescored against the moved guide.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
        self.rebuild_guide();
        self.rescore();
    }

    pub fn append_point(&mut self, p: Vec2) {
        self.user_path.push(p);
        self.rescore();
    }

    /// Replace the whole user path, dropping anything appended before.
    pub fn replace_path(&mut self, points: &[Vec2]) {
        self.user_path.clear();
        self.user_path.extend_from_slice(points);
        self.rescore();
    }

    pub fn clear(&mut self) {
        self.user_path.clear();
        self.state = CompletionState::EMPTY;
    }

    pub fn completion(&self) -> CompletionState {
        self.state
    }

    /// Accuracy and coverage of the current path.
    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown::measure(&self.user_path, &self.guide_points, self.params.tolerance)
    }

    pub fn guide(&self) -> &GuideGeometry {
        &self.guide
    }

    pub fn user_path(&self) -> &[Vec2] {
        &self.user_path
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn params(&self) -> &TraceParams {
        &self.params
    }

    /// Feedback class for each drawn segment.
    pub fn segment_classes(&self) -> Vec<SegmentClass> {
        classify_segments(&self.user_path, &self.guide_points, self.params.tolerance)
    }

    /// Draw the dashed guide, the colored user path and, once there is a
    /// score, the progress bar.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, style: &RenderStyle) {
        let palette = &style.palette;

        for stroke in &self.guide.strokes {
            if stroke.len() < 2 {
                continue;
            }
            draw_dashed_polyline(
                surface,
                stroke,
                style.dash_length,
                style.dash_gap,
                style.guide_line_width,
                palette.guide,
            );
        }

        if self.user_path.len() >= 2 {
            for (pair, class) in self.user_path.windows(2).zip(self.segment_classes()) {
                surface.line(pair[0], pair[1], style.user_line_width, class.color(palette));
            }
        }

        if self.state.score > 0.0 {
            ProgressBar::for_screen(style.screen_width, style.screen_height).draw(surface, self.state, style);
        }
    }

    fn rebuild_guide(&mut self) {
        self.guide = GuideGeometry::from_strokes(&self.source, self.region, self.params.padding);
        self.guide_points = self.guide.points().collect();
    }

    fn rescore(&mut self) {
        let score = self.breakdown().score();
        self.state = CompletionState::from_score(score, self.params.completion_threshold);
        log::trace!("rescored {} points: {:.3}", self.user_path.len(), score);
    }
}

use glam::Vec2;

use super::color::Color;
use super::surface::Surface;
use super::RenderStyle;
use crate::api::types::CompletionState;

const BAR_WIDTH: f32 = 150.0;
const BAR_HEIGHT: f32 = 12.0;
const BAR_BORDER: f32 = 2.0;
/// Distance from the bottom screen edge to the bar's top edge.
const BAR_BOTTOM_OFFSET: f32 = 50.0;

/// Horizontal completion bar drawn near the bottom of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl ProgressBar {
    /// Bar centered horizontally on a screen of the given size.
    pub fn for_screen(screen_width: f32, screen_height: f32) -> Self {
        Self {
            pos: Vec2::new(((screen_width - BAR_WIDTH) / 2.0).floor(), screen_height - BAR_BOTTOM_OFFSET),
            width: BAR_WIDTH,
            height: BAR_HEIGHT,
        }
    }

    /// Filled width for a score, truncated to whole units.
    pub fn fill_width(&self, score: f32) -> f32 {
        (self.width * score.clamp(0.0, 1.0)).floor()
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, state: CompletionState, style: &RenderStyle) {
        let palette = &style.palette;
        surface.fill_rect(self.pos, self.width, self.height, palette.bar_background);

        let fill: Color = if state.is_complete { palette.success } else { palette.primary };
        let fill_width = self.fill_width(state.score);
        if fill_width > 0.0 {
            surface.fill_rect(self.pos, fill_width, self.height, fill);
        }

        surface.stroke_rect(self.pos, self.width, self.height, BAR_BORDER, palette.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TutorConfig;
    use crate::render::surface::{DrawCommand, DrawList};

    #[test]
    fn bar_sits_above_bottom_edge() {
        let bar = ProgressBar::for_screen(480.0, 320.0);
        assert_eq!(bar.pos, Vec2::new(165.0, 270.0));
    }

    #[test]
    fn fill_width_truncates() {
        let bar = ProgressBar::for_screen(480.0, 320.0);
        assert_eq!(bar.fill_width(0.75), 112.0);
        assert_eq!(bar.fill_width(1.5), 150.0);
        assert_eq!(bar.fill_width(0.0), 0.0);
    }

    #[test]
    fn complete_bar_uses_success_color() {
        let style = TutorConfig::default().render_style();
        let bar = ProgressBar::for_screen(style.screen_width, style.screen_height);
        let mut list = DrawList::new();
        bar.draw(&mut list, CompletionState::from_score(0.8, 0.7), &style);

        assert_eq!(list.len(), 3);
        match list.commands()[1] {
            DrawCommand::FillRect { width, color, .. } => {
                assert_eq!(width, 120.0);
                assert_eq!(color, style.palette.success);
            }
            other => panic!("expected fill, got {other:?}"),
        }
        assert!(matches!(list.commands()[2], DrawCommand::StrokeRect { .. }));
    }
}

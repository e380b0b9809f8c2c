//! Drawing surface contract.
//!
//! The engine never rasterizes; it issues lines and rectangles against a
//! `Surface`. The host picks the implementation: `DrawList` records commands
//! for a canvas painter, `VectorState` tessellates them for the GPU.

use glam::Vec2;

use super::color::Color;

/// Target for the tutor's draw calls.
pub trait Surface {
    /// A straight line of the given width.
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// A filled axis-aligned rectangle with top-left corner `pos`.
    fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: Color);

    /// The outline of an axis-aligned rectangle.
    fn stroke_rect(&mut self, pos: Vec2, width: f32, height: f32, line_width: f32, color: Color);
}

/// A single recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    FillRect {
        pos: Vec2,
        width: f32,
        height: f32,
        color: Color,
    },
    StrokeRect {
        pos: Vec2,
        width: f32,
        height: f32,
        line_width: f32,
        color: Color,
    },
}

/// Surface that records draw calls in order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded lines drawn in `color`, as (from, to) pairs.
    pub fn lines_with_color(&self, color: Color) -> Vec<(Vec2, Vec2)> {
        self.commands
            .iter()
            .filter_map(|cmd| match *cmd {
                DrawCommand::Line { from, to, color: c, .. } if c == color => Some((from, to)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for DrawList {
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect { pos, width, height, color });
    }

    fn stroke_rect(&mut self, pos: Vec2, width: f32, height: f32, line_width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            pos,
            width,
            height,
            line_width,
            color,
        });
    }
}

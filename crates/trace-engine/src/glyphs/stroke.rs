use std::f32::consts::TAU;

use glam::Vec2;
use serde::Deserialize;

/// One ordered pen path in normalized 0-100 space (origin top-left, y down).
pub type Stroke = Vec<Vec2>;

/// How a stroke is written in a glyph table.
///
/// Straight strokes and circles are stored as generators instead of point
/// lists; everything else is spelled out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeSpec {
    /// `steps + 1` evenly spaced points from `from` to `to`, inclusive.
    Line {
        from: [f32; 2],
        to: [f32; 2],
        #[serde(default = "default_line_steps")]
        steps: u32,
    },
    /// `steps + 1` points around a circle, starting and ending at angle 0.
    Circle {
        center: [f32; 2],
        radius: f32,
        #[serde(default = "default_circle_steps")]
        steps: u32,
    },
    /// Literal points.
    Points(Vec<[f32; 2]>),
}

fn default_line_steps() -> u32 {
    10
}

fn default_circle_steps() -> u32 {
    20
}

impl StrokeSpec {
    /// Expand into concrete points.
    pub fn to_points(&self) -> Stroke {
        match self {
            Self::Line { from, to, steps } => line_points(Vec2::from(*from), Vec2::from(*to), *steps),
            Self::Circle { center, radius, steps } => circle_points(Vec2::from(*center), *radius, *steps),
            Self::Points(points) => points.iter().copied().map(Vec2::from).collect(),
        }
    }
}

/// Subdivide a line into `steps` equal parts. Returns `steps + 1` points
/// with both endpoints exact; `steps == 0` returns just `from`.
pub fn line_points(from: Vec2, to: Vec2, steps: u32) -> Stroke {
    if steps == 0 {
        return vec![from];
    }
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            from + (to - from) * t
        })
        .collect()
}

/// Subdivide a circle into `steps` arcs. Returns `steps + 1` points; the
/// last coincides with the first so the outline closes. `steps == 0`
/// returns the single point at angle 0.
pub fn circle_points(center: Vec2, radius: f32, steps: u32) -> Stroke {
    if steps == 0 {
        return vec![center + Vec2::new(radius, 0.0)];
    }
    (0..=steps)
        .map(|i| {
            let angle = TAU * i as f32 / steps as f32;
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

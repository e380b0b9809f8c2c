//! Dashed polylines for the guide outline.

use glam::Vec2;

use super::color::Color;
use super::surface::Surface;

/// More dashes than this on one segment would be indistinguishable from a
/// solid line, so the segment is drawn solid instead.
pub const MAX_DASHES_PER_SEGMENT: usize = 4096;

/// Split the segment `from → to` into dashes.
///
/// Starts with a dash at `from`, then alternates `dash_length` of line with
/// `dash_gap` of nothing. The last dash is clipped to the segment end.
/// A zero-length segment yields nothing; a non-positive `dash_length`, or a
/// pattern too fine to see (over `MAX_DASHES_PER_SEGMENT` dashes), yields the
/// whole segment as one solid piece.
pub fn dash_segment(from: Vec2, to: Vec2, dash_length: f32, dash_gap: f32) -> Vec<(Vec2, Vec2)> {
    let length = from.distance(to);
    if length == 0.0 || !length.is_finite() {
        return Vec::new();
    }
    if dash_length.is_nan() || dash_length <= 0.0 {
        return vec![(from, to)];
    }

    let dir = (to - from) / length;
    let period = dash_length + dash_gap.max(0.0);
    if !period.is_finite() || period >= length {
        return vec![(from, from + dir * dash_length.min(length))];
    }
    let count = (length / period).ceil();
    if count > MAX_DASHES_PER_SEGMENT as f32 {
        return vec![(from, to)];
    }

    (0..count as usize)
        .map(|i| i as f32 * period)
        .filter(|start| *start < length)
        .map(|start| {
            let end = (start + dash_length).min(length);
            (from + dir * start, from + dir * end)
        })
        .collect()
}

/// Draw `points` as a dashed polyline. The dash cycle restarts at every point.
pub fn draw_dashed_polyline<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Vec2],
    dash_length: f32,
    dash_gap: f32,
    width: f32,
    color: Color,
) {
    for pair in points.windows(2) {
        for (a, b) in dash_segment(pair[0], pair[1], dash_length, dash_gap) {
            surface.line(a, b, width, color);
        }
    }
}

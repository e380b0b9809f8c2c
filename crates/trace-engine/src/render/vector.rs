//! Lyon-based tessellation surface.
//!
//! Turns the tutor's lines and rectangles into a flat triangle-list vertex
//! buffer the host uploads to WebGPU as-is.
//!
//! # Usage
//!
//! ```ignore
//! let mut vectors = VectorState::with_capacity(config.max_vector_vertices);
//! vectors.clear();
//! engine.render(&mut vectors, &style);
//! let (ptr, count) = (vectors.buffer_ptr(), vectors.vertex_count());
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, LineCap,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::color::Color;
use super::surface::Surface;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn at(x: f32, y: f32, color: Color) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
    }
}

struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

struct StrokeVertexCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Tessellating surface.
///
/// Cleared each frame and populated by draw calls. Geometry that would push
/// the buffer past `max_vertices` is dropped.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
    overflowed: bool,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
            overflowed: false,
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Raw pointer to the flat float buffer (for the host to copy out).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        let incoming = self.geometry.indices.len();
        if self.vertex_count() + incoming > self.max_vertices {
            if !self.overflowed {
                log::warn!(
                    "vector buffer full ({} vertices), dropping geometry",
                    self.max_vertices
                );
                self.overflowed = true;
            }
        } else {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Keep the tessellated geometry only if tessellation succeeded.
    fn finish(&mut self, ok: bool) {
        if ok {
            self.flush_geometry();
        } else {
            log::debug!("tessellation failed, dropping partial geometry");
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    fn polyline_path(points: &[Vec2], closed: bool) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(closed);
        builder.build()
    }

    /// Tessellate and fill a closed polygon.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let path = Self::polyline_path(points, true);
        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        self.finish(result.is_ok());
    }

    /// Tessellate a stroked polyline, open or closed.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color, closed: bool) {
        if points.len() < 2 || width <= 0.0 {
            return;
        }
        let path = Self::polyline_path(points, closed);
        let options = StrokeOptions::tolerance(0.5)
            .with_line_width(width)
            .with_line_cap(LineCap::Round);
        let result = self.stroke_tess.tessellate_path(
            &path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        self.finish(result.is_ok());
    }

    fn rect_corners(pos: Vec2, width: f32, height: f32) -> [Vec2; 4] {
        [
            pos,
            Vec2::new(pos.x + width, pos.y),
            Vec2::new(pos.x + width, pos.y + height),
            Vec2::new(pos.x, pos.y + height),
        ]
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for VectorState {
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if from == to {
            return;
        }
        self.stroke_polyline(&[from, to], width, color, false);
    }

    fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: Color) {
        self.fill_polygon(&Self::rect_corners(pos, width, height), color);
    }

    fn stroke_rect(&mut self, pos: Vec2, width: f32, height: f32, line_width: f32, color: Color) {
        self.stroke_polyline(&Self::rect_corners(pos, width, height), line_width, color, true);
    }
}

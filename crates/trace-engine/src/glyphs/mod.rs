//! Character geometry: glyph tables, stroke generators, script providers.

mod registry;
mod stroke;
mod table;

pub use registry::{CharacterProvider, ScriptId, ScriptRegistry};
pub use stroke::{circle_points, line_points, Stroke, StrokeSpec};
pub use table::{GlyphDef, GlyphTable, TableProvider};

/// A traceable glyph: one or more strokes in normalized 0-100 space.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Glyph identifier, unique within its script.
    pub id: String,
    pub strokes: Vec<Stroke>,
    pub display_name: String,
    pub pronunciation: String,
}

impl Character {
    /// A character with no display metadata beyond its id.
    pub fn new(id: impl Into<String>, strokes: Vec<Stroke>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            strokes,
            pronunciation: String::new(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Vec::len).sum()
    }
}

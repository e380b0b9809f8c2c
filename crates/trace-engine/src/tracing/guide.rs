use glam::Vec2;

use crate::api::types::Region;
use crate::glyphs::{Character, Stroke};

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounds of `points`, or `None` for an empty set.
    pub fn of(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds { min: p, max: p },
                Some(b) => Bounds { min: b.min.min(p), max: b.max.max(p) },
            })
        })
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// A character's strokes fitted onto a display region.
///
/// `device = normalized * scale_factor + offset` for every point.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideGeometry {
    pub scale_factor: f32,
    pub offset: Vec2,
    pub strokes: Vec<Stroke>,
}

impl GuideGeometry {
    /// Geometry of a character with no points: nothing to trace.
    pub fn empty() -> Self {
        Self {
            scale_factor: 1.0,
            offset: Vec2::ZERO,
            strokes: Vec::new(),
        }
    }

    pub fn build(character: &Character, region: Region, padding: f32) -> Self {
        Self::from_strokes(&character.strokes, region, padding)
    }

    /// Fit `strokes` into `region` minus `padding` on every side, keeping the
    /// aspect ratio and centering the result.
    ///
    /// Each bounding-box extent is floored to 1 unit, so a single point or a
    /// perfectly straight stroke scales along its other axis only.
    pub fn from_strokes(strokes: &[Stroke], region: Region, padding: f32) -> Self {
        let Some(bounds) = Bounds::of(strokes.iter().flatten().copied()) else {
            return Self::empty();
        };

        let extent = bounds.size();
        let floored = extent.max(Vec2::ONE);
        // A region smaller than its padding still gets a positive scale.
        let usable = (region.size() - Vec2::splat(2.0 * padding)).max(Vec2::ONE);
        let scale_factor = (usable.x / floored.x).min(usable.y / floored.y);

        let scaled_size = extent * scale_factor;
        let offset = region.origin() + (region.size() - scaled_size) / 2.0 - bounds.min * scale_factor;

        let strokes = strokes
            .iter()
            .map(|stroke| stroke.iter().map(|&p| p * scale_factor + offset).collect())
            .collect();

        Self {
            scale_factor,
            offset,
            strokes,
        }
    }

    /// All device-space guide points across strokes.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.strokes.iter().flatten().copied()
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

impl Default for GuideGeometry {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::line_points;

    const EPS: f32 = 1e-3;

    fn horizontal_one() -> Character {
        Character::new("一", vec![line_points(Vec2::new(20.0, 50.0), Vec2::new(80.0, 50.0), 10)])
    }

    #[test]
    fn horizontal_stroke_uses_extent_floor() {
        let guide = GuideGeometry::build(&horizontal_one(), Region::new(0.0, 0.0, 300.0, 300.0), 10.0);
        assert!((guide.scale_factor - 280.0 / 60.0).abs() < EPS);
        assert_eq!(guide.strokes.len(), 1);
        assert_eq!(guide.strokes[0].len(), 11);

        // Spans the padded width and sits on the vertical midline
        let first = guide.strokes[0][0];
        let last = guide.strokes[0][10];
        assert!((first.x - 10.0).abs() < EPS);
        assert!((last.x - 290.0).abs() < EPS);
        for p in &guide.strokes[0] {
            assert!((p.y - 150.0).abs() < EPS);
        }
    }

    #[test]
    fn single_point_character_is_centered() {
        let dot = Character::new(".", vec![vec![Vec2::new(40.0, 70.0)]]);
        let guide = GuideGeometry::build(&dot, Region::new(100.0, 50.0, 200.0, 100.0), 10.0);
        assert!((guide.scale_factor - 80.0).abs() < EPS);
        let p = guide.strokes[0][0];
        assert!((p - Vec2::new(200.0, 100.0)).length() < EPS);
    }

    #[test]
    fn empty_character_gives_empty_geometry() {
        let blank = Character::new("blank", vec![]);
        let guide = GuideGeometry::build(&blank, Region::new(0.0, 0.0, 100.0, 100.0), 10.0);
        assert_eq!(guide, GuideGeometry::empty());
        assert!(guide.is_empty());

        let hollow = Character::new("hollow", vec![vec![], vec![]]);
        assert!(GuideGeometry::build(&hollow, Region::new(0.0, 0.0, 100.0, 100.0), 10.0).is_empty());
    }

    #[test]
    fn fits_inside_padded_region() {
        let box_char = Character::new(
            "box",
            vec![vec![Vec2::new(10.0, 20.0), Vec2::new(90.0, 20.0), Vec2::new(90.0, 60.0)]],
        );
        let region = Region::new(50.0, 40.0, 200.0, 120.0);
        let guide = GuideGeometry::build(&box_char, region, 10.0);
        let bounds = Bounds::of(guide.points()).unwrap();

        assert!(bounds.min.x >= region.x + 10.0 - EPS);
        assert!(bounds.max.x <= region.x + region.width - 10.0 + EPS);
        assert!(bounds.min.y >= region.y + 10.0 - EPS);
        assert!(bounds.max.y <= region.y + region.height - 10.0 + EPS);

        let center = (bounds.min + bounds.max) / 2.0;
        assert!((center - Vec2::new(150.0, 100.0)).length() < EPS);
    }

    #[test]
    fn tiny_region_still_scales_positively() {
        let guide = GuideGeometry::build(&horizontal_one(), Region::new(0.0, 0.0, 8.0, 8.0), 10.0);
        assert!(guide.scale_factor > 0.0);
    }

    #[test]
    fn offset_and_scale_map_normalized_points() {
        let guide = GuideGeometry::build(&horizontal_one(), Region::new(0.0, 0.0, 300.0, 300.0), 10.0);
        let mapped = Vec2::new(50.0, 50.0) * guide.scale_factor + guide.offset;
        assert!((mapped - guide.strokes[0][5]).length() < EPS);
    }

    #[test]
    fn same_aspect_regions_scale_uniformly() {
        let character = Character::new(
            "ㄱ",
            vec![
                line_points(Vec2::new(20.0, 20.0), Vec2::new(80.0, 20.0), 10),
                line_points(Vec2::new(80.0, 20.0), Vec2::new(80.0, 80.0), 10),
            ],
        );
        let small = GuideGeometry::build(&character, Region::new(0.0, 0.0, 240.0, 160.0), 10.0);
        let large = GuideGeometry::build(&character, Region::new(0.0, 0.0, 480.0, 320.0), 20.0);

        assert!((large.scale_factor - 2.0 * small.scale_factor).abs() < EPS);
        for (a, b) in small.points().zip(large.points()) {
            assert!((b - a * 2.0).length() < EPS);
        }
    }
}

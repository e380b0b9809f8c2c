use glam::Vec2;

use super::scoring::nearest_distance;
use crate::api::config::Palette;
use crate::render::Color;

/// How close a drawn segment runs to the guide. Cosmetic only; the score
/// uses its own point-wise distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentClass {
    /// Midpoint within tolerance of the guide.
    Correct,
    /// Within twice the tolerance, or nothing to compare against.
    Neutral,
    /// Further out than twice the tolerance.
    Incorrect,
}

impl SegmentClass {
    pub fn classify(distance: f32, tolerance: f32) -> Self {
        if distance <= tolerance {
            Self::Correct
        } else if distance <= 2.0 * tolerance {
            Self::Neutral
        } else {
            Self::Incorrect
        }
    }

    pub fn color(&self, palette: &Palette) -> Color {
        match self {
            Self::Correct => palette.correct,
            Self::Neutral => palette.user_drawing,
            Self::Incorrect => palette.incorrect,
        }
    }
}

/// Classify each consecutive pair of `user` points by the distance from its
/// midpoint to the nearest guide point. Returns one entry per segment.
pub fn classify_segments(user: &[Vec2], guide: &[Vec2], tolerance: f32) -> Vec<SegmentClass> {
    user.windows(2)
        .map(|pair| {
            let mid = (pair[0] + pair[1]) * 0.5;
            nearest_distance(mid, guide)
                .map_or(SegmentClass::Neutral, |d| SegmentClass::classify(d, tolerance))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(SegmentClass::classify(0.0, 20.0), SegmentClass::Correct);
        assert_eq!(SegmentClass::classify(20.0, 20.0), SegmentClass::Correct);
        assert_eq!(SegmentClass::classify(20.5, 20.0), SegmentClass::Neutral);
        assert_eq!(SegmentClass::classify(40.0, 20.0), SegmentClass::Neutral);
        assert_eq!(SegmentClass::classify(40.5, 20.0), SegmentClass::Incorrect);
    }

    #[test]
    fn uses_segment_midpoints() {
        let guide = [Vec2::new(50.0, 0.0)];
        // Endpoints are 50 away but the midpoint sits on the guide
        let user = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(100.0, 200.0)];
        let classes = classify_segments(&user, &guide, 20.0);
        assert_eq!(classes, vec![SegmentClass::Correct, SegmentClass::Incorrect]);
    }

    #[test]
    fn short_paths_have_no_segments() {
        let guide = [Vec2::ZERO];
        assert!(classify_segments(&[], &guide, 20.0).is_empty());
        assert!(classify_segments(&[Vec2::ZERO], &guide, 20.0).is_empty());
    }

    #[test]
    fn empty_guide_is_neutral() {
        let user = [Vec2::ZERO, Vec2::new(10.0, 0.0)];
        assert_eq!(classify_segments(&user, &[], 20.0), vec![SegmentClass::Neutral]);
    }

    #[test]
    fn colors_follow_palette() {
        let palette = Palette::default();
        assert_eq!(SegmentClass::Correct.color(&palette), palette.correct);
        assert_eq!(SegmentClass::Neutral.color(&palette), palette.user_drawing);
        assert_eq!(SegmentClass::Incorrect.color(&palette), palette.incorrect);
    }
}

//! Two-sided distance scoring of a user path against guide points.
//!
//! Nearest-neighbour search is brute force, O(|U|·|G|). Both sets stay in the
//! low hundreds of points per attempt; a spatial grid over the guide points
//! would be the upgrade if paths grow, applied to both passes alike.

use glam::Vec2;

/// Distance from `p` to the closest point in `set`, or `None` if `set` is empty.
pub fn nearest_distance(p: Vec2, set: &[Vec2]) -> Option<f32> {
    set.iter().map(|q| p.distance(*q)).min_by(f32::total_cmp)
}

/// Fraction of `from` points with some `to` point within `tolerance`.
/// Zero when either side is empty.
pub fn within_fraction(from: &[Vec2], to: &[Vec2], tolerance: f32) -> f32 {
    if from.is_empty() || to.is_empty() {
        return 0.0;
    }
    let hits = from
        .iter()
        .filter(|p| nearest_distance(**p, to).is_some_and(|d| d <= tolerance))
        .count();
    hits as f32 / from.len() as f32
}

/// How much of what the user drew lies on the guide.
pub fn accuracy(user: &[Vec2], guide: &[Vec2], tolerance: f32) -> f32 {
    within_fraction(user, guide, tolerance)
}

/// How much of the guide the user drew over.
pub fn coverage(user: &[Vec2], guide: &[Vec2], tolerance: f32) -> f32 {
    within_fraction(guide, user, tolerance)
}

/// Both halves of a score, kept apart for display and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub accuracy: f32,
    pub coverage: f32,
}

impl ScoreBreakdown {
    pub fn measure(user: &[Vec2], guide: &[Vec2], tolerance: f32) -> Self {
        Self {
            accuracy: accuracy(user, guide, tolerance),
            coverage: coverage(user, guide, tolerance),
        }
    }

    /// Even blend of accuracy and coverage.
    pub fn score(&self) -> f32 {
        0.5 * self.accuracy + 0.5 * self.coverage
    }
}

/// Completion score in `[0, 1]`; zero if either set is empty.
pub fn score(user: &[Vec2], guide: &[Vec2], tolerance: f32) -> f32 {
    ScoreBreakdown::measure(user, guide, tolerance).score()
}

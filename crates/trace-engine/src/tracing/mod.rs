//! Guide fitting, path scoring and drawing feedback.

mod engine;
mod feedback;
mod guide;
pub mod scoring;

pub use engine::{TraceParams, TracingEngine};
pub use feedback::{classify_segments, SegmentClass};
pub use guide::{Bounds, GuideGeometry};
pub use scoring::{accuracy, coverage, score, ScoreBreakdown};

//! Stroke handling: path sampling between pointer samples and the per-drag state machine.
//!
//! [`sample_path`] expands two consecutive UV positions of a drag into evenly spaced stamp
//! centers so fast pointer motion leaves no gaps. [`StrokeTracker`] decides when to
//! interpolate, and [`CleaningBrush`] runs the whole pipeline for one pointer sample.
use glam::Vec2;

pub mod brush;
pub mod tracker;

pub use brush::CleaningBrush;
pub use tracker::{StrokeState, StrokeTracker, SurfaceHit};

/// Upper bound on segments per path, keeping degenerate radii bounded.
pub const MAX_PATH_SEGMENTS: u32 = 1 << 16;

/// Number of segments between `from` and `to`: `max(1, ceil(distance / radius × path_steps))`.
///
/// Non-positive or non-finite radii yield a single segment. Unlike the raw formula,
/// `path_steps = 0` counts as `1` and gives `ceil(distance / radius)` segments, not one.
/// The result is capped at [`MAX_PATH_SEGMENTS`].
pub fn segment_count(from: Vec2, to: Vec2, radius: f32, path_steps: u32) -> u32 {
    let steps = (from.distance(to) / radius * path_steps.max(1) as f32).ceil();
    if radius > 0.0 && steps.is_finite() && steps >= 1.0 {
        (steps as u32).min(MAX_PATH_SEGMENTS)
    } else {
        1
    }
}

/// Samples the segment `from → to` into `segment_count + 1` points, both endpoints included.
pub fn sample_path(
    from: impl Into<Vec2>,
    to: impl Into<Vec2>,
    radius: f32,
    path_steps: u32,
) -> StrokePath {
    let (from, to) = (from.into(), to.into());
    StrokePath {
        from,
        to,
        segments: segment_count(from, to, radius, path_steps),
        next: 0,
    }
}

/// Ordered stamp centers along a stroke segment.
///
/// A pure function of its inputs: cloning or calling [`StrokePath::restarted`] replays the
/// same points.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePath {
    from: Vec2,
    to: Vec2,
    segments: u32,
    next: u32,
}

impl StrokePath {
    /// A path holding exactly one point.
    pub fn single(uv: impl Into<Vec2>) -> Self {
        let uv = uv.into();
        Self {
            from: uv,
            to: uv,
            segments: 0,
            next: 0,
        }
    }

    /// Number of interpolation segments; the path yields one more point than this.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn start(&self) -> Vec2 {
        self.from
    }

    pub fn end(&self) -> Vec2 {
        self.to
    }

    /// The same path rewound to its first point.
    pub fn restarted(&self) -> Self {
        Self {
            next: 0,
            ..self.clone()
        }
    }

    fn point(&self, i: u32) -> Vec2 {
        if i == 0 {
            self.from
        } else if i >= self.segments {
            self.to
        } else {
            self.from.lerp(self.to, i as f32 / self.segments as f32)
        }
    }
}

impl Iterator for StrokePath {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.next > self.segments {
            return None;
        }
        let p = self.point(self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.segments + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StrokePath {}

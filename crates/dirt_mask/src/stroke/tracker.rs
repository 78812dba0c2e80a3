//! Per-drag stroke state.
use glam::{Vec2, Vec3};

use super::{sample_path, StrokePath};

/// A resolved pointer contact: which surface was hit, where, and how it faces the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceHit<S> {
    pub surface: S,
    pub uv: Vec2,
    pub normal: Vec3,
    /// Direction from the viewer towards the hit point.
    pub view_direction: Vec3,
}

impl<S> SurfaceHit<S> {
    pub fn new(
        surface: S,
        uv: impl Into<Vec2>,
        normal: impl Into<Vec3>,
        view_direction: impl Into<Vec3>,
    ) -> Self {
        Self {
            surface,
            uv: uv.into(),
            normal: normal.into(),
            view_direction: view_direction.into(),
        }
    }

    /// A hit seen head-on: normal `+Z`, viewer looking down `-Z`.
    pub fn head_on(surface: S, uv: impl Into<Vec2>) -> Self {
        Self::new(surface, uv, Vec3::Z, Vec3::NEG_Z)
    }
}

/// Stroke state of one pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum StrokeState<S> {
    Idle,
    Stroking { surface: S, last_uv: Vec2 },
}

impl<S> Default for StrokeState<S> {
    fn default() -> Self {
        StrokeState::Idle
    }
}

/// Tracks an active drag and decides which stamp centers each new contact produces.
///
/// - first contact, or contact on a different surface than the previous one: a single stamp
///   at the new position;
/// - continued contact on the same surface: the interpolated path from the previous position;
/// - [`StrokeTracker::release`] (pointer up or contact lost) forgets the previous position.
#[derive(Clone, Debug)]
pub struct StrokeTracker<S> {
    state: StrokeState<S>,
}

impl<S> Default for StrokeTracker<S> {
    fn default() -> Self {
        Self {
            state: StrokeState::Idle,
        }
    }
}

impl<S: PartialEq + Clone> StrokeTracker<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StrokeState<S> {
        &self.state
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking { .. })
    }

    /// Registers a contact and returns the stamp centers to apply for it.
    pub fn contact(&mut self, surface: &S, uv: Vec2, radius: f32, path_steps: u32) -> StrokePath {
        let path = match &self.state {
            StrokeState::Stroking {
                surface: previous,
                last_uv,
            } if previous == surface => sample_path(*last_uv, uv, radius, path_steps),
            _ => StrokePath::single(uv),
        };
        self.state = StrokeState::Stroking {
            surface: surface.clone(),
            last_uv: uv,
        };
        path
    }

    /// Ends the stroke.
    pub fn release(&mut self) {
        self.state = StrokeState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_contact_is_a_single_stamp() {
        let mut tracker = StrokeTracker::new();
        let path = tracker.contact(&1u32, Vec2::new(0.2, 0.2), 0.05, 20);
        assert_eq!(path.len(), 1);
        assert_eq!(
            tracker.state(),
            &StrokeState::Stroking {
                surface: 1,
                last_uv: Vec2::new(0.2, 0.2)
            }
        );
    }

    #[test]
    fn continued_contact_interpolates_from_last_position() {
        let mut tracker = StrokeTracker::new();
        tracker.contact(&"plate", Vec2::new(0.25, 0.5), 0.125, 2);
        let path = tracker.contact(&"plate", Vec2::new(0.75, 0.5), 0.125, 2);
        assert_eq!(path.segments(), 8);
        assert_eq!(path.start(), Vec2::new(0.25, 0.5));
        assert_eq!(path.end(), Vec2::new(0.75, 0.5));
    }

    #[test]
    fn surface_change_does_not_interpolate() {
        let mut tracker = StrokeTracker::new();
        tracker.contact(&"plate", Vec2::new(0.1, 0.1), 0.05, 20);
        let path = tracker.contact(&"cup", Vec2::new(0.9, 0.9), 0.05, 20);
        assert_eq!(path.collect::<Vec<_>>(), vec![Vec2::new(0.9, 0.9)]);
        // The new surface becomes the stroke target.
        let path = tracker.contact(&"cup", Vec2::new(0.9, 0.8), 0.05, 20);
        assert!(path.len() > 1);
    }

    #[test]
    fn release_returns_to_idle() {
        let mut tracker = StrokeTracker::new();
        tracker.contact(&7u8, Vec2::ZERO, 0.05, 20);
        assert!(tracker.is_stroking());
        tracker.release();
        assert_eq!(tracker.state(), &StrokeState::Idle);
        let path = tracker.contact(&7u8, Vec2::ONE, 0.05, 20);
        assert_eq!(path.len(), 1);
    }
}

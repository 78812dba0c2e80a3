//! Cleaning brush driver: tracker, painter, and settings for one pointer.
use tracing::trace;

use super::tracker::{StrokeTracker, SurfaceHit};
use crate::brush::BrushSettings;
use crate::mask::DirtMask;
use crate::paint::{Stamp, StampPainter};

/// Turns pointer contacts into stamps on the contacted surface's mask.
///
/// The caller resolves each pointer sample to a [`SurfaceHit`] and passes the mask belonging to
/// `hit.surface`; the brush remembers the previous contact to fill the gap between samples.
pub struct CleaningBrush<S> {
    settings: BrushSettings,
    painter: StampPainter,
    tracker: StrokeTracker<S>,
}

impl<S: PartialEq + Clone> CleaningBrush<S> {
    pub fn new(settings: BrushSettings) -> Self {
        Self::with_painter(settings, StampPainter::new())
    }

    /// Uses a preconfigured painter, e.g. with stencils or falloff overrides.
    pub fn with_painter(settings: BrushSettings, painter: StampPainter) -> Self {
        Self {
            settings,
            painter,
            tracker: StrokeTracker::new(),
        }
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    /// Replaces the settings. The kernel is rebuilt on the next stamp if the radius or stencil
    /// changed; the active stroke continues.
    pub fn set_settings(&mut self, settings: BrushSettings) {
        self.settings = settings;
    }

    pub fn painter(&self) -> &StampPainter {
        &self.painter
    }

    pub fn tracker(&self) -> &StrokeTracker<S> {
        &self.tracker
    }

    /// Applies one pointer contact to `mask` and returns the dirt removed.
    pub fn stroke(&mut self, hit: &SurfaceHit<S>, mask: &mut DirtMask) -> f64 {
        let path = self.tracker.contact(
            &hit.surface,
            hit.uv,
            self.settings.radius,
            self.settings.path_steps,
        );
        let segments = path.segments();
        let stamp = Stamp::new(hit.uv, hit.normal, hit.view_direction);

        let removed: f64 = path
            .map(|uv| {
                self.painter
                    .apply_stamp(mask, &stamp.at(uv), &self.settings)
            })
            .sum();

        trace!(segments, removed, "stroke segment applied");
        removed
    }

    /// Ends the current stroke (pointer released or contact lost).
    pub fn release(&mut self) {
        self.tracker.release();
    }
}

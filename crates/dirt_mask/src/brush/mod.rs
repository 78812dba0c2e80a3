//! Brush configuration, shapes, and kernels.
//!
//! This module groups the tunables a caller supplies per stroke ([`BrushSettings`]), the
//! stencils that shape a brush, the precomputed [`BrushKernel`] and its [`KernelCache`], and
//! the falloff curves the painter applies per stamp.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod cache;
pub mod falloff;
pub mod kernel;
pub mod stencil;

pub use cache::KernelCache;
pub use falloff::{angle_efficiency, smoothstep01, FalloffCurve, Linear, SmoothStep};
pub use kernel::{BrushKernel, BrushShape, MAX_RADIUS_PX};
pub use stencil::{AlphaStencil, Stencil, StencilId, StencilRegistry};

/// Accepted range for [`BrushSettings::radius`].
pub const RADIUS_RANGE: (f32, f32) = (0.01, 0.5);
/// Accepted range for [`BrushSettings::strength`].
pub const STRENGTH_RANGE: (f32, f32) = (0.01, 1.0);
/// Accepted range for [`BrushSettings::path_steps`].
pub const PATH_STEPS_RANGE: (u32, u32) = (1, 50);
/// Accepted range for [`BrushSettings::angle_threshold_deg`].
pub const ANGLE_THRESHOLD_RANGE: (f32, f32) = (0.0, 90.0);

/// Per-stroke brush tunables.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct BrushSettings {
    /// Brush radius in UV units (fraction of the mask edge).
    pub radius: f32,
    /// Dirt removed per stamp at the brush center, head-on.
    pub strength: f32,
    /// Stamp density multiplier along a stroke segment.
    pub path_steps: u32,
    /// Facing angle in degrees within which cleaning runs at full efficiency.
    pub angle_threshold_deg: f32,
    /// Optional stencil id; `None` uses the disc brush.
    pub stencil: Option<StencilId>,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            radius: 0.05,
            strength: 0.1,
            path_steps: 20,
            angle_threshold_deg: 45.0,
            stencil: None,
        }
    }
}

impl BrushSettings {
    /// Creates settings with the given radius and defaults otherwise.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_path_steps(mut self, path_steps: u32) -> Self {
        self.path_steps = path_steps;
        self
    }

    pub fn with_angle_threshold_deg(mut self, angle_threshold_deg: f32) -> Self {
        self.angle_threshold_deg = angle_threshold_deg;
        self
    }

    /// Sets the stencil id used to shape the brush.
    pub fn with_stencil(mut self, stencil: impl Into<StencilId>) -> Self {
        self.stencil = Some(stencil.into());
        self
    }

    /// Clears the stencil so the disc brush is used.
    pub fn without_stencil(mut self) -> Self {
        self.stencil = None;
        self
    }

    /// `cos(angle_threshold_deg)`.
    pub fn cos_threshold(&self) -> f32 {
        self.angle_threshold_deg.to_radians().cos()
    }

    /// Brush radius in cells of a mask with the given edge length.
    ///
    /// Clamped to `[1, max_radius_px(resolution)]`; NaN maps to `1`.
    pub fn radius_px(&self, resolution: u32) -> u32 {
        let max = max_radius_px(resolution);
        let r = (self.radius * resolution as f32).ceil();
        if r.is_nan() || r < 1.0 {
            1
        } else if r >= max as f32 {
            max
        } else {
            r as u32
        }
    }

    /// Validates the settings against the documented tunable ranges.
    pub fn validate(&self) -> Result<()> {
        check_range("radius", self.radius, RADIUS_RANGE)?;
        check_range("strength", self.strength, STRENGTH_RANGE)?;
        if self.path_steps < PATH_STEPS_RANGE.0 || self.path_steps > PATH_STEPS_RANGE.1 {
            return Err(Error::InvalidConfig(format!(
                "path_steps must be in [{}, {}], got {}",
                PATH_STEPS_RANGE.0, PATH_STEPS_RANGE.1, self.path_steps
            )));
        }
        check_range(
            "angle_threshold_deg",
            self.angle_threshold_deg,
            ANGLE_THRESHOLD_RANGE,
        )?;
        Ok(())
    }
}

/// Largest useful pixel radius for a mask: one past its diagonal, so a larger brush would not
/// reach any further cell. Never exceeds [`MAX_RADIUS_PX`].
pub fn max_radius_px(resolution: u32) -> u32 {
    let diagonal = (f64::from(resolution) * std::f64::consts::SQRT_2).ceil() as u32;
    diagonal.saturating_add(1).clamp(1, MAX_RADIUS_PX)
}

fn check_range(name: &str, value: f32, (min, max): (f32, f32)) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(Error::InvalidConfig(format!(
            "{name} must be in [{min}, {max}], got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = BrushSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.path_steps, 20);
        assert!(settings.stencil.is_none());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert!(matches!(
            BrushSettings::new(0.0).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(BrushSettings::default()
            .with_strength(1.5)
            .validate()
            .is_err());
        assert!(BrushSettings::default()
            .with_path_steps(0)
            .validate()
            .is_err());
        assert!(BrushSettings::default()
            .with_angle_threshold_deg(120.0)
            .validate()
            .is_err());
        assert!(BrushSettings::new(f32::NAN).validate().is_err());
    }

    #[test]
    fn radius_px_rounds_up_and_clamps() {
        assert_eq!(BrushSettings::new(0.05).radius_px(512), 26);
        assert_eq!(BrushSettings::new(0.0).radius_px(512), 1);
        assert_eq!(BrushSettings::new(-0.2).radius_px(512), 1);
        assert_eq!(BrushSettings::new(f32::NAN).radius_px(512), 1);
    }

    #[test]
    fn radius_px_is_capped_at_the_grid_diagonal() {
        assert_eq!(max_radius_px(512), 726);
        assert_eq!(max_radius_px(64), 92);
        assert_eq!(BrushSettings::new(100.0).radius_px(512), 726);
        assert_eq!(BrushSettings::new(1.0e7).radius_px(512), 726);
        assert_eq!(BrushSettings::new(f32::INFINITY).radius_px(64), 92);
        // In-range radii are unaffected.
        assert_eq!(BrushSettings::new(0.5).radius_px(512), 256);
    }

    #[test]
    fn max_radius_never_exceeds_kernel_limit() {
        assert_eq!(max_radius_px(0), 1);
        assert!(max_radius_px(crate::mask::MAX_RESOLUTION) <= MAX_RADIUS_PX);
        assert_eq!(max_radius_px(u32::MAX), MAX_RADIUS_PX);
    }

    #[test]
    fn stencil_builders() {
        let settings = BrushSettings::default().with_stencil("splat");
        assert_eq!(settings.stencil.as_deref(), Some("splat"));
        assert!(settings.without_stencil().stencil.is_none());
    }
}

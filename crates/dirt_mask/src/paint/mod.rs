//! Stamp application.
//!
//! [`StampPainter`] removes dirt from a [`DirtMask`] around one UV position. Per stamp it:
//! 1. rejects back-facing geometry (`dot(normal, -view) ≤ 0`) as a no-op,
//! 2. derives an angle efficiency from the facing ratio and the brush's angle threshold,
//! 3. walks the kernel footprint, clipping cells outside the grid, and subtracts
//!    `strength × distance falloff × efficiency × alpha` from each cell, flooring at zero.
//!
//! The painter owns its [`KernelCache`]; painters never share one.
use std::sync::Arc;

use glam::{Vec2, Vec3};
use tracing::trace;

use crate::brush::falloff::{angle_efficiency, smoothstep01, FalloffCurve};
use crate::brush::{BrushSettings, KernelCache, StencilRegistry};
use crate::mask::{CellRect, DirtMask};

/// Kernel alpha at or below which an offset is skipped.
pub const MIN_KERNEL_ALPHA: f32 = 0.01;

/// Per-cell strength at or below which a cell is left untouched.
pub const MIN_CELL_STRENGTH: f32 = 0.001;

/// One stamp request: where on the surface, and how the surface is oriented to the viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stamp {
    /// Stamp center in UV space, `[0, 1]²` on the surface.
    pub center_uv: Vec2,
    /// Surface normal at the hit point.
    pub normal: Vec3,
    /// Direction from the viewer towards the hit point.
    pub view_direction: Vec3,
}

impl Stamp {
    pub fn new(
        center_uv: impl Into<Vec2>,
        normal: impl Into<Vec3>,
        view_direction: impl Into<Vec3>,
    ) -> Self {
        Self {
            center_uv: center_uv.into(),
            normal: normal.into(),
            view_direction: view_direction.into(),
        }
    }

    /// A stamp seen head-on: normal `+Z`, viewer looking down `-Z`.
    pub fn head_on(center_uv: impl Into<Vec2>) -> Self {
        Self::new(center_uv, Vec3::Z, Vec3::NEG_Z)
    }

    /// Same orientation at another UV position.
    pub fn at(&self, center_uv: Vec2) -> Self {
        Self { center_uv, ..*self }
    }

    /// Facing ratio `dot(normal, -view_direction)`.
    #[inline]
    pub fn facing(&self) -> f32 {
        self.normal.dot(-self.view_direction)
    }
}

/// Applies stamps to dirt masks using a cached brush kernel.
#[derive(Default)]
pub struct StampPainter {
    cache: KernelCache,
    stencils: Arc<StencilRegistry>,
    distance_curve: Option<Box<dyn FalloffCurve>>,
    angle_curve: Option<Box<dyn FalloffCurve>>,
}

impl StampPainter {
    /// Creates a painter with the disc brush only and the default smoothstep falloffs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stencils brush settings may refer to. Invalidates the cached kernel.
    pub fn with_stencils(mut self, stencils: impl Into<Arc<StencilRegistry>>) -> Self {
        self.stencils = stencils.into();
        self.cache.invalidate();
        self
    }

    /// Overrides the distance falloff, evaluated at `1 − distance/radius`.
    pub fn with_distance_curve(mut self, curve: impl FalloffCurve + 'static) -> Self {
        self.distance_curve = Some(Box::new(curve));
        self
    }

    /// Overrides the angle falloff above the threshold.
    pub fn with_angle_curve(mut self, curve: impl FalloffCurve + 'static) -> Self {
        self.angle_curve = Some(Box::new(curve));
        self
    }

    pub fn stencils(&self) -> &StencilRegistry {
        &self.stencils
    }

    pub fn kernel_cache(&self) -> &KernelCache {
        &self.cache
    }

    /// Applies one stamp to `mask` and returns the dirt removed.
    ///
    /// Never fails: back-facing stamps remove nothing and cells outside the grid are clipped.
    pub fn apply_stamp(
        &mut self,
        mask: &mut DirtMask,
        stamp: &Stamp,
        settings: &BrushSettings,
    ) -> f64 {
        let resolution = mask.resolution();
        let radius_px = settings.radius_px(resolution);
        let kernel =
            self.cache
                .get_or_build(radius_px, settings.stencil.as_deref(), &self.stencils);

        let facing = stamp.facing();
        if facing.is_nan() || facing <= 0.0 {
            trace!(facing, "back-facing stamp skipped");
            return 0.0;
        }
        let efficiency = angle_efficiency(
            facing,
            settings.cos_threshold(),
            self.angle_curve.as_deref(),
        );

        if !stamp.center_uv.is_finite() {
            trace!(center = ?stamp.center_uv, "non-finite stamp center skipped");
            return 0.0;
        }

        let r = i64::from(radius_px);
        let r2 = r * r;
        let res = i64::from(resolution);
        // Centers farther than `r` outside the grid touch no cell, so pinning them there is exact.
        let (center_x, center_y) = mask.uv_to_cell(stamp.center_uv);
        let center_x = center_x.clamp(-r - 1, res + r);
        let center_y = center_y.clamp(-r - 1, res + r);

        let y_start = (center_y - r).max(0);
        let y_end = (center_y + r).min(res - 1);
        let x_start = (center_x - r).max(0);
        let x_end = (center_x + r).min(res - 1);

        let mut removed = 0.0f64;
        let mut changed: Option<CellRect> = None;

        for py in y_start..=y_end {
            let dy = py - center_y;
            for px in x_start..=x_end {
                let dx = px - center_x;
                let dist2 = dx * dx + dy * dy;
                if dist2 > r2 {
                    continue;
                }

                let alpha = kernel.alpha(dx as i32, dy as i32);
                if alpha <= MIN_KERNEL_ALPHA {
                    continue;
                }

                let nd = 1.0 - (dist2 as f32 / r2 as f32).sqrt();
                let distance_falloff = match &self.distance_curve {
                    Some(curve) => curve.evaluate(nd).clamp(0.0, 1.0),
                    None => smoothstep01(nd),
                };

                let strength = settings.strength * distance_falloff * efficiency * alpha;
                if strength <= MIN_CELL_STRENGTH {
                    continue;
                }

                let (x, y) = (px as u32, py as u32);
                let index = mask.index(x, y);
                let cell = &mut mask.cells_mut()[index];
                let old = *cell;
                let new = (old - strength).max(0.0);
                if new != old {
                    *cell = new;
                    removed += f64::from(old) - f64::from(new);
                    match changed.as_mut() {
                        Some(rect) => rect.include(x, y),
                        None => changed = Some(CellRect::point(x, y)),
                    }
                }
            }
        }

        mask.record_stamp(removed, changed);
        removed
    }
}

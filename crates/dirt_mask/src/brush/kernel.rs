//! Precomputed per-offset brush alpha.
use super::stencil::{Stencil, StencilId};

/// Largest kernel radius. Covers the diagonal of the largest accepted mask.
pub const MAX_RADIUS_PX: u32 = 23_172;

/// Shape a kernel is built from.
#[derive(Clone, Copy)]
pub enum BrushShape<'a> {
    /// Hard disc: alpha `1` inside the radius, `0` outside.
    Disc,
    /// Alpha sampled from a stencil stretched over the kernel's square footprint.
    Stencil(&'a dyn Stencil),
}

/// Alpha weights for every offset `(dx, dy)` in `[-r, r]²` of a brush with pixel radius `r`.
///
/// Falloff is not baked in; the painter applies it per stamp.
#[derive(Clone, Debug, PartialEq)]
pub struct BrushKernel {
    radius_px: u32,
    weights: Vec<f32>,
    stencil: Option<StencilId>,
}

impl BrushKernel {
    /// Builds a kernel. `radius_px` is clamped to `[1, MAX_RADIUS_PX]`.
    pub fn build(radius_px: u32, shape: BrushShape<'_>) -> Self {
        let radius_px = radius_px.clamp(1, MAX_RADIUS_PX);
        let r = i64::from(radius_px);
        let diameter = (radius_px as usize) * 2 + 1;
        let mut weights = Vec::with_capacity(diameter * diameter);

        match shape {
            BrushShape::Disc => {
                let r2 = r * r;
                for dy in -r..=r {
                    for dx in -r..=r {
                        weights.push(if dx * dx + dy * dy <= r2 { 1.0 } else { 0.0 });
                    }
                }
            }
            BrushShape::Stencil(stencil) => {
                let span = (2 * r) as f32;
                for dy in -r..=r {
                    for dx in -r..=r {
                        let u = (dx + r) as f32 / span;
                        let v = (dy + r) as f32 / span;
                        weights.push(stencil.alpha(u, v).clamp(0.0, 1.0));
                    }
                }
            }
        }

        Self {
            radius_px,
            weights,
            stencil: None,
        }
    }

    /// Builds a disc kernel.
    pub fn disc(radius_px: u32) -> Self {
        Self::build(radius_px, BrushShape::Disc)
    }

    /// Builds a kernel from a stencil and remembers its id.
    pub fn from_stencil(radius_px: u32, id: impl Into<StencilId>, stencil: &dyn Stencil) -> Self {
        let mut kernel = Self::build(radius_px, BrushShape::Stencil(stencil));
        kernel.stencil = Some(id.into());
        kernel
    }

    pub fn radius_px(&self) -> u32 {
        self.radius_px
    }

    /// Edge length of the weight grid, `2 * radius_px + 1`.
    pub fn diameter(&self) -> u32 {
        2 * self.radius_px + 1
    }

    /// Stencil the kernel was built from; `None` for the disc.
    pub fn stencil(&self) -> Option<&str> {
        self.stencil.as_deref()
    }

    /// Row-major weights, `diameter²` entries.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Alpha at offset `(dx, dy)` from the center; `0` outside the footprint.
    #[inline]
    pub fn alpha(&self, dx: i32, dy: i32) -> f32 {
        let r = self.radius_px as i32;
        if dx < -r || dx > r || dy < -r || dy > r {
            return 0.0;
        }
        let d = self.diameter() as usize;
        self.weights[((dy + r) as usize) * d + (dx + r) as usize]
    }

    pub(crate) fn set_stencil(&mut self, id: &str) {
        self.stencil = Some(id.to_owned());
    }

    pub(crate) fn matches(&self, radius_px: u32, stencil: Option<&str>) -> bool {
        self.radius_px == radius_px && self.stencil.as_deref() == stencil
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::stencil::AlphaStencil;

    #[test]
    fn disc_kernel_is_hard_edged() {
        let kernel = BrushKernel::disc(3);
        assert_eq!(kernel.diameter(), 7);
        assert_eq!(kernel.weights().len(), 49);
        assert_eq!(kernel.alpha(0, 0), 1.0);
        assert_eq!(kernel.alpha(3, 0), 1.0);
        assert_eq!(kernel.alpha(0, -3), 1.0);
        assert_eq!(kernel.alpha(2, 2), 1.0);
        assert_eq!(kernel.alpha(3, 3), 0.0);
        assert_eq!(kernel.alpha(2, 3), 0.0);
        assert_eq!(kernel.alpha(4, 0), 0.0);
        assert!(kernel.stencil().is_none());
    }

    #[test]
    fn zero_radius_clamps_to_one() {
        let kernel = BrushKernel::disc(0);
        assert_eq!(kernel.radius_px(), 1);
        assert_eq!(kernel.weights(), &[0.0f32, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn stencil_kernel_samples_corner_to_corner() {
        // Horizontal ramp 0 -> 1.
        let ramp = AlphaStencil::from_alpha(2, 1, vec![0.0, 1.0]).unwrap();
        let kernel = BrushKernel::from_stencil(2, "ramp", &ramp);
        assert_eq!(kernel.stencil(), Some("ramp"));
        assert_eq!(kernel.alpha(-2, 0), 0.0);
        assert_eq!(kernel.alpha(0, 0), 0.5);
        assert_eq!(kernel.alpha(2, 2), 1.0);
        assert_eq!(kernel.alpha(-1, -2), 0.25);
    }

    #[test]
    fn build_is_deterministic() {
        let stencil = AlphaStencil::from_luma8(3, 3, &[0, 64, 0, 64, 255, 64, 0, 64, 0]).unwrap();
        let a = BrushKernel::from_stencil(5, "soft", &stencil);
        let b = BrushKernel::from_stencil(5, "soft", &stencil);
        let bits = |k: &BrushKernel| k.weights().iter().map(|w| w.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }
}

//! Brush stencils and their registry.
//!
//! A stencil is a grayscale shape whose alpha modulates every offset of a brush kernel:
//! - Define custom shapes by implementing [`Stencil`].
//! - Use [`AlphaStencil`] for pixel buffers decoded elsewhere.
//! - Manage instances with [`StencilRegistry`]; brushes refer to stencils by id.
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Identifier of a registered stencil.
pub type StencilId = String;

/// A grayscale brush shape sampled in normalized `[0, 1]²` coordinates.
pub trait Stencil: Send + Sync {
    /// Alpha at `(u, v)`, bilinearly interpolated. Coordinates outside `[0, 1]` clamp to the edge.
    fn alpha(&self, u: f32, v: f32) -> f32;
}

/// Owned single-channel alpha buffer, row-major.
#[derive(Clone, Debug)]
pub struct AlphaStencil {
    width: u32,
    height: u32,
    alpha: Vec<f32>,
}

impl AlphaStencil {
    /// Creates a stencil from alpha values in `[0, 1]`. Values are clamped.
    pub fn from_alpha(width: u32, height: u32, alpha: Vec<f32>) -> Result<Self> {
        check_dimensions(width, height, alpha.len(), 1)?;
        let alpha = alpha.into_iter().map(|a| a.clamp(0.0, 1.0)).collect();
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Creates a stencil from 8-bit grayscale pixels.
    pub fn from_luma8(width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        check_dimensions(width, height, pixels.len(), 1)?;
        Ok(Self {
            width,
            height,
            alpha: pixels.iter().map(|&b| f32::from(b) / 255.0).collect(),
        })
    }

    /// Creates a stencil from the alpha channel of 8-bit RGBA pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        check_dimensions(width, height, pixels.len(), 4)?;
        Ok(Self {
            width,
            height,
            alpha: pixels
                .chunks_exact(4)
                .map(|px| f32::from(px[3]) / 255.0)
                .collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn texel(&self, x: u32, y: u32) -> f32 {
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

impl Stencil for AlphaStencil {
    fn alpha(&self, u: f32, v: f32) -> f32 {
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
        let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };

        // Continuous coordinates over texel indices [0..width-1], [0..height-1]
        let x = u * (self.width - 1) as f32;
        let y = v * (self.height - 1) as f32;

        let x0 = (x.floor() as u32).min(self.width - 1);
        let y0 = (y.floor() as u32).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = (x - x0 as f32).clamp(0.0, 1.0);
        let fy = (y - y0 as f32).clamp(0.0, 1.0);

        let top = self.texel(x0, y0) * (1.0 - fx) + self.texel(x1, y0) * fx;
        let bottom = self.texel(x0, y1) * (1.0 - fx) + self.texel(x1, y1) * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

fn check_dimensions(width: u32, height: u32, len: usize, channels: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidStencil(format!(
            "dimensions must be > 0, got {width}x{height}"
        )));
    }
    let expected = (width as usize) * (height as usize) * channels;
    if len != expected {
        return Err(Error::InvalidStencil(format!(
            "expected {expected} values for {width}x{height} with {channels} channel(s), got {len}"
        )));
    }
    Ok(())
}

/// Registry for storing and managing stencils by unique string identifiers.
#[non_exhaustive]
#[derive(Clone)]
pub struct StencilRegistry {
    stencils: HashMap<StencilId, Arc<dyn Stencil>>,
}

impl StencilRegistry {
    /// Creates a new, empty [`StencilRegistry`].
    pub fn new() -> Self {
        Self {
            stencils: HashMap::new(),
        }
    }

    /// Returns the number of registered stencils.
    pub fn len(&self) -> usize {
        self.stencils.len()
    }

    /// Returns `true` if there are no registered stencils.
    pub fn is_empty(&self) -> bool {
        self.stencils.is_empty()
    }

    pub fn clear(&mut self) {
        self.stencils.clear();
    }

    /// Registers a stencil under the given identifier, replacing any previous entry.
    pub fn register<T>(&mut self, id: impl Into<StencilId>, stencil: T)
    where
        T: Stencil + 'static,
    {
        self.stencils.insert(id.into(), Arc::new(stencil));
    }

    /// Registers a shared stencil under the given identifier.
    pub fn register_arc(&mut self, id: impl Into<StencilId>, stencil: Arc<dyn Stencil>) {
        self.stencils.insert(id.into(), stencil);
    }

    /// Unregisters a stencil. Returns `true` if it was found and removed.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.stencils.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stencils.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Stencil>> {
        self.stencils.get(id).cloned()
    }
}

impl Default for StencilRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn bilinear_interpolates_between_texels() {
        let stencil = AlphaStencil::from_alpha(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
        approx_eq(stencil.alpha(0.0, 0.0), 0.0);
        approx_eq(stencil.alpha(1.0, 0.0), 1.0);
        approx_eq(stencil.alpha(0.5, 0.0), 0.5);
        approx_eq(stencil.alpha(0.5, 0.5), 0.5);
        approx_eq(stencil.alpha(1.0, 1.0), 0.0);
    }

    #[test]
    fn sampling_clamps_outside_unit_square() {
        let stencil = AlphaStencil::from_alpha(2, 1, vec![0.25, 0.75]).unwrap();
        approx_eq(stencil.alpha(-3.0, 0.5), 0.25);
        approx_eq(stencil.alpha(4.0, -1.0), 0.75);
        approx_eq(stencil.alpha(f32::NAN, 0.0), 0.25);
    }

    #[test]
    fn single_texel_stencil_is_constant() {
        let stencil = AlphaStencil::from_luma8(1, 1, &[255]).unwrap();
        approx_eq(stencil.alpha(0.3, 0.9), 1.0);
    }

    #[test]
    fn rgba_uses_alpha_channel() {
        let stencil = AlphaStencil::from_rgba8(1, 2, &[255, 255, 255, 0, 0, 0, 0, 255]).unwrap();
        approx_eq(stencil.alpha(0.0, 0.0), 0.0);
        approx_eq(stencil.alpha(0.0, 1.0), 1.0);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        assert!(matches!(
            AlphaStencil::from_luma8(2, 2, &[0, 0, 0]),
            Err(Error::InvalidStencil(_))
        ));
        assert!(matches!(
            AlphaStencil::from_alpha(0, 4, Vec::new()),
            Err(Error::InvalidStencil(_))
        ));
    }

    #[test]
    fn registry_register_and_unregister() {
        let mut registry = StencilRegistry::new();
        assert!(registry.is_empty());
        registry.register("dot", AlphaStencil::from_alpha(1, 1, vec![0.5]).unwrap());
        assert!(registry.contains("dot"));
        assert_eq!(registry.len(), 1);
        let dot = registry.get("dot").unwrap();
        approx_eq(dot.alpha(0.5, 0.5), 0.5);
        assert!(registry.get("missing").is_none());
        assert!(registry.unregister("dot"));
        assert!(!registry.unregister("dot"));
        assert!(registry.get("dot").is_none());
    }
}

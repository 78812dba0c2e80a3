//! Cache for the most recently used brush kernel.
//!
//! Kernels are keyed by `(stencil id, radius pixels)`. A painter asks the cache with
//! [`KernelCache::get_or_build`] on every stamp; the kernel is rebuilt only when the key differs
//! from the previous call, so a stroke at constant radius builds exactly once.
use tracing::{debug, warn};

use super::kernel::{BrushKernel, BrushShape};
use super::stencil::StencilRegistry;

/// Single-entry kernel cache owned by one painter.
#[derive(Debug, Default)]
pub struct KernelCache {
    current: Option<BrushKernel>,
    builds: u64,
}

impl KernelCache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self {
            current: None,
            builds: 0,
        }
    }

    /// Returns the cached kernel, if any.
    pub fn current(&self) -> Option<&BrushKernel> {
        self.current.as_ref()
    }

    /// Number of kernel builds performed over the cache's lifetime.
    pub fn build_count(&self) -> u64 {
        self.builds
    }

    /// Drops the cached kernel so the next request rebuilds it.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    /// Gets the kernel for `radius_px` and `stencil`, building it if the key changed.
    ///
    /// A stencil id missing from `stencils` falls back to the disc shape; the fallback is cached
    /// under the requested id until the key changes or [`KernelCache::invalidate`] is called.
    pub fn get_or_build(
        &mut self,
        radius_px: u32,
        stencil: Option<&str>,
        stencils: &StencilRegistry,
    ) -> &BrushKernel {
        let radius_px = radius_px.clamp(1, super::kernel::MAX_RADIUS_PX);

        let needs_build = match &self.current {
            Some(kernel) => !kernel.matches(radius_px, stencil),
            None => true,
        };

        if needs_build {
            let kernel = match stencil {
                None => BrushKernel::disc(radius_px),
                Some(id) => match stencils.get(id) {
                    Some(shape) => BrushKernel::from_stencil(radius_px, id, shape.as_ref()),
                    None => {
                        warn!("Unknown stencil id '{}', using disc brush.", id);
                        let mut kernel = BrushKernel::build(radius_px, BrushShape::Disc);
                        kernel.set_stencil(id);
                        kernel
                    }
                },
            };
            self.builds += 1;
            debug!(
                radius_px,
                stencil = stencil.unwrap_or("<disc>"),
                builds = self.builds,
                "built brush kernel"
            );
            self.current = Some(kernel);
        }

        self.current.get_or_insert_with(|| BrushKernel::disc(radius_px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::stencil::AlphaStencil;

    fn registry() -> StencilRegistry {
        let mut registry = StencilRegistry::new();
        registry.register(
            "soft",
            AlphaStencil::from_alpha(2, 2, vec![0.2, 0.4, 0.6, 0.8]).unwrap(),
        );
        registry
    }

    #[test]
    fn same_key_reuses_kernel() {
        let stencils = registry();
        let mut cache = KernelCache::new();
        let first = cache.get_or_build(4, Some("soft"), &stencils).clone();
        let second = cache.get_or_build(4, Some("soft"), &stencils).clone();
        assert_eq!(cache.build_count(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn radius_or_stencil_change_rebuilds() {
        let stencils = registry();
        let mut cache = KernelCache::new();
        cache.get_or_build(4, None, &stencils);
        cache.get_or_build(5, None, &stencils);
        assert_eq!(cache.build_count(), 2);
        cache.get_or_build(5, Some("soft"), &stencils);
        assert_eq!(cache.build_count(), 3);
        assert_eq!(cache.current().unwrap().stencil(), Some("soft"));
        // Switching back is a change too: the cache holds one entry.
        cache.get_or_build(4, None, &stencils);
        assert_eq!(cache.build_count(), 4);
    }

    #[test]
    fn zero_radius_shares_key_with_one() {
        let stencils = StencilRegistry::new();
        let mut cache = KernelCache::new();
        cache.get_or_build(0, None, &stencils);
        cache.get_or_build(1, None, &stencils);
        assert_eq!(cache.build_count(), 1);
    }

    #[test]
    fn unknown_stencil_falls_back_to_disc() {
        let stencils = StencilRegistry::new();
        let mut cache = KernelCache::new();
        let kernel = cache.get_or_build(3, Some("missing"), &stencils).clone();
        assert_eq!(kernel.weights(), BrushKernel::disc(3).weights());
        cache.get_or_build(3, Some("missing"), &stencils);
        assert_eq!(cache.build_count(), 1);
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let stencils = StencilRegistry::new();
        let mut cache = KernelCache::new();
        cache.get_or_build(2, None, &stencils);
        cache.invalidate();
        assert!(cache.current().is_none());
        cache.get_or_build(2, None, &stencils);
        assert_eq!(cache.build_count(), 2);
    }
}

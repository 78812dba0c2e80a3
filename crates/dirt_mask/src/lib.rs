#![forbid(unsafe_code)]
//! dirt_mask: texture-space dirt masks cleaned by brush strokes.
//!
//! Modules:
//! - brush: settings, disc and stencil kernels, kernel cache, falloff curves
//! - mask: the per-surface dirt grid, totals, and dirty-region tracking
//! - paint: stamp application (kernel × distance falloff × view angle × strength)
//! - stroke: path sampling between pointer samples and the per-drag tracker
//! - progress: cleanliness aggregated over many surfaces
//!
//! For a walkthrough, see the README and the `dirt_mask_examples` crate.
pub mod brush;
pub mod error;
pub mod mask;
pub mod paint;
pub mod progress;
pub mod stroke;

/// Convenient re-exports for common types. Import with `use dirt_mask::prelude::*;`.
pub mod prelude {
    pub use crate::brush::{
        AlphaStencil, BrushKernel, BrushSettings, BrushShape, FalloffCurve, KernelCache, Linear,
        SmoothStep, Stencil, StencilId, StencilRegistry,
    };
    pub use crate::error::{Error, Result};
    pub use crate::mask::{CellRect, DirtMask};
    pub use crate::paint::{Stamp, StampPainter};
    pub use crate::progress::{shared, ProgressAggregator, SharedMask};
    pub use crate::stroke::{
        sample_path, CleaningBrush, StrokePath, StrokeState, StrokeTracker, SurfaceHit,
    };
}

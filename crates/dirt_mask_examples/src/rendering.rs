//! Shared helpers for the example binaries: log setup and mask rendering.
use std::path::Path;

use anyhow::Context;
use dirt_mask::mask::DirtMask;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber. `RUST_LOG` overrides the default `info` filter.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Colors used when rendering a mask: clean cells get `clean`, fully dirty cells `dirt`.
#[derive(Clone, Copy, Debug)]
pub struct MaskStyle {
    pub clean: [u8; 3],
    pub dirt: [u8; 3],
    /// Pixels per mask cell.
    pub scale: u32,
}

impl Default for MaskStyle {
    fn default() -> Self {
        Self {
            clean: [236, 240, 244],
            dirt: [92, 70, 48],
            scale: 1,
        }
    }
}

impl MaskStyle {
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }
}

/// Renders `mask` with dirt intensity relative to its initial amount.
pub fn mask_to_image(mask: &DirtMask, style: &MaskStyle) -> RgbImage {
    let res = mask.resolution();
    let scale = style.scale.max(1);
    let full = if mask.initial_amount() > 0.0 {
        mask.initial_amount()
    } else {
        1.0
    };

    RgbImage::from_fn(res * scale, res * scale, |px, py| {
        let amount = mask.cell(px / scale, py / scale).unwrap_or(0.0);
        let t = (amount / full).clamp(0.0, 1.0);
        let mix = |c: u8, d: u8| (f32::from(c) + (f32::from(d) - f32::from(c)) * t).round() as u8;
        Rgb([
            mix(style.clean[0], style.dirt[0]),
            mix(style.clean[1], style.dirt[1]),
            mix(style.clean[2], style.dirt[2]),
        ])
    })
}

/// Writes `mask` as a PNG to `path`.
pub fn save_mask_png(
    mask: &DirtMask,
    style: &MaskStyle,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    mask_to_image(mask, style)
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        path = %path.display(),
        cleanliness = mask.cleanliness(),
        "saved mask"
    );
    Ok(())
}

use dirt_mask::prelude::*;
use dirt_mask_examples::{init_tracing, save_mask_png, MaskStyle};
use glam::{Vec2, Vec3};
use tracing::info;

const STENCIL_SIZE: u32 = 32;

/// A bristle-like grayscale stencil: vertical stripes inside a soft round edge.
fn bristle_pixels() -> Vec<u8> {
    let size = STENCIL_SIZE as f32;
    let mut pixels = Vec::with_capacity((STENCIL_SIZE * STENCIL_SIZE) as usize);
    for y in 0..STENCIL_SIZE {
        for x in 0..STENCIL_SIZE {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) / size * 2.0 - Vec2::ONE;
            let edge = (1.0 - p.length()).clamp(0.0, 1.0);
            let stripe = if x % 4 < 2 { 1.0 } else { 0.35 };
            pixels.push((edge.sqrt() * stripe * 255.0).round() as u8);
        }
    }
    pixels
}

/// Cleans four bands: disc vs stencil brush, each head-on and at a grazing angle.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut stencils = StencilRegistry::new();
    stencils.register(
        "bristle",
        AlphaStencil::from_luma8(STENCIL_SIZE, STENCIL_SIZE, &bristle_pixels())?,
    );

    let disc = BrushSettings::new(0.06).with_strength(0.5);
    let bristle = disc.clone().with_stencil("bristle");
    let grazing = Vec3::new(0.85, 0.0, -0.5).normalize();

    let mut mask = DirtMask::new(256, 1.0)?;
    let painter = StampPainter::new().with_stencils(stencils);
    let mut brush = CleaningBrush::with_painter(disc, painter);

    let bands = [
        (0.2f32, None, Vec3::NEG_Z),
        (0.4, Some(&bristle), Vec3::NEG_Z),
        (0.6, None, grazing),
        (0.8, Some(&bristle), grazing),
    ];
    let disc = brush.settings().clone();
    for (v, stencil, view) in bands {
        brush.set_settings(stencil.cloned().unwrap_or_else(|| disc.clone()));
        let mut removed = 0.0;
        for u in [0.1f32, 0.5, 0.9] {
            let hit = SurfaceHit::new((), Vec2::new(u, v), Vec3::Z, view);
            removed += brush.stroke(&hit, &mut mask);
        }
        brush.release();
        info!(v, stencil = stencil.is_some(), removed, "band");
    }

    info!(
        kernel_builds = brush.painter().kernel_cache().build_count(),
        cleanliness = mask.cleanliness(),
        "done"
    );
    save_mask_png(&mask, &MaskStyle::default().with_scale(2), "stencil-brush.png")
}

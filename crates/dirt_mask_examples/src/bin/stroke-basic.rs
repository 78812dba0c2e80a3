use dirt_mask::prelude::*;
use dirt_mask_examples::{init_tracing, save_mask_png, MaskStyle};
use glam::Vec2;
use tracing::info;

/// Drags a brush across a plate in a few sparse pointer samples. Path sampling fills the gaps
/// between samples, so the wipes come out as continuous bands.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = BrushSettings::new(0.04)
        .with_strength(0.35)
        .with_path_steps(20);
    settings.validate()?;

    let mut mask = DirtMask::new(256, 1.0)?;
    let mut brush = CleaningBrush::new(settings);

    // Three horizontal wipes, five samples each.
    for v in [0.25f32, 0.5, 0.75] {
        for i in 0..5 {
            let uv = Vec2::new(0.1 + i as f32 * 0.2, v);
            let removed = brush.stroke(&SurfaceHit::head_on("plate", uv), &mut mask);
            info!(u = uv.x, v = uv.y, removed, "contact");
        }
        brush.release();
    }

    // One diagonal wipe with a single jump: two samples far apart.
    brush.stroke(&SurfaceHit::head_on("plate", Vec2::new(0.05, 0.05)), &mut mask);
    brush.stroke(&SurfaceHit::head_on("plate", Vec2::new(0.95, 0.95)), &mut mask);
    brush.release();

    info!(
        cleanliness = mask.cleanliness(),
        region = ?mask.take_dirty_region(),
        "done"
    );
    save_mask_png(&mask, &MaskStyle::default().with_scale(2), "stroke-basic.png")
}

use dirt_mask::prelude::*;
use dirt_mask_examples::{init_tracing, save_mask_png, MaskStyle};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng as RngCore, SeedableRng};
use tracing::info;

const TARGET: f32 = 0.9;
const MAX_CONTACTS: usize = 20_000;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Dish {
    Plate,
    Cup,
    Bowl,
}

fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Scrubs three dishes with random strokes until overall progress reaches the target, then
/// saves each mask and starts a new round.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let dishes = [
        (Dish::Plate, shared(DirtMask::new(128, 1.0)?)),
        (Dish::Cup, shared(DirtMask::new(64, 1.0)?)),
        (Dish::Bowl, shared(DirtMask::new(96, 0.6)?)),
    ];
    let mut progress = ProgressAggregator::new();
    for (_, mask) in &dishes {
        progress.register(mask);
    }

    let settings = BrushSettings::new(0.08).with_strength(0.4);
    settings.validate()?;
    let mut brush = CleaningBrush::new(settings);
    let mut rng = StdRng::seed_from_u64(7);

    let mut contacts = 0;
    while !progress.is_complete(TARGET) && contacts < MAX_CONTACTS {
        let (dish, mask) = &dishes[(rng.next_u32() % 3) as usize];
        // A short scribble on one dish.
        let mut uv = Vec2::new(rand01(&mut rng), rand01(&mut rng));
        for _ in 0..8 {
            brush.stroke(&SurfaceHit::head_on(*dish, uv), &mut mask.borrow_mut());
            let step = Vec2::new(rand01(&mut rng) - 0.5, rand01(&mut rng) - 0.5) * 0.3;
            uv = (uv + step).clamp(Vec2::ZERO, Vec2::ONE);
            contacts += 1;
        }
        brush.release();

        if contacts % 400 == 0 {
            info!(contacts, progress = progress.overall_progress(), "scrubbing");
        }
    }

    info!(
        contacts,
        progress = progress.overall_progress(),
        complete = progress.is_complete(TARGET),
        "round finished"
    );
    for (dish, mask) in &dishes {
        let name = format!("surfaces-progress-{dish:?}.png").to_lowercase();
        save_mask_png(&mask.borrow(), &MaskStyle::default().with_scale(2), name)?;
    }

    progress.reset_all();
    info!(progress = progress.overall_progress(), "new round");
    Ok(())
}

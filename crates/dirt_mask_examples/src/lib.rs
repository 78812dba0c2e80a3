#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, mask_to_image, save_mask_png, MaskStyle};

use std::time::Duration;

use criterion::{Criterion, Throughput};

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Mask edge lengths exercised by the benches.
#[allow(dead_code)]
pub const RESOLUTIONS: [u32; 3] = [256, 512, 1024];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in stamps applied per iteration.
pub fn stamps_throughput(stamps: usize) -> Throughput {
    Throughput::Elements(stamps.max(1) as u64)
}

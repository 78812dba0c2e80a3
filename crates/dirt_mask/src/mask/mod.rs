//! Per-surface dirt mask.
//!
//! A [`DirtMask`] is a square grid of remaining-dirt intensities plus running totals. Cells are
//! mutated only through stamps ([`DirtMask::apply_stamp`]), [`DirtMask::reset_dirt`], and
//! [`DirtMask::clean_all`]. Every mutation records the changed cells in a [`DirtyRegion`] that a
//! rendering collaborator polls with [`DirtMask::take_dirty_region`].
use glam::Vec2;
use tracing::{debug, warn};

use crate::brush::BrushSettings;
use crate::error::{Error, Result};
use crate::paint::{Stamp, StampPainter};

pub mod dirty;

pub use dirty::{CellRect, DirtyRegion};

/// Largest accepted mask edge length.
pub const MAX_RESOLUTION: u32 = 16384;

/// Default number of stamps between full-sum resyncs of the running total.
pub const DEFAULT_RESYNC_INTERVAL: u32 = 4096;

/// Relative difference between running and summed totals above which a resync is logged.
const DRIFT_WARN_TOLERANCE: f64 = 1e-4;

/// Grid of dirt intensities for one surface.
#[derive(Clone, Debug)]
pub struct DirtMask {
    resolution: u32,
    cells: Vec<f32>,
    initial_amount: f32,
    total_dirt: f64,
    current_dirt: f64,
    dirty: DirtyRegion,
    resync_interval: u32,
    stamps_since_resync: u32,
}

impl DirtMask {
    /// Creates a mask with every cell at `initial_amount`.
    ///
    /// Fails for a zero or oversized `resolution`, or a negative or non-finite `initial_amount`.
    pub fn new(resolution: u32, initial_amount: f32) -> Result<Self> {
        if resolution == 0 {
            return Err(Error::InvalidConfig("resolution must be > 0".into()));
        }
        if resolution > MAX_RESOLUTION {
            return Err(Error::InvalidConfig(format!(
                "resolution must be <= {MAX_RESOLUTION}, got {resolution}"
            )));
        }
        if !initial_amount.is_finite() || initial_amount < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "initial_amount must be finite and >= 0, got {initial_amount}"
            )));
        }

        let len = (resolution as usize) * (resolution as usize);
        let total_dirt = f64::from(initial_amount) * len as f64;
        Ok(Self {
            resolution,
            cells: vec![initial_amount; len],
            initial_amount,
            total_dirt,
            current_dirt: total_dirt,
            dirty: DirtyRegion::new(),
            resync_interval: DEFAULT_RESYNC_INTERVAL,
            stamps_since_resync: 0,
        })
    }

    /// Sets how many stamps pass between full-sum resyncs; `0` disables them.
    pub fn with_resync_interval(mut self, interval: u32) -> Self {
        self.resync_interval = interval;
        self
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn initial_amount(&self) -> f32 {
        self.initial_amount
    }

    /// Capacity normalizer, `initial_amount × resolution²`.
    pub fn total_dirt(&self) -> f64 {
        self.total_dirt
    }

    /// Running sum of all cells.
    pub fn current_dirt(&self) -> f64 {
        self.current_dirt
    }

    /// Row-major cell intensities.
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn cell(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        Some(self.cells[self.index(x, y)])
    }

    /// Cleaned fraction in `[0, 1]`; `1` for a mask created with no dirt.
    pub fn cleanliness(&self) -> f32 {
        if self.total_dirt <= 0.0 {
            return 1.0;
        }
        (1.0 - self.current_dirt / self.total_dirt).clamp(0.0, 1.0) as f32
    }

    /// Grid coordinates of a UV position, rounding half to even. May lie outside the grid.
    pub fn uv_to_cell(&self, uv: Vec2) -> (i64, i64) {
        let res = self.resolution as f32;
        (
            (uv.x * res).round_ties_even() as i64,
            (uv.y * res).round_ties_even() as i64,
        )
    }

    /// Applies one stamp with `painter`, returning the dirt removed.
    pub fn apply_stamp(
        &mut self,
        painter: &mut StampPainter,
        stamp: &Stamp,
        settings: &BrushSettings,
    ) -> f64 {
        painter.apply_stamp(self, stamp, settings)
    }

    /// Restores every cell to the initial amount.
    pub fn reset_dirt(&mut self) {
        self.cells.fill(self.initial_amount);
        self.current_dirt = self.total_dirt;
        self.stamps_since_resync = 0;
        self.dirty.mark(CellRect::full(self.resolution));
        debug!(resolution = self.resolution, "reset dirt mask");
    }

    /// Removes all dirt.
    pub fn clean_all(&mut self) {
        self.cells.fill(0.0);
        self.current_dirt = 0.0;
        self.stamps_since_resync = 0;
        self.dirty.mark(CellRect::full(self.resolution));
        debug!(resolution = self.resolution, "cleaned dirt mask");
    }

    /// Recomputes the running total from a full sum and returns the corrected drift.
    pub fn resync(&mut self) -> f64 {
        let summed: f64 = self.cells.iter().map(|&c| f64::from(c)).sum();
        let drift = self.current_dirt - summed;
        if drift.abs() > DRIFT_WARN_TOLERANCE * self.total_dirt.max(1.0) {
            warn!(
                drift,
                running = self.current_dirt,
                summed,
                "dirt total drifted, resynced"
            );
        } else {
            debug!(drift, "resynced dirt total");
        }
        self.current_dirt = summed;
        self.stamps_since_resync = 0;
        drift
    }

    /// Whether any cell changed since the last [`DirtMask::take_dirty_region`].
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Changed cells since the last poll, without clearing.
    pub fn dirty_region(&self) -> Option<CellRect> {
        self.dirty.rect()
    }

    /// Returns the changed cells since the last poll and clears the dirty flag.
    pub fn take_dirty_region(&mut self) -> Option<CellRect> {
        self.dirty.take()
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.resolution as usize) + (x as usize)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    /// Books the result of one stamp: subtracts `removed` (floored at `0`) and marks `changed`.
    pub(crate) fn record_stamp(&mut self, removed: f64, changed: Option<CellRect>) {
        if let Some(rect) = changed {
            self.dirty.mark(rect);
        }
        self.current_dirt = (self.current_dirt - removed).max(0.0);

        self.stamps_since_resync += 1;
        if self.resync_interval > 0 && self.stamps_since_resync >= self.resync_interval {
            self.resync();
        }
    }
}

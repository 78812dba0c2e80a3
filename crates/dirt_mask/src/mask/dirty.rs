//! Dirty-region tracking for incremental texture uploads.

/// Inclusive rectangle of grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl CellRect {
    /// Rectangle covering a single cell.
    pub fn point(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Rectangle covering a whole `resolution × resolution` grid.
    pub fn full(resolution: u32) -> Self {
        let max = resolution.saturating_sub(1);
        Self {
            min_x: 0,
            min_y: 0,
            max_x: max,
            max_y: max,
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Grows the rectangle to include `(x, y)`.
    #[inline]
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Smallest rectangle containing both.
    pub fn union(self, other: CellRect) -> CellRect {
        CellRect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Union of cells changed since the last poll.
#[derive(Clone, Debug, Default)]
pub struct DirtyRegion {
    rect: Option<CellRect>,
}

impl DirtyRegion {
    pub fn new() -> Self {
        Self { rect: None }
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.rect.is_some()
    }

    pub fn rect(&self) -> Option<CellRect> {
        self.rect
    }

    pub fn mark(&mut self, rect: CellRect) {
        self.rect = Some(match self.rect {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }

    /// Returns the accumulated region and clears it.
    pub fn take(&mut self) -> Option<CellRect> {
        self.rect.take()
    }
}

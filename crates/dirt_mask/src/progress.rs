//! Overall cleaning progress across surfaces.
//!
//! Surfaces own their masks as [`SharedMask`]s; the [`ProgressAggregator`] only keeps weak
//! references, so a destroyed surface silently drops out of the average.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::mask::DirtMask;

/// A mask shared between its surface and the aggregator.
pub type SharedMask = Rc<RefCell<DirtMask>>;

/// Wraps a mask for registration.
pub fn shared(mask: DirtMask) -> SharedMask {
    Rc::new(RefCell::new(mask))
}

/// Averages cleanliness over a set of registered masks.
#[derive(Debug, Default)]
pub struct ProgressAggregator {
    masks: Vec<Weak<RefCell<DirtMask>>>,
}

impl ProgressAggregator {
    pub fn new() -> Self {
        Self { masks: Vec::new() }
    }

    /// Registers a mask. Returns `false` if it was already registered.
    pub fn register(&mut self, mask: &SharedMask) -> bool {
        let weak = Rc::downgrade(mask);
        if self.masks.iter().any(|m| m.ptr_eq(&weak)) {
            return false;
        }
        self.masks.push(weak);
        true
    }

    /// Removes a mask. Returns `true` if it was registered.
    pub fn unregister(&mut self, mask: &SharedMask) -> bool {
        let weak = Rc::downgrade(mask);
        let before = self.masks.len();
        self.masks.retain(|m| !m.ptr_eq(&weak));
        self.masks.len() != before
    }

    /// Drops entries whose masks no longer exist and returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.masks.len();
        self.masks.retain(|m| m.strong_count() > 0);
        let pruned = before - self.masks.len();
        if pruned > 0 {
            debug!(pruned, remaining = self.masks.len(), "pruned destroyed masks");
        }
        pruned
    }

    /// Number of registered masks that still exist.
    pub fn len(&self) -> usize {
        self.masks.iter().filter(|m| m.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mean cleanliness of the live masks; `0` if there are none.
    pub fn overall_progress(&self) -> f32 {
        let (sum, count) = self
            .live()
            .fold((0.0f64, 0usize), |(sum, count), mask| {
                (sum + f64::from(mask.borrow().cleanliness()), count + 1)
            });
        if count == 0 {
            return 0.0;
        }
        (sum / count as f64) as f32
    }

    /// Whether overall progress has reached `target`.
    pub fn is_complete(&self, target: f32) -> bool {
        !self.is_empty() && self.overall_progress() >= target
    }

    /// Restores every live mask to its initial dirt.
    pub fn reset_all(&self) {
        for mask in self.live() {
            mask.borrow_mut().reset_dirt();
        }
        debug!(masks = self.len(), "reset all masks");
    }

    /// Cleans every live mask.
    pub fn clean_all(&self) {
        for mask in self.live() {
            mask.borrow_mut().clean_all();
        }
        debug!(masks = self.len(), "cleaned all masks");
    }

    fn live(&self) -> impl Iterator<Item = SharedMask> + '_ {
        self.masks.iter().filter_map(Weak::upgrade)
    }
}

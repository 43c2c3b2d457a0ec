//! Mutex-guarded shared configuration value.
//!
//! One actor writes it, another reads it; the lock and the clamp range are
//! part of the public contract. Every access is a minimal critical section
//! (load/compute/clamp/store) and the lock is never held across sleeps or
//! I/O — callers copy the value out and act on the copy.

use core::ops::Add;

use crate::sync::Mutex;

/// A shared value constrained to a closed range.
///
/// The value stays within `[min, max]` after every write, so readers never
/// observe an out-of-range value. Reads return a copy that was valid at
/// some instant; writers are serialized but not ordered relative to each
/// other.
pub struct SharedValue<T> {
    value: Mutex<T>,
    min: T,
    max: T,
}

impl<T> SharedValue<T>
where
    T: Copy + Ord + Add<Output = T>,
{
    /// Creates the store with `initial` clamped into `[min, max]`.
    pub fn new(initial: T, min: T, max: T) -> Self {
        debug_assert!(min <= max);
        Self {
            value: Mutex::new(initial.clamp(min, max)),
            min,
            max,
        }
    }

    /// Copies the current value out under the lock.
    pub fn read(&self) -> T {
        *self.value.lock()
    }

    /// Applies a delta, clamps the result, and returns the new value for
    /// logging.
    pub fn update(&self, delta: T) -> T {
        let mut value = self.value.lock();
        *value = (*value + delta).clamp(self.min, self.max);
        *value
    }

    /// Overwrites the value, clamped. Returns what was actually stored.
    pub fn set(&self, value: T) -> T {
        let clamped = value.clamp(self.min, self.max);
        *self.value.lock() = clamped;
        clamped
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }
}

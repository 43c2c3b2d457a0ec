//! Platform abstraction for synchronization primitives.
//!
//! Provides a unified `Mutex` that works in both `std` and `no_std`
//! environments. With the `std` feature enabled, uses `parking_lot`;
//! without it, uses `spin::Mutex` for locking. The `Condvar` used by the
//! blocking queue consumer only exists in `std` mode.

#[cfg(not(feature = "std"))]
pub use alloc::sync::Arc;
#[cfg(feature = "std")]
pub use std::sync::Arc;

#[cfg(feature = "std")]
pub type MutexGuard<'a, T> = parking_lot::MutexGuard<'a, T>;
#[cfg(not(feature = "std"))]
pub type MutexGuard<'a, T> = spin::MutexGuard<'a, T>;

/// Platform-agnostic mutex wrapper.
///
/// `parking_lot::Mutex` has no poisoning, so `lock` hands back a guard
/// directly in both modes.
pub struct Mutex<T> {
    #[cfg(feature = "std")]
    inner: parking_lot::Mutex<T>,
    #[cfg(not(feature = "std"))]
    inner: spin::Mutex<T>,
}

impl<T> Mutex<T> {
    /// Creates a new mutex protecting the given value.
    pub const fn new(value: T) -> Self {
        Self {
            #[cfg(feature = "std")]
            inner: parking_lot::Mutex::new(value),
            #[cfg(not(feature = "std"))]
            inner: spin::Mutex::new(value),
        }
    }

    /// Acquires the mutex, blocking until it becomes available.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }
}

/// Condition variable paired with [`Mutex`] guards.
#[cfg(feature = "std")]
pub struct Condvar {
    inner: parking_lot::Condvar,
}

#[cfg(feature = "std")]
impl Condvar {
    pub const fn new() -> Self {
        Self {
            inner: parking_lot::Condvar::new(),
        }
    }

    /// Blocks until notified or the timeout elapses. Returns true when the
    /// wait timed out.
    pub fn wait_for<T>(&self, guard: &mut MutexGuard<'_, T>, timeout: core::time::Duration) -> bool {
        self.inner.wait_for(guard, timeout).timed_out()
    }

    pub fn notify_one(&self) {
        self.inner.notify_one();
    }
}

#[cfg(feature = "std")]
impl Default for Condvar {
    fn default() -> Self {
        Self::new()
    }
}

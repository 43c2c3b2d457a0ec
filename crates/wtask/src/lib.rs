//! # wtask
//!
//! Long-lived worker tasks built around the shared configuration store.
//! The blink task reads the store once per iteration and toggles an
//! output; the input task turns console lines into clamped store updates.
//! The two never synchronize with each other directly — the store's lock
//! is their only shared resource, and neither holds it across a sleep or
//! a blocking read.

pub mod blink;
pub mod input;

pub use blink::BlinkTask;
pub use input::{InputTask, DELTA_MS};

/// Milliseconds the store hands to worker tasks.
pub type PeriodMs = i64;

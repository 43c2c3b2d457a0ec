//! # dwq
//!
//! An interrupt-safe deferred work pipeline. Hardware-trigger callbacks run
//! in interrupt-like context where they may only do one thing: decide
//! whether the trigger is theirs and submit a single work record. The
//! record is consumed later, in task context, where the bound handler has
//! full capabilities (logging, updating shared configuration, re-arming
//! its source).
//!
//! ## Module Overview
//! - [`event`]    – Source identity and the work record moved between
//!   contexts.
//! - [`queue`]    – Bounded FIFO with per-source coalescing; at most one
//!   outstanding record per source.
//! - [`source`]   – Event source variants: edge input, one-shot alarm,
//!   free-running tick timer.
//! - [`dispatch`] – Binds sources to handlers and runs them in task
//!   context.
//! - [`store`]    – Mutex-guarded, range-clamped shared configuration
//!   value.
//!
//! The modules are loosely coupled: the store can be used without the
//! queue, and the queue without any concrete source.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod dispatch;
pub mod event;
pub mod queue;
pub mod source;
pub mod store;
pub mod sync;

pub use dispatch::{Dispatcher, DispatcherBuilder, SubmitHook};
pub use event::{EventRecord, Rearm, SourceId};
pub use queue::{PendState, WorkQueue};
pub use source::{AlarmSource, EdgeSource, EventSource, SourceError, TickSource};
pub use store::SharedValue;

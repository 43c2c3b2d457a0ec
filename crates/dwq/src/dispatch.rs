//! Dispatcher: binds event sources to deferred handlers.
//!
//! Two-stage dispatch across execution domains. Stage one is the
//! [`SubmitHook`] a source calls from interrupt-like context — it only
//! enqueues. Stage two is the consumer, running in task context, which
//! pops records and runs the bound handlers with full capabilities:
//! handlers may log, update the shared store, and re-arm their source
//! (required for one-shot sources).

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, collections::BTreeMap};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

#[cfg(feature = "std")]
use core::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "std")]
use core::time::Duration;

use log::warn;

use crate::event::{EventRecord, SourceId};
use crate::queue::WorkQueue;
use crate::sync::{Arc, Mutex};

/// Deferred handler run in task context.
pub type Handler = Box<dyn FnMut(&EventRecord) + Send>;

/// Interrupt-side submission entry point for one source.
///
/// Cheap to clone into a callback; `submit` is O(1), non-blocking and
/// allocation-free.
#[derive(Clone)]
pub struct SubmitHook {
    queue: Arc<WorkQueue>,
    source: SourceId,
}

impl SubmitHook {
    pub fn new(queue: Arc<WorkQueue>, source: SourceId) -> Self {
        Self { queue, source }
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Submits a record; false means an equivalent event is already
    /// pending and the fire was coalesced.
    pub fn submit(&self, record: EventRecord) -> bool {
        debug_assert_eq!(record.source, self.source);
        self.queue.submit(record)
    }
}

pub struct DispatcherBuilder {
    queue: Arc<WorkQueue>,
    handlers: BTreeMap<SourceId, Handler>,
}

impl DispatcherBuilder {
    /// Registers a source and binds its deferred handler.
    pub fn bind<F>(mut self, source: SourceId, handler: F) -> Self
    where
        F: FnMut(&EventRecord) + Send + 'static,
    {
        self.queue.register(source);
        self.handlers.insert(source, Box::new(handler));
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            queue: self.queue,
            handlers: Mutex::new(self.handlers),
        }
    }
}

/// Single-consumer dispatcher over a [`WorkQueue`].
pub struct Dispatcher {
    queue: Arc<WorkQueue>,
    handlers: Mutex<BTreeMap<SourceId, Handler>>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder {
            queue: Arc::new(WorkQueue::new()),
            handlers: BTreeMap::new(),
        }
    }

    /// The queue shared with submit hooks.
    pub fn queue(&self) -> Arc<WorkQueue> {
        Arc::clone(&self.queue)
    }

    /// Creates the interrupt-side hook a source fires through.
    pub fn submit_hook(&self, source: SourceId) -> SubmitHook {
        SubmitHook::new(Arc::clone(&self.queue), source)
    }

    /// Binds or replaces a handler after construction.
    ///
    /// Needed when the handler must hold its own source (to re-arm it):
    /// the source is built from a [`SubmitHook`], which requires the
    /// dispatcher to exist first.
    pub fn bind<F>(&self, source: SourceId, handler: F)
    where
        F: FnMut(&EventRecord) + Send + 'static,
    {
        self.queue.register(source);
        self.handlers.lock().insert(source, Box::new(handler));
    }

    /// Runs the next pending record, if any. Returns whether one ran.
    pub fn dispatch_one(&self) -> bool {
        match self.queue.take() {
            Some(record) => {
                self.run_handler(&record);
                true
            }
            None => false,
        }
    }

    /// Drains the queue, running every pending record.
    pub fn run_until_idle(&self) {
        while self.dispatch_one() {}
    }

    /// Blocking consumer loop: parks while the queue is empty, wakes for
    /// each submission, exits once `stop` is raised.
    #[cfg(feature = "std")]
    pub fn run(&self, stop: &AtomicBool) {
        const WAIT_SLICE: Duration = Duration::from_millis(50);
        while !stop.load(Ordering::Relaxed) {
            if let Some(record) = self.queue.take_timeout(WAIT_SLICE) {
                self.run_handler(&record);
            }
        }
    }

    fn run_handler(&self, record: &EventRecord) {
        // The handler is taken out of the map so its body may call back
        // into the dispatcher (bind, dispatch_one) without deadlocking on
        // the non-reentrant handlers lock.
        let handler = self.handlers.lock().remove(&record.source);
        match handler {
            Some(mut handler) => {
                handler(record);
                // A handler that re-bound its own source wins.
                self.handlers
                    .lock()
                    .entry(record.source)
                    .or_insert(handler);
            }
            None => warn!("no handler bound for {}", record.source),
        }
        self.queue.complete(record.source);
    }
}

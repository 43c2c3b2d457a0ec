//! Bounded FIFO work queue with per-source coalescing.
//!
//! Each logical event moves through Idle → Submitted → Running → Idle. A
//! submit while the source is already Submitted or Running is dropped —
//! this is the backpressure policy: handlers that run long never pile up
//! duplicate work. Accepted records run exactly once, FIFO across distinct
//! sources.

#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, VecDeque};
#[cfg(feature = "std")]
use std::collections::{BTreeMap, VecDeque};

#[cfg(feature = "std")]
use core::time::Duration;

#[cfg(feature = "std")]
use crate::sync::Condvar;
use crate::sync::Mutex;

use crate::event::{EventRecord, SourceId};

/// Submission state of one logical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendState {
    Idle,
    Submitted,
    Running,
}

struct Inner {
    fifo: VecDeque<EventRecord>,
    pending: BTreeMap<SourceId, PendState>,
}

/// Single-consumer deferred work queue.
///
/// The submit side is safe to call from interrupt-like context: O(1), no
/// allocation (capacity is reserved at registration — at most one
/// outstanding record per source bounds the queue length by the number of
/// registered sources), and only the queue's own short-lived lock.
pub struct WorkQueue {
    inner: Mutex<Inner>,
    #[cfg(feature = "std")]
    available: Condvar,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                fifo: VecDeque::new(),
                pending: BTreeMap::new(),
            }),
            #[cfg(feature = "std")]
            available: Condvar::new(),
        }
    }

    /// Registers a source and reserves its slot in the FIFO.
    ///
    /// Submissions for unregistered sources are rejected, so every source
    /// must be registered before its trigger is first armed.
    pub fn register(&self, source: SourceId) {
        let mut inner = self.inner.lock();
        inner.pending.entry(source).or_insert(PendState::Idle);
        let slots = inner.pending.len();
        inner.fifo.reserve(slots);
    }

    /// Submits a record from interrupt-like context.
    ///
    /// Returns false without enqueueing when a record for the same source
    /// is already Submitted or Running, or when the source was never
    /// registered.
    pub fn submit(&self, record: EventRecord) -> bool {
        let accepted = {
            let mut inner = self.inner.lock();
            let inner = &mut *inner;
            match inner.pending.get_mut(&record.source) {
                Some(state @ PendState::Idle) => {
                    *state = PendState::Submitted;
                    inner.fifo.push_back(record);
                    true
                }
                _ => false,
            }
        };
        #[cfg(feature = "std")]
        if accepted {
            self.available.notify_one();
        }
        accepted
    }

    /// Pops the next record and marks its source Running.
    pub fn take(&self) -> Option<EventRecord> {
        let mut inner = self.inner.lock();
        let record = inner.fifo.pop_front()?;
        if let Some(state) = inner.pending.get_mut(&record.source) {
            *state = PendState::Running;
        }
        Some(record)
    }

    /// Blocks until a record is available or `timeout` elapses.
    #[cfg(feature = "std")]
    pub fn take_timeout(&self, timeout: Duration) -> Option<EventRecord> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(record) = inner.fifo.pop_front() {
                if let Some(state) = inner.pending.get_mut(&record.source) {
                    *state = PendState::Running;
                }
                return Some(record);
            }
            if self.available.wait_for(&mut inner, timeout) {
                return None;
            }
        }
    }

    /// Marks the source Idle again after its handler returned.
    pub fn complete(&self, source: SourceId) {
        let mut inner = self.inner.lock();
        if let Some(state) = inner.pending.get_mut(&source) {
            *state = PendState::Idle;
        }
    }

    /// Current submission state of a source, if registered.
    pub fn state(&self, source: SourceId) -> Option<PendState> {
        self.inner.lock().pending.get(&source).copied()
    }

    /// Number of records waiting to run.
    pub fn len(&self) -> usize {
        self.inner.lock().fifo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_take_complete_cycle() {
        let queue = WorkQueue::new();
        let src = SourceId(1);
        queue.register(src);

        assert_eq!(queue.state(src), Some(PendState::Idle));
        assert!(queue.submit(EventRecord::bare(src)));
        assert_eq!(queue.state(src), Some(PendState::Submitted));
        assert_eq!(queue.len(), 1);

        let record = queue.take().unwrap();
        assert_eq!(record.source, src);
        assert_eq!(queue.state(src), Some(PendState::Running));

        queue.complete(src);
        assert_eq!(queue.state(src), Some(PendState::Idle));
        assert!(queue.is_empty());
    }

    #[test]
    fn duplicate_submit_is_coalesced() {
        let queue = WorkQueue::new();
        let src = SourceId(1);
        queue.register(src);

        assert!(queue.submit(EventRecord::bare(src)));
        assert!(!queue.submit(EventRecord::bare(src)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn submit_rejected_while_running() {
        let queue = WorkQueue::new();
        let src = SourceId(1);
        queue.register(src);

        queue.submit(EventRecord::bare(src));
        let _record = queue.take().unwrap();

        assert!(!queue.submit(EventRecord::bare(src)));
        queue.complete(src);
        assert!(queue.submit(EventRecord::bare(src)));
    }

    #[test]
    fn fifo_across_distinct_sources() {
        let queue = WorkQueue::new();
        for id in 1..=3 {
            queue.register(SourceId(id));
        }

        queue.submit(EventRecord::bare(SourceId(2)));
        queue.submit(EventRecord::bare(SourceId(3)));
        queue.submit(EventRecord::bare(SourceId(1)));

        assert_eq!(queue.take().unwrap().source, SourceId(2));
        assert_eq!(queue.take().unwrap().source, SourceId(3));
        assert_eq!(queue.take().unwrap().source, SourceId(1));
        assert_eq!(queue.take(), None);
    }

    #[test]
    fn unregistered_source_rejected() {
        let queue = WorkQueue::new();
        assert!(!queue.submit(EventRecord::bare(SourceId(9))));
        assert!(queue.is_empty());
    }
}

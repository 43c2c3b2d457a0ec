//! Event source variants.
//!
//! A source wraps a hardware-style trigger. Its fire path runs in
//! interrupt-like context and is restricted to filtering and submitting one
//! record — no store access, no logging, no allocation. Everything else
//! (re-arming, reacting) happens in the deferred handler.
//!
//! [`EdgeSource`] models an edge-triggered input configured once.
//! [`AlarmSource`] models a one-shot counter alarm: it goes silent unless
//! the handler arms it again. [`TickSource`] models a free-running periodic
//! timer that re-arms itself.

use thiserror::Error;

use crate::dispatch::SubmitHook;
use crate::event::{EventRecord, Rearm, SourceId};
use crate::sync::Mutex;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    #[error("cannot arm {0} with zero ticks")]
    InvalidTicks(SourceId),
}

/// A hardware trigger the pipeline can schedule.
///
/// One implementation per concrete peripheral variant. `arm` schedules the
/// next trigger; for one-shot variants it must be called again from the
/// deferred handler or the source stays silent.
pub trait EventSource: Send + Sync {
    fn id(&self) -> SourceId;
    fn arm(&self, rearm: Option<Rearm>) -> Result<(), SourceError>;
}

/// Edge-triggered digital input.
///
/// The interrupt is configured once at construction; `arm` is a no-op
/// afterwards. `fire` takes the mask of all pins that changed in one
/// interrupt and filters for its own pin before submitting.
pub struct EdgeSource {
    id: SourceId,
    pin: u8,
    hook: SubmitHook,
}

impl EdgeSource {
    pub fn new(id: SourceId, pin: u8, hook: SubmitHook) -> Self {
        debug_assert!(pin < 32);
        Self { id, pin, hook }
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Interrupt-like entry point. Returns whether a record was submitted.
    pub fn fire(&self, pins: u32) -> bool {
        if pins & (1u32 << self.pin) != 0 {
            self.hook.submit(EventRecord::bare(self.id))
        } else {
            false
        }
    }
}

impl EventSource for EdgeSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn arm(&self, _rearm: Option<Rearm>) -> Result<(), SourceError> {
        Ok(())
    }
}

struct AlarmState {
    armed: bool,
    remaining: u64,
}

/// One-shot counter alarm.
///
/// Expiry disarms the alarm before submitting, and the record carries the
/// nominal interval as plain data so the handler can re-arm without
/// touching live alarm state. A handler that forgets to re-arm silences
/// the source; there is no watchdog.
pub struct AlarmSource {
    id: SourceId,
    interval: u64,
    hook: SubmitHook,
    state: Mutex<AlarmState>,
}

impl AlarmSource {
    pub fn new(id: SourceId, interval: u64, hook: SubmitHook) -> Self {
        Self {
            id,
            interval,
            hook,
            state: Mutex::new(AlarmState {
                armed: false,
                remaining: 0,
            }),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state.lock().armed
    }

    /// Advances the simulated counter by `ticks`; interrupt-like context.
    /// Returns whether the alarm expired and a record was submitted.
    pub fn advance(&self, ticks: u64) -> bool {
        let expired = {
            let mut state = self.state.lock();
            if !state.armed {
                return false;
            }
            state.remaining = state.remaining.saturating_sub(ticks);
            if state.remaining == 0 {
                state.armed = false;
                true
            } else {
                false
            }
        };
        if expired {
            self.hook.submit(EventRecord::with_rearm(self.id, self.interval))
        } else {
            false
        }
    }
}

impl EventSource for AlarmSource {
    fn id(&self) -> SourceId {
        self.id
    }

    /// Schedules the next expiry. `None` falls back to the nominal
    /// interval; the deferred handler normally passes the `Rearm` it was
    /// handed in the record.
    fn arm(&self, rearm: Option<Rearm>) -> Result<(), SourceError> {
        let ticks = rearm.map(|r| r.ticks).unwrap_or(self.interval);
        if ticks == 0 {
            return Err(SourceError::InvalidTicks(self.id));
        }
        let mut state = self.state.lock();
        state.armed = true;
        state.remaining = ticks;
        Ok(())
    }
}

struct TickState {
    running: bool,
    period: u64,
    elapsed: u64,
}

/// Free-running periodic timer.
///
/// Once armed it keeps firing every period without handler involvement.
/// At most one record is submitted per `advance` call; the coalescing
/// queue drops the rest anyway.
pub struct TickSource {
    id: SourceId,
    hook: SubmitHook,
    state: Mutex<TickState>,
}

impl TickSource {
    pub fn new(id: SourceId, period: u64, hook: SubmitHook) -> Self {
        Self {
            id,
            hook,
            state: Mutex::new(TickState {
                running: false,
                period,
                elapsed: 0,
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Stops future expiries without discarding the configured period.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        state.running = false;
        state.elapsed = 0;
    }

    /// Advances simulated time by `ticks`; interrupt-like context.
    pub fn advance(&self, ticks: u64) -> bool {
        let expired = {
            let mut state = self.state.lock();
            if !state.running {
                return false;
            }
            state.elapsed += ticks;
            if state.elapsed >= state.period {
                state.elapsed %= state.period;
                true
            } else {
                false
            }
        };
        if expired {
            self.hook.submit(EventRecord::bare(self.id))
        } else {
            false
        }
    }
}

impl EventSource for TickSource {
    fn id(&self) -> SourceId {
        self.id
    }

    /// Starts the timer; `Some(rearm)` replaces the period first. A zero
    /// period is rejected whether it comes from the re-arm configuration
    /// or was stored at construction.
    fn arm(&self, rearm: Option<Rearm>) -> Result<(), SourceError> {
        let mut state = self.state.lock();
        match rearm {
            Some(rearm) => {
                if rearm.ticks == 0 {
                    return Err(SourceError::InvalidTicks(self.id));
                }
                state.period = rearm.ticks;
            }
            None => {
                if state.period == 0 {
                    return Err(SourceError::InvalidTicks(self.id));
                }
            }
        }
        state.running = true;
        state.elapsed = 0;
        Ok(())
    }
}

//! Input task: console lines become clamped store updates.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{info, warn};

use dwq::SharedValue;
use hio::console::LineSource;

use crate::PeriodMs;

/// Milliseconds added or removed per accepted console line.
pub const DELTA_MS: PeriodMs = 100;

/// Blocks on console lines and applies `+`/`-` deltas to the store.
///
/// Unrecognized lines are ignored without comment; input validation rigor
/// is a stated non-goal. The blocking read is the task's only suspension
/// point, and the loop ends when the line source does.
pub struct InputTask {
    lines: Box<dyn LineSource>,
    store: Arc<SharedValue<PeriodMs>>,
}

impl InputTask {
    pub fn new(lines: Box<dyn LineSource>, store: Arc<SharedValue<PeriodMs>>) -> Self {
        Self { lines, store }
    }

    /// Maps a line to a delta: `+` increments, `-` decrements, anything
    /// else is ignored.
    pub fn parse_delta(line: &str) -> Option<PeriodMs> {
        match line.chars().next()? {
            '+' => Some(DELTA_MS),
            '-' => Some(-DELTA_MS),
            _ => None,
        }
    }

    /// Applies one line to the store; returns the new value when the line
    /// was a valid delta.
    pub fn apply_line(&self, line: &str) -> Option<PeriodMs> {
        let delta = Self::parse_delta(line)?;
        let value = self.store.update(delta);
        info!("updating blink sleep to: {value}");
        Some(value)
    }

    /// Runs until the line source ends or fails.
    pub fn run(mut self) {
        info!("starting input task");
        loop {
            match self.lines.next_line() {
                Ok(Some(line)) => {
                    self.apply_line(&line);
                }
                Ok(None) => break,
                Err(err) => {
                    warn!("console read failed: {err}");
                    break;
                }
            }
        }
    }

    /// Moves the task onto its own thread.
    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || self.run())
    }
}

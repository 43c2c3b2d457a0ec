//! Actuation task: toggle an output at the shared blink period.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};

use dwq::SharedValue;
use hio::gpio::{Direction, Gpio, Level};
use hio::{HalError, HalResult};

use crate::PeriodMs;

/// Perpetually toggles one output pin, sleeping the store's current period
/// between toggles.
///
/// The period is re-read once per iteration and never held across the
/// sleep. A failed write is logged and the loop continues; only the
/// initial pin configuration is fatal.
pub struct BlinkTask {
    port: Arc<dyn Gpio>,
    pin: u8,
    store: Arc<SharedValue<PeriodMs>>,
    level: Level,
}

impl BlinkTask {
    /// Configures the output pin. A configure failure means the task never
    /// enters its loop.
    pub fn new(
        port: Arc<dyn Gpio>,
        pin: u8,
        store: Arc<SharedValue<PeriodMs>>,
    ) -> HalResult<Self> {
        if !port.is_ready() {
            return Err(HalError::NotReady("led"));
        }
        port.configure(pin, Direction::Output)?;
        Ok(Self {
            port,
            pin,
            store,
            level: Level::Low,
        })
    }

    /// The level driven by the most recent toggle.
    pub fn level(&self) -> Level {
        self.level
    }

    /// One loop iteration: toggle, then report how long to sleep.
    pub fn step(&mut self) -> Duration {
        self.level = self.level.toggled();
        if let Err(err) = self.port.write(self.pin, self.level) {
            warn!("couldn't toggle pin: {err}");
        }
        let period = self.store.read().max(0) as u64;
        Duration::from_millis(period)
    }

    /// Runs until `stop` is raised.
    pub fn run(mut self, stop: &AtomicBool) {
        info!("starting blink task on pin {}", self.pin);
        while !stop.load(Ordering::Relaxed) {
            let period = self.step();
            thread::sleep(period);
        }
    }

    /// Moves the task onto its own thread.
    pub fn spawn(self, stop: Arc<AtomicBool>) -> JoinHandle<()> {
        thread::spawn(move || self.run(&stop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hio::gpio::SimPort;

    fn task_on(port: &Arc<SimPort>) -> BlinkTask {
        let store = Arc::new(SharedValue::new(500, 0, 2000));
        BlinkTask::new(Arc::clone(port) as Arc<dyn Gpio>, 1, store).unwrap()
    }

    #[test]
    fn step_alternates_levels() {
        let port = Arc::new(SimPort::new());
        let mut task = task_on(&port);

        task.step();
        assert_eq!(port.level(1), Some(Level::High));
        task.step();
        assert_eq!(port.level(1), Some(Level::Low));
    }

    #[test]
    fn step_returns_store_period() {
        let port = Arc::new(SimPort::new());
        let store = Arc::new(SharedValue::new(700, 0, 2000));
        let mut task = BlinkTask::new(Arc::clone(&port) as Arc<dyn Gpio>, 1, store).unwrap();

        assert_eq!(task.step(), Duration::from_millis(700));
    }

    #[test]
    fn offline_port_is_fatal_at_setup() {
        let port: Arc<dyn Gpio> = Arc::new(SimPort::offline());
        let store = Arc::new(SharedValue::new(500, 0, 2000));

        match BlinkTask::new(port, 1, store) {
            Err(err) => assert_eq!(err, HalError::NotReady("led")),
            Ok(_) => panic!("offline port must fail setup"),
        }
    }

    #[test]
    fn write_failure_does_not_stop_the_loop() {
        let port = Arc::new(SimPort::new());
        let mut task = task_on(&port);

        port.fail_pin(1);
        task.step();
        port.restore_pin(1);

        // Next iteration drives the pin again.
        task.step();
        assert!(port.level(1).is_some());
    }
}

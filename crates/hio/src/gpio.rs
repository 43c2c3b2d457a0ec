//! Pin levels, directions and the GPIO port trait.
//!
//! The trait is the seam between the pipeline and whatever actually drives
//! the pins. [`SimPort`] is the host-side implementation: an in-memory pin
//! table with per-pin failure injection, so actuation error handling can be
//! exercised without hardware.

use std::collections::HashMap;

use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{HalError, HalResult};

/// Logical level of a digital pin.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// The opposite level. Driving the result of `toggled` is how the blink
    /// task alternates its output.
    pub fn toggled(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Configured direction of a pin.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// A bank of digital pins addressed by number.
///
/// Implementations must be safe to share between tasks; every operation is
/// a single short access with no internal blocking. Driving a level is
/// idempotent: writing level L always leaves the pin observably at L.
pub trait Gpio: Send + Sync {
    /// Whether the port is up at all. Checked once at setup; a port that
    /// is not ready fails construction of everything built on it.
    fn is_ready(&self) -> bool;

    /// Prepares a pin for use in the given direction.
    fn configure(&self, pin: u8, direction: Direction) -> HalResult<()>;

    /// Samples the current level of an input pin.
    fn read(&self, pin: u8) -> HalResult<Level>;

    /// Drives an output pin to the given level.
    fn write(&self, pin: u8, level: Level) -> HalResult<()>;
}

#[derive(Debug, Clone, Copy)]
struct PinState {
    direction: Direction,
    level: Level,
    failing: bool,
}

/// In-memory GPIO port for host demos and tests.
///
/// Pins spring into existence when configured. `fail_pin` makes subsequent
/// reads and writes on one pin return [`HalError::Io`] until cleared, which
/// is how the tests simulate a flaky actuation path. [`SimPort::offline`]
/// builds a port that reports not-ready, for exercising setup failures.
pub struct SimPort {
    pins: Mutex<HashMap<u8, PinState>>,
    ready: bool,
}

impl SimPort {
    pub fn new() -> Self {
        Self {
            pins: Mutex::new(HashMap::new()),
            ready: true,
        }
    }

    /// A port that never comes up.
    pub fn offline() -> Self {
        Self {
            pins: Mutex::new(HashMap::new()),
            ready: false,
        }
    }

    /// Starts failing all accesses to `pin`.
    pub fn fail_pin(&self, pin: u8) {
        if let Some(state) = self.pins.lock().get_mut(&pin) {
            state.failing = true;
        }
    }

    /// Stops failing accesses to `pin`.
    pub fn restore_pin(&self, pin: u8) {
        if let Some(state) = self.pins.lock().get_mut(&pin) {
            state.failing = false;
        }
    }

    /// Forces an input pin to a level, as an external signal would.
    pub fn set_input(&self, pin: u8, level: Level) {
        if let Some(state) = self.pins.lock().get_mut(&pin) {
            state.level = level;
        }
    }

    /// Observes the currently driven level without going through the trait.
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.pins.lock().get(&pin).map(|state| state.level)
    }
}

impl Default for SimPort {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpio for SimPort {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn configure(&self, pin: u8, direction: Direction) -> HalResult<()> {
        if !self.ready {
            return Err(HalError::NotReady("gpio"));
        }
        let mut pins = self.pins.lock();
        pins.insert(
            pin,
            PinState {
                direction,
                level: Level::Low,
                failing: false,
            },
        );
        Ok(())
    }

    fn read(&self, pin: u8) -> HalResult<Level> {
        let pins = self.pins.lock();
        let state = pins.get(&pin).ok_or(HalError::Configure { pin })?;
        if state.failing {
            return Err(HalError::Io { pin });
        }
        Ok(state.level)
    }

    fn write(&self, pin: u8, level: Level) -> HalResult<()> {
        let mut pins = self.pins.lock();
        let state = pins.get_mut(&pin).ok_or(HalError::Configure { pin })?;
        if state.failing {
            return Err(HalError::Io { pin });
        }
        if state.direction != Direction::Output {
            return Err(HalError::Configure { pin });
        }
        state.level = level;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_toggles() {
        assert_eq!(Level::Low.toggled(), Level::High);
        assert_eq!(Level::High.toggled(), Level::Low);
    }

    #[test]
    fn write_requires_output_direction() {
        let port = SimPort::new();
        port.configure(3, Direction::Input).unwrap();
        assert_eq!(
            port.write(3, Level::High),
            Err(HalError::Configure { pin: 3 })
        );
    }

    #[test]
    fn unconfigured_pin_rejected() {
        let port = SimPort::new();
        assert_eq!(port.read(7), Err(HalError::Configure { pin: 7 }));
    }

    #[test]
    fn offline_port_is_not_ready() {
        let port = SimPort::offline();
        assert!(!port.is_ready());
        assert_eq!(
            port.configure(1, Direction::Output),
            Err(HalError::NotReady("gpio"))
        );
    }

    #[test]
    fn failure_injection_round_trip() {
        let port = SimPort::new();
        port.configure(2, Direction::Output).unwrap();
        port.write(2, Level::High).unwrap();

        port.fail_pin(2);
        assert_eq!(port.write(2, Level::Low), Err(HalError::Io { pin: 2 }));
        // Failed write must not disturb the driven level.
        assert_eq!(port.level(2), Some(Level::High));

        port.restore_pin(2);
        port.write(2, Level::Low).unwrap();
        assert_eq!(port.level(2), Some(Level::Low));
    }
}

//! Polled button driver.
//!
//! A button is an input pin plus an instance id. The driver configures its
//! pin at construction time; a construction failure is a setup error and
//! the instance is never produced. Multiple buttons are built from an
//! explicit configuration list via [`build_buttons`] rather than any
//! compile-time instantiation scheme.

use std::sync::Arc;

use log::{debug, error};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::gpio::{Direction, Gpio, Level};
use crate::{HalError, HalResult};

/// Static description of one button instance.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub pin: u8,
    pub id: u32,
}

impl ButtonConfig {
    pub const fn new(pin: u8, id: u32) -> Self {
        Self { pin, id }
    }
}

/// Anything that can report a digital on/off state.
///
/// One implementation per concrete peripheral variant; [`Button`] is the
/// GPIO-backed one.
pub trait DigitalInput: Send + Sync {
    fn get(&self) -> HalResult<Level>;
}

/// GPIO-backed button instance.
pub struct Button {
    port: Arc<dyn Gpio>,
    config: ButtonConfig,
}

impl Button {
    /// Configures the button's pin as an input and returns the driver.
    ///
    /// Fails with a setup error if the pin cannot be configured; callers
    /// treat that as fatal and skip their polling loop entirely.
    pub fn new(port: Arc<dyn Gpio>, config: ButtonConfig) -> HalResult<Self> {
        debug!("initializing button (id = {})", config.id);
        if !port.is_ready() {
            return Err(HalError::NotReady("button"));
        }
        port.configure(config.pin, Direction::Input)
            .map_err(|_| HalError::Configure { pin: config.pin })?;
        Ok(Self { port, config })
    }

    pub fn config(&self) -> ButtonConfig {
        self.config
    }
}

impl DigitalInput for Button {
    fn get(&self) -> HalResult<Level> {
        self.port.read(self.config.pin).map_err(|err| {
            error!("failed to read button pin {}: {err}", self.config.pin);
            err
        })
    }
}

/// Builds one [`Button`] per configuration entry.
///
/// The whole batch fails if any single instance fails to configure, so a
/// partially wired board is caught at startup rather than at first poll.
pub fn build_buttons(port: Arc<dyn Gpio>, configs: &[ButtonConfig]) -> HalResult<Vec<Button>> {
    configs
        .iter()
        .map(|config| Button::new(Arc::clone(&port), *config))
        .collect()
}

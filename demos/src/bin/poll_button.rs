//! Device driver demo: buttons built from an explicit configuration list
//! and polled through the `DigitalInput` trait.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{error, info};

use hio::button::{build_buttons, ButtonConfig, DigitalInput};
use hio::gpio::{Gpio, SimPort};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() {
    env_logger::init();

    let port: Arc<dyn Gpio> = Arc::new(SimPort::new());
    let configs = [ButtonConfig::new(4, 0), ButtonConfig::new(5, 1)];

    let buttons = match build_buttons(Arc::clone(&port), &configs) {
        Ok(buttons) => buttons,
        Err(err) => {
            error!("buttons are not ready: {err}");
            return;
        }
    };

    loop {
        for button in &buttons {
            match button.get() {
                Ok(level) => info!("button {}: {level:?}", button.config().id),
                // Read failures skip this poll; the loop keeps going.
                Err(err) => error!("failed to read button: {err}"),
            }
        }
        thread::sleep(POLL_INTERVAL);
    }
}

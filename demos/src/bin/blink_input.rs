//! Mutex demo: a blink task and a console input task sharing one clamped
//! blink period.
//!
//! Type `+` or `-` followed by Enter to change the period in 100ms steps;
//! the value is clamped to [0, 2000]. EOF (Ctrl-D) ends the input task and
//! shuts the demo down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info};

use dwq::SharedValue;
use hio::console::StdinLines;
use hio::gpio::{Gpio, SimPort};
use wtask::{BlinkTask, InputTask};

const LED_PIN: u8 = 1;
const BLINK_INITIAL_MS: i64 = 500;
const BLINK_MIN_MS: i64 = 0;
const BLINK_MAX_MS: i64 = 2000;

fn main() {
    env_logger::init();

    let port: Arc<dyn Gpio> = Arc::new(SimPort::new());
    let store = Arc::new(SharedValue::new(BLINK_INITIAL_MS, BLINK_MIN_MS, BLINK_MAX_MS));

    let blink = match BlinkTask::new(Arc::clone(&port), LED_PIN, Arc::clone(&store)) {
        Ok(task) => task,
        Err(err) => {
            error!("couldn't configure LED pin: {err}");
            return;
        }
    };

    let stop = Arc::new(AtomicBool::new(false));
    let blink_thread = blink.spawn(Arc::clone(&stop));
    let input_thread = InputTask::new(Box::new(StdinLines::new()), store).spawn();

    info!("blinking pin {LED_PIN}; +/- to change the period");

    input_thread.join().expect("input task panicked");
    stop.store(true, Ordering::Relaxed);
    blink_thread.join().expect("blink task panicked");
}

//! Button demo: an edge-triggered input fires in interrupt-like context;
//! the log line is printed by the deferred handler in task context.
//!
//! A background thread stands in for the interrupt controller, firing the
//! button's pin mask once a second.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::info;

use dwq::{Dispatcher, EdgeSource, SourceId};

const BUTTON_PIN: u8 = 4;
const BUTTON_SRC: SourceId = SourceId(1);

fn main() {
    env_logger::init();

    let dispatcher = Arc::new(
        Dispatcher::builder()
            .bind(BUTTON_SRC, |_record| {
                info!("button pressed: pin {BUTTON_PIN}");
            })
            .build(),
    );

    let button = Arc::new(EdgeSource::new(
        BUTTON_SRC,
        BUTTON_PIN,
        dispatcher.submit_hook(BUTTON_SRC),
    ));

    // Simulated interrupt controller: reports the changed-pin mask.
    thread::spawn({
        let button = Arc::clone(&button);
        move || loop {
            thread::sleep(Duration::from_secs(1));
            button.fire(1 << BUTTON_PIN);
        }
    });

    let stop = AtomicBool::new(false);
    dispatcher.run(&stop);
}

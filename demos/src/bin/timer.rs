//! Timer demo: a free-running periodic tick source. No handler re-arm is
//! needed; the source re-schedules itself every period.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::info;

use dwq::{Dispatcher, EventSource, SourceId, TickSource};

const TIMER_SRC: SourceId = SourceId(3);
const TIMER_TICKS: u64 = 1000;
const TICK: Duration = Duration::from_millis(1);

fn main() {
    env_logger::init();

    let dispatcher = Arc::new(
        Dispatcher::builder()
            .bind(TIMER_SRC, |record| {
                // Only our timer is bound here, but keep the identity
                // check the interrupt path would perform.
                if record.source == TIMER_SRC {
                    info!("timer!");
                }
            })
            .build(),
    );

    let timer = Arc::new(TickSource::new(
        TIMER_SRC,
        TIMER_TICKS,
        dispatcher.submit_hook(TIMER_SRC),
    ));
    timer.arm(None).expect("timer period is non-zero");

    thread::spawn({
        let timer = Arc::clone(&timer);
        move || loop {
            thread::sleep(TICK);
            timer.advance(1);
        }
    });

    let stop = AtomicBool::new(false);
    dispatcher.run(&stop);
}

//! Counter demo: a one-shot alarm whose deferred handler must re-arm it
//! before logging. Forgetting the re-arm would silence the alarm after one
//! expiry — the handler arms first, then logs.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use dwq::{AlarmSource, Dispatcher, EventSource, SourceId};

const ALARM_SRC: SourceId = SourceId(2);
const ALARM_TICKS: u64 = 1000;
const TICK: Duration = Duration::from_millis(1);

fn main() {
    env_logger::init();

    let dispatcher = Arc::new(Dispatcher::builder().build());
    let alarm = Arc::new(AlarmSource::new(
        ALARM_SRC,
        ALARM_TICKS,
        dispatcher.submit_hook(ALARM_SRC),
    ));

    dispatcher.bind(ALARM_SRC, {
        let alarm = Arc::clone(&alarm);
        move |record| {
            // Re-arm from the record's copied configuration, then log.
            if let Err(err) = alarm.arm(record.rearm) {
                warn!("couldn't re-arm alarm: {err}");
            }
            info!("counter!");
        }
    });

    if let Err(err) = alarm.arm(None) {
        warn!("couldn't start alarm: {err}");
        return;
    }
    info!("counter alarm set to {ALARM_TICKS} ticks");

    // Simulated counter peripheral: one tick per millisecond.
    thread::spawn({
        let alarm = Arc::clone(&alarm);
        move || loop {
            thread::sleep(TICK);
            alarm.advance(1);
        }
    });

    let stop = AtomicBool::new(false);
    dispatcher.run(&stop);
}

//! End-to-end pipeline tests: interrupt-side fire through the blocking
//! consumer into task-context handlers.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use dwq::{AlarmSource, Dispatcher, EdgeSource, EventSource, SharedValue, SourceId};

fn wait_until(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    done()
}

#[test]
fn edge_fire_reaches_handler_in_task_context() {
    let src = SourceId(1);
    let runs = Arc::new(AtomicU32::new(0));
    let dispatcher = Arc::new(
        Dispatcher::builder()
            .bind(src, {
                let runs = Arc::clone(&runs);
                move |_| {
                    runs.fetch_add(1, Ordering::SeqCst);
                }
            })
            .build(),
    );

    let stop = Arc::new(AtomicBool::new(false));
    let consumer = {
        let dispatcher = Arc::clone(&dispatcher);
        let stop = Arc::clone(&stop);
        thread::spawn(move || dispatcher.run(&stop))
    };

    let button = EdgeSource::new(src, 4, dispatcher.submit_hook(src));
    // The simulated ISR reports a mask of changed pins.
    assert!(button.fire(1 << 4));

    assert!(wait_until(Duration::from_secs(2), || {
        runs.load(Ordering::SeqCst) == 1
    }));

    stop.store(true, Ordering::Relaxed);
    consumer.join().unwrap();
}

#[test]
fn duplicate_fires_before_consumption_run_once() {
    let src = SourceId(1);
    let runs = Arc::new(AtomicU32::new(0));
    let dispatcher = Arc::new(
        Dispatcher::builder()
            .bind(src, {
                let runs = Arc::clone(&runs);
                move |_| {
                    runs.fetch_add(1, Ordering::SeqCst);
                }
            })
            .build(),
    );

    let button = EdgeSource::new(src, 2, dispatcher.submit_hook(src));
    assert!(button.fire(1 << 2));
    assert!(!button.fire(1 << 2));

    dispatcher.run_until_idle();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn alarm_handler_updates_store_and_rearms() {
    let src = SourceId(3);
    let store = Arc::new(SharedValue::new(500_i64, 0, 2000));
    let dispatcher = Arc::new(Dispatcher::builder().build());
    let alarm = Arc::new(AlarmSource::new(src, 100, dispatcher.submit_hook(src)));

    dispatcher.bind(src, {
        let alarm = Arc::clone(&alarm);
        let store = Arc::clone(&store);
        move |record| {
            alarm.arm(record.rearm).unwrap();
            store.update(100);
        }
    });

    let stop = Arc::new(AtomicBool::new(false));
    let consumer = {
        let dispatcher = Arc::clone(&dispatcher);
        let stop = Arc::clone(&stop);
        thread::spawn(move || dispatcher.run(&stop))
    };

    alarm.arm(None).unwrap();
    // Three expiries, each requiring the handler's re-arm to stay alive.
    for _ in 0..3 {
        let before = store.read();
        alarm.advance(100);
        let store = Arc::clone(&store);
        assert!(wait_until(Duration::from_secs(2), move || {
            store.read() > before
        }));
    }

    stop.store(true, Ordering::Relaxed);
    consumer.join().unwrap();

    assert_eq!(store.read(), 800);
}

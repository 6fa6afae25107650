use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::sweeper::Sweeper;
use crate::EqualizerError;

fn counting_sweeper(interval: Duration) -> (Sweeper, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let sweeper = {
        let hits = Arc::clone(&hits);
        Sweeper::run(interval, move || {
            hits.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap()
    };
    (sweeper, hits)
}

#[test]
fn sweeper_invokes_callback_on_interval() {
    let (sweeper, hits) = counting_sweeper(Duration::from_millis(20));
    thread::sleep(Duration::from_millis(130));
    sweeper.stop();

    let seen = hits.load(Ordering::Relaxed);
    assert!(seen >= 3, "expected at least 3 ticks, saw {seen}");
}

#[test]
fn sweeper_stop_halts_future_ticks_and_is_idempotent() {
    let (sweeper, hits) = counting_sweeper(Duration::from_millis(20));
    thread::sleep(Duration::from_millis(70));

    sweeper.stop();
    sweeper.stop();

    let after_stop = hits.load(Ordering::Relaxed);
    thread::sleep(Duration::from_millis(100));
    assert_eq!(hits.load(Ordering::Relaxed), after_stop);
}

#[test]
fn sweeper_survives_a_panicking_tick() {
    let hits = Arc::new(AtomicUsize::new(0));
    let sweeper = {
        let hits = Arc::clone(&hits);
        Sweeper::run(Duration::from_millis(20), move || {
            if hits.fetch_add(1, Ordering::Relaxed) == 0 {
                panic!("first tick fails");
            }
        })
        .unwrap()
    };

    thread::sleep(Duration::from_millis(130));
    sweeper.stop();

    let seen = hits.load(Ordering::Relaxed);
    assert!(seen >= 3, "schedule should outlive the panic, saw {seen}");
}

#[test]
fn sweeper_rejects_zero_interval() {
    let result = Sweeper::run(Duration::ZERO, || {});
    assert_eq!(
        result.err(),
        Some(EqualizerError::InvalidConfiguration(
            "Sweep interval must be greater than 0"
        ))
    );
}

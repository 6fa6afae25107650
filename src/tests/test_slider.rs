use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::Slider;

#[test]
fn slider_admits_up_to_capacity_then_recovers_after_window() {
    let slider = Slider::new(
        Duration::from_secs(1),
        Duration::from_millis(100),
        32,
    )
    .unwrap();

    for _ in 0..32 {
        assert!(slider.ask());
    }
    assert!(!slider.ask());

    // Let the admissions leave the window and a sweep reclaim them.
    thread::sleep(Duration::from_millis(1200));
    assert!(slider.ask());

    slider.close();
}

#[test]
fn slider_take_blocks_until_a_slot_frees() {
    let slider = Arc::new(
        Slider::new(Duration::from_millis(300), Duration::from_millis(50), 1).unwrap(),
    );
    assert!(slider.ask());

    let waited = {
        let slider = Arc::clone(&slider);
        thread::spawn(move || {
            let start = Instant::now();
            slider.take();
            start.elapsed()
        })
        .join()
        .unwrap()
    };

    // The slot frees once the first admission exits the 300ms window.
    assert!(waited >= Duration::from_millis(200), "waited {waited:?}");
    assert_eq!(slider.issued(), 1);

    slider.close();
}

#[test]
fn slider_take_timeout_leaks_no_reservation() {
    let slider =
        Slider::new(Duration::from_secs(5), Duration::from_millis(50), 1).unwrap();
    assert!(slider.ask());

    let start = Instant::now();
    assert!(!slider.take_timeout(Duration::from_millis(100)));
    assert!(start.elapsed() >= Duration::from_millis(100));

    // The timed-out wait consumed nothing.
    assert_eq!(slider.issued(), 1);

    slider.close();
}

#[test]
fn slider_close_is_idempotent_and_halts_pruning() {
    let slider =
        Slider::new(Duration::from_millis(200), Duration::from_millis(50), 1).unwrap();
    assert!(slider.ask());

    slider.close();
    slider.close();

    // Without the sweeper the expired entry is never reclaimed.
    thread::sleep(Duration::from_millis(400));
    assert!(!slider.ask());
}

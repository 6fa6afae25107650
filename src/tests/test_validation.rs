use std::time::Duration;

use crate::{Equalizer, EqualizerError, RandomOffset, Slider, StepOffset, TokenBucket};

fn invalid(message: &'static str) -> EqualizerError {
    EqualizerError::InvalidConfiguration(message)
}

#[test]
fn offset_constructors_reject_zero_length() {
    assert_eq!(
        RandomOffset::new(0).err(),
        Some(invalid("Offset length must be greater than 0"))
    );
    assert_eq!(
        StepOffset::new(0, 5).err(),
        Some(invalid("Offset length must be greater than 0"))
    );
}

#[test]
fn equalizer_constructor_validates_tape_dimensions() {
    assert_eq!(
        Equalizer::new(0, 0, StepOffset::new(1, 1).unwrap()).err(),
        Some(invalid("Tape size must be greater than 0"))
    );
    assert_eq!(
        Equalizer::new(8, 9, StepOffset::new(8, 1).unwrap()).err(),
        Some(invalid("Reserved bits must not exceed the tape size"))
    );

    // reserved == size is the fully-open configuration, not an error.
    assert!(Equalizer::new(8, 8, StepOffset::new(8, 1).unwrap()).is_ok());
}

#[test]
fn slider_constructor_validates_window_slide_and_capacity() {
    let window = Duration::from_secs(1);
    let slide = Duration::from_millis(100);

    assert_eq!(
        Slider::new(Duration::ZERO, slide, 1).err(),
        Some(invalid("Window duration must be greater than 0"))
    );
    assert_eq!(
        Slider::new(window, Duration::ZERO, 1).err(),
        Some(invalid("Slide interval must be greater than 0"))
    );
    assert_eq!(
        Slider::new(window, slide, 0).err(),
        Some(invalid("Capacity must be greater than 0"))
    );
}

#[test]
fn token_bucket_constructor_validates_capacity_and_interval() {
    assert_eq!(
        TokenBucket::new(0, Duration::from_secs(1)).err(),
        Some(invalid("Capacity must be greater than 0"))
    );
    assert_eq!(
        TokenBucket::new(1, Duration::ZERO).err(),
        Some(invalid("Refill interval must be greater than 0"))
    );
}

#[test]
fn error_messages_render_with_their_context() {
    assert_eq!(
        invalid("Capacity must be greater than 0").to_string(),
        "invalid configuration: Capacity must be greater than 0"
    );
    assert_eq!(
        EqualizerError::ConcurrencyViolation.to_string(),
        "concurrency violation: re-entrant state mutation"
    );
}

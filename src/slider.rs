use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::sweeper::Sweeper;
use crate::{EqualizerError, Limiter, Result};

/// Sliding-window rate limiter.
///
/// At most `capacity` admissions may be live inside the trailing `window`.
/// Each admission records its instant in a bounded ledger; a background
/// sweeper prunes entries older than the window once per `slide`, which keeps
/// the admission check O(`capacity`) and reclaims capacity for blocked
/// takers.
///
/// # Configuration contract
///
/// Choose `slide <= window`. The sweeper is the only path that reclaims
/// capacity, so a slide longer than the window lets stale entries linger and
/// under-admits.
///
/// # Thread safety
///
/// Safe for concurrent use: the ledger sits behind a mutex shared by the hot
/// path and the sweeper, and blocked [`take`](Slider::take) callers park on a
/// condvar that wakes them oldest-first.
///
/// # Shutdown
///
/// Call [`close`](Slider::close) once callers are done; it stops the sweeper
/// thread deterministically and is idempotent. Dropping the slider closes it
/// as well. After close, expired entries are no longer pruned, so admission
/// stops recovering.
pub struct Slider {
    ledger: Arc<Ledger>,
    sweeper: Sweeper,
}

struct Ledger {
    window: Duration,
    capacity: usize,
    timeline: Mutex<Vec<Instant>>,
    freed: Condvar,
}

impl Ledger {
    /// Records an admission iff the window has room. Caller holds the lock.
    fn claim(&self, timeline: &mut Vec<Instant>) -> bool {
        if timeline.len() < self.capacity {
            timeline.push(Instant::now());
            return true;
        }
        false
    }

    /// Drops entries that have left the window and wakes one parked taker
    /// per freed slot.
    fn prune(&self) {
        let freed = {
            let mut timeline = self.timeline.lock();
            let before = timeline.len();
            timeline.retain(|issued_at| issued_at.elapsed() < self.window);
            before - timeline.len()
        };
        for _ in 0..freed {
            self.freed.notify_one();
        }
    } // end method prune
}

impl Slider {
    /// Creates a `Slider` admitting at most `capacity` callers per trailing
    /// `window`, pruning expired admissions every `slide`.
    ///
    /// Returns [`EqualizerError::InvalidConfiguration`] when `window`,
    /// `slide`, or `capacity` is zero.
    pub fn new(window: Duration, slide: Duration, capacity: usize) -> Result<Self> {
        if window.is_zero() {
            return Err(EqualizerError::InvalidConfiguration(
                "Window duration must be greater than 0",
            ));
        }
        if slide.is_zero() {
            return Err(EqualizerError::InvalidConfiguration(
                "Slide interval must be greater than 0",
            ));
        }
        if capacity == 0 {
            return Err(EqualizerError::InvalidConfiguration(
                "Capacity must be greater than 0",
            ));
        }

        let ledger = Arc::new(Ledger {
            window,
            capacity,
            timeline: Mutex::new(Vec::with_capacity(capacity)),
            freed: Condvar::new(),
        });

        let sweeper = {
            let ledger = Arc::clone(&ledger);
            Sweeper::run(slide, move || ledger.prune())?
        };

        Ok(Self { ledger, sweeper })
    } // end constructor

    /// Non-blocking admission check; `true` records one admission.
    pub fn ask(&self) -> bool {
        let mut timeline = self.ledger.timeline.lock();
        self.ledger.claim(&mut timeline)
    }

    /// Blocks until a window slot frees, then records the admission.
    ///
    /// Waiters are woken in arrival order as the sweeper reclaims slots.
    pub fn take(&self) {
        let mut timeline = self.ledger.timeline.lock();
        while !self.ledger.claim(&mut timeline) {
            self.ledger.freed.wait(&mut timeline);
        }
    }

    /// Like [`take`](Slider::take), but gives up after `timeout`.
    ///
    /// Returns `true` when an admission was recorded. A timed-out wait
    /// records nothing.
    pub fn take_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut timeline = self.ledger.timeline.lock();
        while !self.ledger.claim(&mut timeline) {
            if self
                .ledger
                .freed
                .wait_until(&mut timeline, deadline)
                .timed_out()
            {
                return self.ledger.claim(&mut timeline);
            }
        }
        true
    } // end method take_timeout

    /// Number of admissions currently recorded in the window.
    pub fn issued(&self) -> usize {
        self.ledger.timeline.lock().len()
    }

    /// Stops the background sweeper. Idempotent; later calls are no-ops.
    pub fn close(&self) {
        self.sweeper.stop();
    }
} // end of impl

impl Limiter for Slider {
    fn ask(&self) -> bool {
        Slider::ask(self)
    }

    fn take(&self) {
        Slider::take(self)
    }
}

impl Drop for Slider {
    fn drop(&mut self) {
        self.sweeper.stop();
    }
}

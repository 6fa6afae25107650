use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::{EqualizerError, Result};

/// Strategy producing the next tape index to sample.
///
/// Implementations must be safe for unsynchronized concurrent calls; the
/// [`Equalizer`](crate::Equalizer) invokes `next_index` while holding only a
/// shared read lock.
pub trait Offset: Send + Sync {
    /// Returns the next 0-based index within the strategy's length.
    fn next_index(&self) -> usize;
}

/// Offset strategy drawing a uniformly random index on every call.
///
/// Stateless; useful for statistical smoothing when sampling the tape.
pub struct RandomOffset {
    len: usize,
}

impl RandomOffset {
    /// Creates a `RandomOffset` over `len` slots.
    ///
    /// Returns [`EqualizerError::InvalidConfiguration`] when `len` is zero.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(EqualizerError::InvalidConfiguration(
                "Offset length must be greater than 0",
            ));
        }
        Ok(Self { len })
    }
}

impl Offset for RandomOffset {
    fn next_index(&self) -> usize {
        rand::thread_rng().gen_range(0..self.len)
    }
}

/// Offset strategy advancing a fixed step per call, round-robin.
///
/// Each call atomically advances an internal cursor by `step` and returns it
/// modulo `len`, walking the tape with period `len / gcd(len, step)`. The
/// cursor update is a single fetch-and-add, so concurrent callers observe
/// distinct cursor values without any coarse lock.
pub struct StepOffset {
    len: u64,
    step: u64,
    cursor: AtomicU64,
}

impl StepOffset {
    /// Creates a `StepOffset` over `len` slots advancing `step` per call.
    ///
    /// Returns [`EqualizerError::InvalidConfiguration`] when `len` is zero.
    pub fn new(len: usize, step: u64) -> Result<Self> {
        if len == 0 {
            return Err(EqualizerError::InvalidConfiguration(
                "Offset length must be greater than 0",
            ));
        }
        Ok(Self {
            len: len as u64,
            step,
            cursor: AtomicU64::new(0),
        })
    }
}

impl Offset for StepOffset {
    fn next_index(&self) -> usize {
        // fetch_add returns the previous value; the index reflects the
        // advanced cursor, so the first call lands on `step % len`.
        let advanced = self
            .cursor
            .fetch_add(self.step, Ordering::Relaxed)
            .wrapping_add(self.step);
        (advanced % self.len) as usize
    }
}

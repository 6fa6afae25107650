use parking_lot::RwLock;

use crate::bitmap::Bitmap;
use crate::{EqualizerError, Offset, Result};

/// Bitmap-tape adaptive rate limiter.
///
/// The tape is a fixed-length bit sequence recording recent admit/deny
/// outcomes: bit value 1 admits, 0 denies. Every [`ask`](Equalizer::ask)
/// moves a head to the index produced by the configured [`Offset`] strategy
/// and returns the bit under it. Callers report how admitted work actually
/// went through [`notify`](Equalizer::notify), which ages the tape and
/// appends the new outcomes, so the admission rate tracks observed success.
///
/// A mask with the high-order `reserved` bits set is OR-ed back onto the
/// tape after every mutation, guaranteeing a minimum number of admit bits no
/// matter how unfavorable the reported history is.
///
/// # Maintenance
///
/// Unlike [`Slider`](crate::Slider) and [`TokenBucket`](crate::TokenBucket),
/// the equalizer has no background task: every tape update is caller-driven,
/// which keeps the feedback loop externally controllable. There is nothing
/// to shut down.
///
/// # Thread safety
///
/// Safe for concurrent use. Reads (`ask`) share a read lock — offset
/// strategies mutate only through atomics — while `notify`, `fill`, and
/// `reset` serialize behind the write lock, producing a linear history of
/// tape states.
///
/// # Example
///
/// ```
/// use equalizer::{Equalizer, StepOffset};
///
/// let eq = Equalizer::new(96, 16, StepOffset::new(96, 15).unwrap()).unwrap();
/// assert!(eq.ask()); // the tape starts all-admit
///
/// // Report 50 failures in bulk; part of the tape now denies.
/// eq.notify(false, 50);
/// assert!(!eq.ask());
/// ```
pub struct Equalizer {
    tape: RwLock<Bitmap>,
    mask: Bitmap,
    offset: Box<dyn Offset>,
    size: usize,
    reserved: usize,
}

impl Equalizer {
    /// Creates an `Equalizer` with a tape of `size` bits, of which the
    /// high-order `reserved` bits always admit.
    ///
    /// The tape starts in the all-admit state. `offset` decides which bit
    /// each [`ask`](Equalizer::ask) samples; its length should equal `size`
    /// (indices past the tape read as deny).
    ///
    /// Returns [`EqualizerError::InvalidConfiguration`] when `size` is zero
    /// or `reserved` exceeds `size`.
    pub fn new(size: usize, reserved: usize, offset: impl Offset + 'static) -> Result<Self> {
        if size == 0 {
            return Err(EqualizerError::InvalidConfiguration(
                "Tape size must be greater than 0",
            ));
        }
        if reserved > size {
            return Err(EqualizerError::InvalidConfiguration(
                "Reserved bits must not exceed the tape size",
            ));
        }

        let mut tape = Bitmap::zero(size);
        tape.set_range(0, size, true);

        let mut mask = Bitmap::zero(size);
        mask.set_range(size - reserved, size, true);

        Ok(Self {
            tape: RwLock::new(tape),
            mask,
            offset: Box::new(offset),
            size,
            reserved,
        })
    } // end constructor

    /// Moves the head to the next offset index and returns the bit there.
    ///
    /// Non-blocking beyond a shared read lock on the tape.
    pub fn ask(&self) -> bool {
        let tape = self.tape.read();
        tape.bit(self.offset.next_index())
    }

    /// Ages the tape by `n` positions and records `value` as the `n` newest
    /// outcomes.
    ///
    /// The tape shifts left by `n` bits, discarding the `n` oldest entries;
    /// the vacated low-order bits are filled with `value`, and the reserved
    /// mask is re-applied. Reporting `n` identical outcomes in one call
    /// amortizes the shift against `n` single-bit notifications.
    pub fn notify(&self, value: bool, n: usize) {
        let mut tape = self.tape.write();
        tape.shift_left(n);
        if value {
            tape.set_range(0, n, true);
        }
        tape.or_assign(&self.mask);
    } // end method notify

    /// Sets every tape bit to admit.
    pub fn fill(&self) {
        self.tape.write().set_range(0, self.size, true);
    }

    /// Returns the tape to its minimum-guarantee state: the low `reserved`
    /// bits admit, every other bit denies.
    pub fn reset(&self) {
        let mut tape = self.tape.write();
        tape.set_range(0, self.reserved, true);
        tape.set_range(self.reserved, self.size, false);
    }

    #[cfg(test)]
    pub(crate) fn tape_bits(&self) -> String {
        self.tape.read().to_bit_string()
    }

    #[cfg(test)]
    pub(crate) fn mask_bits(&self) -> String {
        self.mask.to_bit_string()
    }
} // end of impl

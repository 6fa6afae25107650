use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::sweeper::Sweeper;
use crate::{EqualizerError, Limiter, Result};

/// Unit of admission held by the permit channel.
struct Token;

/// Token bucket rate limiter with a fixed refill interval.
///
/// Permits live in a bounded channel holding `capacity` tokens. Acquiring a
/// permit is one channel receive, so the check and the claim are a single
/// atomic operation: under `K` concurrent callers against capacity `C`,
/// exactly `C` succeed. An `issued` counter tracks permits checked out since
/// the last refill; the background sweeper returns exactly that many tokens
/// to the pool every `refill_interval`, restoring it to full capacity.
///
/// # Thread safety
///
/// Safe for concurrent use; blocked [`take`](TokenBucket::take) callers are
/// served in the order they arrived at the permit channel.
///
/// # Shutdown
///
/// Call [`close`](TokenBucket::close) once callers are done; it stops the
/// refill sweeper deterministically and is idempotent. Dropping the bucket
/// closes it as well. After close, the pool drains without replenishment.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use equalizer::TokenBucket;
///
/// let bucket = TokenBucket::new(2, Duration::from_secs(1)).unwrap();
/// assert!(bucket.ask());
/// assert!(bucket.ask());
/// assert!(!bucket.ask()); // pool exhausted until the next refill
/// bucket.close();
/// ```
pub struct TokenBucket {
    pool: Arc<Pool>,
    sweeper: Sweeper,
}

struct Pool {
    permit_tx: Sender<Token>,
    permit_rx: Receiver<Token>,
    issued: AtomicU64,
}

impl Pool {
    /// Returns every permit checked out since the last refill to the pool.
    fn refill(&self) {
        let issued = self.issued.swap(0, Ordering::AcqRel);
        for _ in 0..issued {
            // The channel bound caps the pool at capacity; a full pool
            // (an ask raced the counter swap) simply drops the surplus.
            if self.permit_tx.try_send(Token).is_err() {
                break;
            }
        }
    }
}

impl TokenBucket {
    /// Creates a `TokenBucket` holding `capacity` permits, restored to full
    /// once per `refill_interval`.
    ///
    /// The pool starts full. Returns
    /// [`EqualizerError::InvalidConfiguration`] when `capacity` or
    /// `refill_interval` is zero.
    pub fn new(capacity: usize, refill_interval: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(EqualizerError::InvalidConfiguration(
                "Capacity must be greater than 0",
            ));
        }
        if refill_interval.is_zero() {
            return Err(EqualizerError::InvalidConfiguration(
                "Refill interval must be greater than 0",
            ));
        }

        let (permit_tx, permit_rx) = bounded(capacity);
        for _ in 0..capacity {
            let _ = permit_tx.try_send(Token);
        }

        let pool = Arc::new(Pool {
            permit_tx,
            permit_rx,
            issued: AtomicU64::new(0),
        });

        let sweeper = {
            let pool = Arc::clone(&pool);
            Sweeper::run(refill_interval, move || pool.refill())?
        };

        Ok(Self { pool, sweeper })
    } // end constructor

    /// Non-blocking admission check; `true` claims one permit.
    pub fn ask(&self) -> bool {
        if self.pool.permit_rx.try_recv().is_ok() {
            self.pool.issued.fetch_add(1, Ordering::AcqRel);
            return true;
        }
        false
    }

    /// Blocks until a permit is available, then claims it.
    pub fn take(&self) {
        if self.pool.permit_rx.recv().is_ok() {
            self.pool.issued.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Like [`take`](TokenBucket::take), but gives up after `timeout`.
    ///
    /// Returns `true` when a permit was claimed. A timed-out wait consumes
    /// nothing.
    pub fn take_timeout(&self, timeout: Duration) -> bool {
        if self.pool.permit_rx.recv_timeout(timeout).is_ok() {
            self.pool.issued.fetch_add(1, Ordering::AcqRel);
            return true;
        }
        false
    }

    /// Stops the background refill sweeper. Idempotent; later calls are
    /// no-ops.
    pub fn close(&self) {
        self.sweeper.stop();
    }
} // end of impl

impl Limiter for TokenBucket {
    fn ask(&self) -> bool {
        TokenBucket::ask(self)
    }

    fn take(&self) {
        TokenBucket::take(self)
    }
}

impl Drop for TokenBucket {
    fn drop(&mut self) {
        self.sweeper.stop();
    }
}

use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};
use parking_lot::Mutex;

use crate::{EqualizerError, Result};

/// Recurring background maintenance task tied to a limiter's lifetime.
///
/// Runs a callback once per interval on a dedicated thread until [`stop`]
/// is called. Executions never overlap: the callback runs inline on the
/// sweeper thread, and a callback that outlasts the interval skips ticks
/// rather than piling them up. A panicking tick is surfaced through the
/// `log` facade and does not terminate the schedule.
///
/// [`stop`]: Sweeper::stop
pub(crate) struct Sweeper {
    stop: Mutex<Option<Sender<()>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Sweeper {
    /// Spawns the sweeper thread and begins ticking.
    ///
    /// Returns [`EqualizerError::InvalidConfiguration`] when `interval` is zero.
    pub fn run<F>(interval: Duration, callback: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        if interval.is_zero() {
            return Err(EqualizerError::InvalidConfiguration(
                "Sweep interval must be greater than 0",
            ));
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticker = tick(interval);
        let handle = thread::spawn(move || {
            log::debug!("sweeper started, interval {interval:?}");
            loop {
                select! {
                    recv(ticker) -> _ => {
                        if panic::catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                            log::error!("sweeper tick panicked; schedule continues");
                        }
                    }
                    // Fires on the stop message and on sender disconnect alike.
                    recv(stop_rx) -> _ => break,
                }
            }
            log::debug!("sweeper stopped");
        });

        Ok(Self {
            stop: Mutex::new(Some(stop_tx)),
            handle: Mutex::new(Some(handle)),
        })
    } // end method run

    /// Stops the schedule and joins the sweeper thread.
    ///
    /// The underlying stop signal is delivered exactly once; every later
    /// call returns immediately without blocking.
    pub fn stop(&self) {
        let Some(stop_tx) = self.stop.lock().take() else {
            return;
        };
        // Dropping the sender disconnects the channel, which the select
        // loop observes as its stop signal.
        drop(stop_tx);
        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
    } // end method stop
}

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Ownership token for the repeating status poll.
///
/// Fires `on_tick` once immediately when armed, then once per `interval`
/// until canceled. Dropping the handle cancels it as well. A tick that is
/// already executing when the timer is canceled runs to completion; the
/// state machine treats its eventual answer as stale.
pub struct PollTimer {
    stop_tx: mpsc::Sender<()>,
}

impl PollTimer {
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();
        thread::spawn(move || {
            // Initial check before the first interval elapses.
            on_tick();
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(mpsc::RecvTimeoutError::Timeout) => on_tick(),
                    // Explicit cancel, or the handle was dropped.
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Self { stop_tx }
    }

    /// Disarms the timer; no further ticks are issued.
    pub fn cancel(self) {
        let _ = self.stop_tx.send(());
    }
}

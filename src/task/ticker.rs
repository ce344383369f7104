//! Periodic auto-advance.
//!
//! [`AutoAdvance`] moves a bar forward on a fixed interval from a background
//! thread, for work that cannot report its own progress. Stopping is
//! best-effort: a tick already in flight may still land after [`AutoAdvance::stop`].

use crate::progress::Probe;

use crossbeam_channel::{bounded, select, tick, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Handle on a running auto-advance thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct AutoAdvance {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<u64>>,
}

impl AutoAdvance {
    /// Advance the bar behind `probe` by `step` every `interval`.
    ///
    /// The thread also stops on its own once the bar is finished or exited, or
    /// when a tick would overflow a bar built with `error_on_overflow`.
    pub fn spawn(probe: Probe, interval: Duration, step: u64) -> Self {
        let (stop, stopped) = bounded::<()>(1);
        let ticker = tick(interval);

        let thread = thread::spawn(move || {
            let mut ticks = 0;
            loop {
                select! {
                    recv(stopped) -> _ => break,
                    recv(ticker) -> _ => {
                        if probe.is_finished() || probe.is_exited() {
                            break;
                        }
                        if let Err(err) = probe.advance(step) {
                            debug!(%err, "auto-advance halted");
                            break;
                        }
                        ticks += 1;
                    }
                }
            }
            debug!(ticks, "auto-advance stopped");
            ticks
        });

        Self {
            stop: Some(stop),
            thread: Some(thread),
        }
    }

    /// Signal the thread to stop and wait for it. Returns the number of ticks applied.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        // Dropping the sender disconnects the channel, which also wakes the thread.
        if let Some(stop) = self.stop.take() {
            let _ = stop.try_send(());
        }
        self.thread
            .take()
            .and_then(|thread| thread.join().ok())
            .unwrap_or(0)
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.shutdown();
    }
}

//! Periodic status polling on a dedicated thread.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};
use tracing::debug;

use crate::core::{RunObserver, RunSnapshot, SchedulerError};

/// Thread that hands a fresh snapshot to a callback at a fixed cadence.
///
/// The monitor ends by itself after delivering the first snapshot taken once
/// the run has stopped, or earlier when [`stop`](Self::stop) is called.
pub struct StatusMonitor {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<usize>>,
}

impl StatusMonitor {
    /// Start polling `observer` every `interval`.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Spawn` if the thread cannot be created.
    pub fn spawn<F>(
        observer: RunObserver,
        interval: Duration,
        mut on_frame: F,
    ) -> Result<Self, SchedulerError>
    where
        F: FnMut(&RunSnapshot) + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = bounded::<()>(0);
        let name = "dq-status".to_string();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let ticker = tick(interval);
                let mut frames = 0usize;
                loop {
                    let snapshot = observer.snapshot();
                    on_frame(&snapshot);
                    frames += 1;
                    if snapshot.stopped {
                        break;
                    }
                    select! {
                        recv(ticker) -> _ => {}
                        recv(cancel_rx) -> _ => {
                            debug!("status monitor cancelled");
                            break;
                        }
                    }
                }
                frames
            })
            .map_err(|source| SchedulerError::Spawn {
                thread: name,
                source,
            })?;

        Ok(Self {
            cancel: Some(cancel_tx),
            handle: Some(handle),
        })
    }

    /// Wait for the monitor to finish on its own; returns frames delivered.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::ThreadPanicked` if the callback panicked.
    pub fn join(mut self) -> Result<usize, SchedulerError> {
        self.join_inner()
    }

    /// Cancel polling and wait for the thread; returns frames delivered.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::ThreadPanicked` if the callback panicked.
    pub fn stop(mut self) -> Result<usize, SchedulerError> {
        // Dropping the sender disconnects the channel and wakes the select.
        self.cancel.take();
        self.join_inner()
    }

    fn join_inner(&mut self) -> Result<usize, SchedulerError> {
        self.handle.take().map_or(Ok(0), |handle| {
            handle
                .join()
                .map_err(|_| SchedulerError::ThreadPanicked("dq-status".into()))
        })
    }
}

impl Drop for StatusMonitor {
    fn drop(&mut self) {
        self.cancel.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

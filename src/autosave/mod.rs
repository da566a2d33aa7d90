//! Periodic unattended persistence of the buffer.
//!
//! A dedicated timer thread sends a tick over an mpsc channel every
//! `interval`; the event loop drains the channel and performs the actual
//! dirty-check and save on the thread that owns the buffer. The timer never
//! touches editor state, so a tick can never race an in-progress edit.
//! The thread runs for the lifetime of the process and is only torn down
//! at exit, when the receiving half is dropped.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Default autosave cadence: every 5 minutes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

/// Where the autosave loop currently is.
///
/// `Idle` waits for the next tick; `Saving` means a persist is in flight.
/// There is no terminal state while the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveState {
    Idle,
    Saving,
}

/// Owns the timer thread and the loop's state machine.
pub struct AutosaveTimer {
    rx: Receiver<()>,
    interval: Duration,
    state: AutosaveState,
    last_saved: Option<Instant>,
}

impl AutosaveTimer {
    /// Spawn the timer thread, ticking every `interval`.
    pub fn new(interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("autosave-timer".to_string())
            .spawn(move || {
                loop {
                    thread::sleep(interval);
                    // Receiver dropped means the process is exiting.
                    if tx.send(()).is_err() {
                        break;
                    }
                }
            })
            .expect("failed to spawn autosave timer thread");

        Self {
            rx,
            interval,
            state: AutosaveState::Idle,
            last_saved: None,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn state(&self) -> AutosaveState {
        self.state
    }

    /// When the last successful autosave finished, if any.
    pub const fn last_saved(&self) -> Option<Instant> {
        self.last_saved
    }

    /// Returns true once at least one tick has elapsed since the last drain.
    ///
    /// Multiple queued ticks collapse into one, so a stall never causes a
    /// burst of saves.
    pub fn take_tick_ready(&mut self) -> bool {
        let mut ticked = false;
        loop {
            match self.rx.try_recv() {
                Ok(()) => ticked = true,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        ticked
    }

    /// Transition `Idle -> Saving` when a tick found the buffer dirty.
    pub const fn begin_save(&mut self) {
        self.state = AutosaveState::Saving;
    }

    /// Transition `Saving -> Idle`; records the save time on success.
    pub fn finish_save(&mut self, success: bool) {
        self.state = AutosaveState::Idle;
        if success {
            self.last_saved = Some(Instant::now());
        }
    }
}

impl std::fmt::Debug for AutosaveTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutosaveTimer")
            .field("interval", &self.interval)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

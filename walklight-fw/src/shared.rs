/*
 * The one place the tasks meet: the shared (mode, phase, phase-start) triple.
 *
 * The cycle task and the button task both write it; the cue task and the
 * renderers only read it. Readers take whole-struct snapshots and writers
 * read-modify-write under the mutex, so a snapshot is always internally
 * consistent and a phase advance can never silently undo a concurrent mode
 * toggle.
 */

use core::cell::Cell;

use embassy_sync::blocking_mutex::{Mutex, raw::ThreadModeRawMutex};
use embassy_time::Instant;
use walklight_core::SignalState;

pub struct SharedSignal {
    inner: Mutex<ThreadModeRawMutex, Cell<SignalState>>,
}

impl SharedSignal {
    pub const fn new() -> Self {
        SharedSignal {
            inner: Mutex::new(Cell::new(SignalState::startup())),
        }
    }

    pub fn snapshot(&self) -> SignalState {
        self.inner.lock(|state| state.get())
    }

    /// Replace the triple with `f(current)`, atomically with respect to
    /// every other reader and writer. Returns the new value.
    pub fn update(&self, f: impl FnOnce(SignalState) -> SignalState) -> SignalState {
        self.inner.lock(|state| {
            let next = f(state.get());
            state.set(next);
            next
        })
    }
}

pub static SIGNAL: SharedSignal = SharedSignal::new();

/// The monotonic clock every task measures phase time against.
pub fn now_ms() -> u64 {
    Instant::now().as_millis()
}

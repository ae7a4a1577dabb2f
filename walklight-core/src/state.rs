/*
 * The shared state triple: operating mode, signal phase and the monotonic
 * millisecond timestamp at which that phase began.
 *
 * The triple is a small `Copy` value that is only ever replaced as a whole.
 * Readers that take a snapshot can never observe a phase paired with the
 * start time of a different phase.
 */

use crate::phase::{OperatingMode, SignalPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalState {
    pub mode: OperatingMode,
    pub phase: SignalPhase,
    /// When the current phase began, in monotonic milliseconds.
    pub since_ms: u64,
}

impl SignalState {
    /// The state every power-up begins in.
    pub const fn startup() -> Self {
        SignalState {
            mode: OperatingMode::Normal,
            phase: SignalPhase::Green,
            since_ms: 0,
        }
    }

    /// The state after a normal-mode phase transition at `now_ms`.
    pub fn advanced(self, now_ms: u64) -> Self {
        SignalState {
            phase: self.phase.next(),
            since_ms: now_ms,
            ..self
        }
    }

    /// The state after a recognised mode button press at `now_ms`: the other
    /// mode, in its canonical entry phase, with a fresh phase start time.
    pub fn mode_toggled(self, now_ms: u64) -> Self {
        let mode = self.mode.toggled();
        SignalState {
            mode,
            phase: mode.entry_phase(),
            since_ms: now_ms,
        }
    }

    /// Time spent in the current phase.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.since_ms)
    }
}

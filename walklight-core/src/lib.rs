#![cfg_attr(not(test), no_std)]

/*
 * The hardware-independent half of the walklight: the signal cycle state
 * machine, the shared state value that every task samples, the phase-relative
 * audio cue scheduler and the mode button debouncer.
 *
 * Everything in this crate is pure and time-injected. Callers pass the
 * current monotonic time in milliseconds, so the firmware can feed it from
 * `embassy_time::Instant` while the unit tests feed it from a plain counter.
 */

pub mod cue;
pub mod debounce;
pub mod phase;
pub mod state;

pub use cue::{CueCursor, PulseTrain, pulse_train};
pub use debounce::ModeButton;
pub use phase::{OperatingMode, SignalPhase};
pub use state::SignalState;

/*
 * The accessibility audio cue scheduler.
 *
 * Each mode/phase combination has its own train of buzzer pulses, timed
 * relative to the moment the phase began rather than to process start. The
 * sequencer task polls far more often than the cycle controller changes
 * phase, which is what lets sub-phase patterns (four quick pips inside a two
 * second yellow) live here instead of in the cycle controller.
 */

use crate::phase::{OperatingMode, SignalPhase};
use crate::state::SignalState;

/// How often the cue sequencer samples the shared state and services its
/// cursor.
pub const CUE_POLL_MS: u64 = 10;

/// A train of buzzer pulses for one mode/phase combination. Pulse `k`
/// triggers at `first_at_ms + pitch_ms * k` after the phase began and lasts
/// `length_ms`. A train with `count == None` repeats for as long as the
/// phase holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTrain {
    pub first_at_ms: u64,
    pub pitch_ms: u64,
    pub length_ms: u64,
    pub count: Option<u8>,
}

impl PulseTrain {
    /// The phase-relative trigger time of pulse `index`, or `None` once the
    /// train is exhausted.
    pub fn trigger_at(&self, index: u32) -> Option<u64> {
        match self.count {
            Some(count) if index >= u32::from(count) => None,
            _ => Some(self.first_at_ms + self.pitch_ms * u64::from(index)),
        }
    }
}

/// The cue table. Night mode beeps every two seconds regardless of the
/// visual flash; the normal-mode phases each get a distinct, countable
/// pattern so the signal can be followed by ear.
pub fn pulse_train(mode: OperatingMode, phase: SignalPhase) -> PulseTrain {
    match (mode, phase) {
        (OperatingMode::Night, _) => PulseTrain {
            first_at_ms: 0,
            pitch_ms: 2_000,
            length_ms: 200,
            count: None,
        },
        (OperatingMode::Normal, SignalPhase::Green) => PulseTrain {
            first_at_ms: 2_500,
            pitch_ms: 0,
            length_ms: 200,
            count: Some(1),
        },
        (OperatingMode::Normal, SignalPhase::Yellow) => PulseTrain {
            first_at_ms: 0,
            pitch_ms: 200,
            length_ms: 100,
            count: Some(4),
        },
        (OperatingMode::Normal, SignalPhase::Red) => PulseTrain {
            first_at_ms: 2_000,
            pitch_ms: 2_000,
            length_ms: 200,
            count: Some(2),
        },
    }
}

/// The sequencer task's private cursor into the current pulse train.
///
/// The cursor detects phase changes by comparing against the last phase it
/// saw and restarts the train when one happens. A mode change that keeps the
/// phase (yellow to flashing yellow) keeps the cursor position as well.
#[derive(Debug, Clone, Copy)]
pub struct CueCursor {
    last_phase: SignalPhase,
    pulse_index: u32,
    pulse_on: bool,
    pulse_started_ms: u64,
}

impl CueCursor {
    pub const fn new() -> Self {
        CueCursor {
            last_phase: SignalPhase::Green,
            pulse_index: 0,
            pulse_on: false,
            pulse_started_ms: 0,
        }
    }

    /// Advance the cursor one poll tick. Returns the buzzer level to drive.
    pub fn service(&mut self, state: &SignalState, now_ms: u64) -> bool {
        if state.phase != self.last_phase {
            self.last_phase = state.phase;
            self.pulse_index = 0;
            self.pulse_on = false;
        }

        let train = pulse_train(state.mode, state.phase);
        if self.pulse_on {
            if now_ms.saturating_sub(self.pulse_started_ms) >= train.length_ms {
                self.pulse_on = false;
                self.pulse_index += 1;
            }
        } else if let Some(trigger_at) = train.trigger_at(self.pulse_index) {
            if state.elapsed_ms(now_ms) >= trigger_at {
                self.pulse_on = true;
                self.pulse_started_ms = now_ms;
            }
        }

        self.pulse_on
    }
}

impl Default for CueCursor {
    fn default() -> Self {
        CueCursor::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Poll the cursor every `CUE_POLL_MS` over `[from, until)` and collect
    /// the buzzer edges as `(time, level)` pairs.
    fn edges(
        cursor: &mut CueCursor,
        state: &SignalState,
        from: u64,
        until: u64,
    ) -> Vec<(u64, bool)> {
        let mut edges = vec![];
        let mut level = false;
        let mut now = from;
        while now < until {
            let on = cursor.service(state, now);
            if on != level {
                edges.push((now, on));
                level = on;
            }
            now += CUE_POLL_MS;
        }
        edges
    }

    fn state(mode: OperatingMode, phase: SignalPhase, since_ms: u64) -> SignalState {
        SignalState {
            mode,
            phase,
            since_ms,
        }
    }

    #[test]
    fn green_beeps_once_midway() {
        let state = state(OperatingMode::Normal, SignalPhase::Green, 0);
        let mut cursor = CueCursor::new();
        assert_eq!(
            edges(&mut cursor, &state, 0, 5_000),
            vec![(2_500, true), (2_700, false)]
        );
    }

    #[test]
    fn yellow_pips_four_times() {
        let state = state(OperatingMode::Normal, SignalPhase::Yellow, 0);
        let mut cursor = CueCursor::new();
        assert_eq!(
            edges(&mut cursor, &state, 0, 2_000),
            vec![
                (0, true),
                (100, false),
                (200, true),
                (300, false),
                (400, true),
                (500, false),
                (600, true),
                (700, false),
            ]
        );
    }

    #[test]
    fn red_beeps_twice() {
        let state = state(OperatingMode::Normal, SignalPhase::Red, 0);
        let mut cursor = CueCursor::new();
        // The cursor starts out on green, so the red phase is seen as a
        // phase change and the train restarts.
        assert_eq!(
            edges(&mut cursor, &state, 0, 5_000),
            vec![
                (2_000, true),
                (2_200, false),
                (4_000, true),
                (4_200, false),
            ]
        );
    }

    #[test]
    fn night_beeps_every_two_seconds_unbounded() {
        let state = state(OperatingMode::Night, SignalPhase::Yellow, 0);
        let mut cursor = CueCursor::new();
        assert_eq!(
            edges(&mut cursor, &state, 0, 6_100),
            vec![
                (0, true),
                (200, false),
                (2_000, true),
                (2_200, false),
                (4_000, true),
                (4_200, false),
                (6_000, true),
            ]
        );
    }

    #[test]
    fn night_train_is_phase_relative() {
        // Mode entered at t=7340; the first beep fires on the first poll at
        // or after entry, the second one two seconds after entry.
        let state = state(OperatingMode::Night, SignalPhase::Yellow, 7_340);
        let mut cursor = CueCursor::new();
        assert_eq!(
            edges(&mut cursor, &state, 7_340, 9_600),
            vec![(7_340, true), (7_540, false), (9_340, true), (9_540, false)]
        );
    }

    #[test]
    fn phase_change_mid_pulse_restarts_the_train() {
        let yellow = state(OperatingMode::Normal, SignalPhase::Yellow, 0);
        let mut cursor = CueCursor::new();
        // Run into the middle of the second pip.
        let mut now = 0;
        let mut level = false;
        while now <= 250 {
            level = cursor.service(&yellow, now);
            now += CUE_POLL_MS;
        }
        assert!(level);

        // Phase flips to red mid-pulse: the buzzer drops immediately and the
        // red train plays in full, relative to the new phase start.
        let red = state(OperatingMode::Normal, SignalPhase::Red, 260);
        assert!(!cursor.service(&red, 260));
        assert_eq!(
            edges(&mut cursor, &red, 270, 5_260),
            vec![
                (2_260, true),
                (2_460, false),
                (4_260, true),
                (4_460, false),
            ]
        );
    }

    #[test]
    fn mode_change_on_same_phase_keeps_the_cursor() {
        // Normal yellow runs its four pips to completion, then the mode
        // flips to night while the phase stays yellow. The cursor keeps its
        // index, so the first night beep fires at 2000 * 4 after the origin
        // reset rather than immediately.
        let yellow = state(OperatingMode::Normal, SignalPhase::Yellow, 0);
        let mut cursor = CueCursor::new();
        edges(&mut cursor, &yellow, 0, 1_000);

        let night = state(OperatingMode::Night, SignalPhase::Yellow, 1_000);
        assert_eq!(
            edges(&mut cursor, &night, 1_000, 9_300),
            vec![(9_000, true), (9_200, false)]
        );
    }

    #[test]
    fn exhausted_trains_stay_silent() {
        let state = state(OperatingMode::Normal, SignalPhase::Green, 0);
        let mut cursor = CueCursor::new();
        edges(&mut cursor, &state, 0, 5_000);
        // Long after the single green beep, nothing more fires.
        assert!(!cursor.service(&state, 60_000));
        assert!(!cursor.service(&state, 60_010));
    }
}

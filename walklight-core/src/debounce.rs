/*
 * Mode button debouncing.
 *
 * The button is a noisy mechanical input, polled on a fixed period. A press
 * counts only on the rising edge of "pressed" relative to the previous poll,
 * and holding the button must not retrigger. The time-based half of the
 * policy lives with the polling task: after a recognised press it stays off
 * the button for `QUIET_MS` before polling again, which swallows the bounce
 * burst around the edge.
 */

/// How often the button is sampled.
pub const BUTTON_POLL_MS: u64 = 10;

/// How long to ignore the button after a recognised press.
pub const QUIET_MS: u64 = 200;

/// Tracks whether the button was already down on the previous poll.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeButton {
    was_pressed: bool,
}

impl ModeButton {
    pub const fn new() -> Self {
        ModeButton { was_pressed: false }
    }

    /// Feed one poll sample. Returns true exactly once per press, on the
    /// not-pressed to pressed edge.
    pub fn update(&mut self, pressed: bool) -> bool {
        let recognised = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        recognised
    }
}

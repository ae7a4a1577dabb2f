/*
 * The audio cue sequencer task.
 *
 * Samples the shared triple on a fine 10ms period and drives the buzzer pin
 * from the cue cursor. All scheduling decisions live in walklight-core; this
 * task is just the clock and the pin.
 */

use embassy_stm32::gpio::{Level, Output};
use embassy_time::{Duration, Ticker};
use walklight_core::{CueCursor, cue::CUE_POLL_MS};

use crate::shared::{SIGNAL, now_ms};

#[embassy_executor::task]
pub async fn cue_task(mut buzzer: Output<'static>) -> ! {
    let mut cursor = CueCursor::new();
    let mut ticker = Ticker::every(Duration::from_millis(CUE_POLL_MS));
    loop {
        let state = SIGNAL.snapshot();
        let on = cursor.service(&state, now_ms());
        buzzer.set_level(if on { Level::High } else { Level::Low });
        ticker.next().await;
    }
}

/*
 * The two physical inputs.
 *
 * The mode button is polled and debounced; a recognised press flips the
 * operating mode and resets the shared triple to the new mode's entry phase.
 * The update button is interrupt-driven and entirely outside the signal
 * logic: its first edge reboots the board into firmware-update land.
 */

use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Input;
use embassy_time::{Duration, Ticker, Timer};
use walklight_core::{
    ModeButton,
    debounce::{BUTTON_POLL_MS, QUIET_MS},
};

use crate::shared::{SIGNAL, now_ms};

#[embassy_executor::task]
pub async fn mode_button_task(button: Input<'static>) -> ! {
    let mut debounce = ModeButton::new();
    // A fixed-period ticker rather than repeated sleeps, so poll times do
    // not drift as iterations take time of their own.
    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_POLL_MS));
    loop {
        // The button is active-low behind a pull-up.
        if debounce.update(button.is_low()) {
            let state = SIGNAL.update(|current| current.mode_toggled(now_ms()));
            defmt::info!("mode -> {}, entering {}", state.mode, state.phase);
            // Stay off the button while it bounces.
            Timer::after_millis(QUIET_MS).await;
        }
        ticker.next().await;
    }
}

#[embassy_executor::task]
pub async fn update_button_task(mut button: ExtiInput<'static>) -> ! {
    button.wait_for_falling_edge().await;
    defmt::info!("entering firmware update mode");
    cortex_m::peripheral::SCB::sys_reset();
}

/*
 * The signal cycle controller.
 *
 * Owns the authoritative state machine. In normal mode it walks the green ->
 * yellow -> red cycle on fixed dwell timers; in night mode it flashes the
 * yellow lamp. All it publishes is the shared triple and render frames; the
 * cue sequencer and the I/O task pick those up on their own schedules.
 */

use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Sender};
use embassy_time::Timer;
use walklight_core::{OperatingMode, phase::NIGHT_FLASH_HALF_MS};

use crate::io::{CHANNEL_CAPACITY, LightFrame};
use crate::shared::{SIGNAL, now_ms};

#[embassy_executor::task]
pub async fn cycle_task(
    frames: Sender<'static, ThreadModeRawMutex, LightFrame, CHANNEL_CAPACITY>,
) -> ! {
    loop {
        let state = SIGNAL.snapshot();
        match state.mode {
            OperatingMode::Night => {
                // Flash around a fixed yellow phase. The phase start time is
                // deliberately left alone here: the audio cue free-runs from
                // mode entry, independent of the visual flash.
                frames
                    .send(LightFrame {
                        mode: state.mode,
                        phase: state.phase,
                        lit: true,
                    })
                    .await;
                Timer::after_millis(NIGHT_FLASH_HALF_MS).await;

                frames
                    .send(LightFrame {
                        mode: state.mode,
                        phase: state.phase,
                        lit: false,
                    })
                    .await;
                Timer::after_millis(NIGHT_FLASH_HALF_MS).await;
            }
            OperatingMode::Normal => {
                frames
                    .send(LightFrame {
                        mode: state.mode,
                        phase: state.phase,
                        lit: true,
                    })
                    .await;
                Timer::after_millis(state.phase.dwell_ms()).await;

                // Advance only if the triple is still the one this iteration
                // rendered; a mode toggle during the dwell wins and the next
                // iteration starts over from the fresh state.
                let mut advanced = false;
                let next = SIGNAL.update(|current| {
                    if current == state {
                        advanced = true;
                        current.advanced(now_ms())
                    } else {
                        current
                    }
                });
                if advanced {
                    defmt::info!("phase -> {} at {}ms", next.phase, next.since_ms);
                }
            }
        }
    }
}

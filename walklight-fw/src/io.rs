/*
 * The I/O task for the walklight.
 *
 * This task owns the lamp output pins and the status panel UART, so that the
 * control tasks stay free of device specifics. The cycle task describes what
 * the signal should look like with `LightFrame` messages on a channel; the
 * heartbeat task feeds the on-board LED the same way. Whatever actually
 * renders the signal (discrete lamps here, an LED matrix elsewhere) sits
 * behind this one channel.
 */

use embassy_futures::select::{Either, select};
use embassy_stm32::gpio::{Level, Output};
use embassy_stm32::mode::Async;
use embassy_stm32::usart::Uart;
use embassy_sync::{
    blocking_mutex::raw::ThreadModeRawMutex,
    channel::{Receiver, Sender},
};
use embassy_time::{Duration, Ticker};
use enum_ordinalize::Ordinalize;
use walklight_core::{OperatingMode, SignalPhase};

pub const CHANNEL_CAPACITY: usize = 4;

/// One rendered state of the signal. `lit` is false for the dark half of the
/// night-mode flash: the signal structure stays, the active lamp goes out.
#[derive(Copy, Clone)]
pub struct LightFrame {
    pub mode: OperatingMode,
    pub phase: SignalPhase,
    pub lit: bool,
}

#[derive(Ordinalize, Clone, Copy)]
#[repr(usize)]
pub enum Lamp {
    Red,
    Amber,
    Green,
    // The on-board LED doubles as the scheduler heartbeat. It is active-low.
    Heartbeat,
}

#[embassy_executor::task]
pub async fn io_task(
    frames: Receiver<'static, ThreadModeRawMutex, LightFrame, CHANNEL_CAPACITY>,
    heartbeat: Receiver<'static, ThreadModeRawMutex, bool, CHANNEL_CAPACITY>,
    mut lamps: [Output<'static>; Lamp::VARIANT_COUNT],
    mut panel: Uart<'static, Async>,
) -> ! {
    loop {
        match select(frames.receive(), heartbeat.receive()).await {
            Either::First(frame) => {
                light_lamps(&mut lamps, &frame);
                // The panel is a fire-and-forget collaborator.
                let _ = panel.write(panel_line(&frame)).await;
            }
            Either::Second(on) => lamps[Lamp::Heartbeat.ordinal()].set_level(if on {
                Level::Low
            } else {
                Level::High
            }),
        }
    }
}

fn light_lamps(lamps: &mut [Output<'static>; Lamp::VARIANT_COUNT], frame: &LightFrame) {
    let lit = |lamp: Lamp| {
        frame.lit
            && match (lamp, frame.phase) {
                (Lamp::Red, SignalPhase::Red) => true,
                (Lamp::Amber, SignalPhase::Yellow) => true,
                (Lamp::Green, SignalPhase::Green) => true,
                _ => false,
            }
    };

    for lamp in [Lamp::Red, Lamp::Amber, Lamp::Green] {
        let level = if lit(lamp) { Level::High } else { Level::Low };
        lamps[lamp.ordinal()].set_level(level);
    }
}

fn panel_line(frame: &LightFrame) -> &'static [u8] {
    match (frame.mode, frame.phase) {
        (OperatingMode::Night, _) => b"night: amber flashing\r\n",
        (OperatingMode::Normal, SignalPhase::Green) => b"normal: green - cross now\r\n",
        (OperatingMode::Normal, SignalPhase::Yellow) => b"normal: amber - attention\r\n",
        (OperatingMode::Normal, SignalPhase::Red) => b"normal: red - stop\r\n",
    }
}

/// A scheduling placeholder more than anything else: blinks the on-board LED
/// so that a stalled executor is visible at a glance.
#[embassy_executor::task]
pub async fn heartbeat_task(
    heartbeat: Sender<'static, ThreadModeRawMutex, bool, CHANNEL_CAPACITY>,
) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(500));
    let mut on = false;
    loop {
        on = !on;
        heartbeat.send(on).await;
        ticker.next().await;
    }
}

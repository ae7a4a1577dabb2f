#![no_std]
#![no_main]

/*
 * Firmware entry point: brings up the pins and the status UART, then hands
 * everything to the tasks. The tasks never talk to each other directly; they
 * share the signal triple in `shared` and the render channel in `io`.
 */

use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32::exti::{Channel as ExtiChannel, ExtiInput};
use embassy_stm32::gpio::{Input, Level, Output, Pin, Pull, Speed};
use embassy_stm32::usart::{Config, Uart};
use embassy_stm32::{bind_interrupts, peripherals, usart};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use enum_ordinalize::Ordinalize;
use panic_probe as _;

mod audio;
mod button;
mod cycle;
mod io;
mod shared;

use io::{CHANNEL_CAPACITY, Lamp, LightFrame};

static FRAMES: Channel<ThreadModeRawMutex, LightFrame, CHANNEL_CAPACITY> = Channel::new();
static HEARTBEAT: Channel<ThreadModeRawMutex, bool, CHANNEL_CAPACITY> = Channel::new();

bind_interrupts!(struct Irqs {
    USART1 => usart::InterruptHandler<peripherals::USART1>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let peripherals = embassy_stm32::init(Default::default());
    defmt::info!("walklight starting");

    let panel = Uart::new(
        peripherals.USART1,
        peripherals.PA10,
        peripherals.PA9,
        Irqs,
        peripherals.DMA1_CH4,
        peripherals.DMA1_CH5,
        Config::default(), // 115200 baud
    )
    .unwrap();

    let lamps: [Output; Lamp::VARIANT_COUNT] = [
        Output::new(peripherals.PB10.degrade(), Level::Low, Speed::Low),
        Output::new(peripherals.PB12.degrade(), Level::Low, Speed::Low),
        Output::new(peripherals.PB14.degrade(), Level::Low, Speed::Low),
        // On-board LED, active-low, so start it off.
        Output::new(peripherals.PE12.degrade(), Level::High, Speed::Low),
    ];
    let buzzer = Output::new(peripherals.PB9.degrade(), Level::Low, Speed::Low);

    let mode_button = Input::new(peripherals.PE11.degrade(), Pull::Up);
    let update_button = ExtiInput::new(
        peripherals.PE10.degrade(),
        peripherals.EXTI10.degrade(),
        Pull::Up,
    );

    spawner.must_spawn(io::io_task(
        FRAMES.receiver(),
        HEARTBEAT.receiver(),
        lamps,
        panel,
    ));
    spawner.must_spawn(cycle::cycle_task(FRAMES.sender()));
    spawner.must_spawn(audio::cue_task(buzzer));
    spawner.must_spawn(button::mode_button_task(mode_button));
    spawner.must_spawn(button::update_button_task(update_button));
    spawner.must_spawn(io::heartbeat_task(HEARTBEAT.sender()));
}

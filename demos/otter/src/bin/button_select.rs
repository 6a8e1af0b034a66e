#![no_main]
#![no_std]

use hal::app::{Config, LedShift, Mode};
use hal::button::Buttons;
use hal::delay::BusyDelay;
use hal::led::Leds;
use {defmt_rtt as _, led_shift as hal, panic_halt as _};

#[hal::entry]
fn main() -> ! {
    let p = hal::init();

    defmt::info!("Board init!");

    let leds = Leds::new(p.LEDS);
    let mut buttons = Buttons::new(p.BUTTONS);
    defmt::info!("buttons at start: {:04b}", buttons.read_btn());

    // hold any button to blink, release for the Johnson chase
    let config = Config {
        mode: Mode::ButtonSelect,
        ..Default::default()
    };

    LedShift::new(leds, buttons, BusyDelay::default(), config).run()
}

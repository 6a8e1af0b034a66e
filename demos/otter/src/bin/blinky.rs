#![no_main]
#![no_std]

use hal::app::{Config, LedShift};
use hal::button::Buttons;
use hal::delay::BusyDelay;
use hal::led::Leds;
use {defmt_rtt as _, led_shift as hal, panic_halt as _};

#[hal::entry]
fn main() -> ! {
    let p = hal::init();

    let config = Config::default();
    defmt::info!("Board init! {}", config);

    let leds = Leds::new(p.LEDS);
    let buttons = Buttons::new(p.BUTTONS);

    LedShift::new(leds, buttons, BusyDelay::default(), config).run()
}

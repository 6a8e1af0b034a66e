#![cfg_attr(not(test), no_std)]

//! Blink and Johnson chase patterns for a memory-mapped LED bank, with an
//! optional push-button selected mode.

pub use embassy_hal_internal::{into_ref, Peripheral, PeripheralRef};

pub mod app;
pub mod button;
pub mod delay;
pub mod led;
pub mod pattern;
pub mod regs;

mod internal;

#[cfg(all(feature = "rt", target_arch = "riscv32"))]
pub use riscv_rt::entry;

embassy_hal_internal::peripherals! {
    LEDS,
    BUTTONS,
}

/// Hand out the peripheral singletons.
///
/// Panics if called more than once.
pub fn init() -> Peripherals {
    #[cfg(feature = "defmt")]
    defmt::info!("LEDs at {:#x}, buttons at {:#x}", regs::LED_ADDR, regs::BTN_ADDR);

    Peripherals::take()
}

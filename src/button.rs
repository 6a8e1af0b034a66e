//! Push-button input driver
//!
//! Only the low [`BUTTON_COUNT`] bits of the input register are wired; a set
//! bit means the button is held down. The register is sampled on every call,
//! never cached.

use core::convert::Infallible;
use core::marker::PhantomData;

use embassy_hal_internal::Peripheral;
use static_assertions::const_assert_eq;

use crate::internal::BitIter;
use crate::peripherals;
use crate::regs::{self, Reg, WordIn, R};

pub const BUTTON_COUNT: u8 = 4;
pub const BUTTON_MASK: u32 = 0xF;

const_assert_eq!(BUTTON_MASK, (1 << BUTTON_COUNT) - 1);

/// Button bank driver.
pub struct Buttons<'d, P: WordIn = Reg<u32, R>> {
    port: P,
    _peri: PhantomData<&'d mut peripherals::BUTTONS>,
}

impl<'d> Buttons<'d> {
    pub fn new(_buttons: impl Peripheral<P = peripherals::BUTTONS> + 'd) -> Self {
        Self::with_port(regs::BTN)
    }
}

impl<'d, P: WordIn> Buttons<'d, P> {
    pub fn with_port(port: P) -> Self {
        Self {
            port,
            _peri: PhantomData,
        }
    }

    /// Sample the buttons. Bit `i` of the result is button `i`.
    #[inline]
    pub fn read_btn(&mut self) -> u8 {
        (self.port.read_word() & BUTTON_MASK) as u8
    }

    #[inline]
    pub fn any_pressed(&mut self) -> bool {
        self.read_btn() != 0
    }

    /// Panics if `index` is not below [`BUTTON_COUNT`].
    #[inline]
    pub fn is_pressed(&mut self, index: u8) -> bool {
        assert!(index < BUTTON_COUNT, "button index out of range");
        self.read_btn() & (1 << index) != 0
    }

    /// Indices of the buttons held down, from a single sample.
    pub fn pressed(&mut self) -> impl Iterator<Item = u8> {
        BitIter(self.read_btn() as u32).map(|b| b as u8)
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Borrow a single button as an input pin, high while pressed.
    pub fn button(&mut self, index: u8) -> Button<'_, 'd, P> {
        assert!(index < BUTTON_COUNT, "button index out of range");
        Button { buttons: self, index }
    }
}

/// One button of a [`Buttons`] bank.
pub struct Button<'a, 'd, P: WordIn> {
    buttons: &'a mut Buttons<'d, P>,
    index: u8,
}

impl<'a, 'd, P: WordIn> Button<'a, 'd, P> {
    #[inline]
    pub fn is_pressed(&mut self) -> bool {
        self.buttons.is_pressed(self.index)
    }
}

impl<'a, 'd, P: WordIn> embedded_hal::digital::ErrorType for Button<'a, 'd, P> {
    type Error = Infallible;
}

impl<'a, 'd, P: WordIn> embedded_hal::digital::InputPin for Button<'a, 'd, P> {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_pressed())
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_pressed())
    }
}

//! LED bank driver
//!
//! The LED register is write-only, so the driver keeps a shadow copy of the
//! last pattern it stored. Single-LED handles edit that shadow and push the
//! whole word back out.

use core::convert::Infallible;
use core::marker::PhantomData;

use embassy_hal_internal::Peripheral;

use crate::peripherals;
use crate::regs::{self, Reg, WordOut, W};

/// Number of LEDs wired to the output register.
pub const LED_COUNT: u8 = 16;

/// LED bank driver.
pub struct Leds<'d, P: WordOut = Reg<u32, W>> {
    port: P,
    pattern: u32,
    _peri: PhantomData<&'d mut peripherals::LEDS>,
}

impl<'d> Leds<'d> {
    /// Drive the memory-mapped LED register.
    ///
    /// Nothing is written until the first [`write_led`](Self::write_led).
    pub fn new(_leds: impl Peripheral<P = peripherals::LEDS> + 'd) -> Self {
        Self::with_port(regs::LED)
    }
}

impl<'d, P: WordOut> Leds<'d, P> {
    /// Drive any word sink, e.g. an in-memory register.
    pub fn with_port(port: P) -> Self {
        Self {
            port,
            pattern: 0,
            _peri: PhantomData,
        }
    }

    /// Store `pattern` to the LED register.
    #[inline]
    pub fn write_led(&mut self, pattern: u32) {
        self.pattern = pattern;
        self.port.write_word(pattern);
    }

    /// Last pattern stored by this driver.
    #[inline]
    pub fn pattern(&self) -> u32 {
        self.pattern
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Borrow a single LED as an output pin.
    ///
    /// Panics if `index` is not below [`LED_COUNT`].
    pub fn led(&mut self, index: u8) -> Led<'_, 'd, P> {
        assert!(index < LED_COUNT, "LED index out of range");
        Led {
            leds: self,
            mask: 1 << index,
        }
    }
}

/// One LED of a [`Leds`] bank.
pub struct Led<'a, 'd, P: WordOut> {
    leds: &'a mut Leds<'d, P>,
    mask: u32,
}

impl<'a, 'd, P: WordOut> Led<'a, 'd, P> {
    /// Light the LED.
    #[inline]
    pub fn set_high(&mut self) {
        let pattern = self.leds.pattern | self.mask;
        self.leds.write_led(pattern);
    }

    /// Turn the LED off.
    #[inline]
    pub fn set_low(&mut self) {
        let pattern = self.leds.pattern & !self.mask;
        self.leds.write_led(pattern);
    }

    #[inline]
    pub fn toggle(&mut self) {
        let pattern = self.leds.pattern ^ self.mask;
        self.leds.write_led(pattern);
    }

    #[inline]
    pub fn is_set_high(&self) -> bool {
        self.leds.pattern & self.mask != 0
    }

    #[inline]
    pub fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

// ====================
// Implement embedded-hal traits

impl<'a, 'd, P: WordOut> embedded_hal::digital::ErrorType for Led<'a, 'd, P> {
    type Error = Infallible;
}

impl<'a, 'd, P: WordOut> embedded_hal::digital::OutputPin for Led<'a, 'd, P> {
    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(self.set_high())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(self.set_low())
    }
}

impl<'a, 'd, P: WordOut> embedded_hal::digital::StatefulOutputPin for Led<'a, 'd, P> {
    #[inline]
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok((*self).is_set_high())
    }

    /// Is the LED off?
    #[inline]
    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok((*self).is_set_low())
    }

    #[inline]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        Ok(Led::toggle(self))
    }
}

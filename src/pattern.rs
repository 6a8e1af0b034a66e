//! LED pattern generators.
//!
//! The pattern math is kept pure ([`toggle`], [`Johnson`]); the `*_led`
//! routines push each pattern to the LED bank and pace it with a delay.

use static_assertions::const_assert;

use crate::delay::TickDelay;
use crate::led::{Leds, LED_COUNT};
use crate::regs::WordOut;

/// LED state right after start-up: only LED 0 lit.
pub const INITIAL_PATTERN: u32 = 0x0001;

/// Number of bits the Johnson sequence walks through.
pub const JOHNSON_WIDTH: u32 = LED_COUNT as u32;
const JOHNSON_TOP_BIT: u32 = 1 << (JOHNSON_WIDTH - 1);

const_assert!(JOHNSON_WIDTH > 0 && JOHNSON_WIDTH <= 32);

/// Flip LED 0.
#[inline]
pub const fn toggle(state: u32) -> u32 {
    state ^ 1
}

/// Flip LED 0 of `state`, show it and wait `ticks`.
pub fn toggle_led<P: WordOut, D: TickDelay>(state: &mut u32, leds: &mut Leds<'_, P>, delay: &mut D, ticks: u32) {
    *state = toggle(*state);
    leds.write_led(*state);
    delay.delay_ticks(ticks);
}

/// Fill/drain light sequence.
///
/// Starting from `0x0001`, the fill phase shifts right and injects a 1 into
/// the top bit on every step, so the bank lights up from the top down. The
/// drain phase keeps shifting without injecting until the bank is dark.
/// Yields the `2 * JOHNSON_WIDTH` patterns in the order they are shown; the
/// trailing all-off write is not part of the sequence.
#[derive(Debug, Clone)]
pub struct Johnson {
    led: u32,
    step: u32,
}

impl Johnson {
    pub const fn new() -> Self {
        Self {
            led: INITIAL_PATTERN,
            step: 0,
        }
    }

    /// Pattern left over once every step has been shown.
    pub const fn residue(&self) -> u32 {
        self.led
    }
}

impl Default for Johnson {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Johnson {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.step >= 2 * JOHNSON_WIDTH {
            return None;
        }

        let shown = self.led;
        self.led >>= 1;
        if self.step < JOHNSON_WIDTH {
            self.led |= JOHNSON_TOP_BIT;
        }
        self.step += 1;

        Some(shown)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (2 * JOHNSON_WIDTH - self.step) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Johnson {}

impl core::iter::FusedIterator for Johnson {}

/// Play the [`Johnson`] sequence on the LED bank, then switch every LED off.
pub fn johnson_led<P: WordOut, D: TickDelay>(leds: &mut Leds<'_, P>, delay: &mut D, ticks: u32) {
    for pattern in Johnson::new() {
        leds.write_led(pattern);
        delay.delay_ticks(ticks);
    }

    leds.write_led(0x0000);
}

//! Busy-wait pacing.
//!
//! There is no timer on the target core, so all visible timing comes from
//! spinning on a counter. The duration of one tick depends on the core clock
//! and on how the loop is compiled.

use core::ptr::addr_of_mut;

use embedded_hal::delay::DelayNs;

/// Pacing used between LED updates, in [`TickDelay`] ticks.
#[cfg(not(feature = "fast-delay"))]
pub const DEFAULT_DELAY_TICKS: u32 = 0xFFF;
#[cfg(feature = "fast-delay")]
pub const DEFAULT_DELAY_TICKS: u32 = 0xF;

/// Rough loop rate of [`BusyDelay`] on a 50MHz multicycle RV32I core.
pub const DEFAULT_LOOPS_PER_US: u32 = 2;

/// A delay counted in spin-loop iterations.
pub trait TickDelay {
    fn delay_ticks(&mut self, ticks: u32);
}

impl<D: TickDelay + ?Sized> TickDelay for &mut D {
    #[inline]
    fn delay_ticks(&mut self, ticks: u32) {
        (**self).delay_ticks(ticks)
    }
}

/// Delay implementation spinning on a volatile stack counter.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusyDelay {
    loops_per_us: u32,
}

impl BusyDelay {
    pub const fn new(loops_per_us: u32) -> Self {
        Self { loops_per_us }
    }

    pub const fn loops_per_us(&self) -> u32 {
        self.loops_per_us
    }
}

impl Default for BusyDelay {
    fn default() -> Self {
        Self::new(DEFAULT_LOOPS_PER_US)
    }
}

impl TickDelay for BusyDelay {
    #[inline(never)]
    fn delay_ticks(&mut self, ticks: u32) {
        let mut i: u32 = 0;
        let counter = addr_of_mut!(i);

        // The counter is only ever touched through volatile accesses, so every
        // increment is emitted.
        unsafe {
            while counter.read_volatile() < ticks {
                counter.write_volatile(counter.read_volatile() + 1);
            }
        }
    }
}

impl DelayNs for BusyDelay {
    fn delay_ns(&mut self, ns: u32) {
        let loops_per_us = self.loops_per_us;
        delay_ns_with(self, loops_per_us, ns);
    }

    fn delay_us(&mut self, us: u32) {
        let loops_per_us = self.loops_per_us;
        delay_us_with(self, loops_per_us, us);
    }

    fn delay_ms(&mut self, ms: u32) {
        let loops_per_us = self.loops_per_us;
        delay_ms_with(self, loops_per_us, ms);
    }
}

// Partial loops round up, so a non-zero request never returns early.
fn delay_ns_with(delay: &mut impl TickDelay, loops_per_us: u32, ns: u32) {
    let loops = (ns as u64 * loops_per_us as u64).div_ceil(1_000);
    spin_u64(delay, loops);
}

fn delay_us_with(delay: &mut impl TickDelay, loops_per_us: u32, us: u32) {
    spin_u64(delay, us as u64 * loops_per_us as u64);
}

fn delay_ms_with(delay: &mut impl TickDelay, loops_per_us: u32, mut ms: u32) {
    while ms > 0 {
        delay_us_with(delay, loops_per_us, 1_000);
        ms -= 1;
    }
}

fn spin_u64(delay: &mut impl TickDelay, mut loops: u64) {
    while loops > 0 {
        let chunk = loops.min(u32::MAX as u64) as u32;
        delay.delay_ticks(chunk);
        loops -= chunk as u64;
    }
}


#[cfg(test)]
mod tests {
    use super::mock::CountingDelay;
    use super::*;

    #[test]
    fn busy_delay_returns() {
        let mut delay = BusyDelay::default();
        delay.delay_ticks(0);
        delay.delay_ticks(1);
        delay.delay_ticks(DEFAULT_DELAY_TICKS);
    }

    #[test]
    fn default_pacing() {
        #[cfg(not(feature = "fast-delay"))]
        assert_eq!(DEFAULT_DELAY_TICKS, 0xFFF);
        #[cfg(feature = "fast-delay")]
        assert_eq!(DEFAULT_DELAY_TICKS, 0xF);
    }

    #[test]
    fn long_spins_are_chunked() {
        let mut delay = CountingDelay::default();
        spin_u64(&mut delay, u32::MAX as u64 + 5);
        assert_eq!(delay.calls, [u32::MAX, 5]);
        assert_eq!(delay.total(), u32::MAX as u64 + 5);

        let mut none = CountingDelay::default();
        spin_u64(&mut none, 0);
        assert!(none.calls.is_empty());
    }

    #[test]
    fn nanoseconds_convert_to_loops() {
        let mut delay = CountingDelay::default();
        delay_ns_with(&mut delay, 2, 1_500);
        assert_eq!(delay.calls, [3]);

        let mut delay = CountingDelay::default();
        delay_ns_with(&mut delay, 2, 1);
        assert_eq!(delay.calls, [1]);

        let mut delay = CountingDelay::default();
        delay_ns_with(&mut delay, 2, 0);
        assert!(delay.calls.is_empty());
    }

    #[test]
    fn microseconds_convert_to_loops() {
        let mut delay = CountingDelay::default();
        delay_us_with(&mut delay, 2, 3);
        assert_eq!(delay.calls, [6]);

        // u32::MAX us at 2 loops/us does not fit one tick count
        let mut delay = CountingDelay::default();
        delay_us_with(&mut delay, 2, u32::MAX);
        assert_eq!(delay.calls, [u32::MAX, u32::MAX]);
    }

    #[test]
    fn milliseconds_delay_one_ms_at_a_time() {
        let mut delay = CountingDelay::default();
        delay_ms_with(&mut delay, 2, 2);
        assert_eq!(delay.calls, [2_000, 2_000]);

        let mut delay = CountingDelay::default();
        delay_ms_with(&mut delay, 2, 0);
        assert!(delay.calls.is_empty());
    }

    #[test]
    fn busy_delay_implements_delay_ns() {
        let mut delay = BusyDelay::new(DEFAULT_LOOPS_PER_US);
        assert_eq!(delay.loops_per_us(), 2);
        delay.delay_ns(1_500);
        delay.delay_us(3);
        delay.delay_ms(1);
    }
}

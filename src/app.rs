//! Main loop.
//!
//! [`LedShift`] owns the LED and button drivers and a delay. In [`Mode::Blink`]
//! it flips LED 0 forever. In [`Mode::ButtonSelect`] every pass samples the
//! buttons and either blinks (a button is held) or plays the Johnson sequence
//! (no button held).

use crate::button::Buttons;
use crate::delay::{BusyDelay, TickDelay, DEFAULT_DELAY_TICKS};
use crate::led::Leds;
use crate::pattern::{johnson_led, toggle_led, INITIAL_PATTERN};
use crate::regs::{Reg, WordIn, WordOut, R, W};

/// What one pass of the main loop does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Flip LED 0, show it, wait.
    Blink,
    /// Blink while any button is held, otherwise play the Johnson sequence.
    ButtonSelect,
}

impl Default for Mode {
    fn default() -> Self {
        if cfg!(feature = "button-mode") {
            Mode::ButtonSelect
        } else {
            Mode::Blink
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Delay after every pattern, in [`TickDelay`] ticks.
    pub delay_ticks: u32,
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay_ticks: DEFAULT_DELAY_TICKS,
            mode: Mode::default(),
        }
    }
}

pub struct LedShift<'d, L: WordOut = Reg<u32, W>, B: WordIn = Reg<u32, R>, D: TickDelay = BusyDelay> {
    leds: Leds<'d, L>,
    buttons: Buttons<'d, B>,
    delay: D,
    config: Config,
    state: u32,
}

impl<'d, L: WordOut, B: WordIn, D: TickDelay> LedShift<'d, L, B, D> {
    pub fn new(leds: Leds<'d, L>, buttons: Buttons<'d, B>, delay: D, config: Config) -> Self {
        Self {
            leds,
            buttons,
            delay,
            config,
            state: INITIAL_PATTERN,
        }
    }

    /// Reset the LED state to [`INITIAL_PATTERN`] and show it.
    pub fn start(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("led-shift start: {}", self.config);

        self.state = INITIAL_PATTERN;
        self.leds.write_led(self.state);
    }

    /// Run one pass of the main loop.
    pub fn step(&mut self) {
        let ticks = self.config.delay_ticks;

        match self.config.mode {
            Mode::Blink => toggle_led(&mut self.state, &mut self.leds, &mut self.delay, ticks),
            Mode::ButtonSelect => {
                // non-zero read (a button held) blinks; an all-zero read plays the Johnson chase
                if self.buttons.any_pressed() {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("button held, blink");
                    toggle_led(&mut self.state, &mut self.leds, &mut self.delay, ticks)
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("no button, johnson");
                    johnson_led(&mut self.leds, &mut self.delay, ticks)
                }
            }
        }
    }

    /// Start, then step forever.
    pub fn run(mut self) -> ! {
        self.start();
        loop {
            self.step();
        }
    }

    /// Software LED state, as last toggled.
    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode;
    }

    pub fn leds(&self) -> &Leds<'d, L> {
        &self.leds
    }

    pub fn buttons_mut(&mut self) -> &mut Buttons<'d, B> {
        &mut self.buttons
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::mock::CountingDelay;
    use crate::pattern::Johnson;
    use crate::regs::mock::MemWord;

    fn app(mode: Mode, buttons: u32) -> LedShift<'static, MemWord, MemWord, CountingDelay> {
        LedShift::new(
            Leds::with_port(MemWord::default()),
            Buttons::with_port(MemWord::new(buttons)),
            CountingDelay::default(),
            Config {
                delay_ticks: 0xFFF,
                mode,
            },
        )
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.delay_ticks, DEFAULT_DELAY_TICKS);
        #[cfg(not(feature = "button-mode"))]
        assert_eq!(config.mode, Mode::Blink);
        #[cfg(feature = "button-mode")]
        assert_eq!(config.mode, Mode::ButtonSelect);
    }

    #[test]
    fn start_writes_initial_pattern_once() {
        let mut app = app(Mode::Blink, 0);
        app.start();

        assert_eq!(app.leds().port().writes, [0x0001]);
        assert!(app.delay().calls.is_empty());
    }

    #[test]
    fn blink_alternates_every_step() {
        let mut app = app(Mode::Blink, 0);
        app.start();

        for k in 1..=10u32 {
            app.step();
            let expected = if k % 2 == 0 { 0x0001 } else { 0x0000 };
            assert_eq!(app.leds().port().value, expected, "after {k} steps");
            assert_eq!(app.state(), expected);
        }

        let writes = &app.leds().port().writes;
        assert_eq!(writes.len(), 11);
        assert_eq!(writes[..4], [0x0001, 0x0000, 0x0001, 0x0000]);
        assert_eq!(app.delay().calls, [0xFFF; 10]);
    }

    #[test]
    fn blink_ignores_buttons() {
        let mut app = app(Mode::Blink, 0xF);
        app.start();
        app.step();
        app.step();

        assert_eq!(app.leds().port().writes, [0x0001, 0x0000, 0x0001]);
    }

    #[test]
    fn button_held_blinks() {
        let mut app = app(Mode::ButtonSelect, 0b0001);
        app.start();
        app.step();

        assert_eq!(app.leds().port().writes, [0x0001, 0x0000]);
        assert_eq!(app.delay().calls, [0xFFF]);
    }

    #[test]
    fn no_button_plays_johnson() {
        let mut app = app(Mode::ButtonSelect, 0xFFF0);
        app.start();
        app.step();

        let writes = &app.leds().port().writes;
        assert_eq!(writes.len(), 1 + 33);
        assert!(writes[1..33].iter().copied().eq(Johnson::new()));
        assert_eq!(app.leds().port().value, 0x0000);
        assert_eq!(app.delay().calls.len(), 32);
        // the Johnson sequence does not touch the blink state
        assert_eq!(app.state(), 0x0001);
    }

    #[test]
    fn mode_follows_button_between_steps() {
        let mut app = app(Mode::ButtonSelect, 0);
        app.start();
        app.step();
        assert_eq!(app.leds().port().writes.len(), 34);

        app.buttons_mut().port_mut().value = 0b1000;
        app.step();
        assert_eq!(app.state(), 0x0000);
        assert_eq!(app.leds().port().value, 0x0000);

        app.step();
        assert_eq!(app.leds().port().value, 0x0001);

        app.set_mode(Mode::Blink);
        assert_eq!(app.config().mode, Mode::Blink);
        assert_eq!(app.config().delay_ticks, 0xFFF);
        app.buttons_mut().port_mut().value = 0;
        app.step();
        assert_eq!(app.leds().port().value, 0x0000);
        assert_eq!(app.leds().port().writes.len(), 37);
    }
}

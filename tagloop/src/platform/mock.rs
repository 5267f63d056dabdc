// tagloop/src/platform/mock.rs

use std::collections::VecDeque;

use crate::platform::traits::Platform;
use crate::types::Led;

/// Mock platform: a virtual clock advanced by `delay_ms`, LED state with a
/// change log, and a scripted button.
#[derive(Debug, Default)]
pub struct MockPlatform {
    pub now: u64,
    pub delays: Vec<u32>,
    pub leds: [bool; 6],
    /// (led, on) for every led_on/led_off call
    pub led_log: Vec<(Led, bool)>,
    /// Button levels returned by successive reads (true = low/pressed).
    /// Once empty the button reads released.
    pub button_script: VecDeque<bool>,
    pub debugger: bool,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    pub fn led(&self, led: Led) -> bool {
        self.leds[led.index()]
    }

    pub fn any_led_on(&self) -> bool {
        self.leds.iter().any(|&on| on)
    }

    /// Queue `reads` consecutive button reads returning pressed.
    pub fn press_button(&mut self, reads: usize) {
        self.button_script.extend(std::iter::repeat(true).take(reads));
        self.button_script.push_back(false);
    }
}

impl Platform for MockPlatform {
    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.now += u64::from(ms);
    }

    fn now_ms(&self) -> u64 {
        self.now
    }

    fn button_is_low(&mut self) -> bool {
        self.button_script.pop_front().unwrap_or(false)
    }

    fn led_on(&mut self, led: Led) {
        self.leds[led.index()] = true;
        self.led_log.push((led, true));
    }

    fn led_off(&mut self, led: Led) {
        self.leds[led.index()] = false;
        self.led_log.push((led, false));
    }

    fn debugger_attached(&self) -> bool {
        self.debugger
    }
}

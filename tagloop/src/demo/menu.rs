// tagloop/src/demo/menu.rs

//! Write/format feature menu with its revert-to-read timer and LED blink.

use log::info;

use crate::flows::NdefFeature;
use crate::platform::{Platform, Timer};
use crate::types::Led;

/// Deadline after which a destructive feature falls back to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeTimer {
    deadline: Option<Timer>,
}

impl ModeTimer {
    pub fn arm(&mut self, timer: Timer) {
        self.deadline = Some(timer);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once the deadline has passed; an unarmed timer never expires.
    pub fn expired<P: Platform + ?Sized>(&self, platform: &P) -> bool {
        self.deadline.is_some_and(|t| platform.timer_expired(t))
    }
}

pub fn prompt(feature: NdefFeature) -> &'static str {
    match feature {
        NdefFeature::Read => "Tap a tag to read its content",
        NdefFeature::WriteOneRecord => "Tap a tag to write one NDEF record",
        NdefFeature::WriteTwoRecords => "Tap a tag to write two NDEF records",
        NdefFeature::WriteAar => "Tap a tag to write an AAR record",
        NdefFeature::Format => "Tap a tag to format it",
    }
}

#[derive(Debug, Clone)]
pub struct FeatureMenu {
    feature: NdefFeature,
    /// Feature whose prompt was last shown; `None` forces a prompt
    shown: Option<NdefFeature>,
    timer: ModeTimer,
    timeout_ms: u32,
    blink: Option<Timer>,
    blink_ms: u32,
    lit: bool,
}

impl FeatureMenu {
    pub fn new(timeout_ms: u32, blink_ms: u32) -> Self {
        Self {
            feature: NdefFeature::Read,
            shown: None,
            timer: ModeTimer::default(),
            timeout_ms,
            blink: None,
            blink_ms,
            lit: false,
        }
    }

    pub fn feature(&self) -> NdefFeature {
        self.feature
    }

    pub fn mode_timer(&self) -> &ModeTimer {
        &self.timer
    }

    /// Show the prompt again on the next tick
    pub fn force_prompt(&mut self) {
        self.shown = None;
    }

    /// Select `feature`; anything but read arms the revert timer, read
    /// stops the blink.
    pub fn select<P: Platform + ?Sized>(&mut self, feature: NdefFeature, platform: &mut P) {
        self.feature = feature;
        if feature.is_destructive() {
            self.timer.arm(platform.timer_create(self.timeout_ms));
        } else {
            self.timer.disarm();
            self.stop_blink(platform);
        }
    }

    pub fn cycle<P: Platform + ?Sized>(&mut self, platform: &mut P) -> NdefFeature {
        self.select(self.feature.next(), platform);
        self.feature
    }

    fn stop_blink<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        self.blink = None;
        if self.lit {
            self.lit = false;
            Led::ALL.into_iter().for_each(|led| platform.led_off(led));
        }
    }

    /// Once per loop iteration: revert on timeout, show the prompt when the
    /// feature changed, blink the LEDs while a destructive feature is armed.
    pub fn tick<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        if self.feature.is_destructive() && self.timer.expired(platform) {
            info!("Timer expired, back to Read mode...");
            self.feature = NdefFeature::Read;
            self.timer.disarm();
            self.stop_blink(platform);
        }

        if self.shown != Some(self.feature) {
            self.shown = Some(self.feature);
            info!("{}", prompt(self.feature));
        }

        if self.feature.is_destructive() {
            let due = self.blink.is_none_or(|t| platform.timer_expired(t));
            if due {
                self.blink = Some(platform.timer_create(self.blink_ms));
                self.lit = !self.lit;
                for led in Led::ALL {
                    if self.lit {
                        platform.led_on(led);
                    } else {
                        platform.led_off(led);
                    }
                }
            }
        }
    }
}

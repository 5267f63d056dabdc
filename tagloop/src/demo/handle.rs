// tagloop/src/demo/handle.rs

use log::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::constants::{
    ACTIVATION_SETTLE_MS, BUTTON_DEBOUNCE_MS, COOL_DOWN_MS, DEFAULT_RAW_MESSAGE_CAPACITY,
    LED_BLINK_MS, WRITE_FORMAT_TIMEOUT_MS,
};
use crate::demo::button::{ButtonAction, Debouncer};
use crate::demo::menu::FeatureMenu;
use crate::dispatch::{Handler, dispatch};
use crate::flows::{DemoMessages, NdefFeature, NdefFlowOptions};
use crate::ndef::{MessageCodec, NdefPoller};
use crate::platform::Platform;
use crate::rf::{RfEvent, RfLayer, RfState};
use crate::types::Led;
use crate::{Error, Result};

/// Top-level state of the discovery loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoState {
    #[default]
    NotInitialized,
    StartDiscovery,
    Discovery,
}

/// What one [`Demo::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still waiting for a successful `initialize`
    NotInitialized,
    DiscoveryStarted,
    /// Discovery running, nothing activated yet
    Waiting,
    Dispatched(Handler),
}

/// Runtime options, set through [`DemoBuilder`](crate::demo::DemoBuilder)
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub button_action: ButtonAction,
    /// Overrides the debug-probe query made at initialization
    pub verbose: Option<bool>,
    pub menu_enabled: bool,
    pub settle_ms: u32,
    pub cool_down_ms: u32,
    pub debounce_ms: u32,
    pub menu_timeout_ms: u32,
    pub blink_ms: u32,
    pub raw_capacity: usize,
    pub messages: DemoMessages,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            button_action: ButtonAction::default(),
            verbose: None,
            menu_enabled: true,
            settle_ms: ACTIVATION_SETTLE_MS,
            cool_down_ms: COOL_DOWN_MS,
            debounce_ms: BUTTON_DEBOUNCE_MS,
            menu_timeout_ms: WRITE_FORMAT_TIMEOUT_MS,
            blink_ms: LED_BLINK_MS,
            raw_capacity: DEFAULT_RAW_MESSAGE_CAPACITY,
            messages: DemoMessages::default(),
        }
    }
}

/// The discovery loop. Owns the RF layer, NDEF library and platform and
/// is driven by calling [`Demo::tick`] forever.
pub struct Demo<R, N, P> {
    rf: R,
    ndef: N,
    platform: P,
    config: DiscoveryConfig,
    options: DemoOptions,
    state: DemoState,
    verbose: bool,
    menu: FeatureMenu,
    button: Debouncer,
    raw_buf: Vec<u8>,
}

impl<R, N, P> Demo<R, N, P>
where
    R: RfLayer,
    N: NdefPoller + MessageCodec,
    P: Platform,
{
    /// Build with default options. See [`DemoBuilder`](crate::demo::DemoBuilder)
    /// for the rest.
    pub fn new(rf: R, ndef: N, platform: P, config: DiscoveryConfig) -> Self {
        Self::with_options(rf, ndef, platform, config, DemoOptions::default())
    }

    pub(crate) fn with_options(
        rf: R,
        ndef: N,
        platform: P,
        config: DiscoveryConfig,
        options: DemoOptions,
    ) -> Self {
        let menu = FeatureMenu::new(options.menu_timeout_ms, options.blink_ms);
        let button = Debouncer::new(options.debounce_ms);
        let raw_buf = vec![0u8; options.raw_capacity];
        Self {
            rf,
            ndef,
            platform,
            config,
            options,
            state: DemoState::NotInitialized,
            verbose: false,
            menu,
            button,
            raw_buf,
        }
    }

    /// One-time RF bring-up. On failure the loop stays in
    /// `NotInitialized` until this is called again.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != DemoState::NotInitialized {
            return Err(Error::WrongState);
        }
        self.config.validate()?;
        if let Err(e) = self.rf.initialize() {
            warn!("Initialization failed ({})", e);
            return Err(e);
        }
        self.verbose = self
            .options
            .verbose
            .unwrap_or_else(|| self.platform.debugger_attached());
        debug!("verbose dumps: {}", self.verbose);
        info!("Initialization succeeded..");
        self.state = DemoState::StartDiscovery;
        Ok(())
    }

    /// One loop iteration. Never fails; problems are logged.
    pub fn tick(&mut self) -> TickOutcome {
        let event = self.rf.worker();
        if self.state == DemoState::NotInitialized {
            return TickOutcome::NotInitialized;
        }
        if let Some(event) = event {
            self.handle_event(event);
        }

        if self.options.menu_enabled {
            self.menu.tick(&mut self.platform);
        }

        let low = self.platform.button_is_low();
        let now = self.platform.now_ms();
        if self.button.update(low, now) {
            self.on_button();
        }

        match self.state {
            DemoState::NotInitialized => TickOutcome::NotInitialized,
            DemoState::StartDiscovery => {
                self.start_discovery();
                TickOutcome::DiscoveryStarted
            }
            DemoState::Discovery if self.rf.is_activated() => self.on_activation(),
            DemoState::Discovery => TickOutcome::Waiting,
        }
    }

    fn handle_event(&mut self, event: RfEvent) {
        if !self.config.notify_events {
            debug!("rf event ignored: {:?}", event);
            return;
        }
        match event {
            RfEvent::StateChanged(RfState::WakeupMode) => info!("Wake Up mode started"),
            RfEvent::StateChanged(RfState::PollTechDetect) => {
                if self.config.wakeup_enabled {
                    info!("Wake Up mode terminated. Polling for devices");
                }
            }
            RfEvent::StateChanged(RfState::PollSelect) => {
                let count = self.rf.devices_found().len();
                if let Err(e) = self.rf.select(0) {
                    warn!("Device selection failed ({})", e);
                }
                info!("Multiple Tags detected: {}", count);
            }
            RfEvent::StateChanged(other) => debug!("rf state {:?}", other),
        }
    }

    fn on_button(&mut self) {
        match self.options.button_action {
            ButtonAction::ToggleWakeup => {
                let on = self.config.toggle_wakeup();
                info!("Toggling Wake Up mode {}", if on { "ON" } else { "OFF" });
                self.state = DemoState::StartDiscovery;
            }
            ButtonAction::CycleFeature if self.options.menu_enabled => {
                let feature = self.menu.cycle(&mut self.platform);
                debug!("menu feature: {}", feature);
            }
            ButtonAction::CycleFeature => debug!("menu disabled, press ignored"),
        }
    }

    fn leds_off(&mut self) {
        for led in Led::ALL {
            self.platform.led_off(led);
        }
    }

    fn start_discovery(&mut self) {
        self.leds_off();
        if let Err(e) = self.rf.deactivate(false) {
            debug!("deactivate before discovery: {}", e);
        }
        if let Err(e) = self.rf.discover(&self.config) {
            warn!("Discovery start failed ({})", e);
        }
        self.state = DemoState::Discovery;
    }

    fn on_activation(&mut self) -> TickOutcome {
        let Some(device) = self.rf.active_device() else {
            warn!("Activated without a device, restarting discovery");
            self.state = DemoState::StartDiscovery;
            return TickOutcome::Waiting;
        };
        debug!("{} device activated", device.technology());

        self.leds_off();
        self.platform.delay_ms(self.options.settle_ms);
        self.menu.force_prompt();

        let opts = NdefFlowOptions {
            feature: self.menu.feature(),
            verbose: self.verbose,
            messages: &self.options.messages,
        };
        let handler = dispatch(
            &mut self.rf,
            &mut self.ndef,
            &mut self.platform,
            &device,
            &opts,
            &mut self.raw_buf,
        );

        if let Err(e) = self.rf.deactivate(false) {
            warn!("Deactivation failed ({})", e);
        }
        self.platform.delay_ms(self.options.cool_down_ms);
        self.state = DemoState::StartDiscovery;
        TickOutcome::Dispatched(handler)
    }
}

impl<R, N, P> Demo<R, N, P> {
    pub fn state(&self) -> DemoState {
        self.state
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn feature(&self) -> NdefFeature {
        self.menu.feature()
    }

    pub fn menu(&self) -> &FeatureMenu {
        &self.menu
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn raw_capacity(&self) -> usize {
        self.raw_buf.len()
    }

    pub fn rf(&self) -> &R {
        &self.rf
    }

    pub fn rf_mut(&mut self) -> &mut R {
        &mut self.rf
    }

    pub fn ndef(&self) -> &N {
        &self.ndef
    }

    pub fn ndef_mut(&mut self) -> &mut N {
        &mut self.ndef
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn into_parts(self) -> (R, N, P) {
        (self.rf, self.ndef, self.platform)
    }
}

// tagloop/src/demo/builder.rs

use crate::config::DiscoveryConfig;
use crate::demo::button::ButtonAction;
use crate::demo::handle::{Demo, DemoOptions};
use crate::flows::DemoMessages;
use crate::ndef::{MessageCodec, NdefPoller};
use crate::platform::Platform;
use crate::rf::RfLayer;
use crate::{Error, Result};

/// Helper to construct a [`Demo`] with optional configuration.
pub struct DemoBuilder<R, N, P> {
    rf: Option<R>,
    ndef: Option<N>,
    platform: Option<P>,
    config: DiscoveryConfig,
    options: DemoOptions,
}

impl<R, N, P> Default for DemoBuilder<R, N, P> {
    fn default() -> Self {
        Self {
            rf: None,
            ndef: None,
            platform: None,
            config: DiscoveryConfig::default(),
            options: DemoOptions::default(),
        }
    }
}

impl<R, N, P> DemoBuilder<R, N, P>
where
    R: RfLayer,
    N: NdefPoller + MessageCodec,
    P: Platform,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rf(mut self, rf: R) -> Self {
        self.rf = Some(rf);
        self
    }

    pub fn with_ndef(mut self, ndef: N) -> Self {
        self.ndef = Some(ndef);
        self
    }

    pub fn with_platform(mut self, platform: P) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn button_action(mut self, action: ButtonAction) -> Self {
        self.options.button_action = action;
        self
    }

    /// Force verbose dumps on or off regardless of the debug probe
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = Some(verbose);
        self
    }

    pub fn menu(mut self, enabled: bool) -> Self {
        self.options.menu_enabled = enabled;
        self
    }

    pub fn settle_ms(mut self, ms: u32) -> Self {
        self.options.settle_ms = ms;
        self
    }

    pub fn cool_down_ms(mut self, ms: u32) -> Self {
        self.options.cool_down_ms = ms;
        self
    }

    pub fn debounce_ms(mut self, ms: u32) -> Self {
        self.options.debounce_ms = ms;
        self
    }

    pub fn menu_timeout_ms(mut self, ms: u32) -> Self {
        self.options.menu_timeout_ms = ms;
        self
    }

    /// Size of the raw NDEF buffer used for reads and encodes
    pub fn raw_capacity(mut self, bytes: usize) -> Self {
        self.options.raw_capacity = bytes;
        self
    }

    pub fn messages(mut self, messages: DemoMessages) -> Self {
        self.options.messages = messages;
        self
    }

    /// Consume the builder. All three collaborators are required and the
    /// discovery config must validate.
    pub fn build(self) -> Result<Demo<R, N, P>> {
        let rf = self
            .rf
            .ok_or_else(|| Error::InvalidConfig("rf layer not provided".into()))?;
        let ndef = self
            .ndef
            .ok_or_else(|| Error::InvalidConfig("ndef library not provided".into()))?;
        let platform = self
            .platform
            .ok_or_else(|| Error::InvalidConfig("platform not provided".into()))?;
        if self.options.raw_capacity == 0 {
            return Err(Error::InvalidConfig("raw buffer capacity is zero".into()));
        }
        self.config.validate()?;
        Ok(Demo::with_options(rf, ndef, platform, self.config, self.options))
    }
}

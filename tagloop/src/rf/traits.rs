// tagloop/src/rf/traits.rs

use crate::config::DiscoveryConfig;
use crate::types::{ActiveDevice, ExchangeStatus, Fwt, Nfcid};
use crate::Result;

/// Coarse state of the RF layer's own discovery state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RfState {
    #[default]
    NotInit,
    Idle,
    StartDiscovery,
    WakeupMode,
    PollTechDetect,
    PollCollisionResolution,
    PollSelect,
    PollActivation,
    Activated,
    DataExchange,
    DataExchangeDone,
    Deactivation,
}

impl RfState {
    /// A device is activated and exchanges may run.
    pub fn is_activated(&self) -> bool {
        matches!(
            self,
            RfState::Activated | RfState::DataExchange | RfState::DataExchangeDone
        )
    }
}

/// Notification produced by a worker step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfEvent {
    StateChanged(RfState),
}

/// RF abstraction driven by the discovery loop. Nothing progresses unless
/// `worker` is called.
pub trait RfLayer {
    /// One-time initialization of the frontend
    fn initialize(&mut self) -> Result<()>;

    /// Start a discovery pass with the given parameters
    fn discover(&mut self, config: &DiscoveryConfig) -> Result<()>;

    /// Deactivate the current device and stop discovery
    fn deactivate(&mut self, keep_context: bool) -> Result<()>;

    /// Advance the RF state machine by one step. Returns a state-change
    /// event when event notification is enabled in the discovery config.
    fn worker(&mut self) -> Option<RfEvent>;

    fn state(&self) -> RfState;

    fn is_activated(&self) -> bool {
        self.state().is_activated()
    }

    /// The activated device, if any
    fn active_device(&self) -> Option<ActiveDevice>;

    /// Begin an asynchronous exchange. Fails with `WrongState` while another
    /// exchange is pending.
    fn data_exchange_start(&mut self, tx: &[u8], fwt: Fwt) -> Result<()>;

    /// Status of the pending exchange
    fn data_exchange_status(&mut self) -> ExchangeStatus;

    /// Response bytes of the last completed exchange
    fn response(&self) -> &[u8];

    /// Activate the device at `index` of [`RfLayer::devices_found`]
    fn select(&mut self, index: usize) -> Result<()>;

    fn devices_found(&self) -> &[ActiveDevice];

    /// Put the NFC-V poller back into a state where inventories can be sent
    fn nfcv_poller_initialize(&mut self) -> Result<()>;

    /// Single-slot inventory addressed to `uid`; fails once the tag has left
    /// the field.
    fn nfcv_inventory(&mut self, uid: &Nfcid) -> Result<()>;
}

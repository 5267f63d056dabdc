// tagloop/src/rf/mock.rs

use std::collections::VecDeque;

use crate::config::DiscoveryConfig;
use crate::rf::traits::{RfEvent, RfLayer, RfState};
use crate::types::{ActiveDevice, ExchangeStatus, Fwt, Nfcid};
use crate::{Error, Result};

/// One scripted data exchange: how many status polls report busy, the
/// final status and the response bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedExchange {
    pub start_error: Option<Error>,
    pub busy_polls: usize,
    pub status: ExchangeStatus,
    pub response: Vec<u8>,
}

impl ScriptedExchange {
    pub fn ok(response: Vec<u8>) -> Self {
        Self {
            start_error: None,
            busy_polls: 0,
            status: ExchangeStatus::Success,
            response,
        }
    }

    pub fn failing(status: ExchangeStatus) -> Self {
        Self {
            start_error: None,
            busy_polls: 0,
            status,
            response: Vec::new(),
        }
    }

    pub fn start_fails(err: Error) -> Self {
        Self {
            start_error: Some(err),
            busy_polls: 0,
            status: ExchangeStatus::Param,
            response: Vec::new(),
        }
    }

    /// Report busy for `n` status polls before completing.
    pub fn after_busy(mut self, n: usize) -> Self {
        self.busy_polls = n;
        self
    }
}

/// A device that activates once discovery has been running for
/// `after_workers` worker steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub after_workers: usize,
    pub device: ActiveDevice,
}

/// Recorded control calls, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RfCall {
    Initialize,
    Discover(DiscoveryConfig),
    Deactivate(bool),
    Select(usize),
    NfcvPollerInitialize,
    NfcvInventory(Nfcid),
}

/// Mock RF layer for unit tests. Records calls and sent frames, replays
/// scripted exchanges and device arrivals.
#[derive(Debug, Default)]
pub struct MockRf {
    pub calls: Vec<RfCall>,
    pub sent: Vec<Vec<u8>>,
    pub exchanges: VecDeque<ScriptedExchange>,
    pub arrivals: VecDeque<Arrival>,
    pub events: VecDeque<RfEvent>,
    pub devices: Vec<ActiveDevice>,
    /// Number of inventories that succeed before the tag "leaves"
    pub inventory_successes: usize,
    pub fail_initialize: bool,
    pub discover_error: Option<Error>,
    pub worker_calls: usize,
    pub status_polls: usize,
    state: RfState,
    device: Option<ActiveDevice>,
    pending: Option<ScriptedExchange>,
    response: Vec<u8>,
}

impl MockRf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_exchange(&mut self, exchange: ScriptedExchange) {
        self.exchanges.push_back(exchange);
    }

    /// Queue a device that activates on the first worker step of the next
    /// discovery pass.
    pub fn present(&mut self, device: ActiveDevice) {
        self.arrivals.push_back(Arrival {
            after_workers: 0,
            device,
        });
    }

    pub fn push_event(&mut self, event: RfEvent) {
        self.events.push_back(event);
    }

    /// Force the mock into an activated state with `device`.
    pub fn activate(&mut self, device: ActiveDevice) {
        self.device = Some(device);
        self.state = RfState::Activated;
    }

    pub fn discover_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RfCall::Discover(_)))
            .count()
    }

    pub fn inventory_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RfCall::NfcvInventory(_)))
            .count()
    }

    fn discovering(&self) -> bool {
        matches!(
            self.state,
            RfState::StartDiscovery | RfState::WakeupMode | RfState::PollTechDetect
        )
    }
}

impl RfLayer for MockRf {
    fn initialize(&mut self) -> Result<()> {
        self.calls.push(RfCall::Initialize);
        if self.fail_initialize {
            return Err(Error::InitFailed);
        }
        self.state = RfState::Idle;
        Ok(())
    }

    fn discover(&mut self, config: &DiscoveryConfig) -> Result<()> {
        self.calls.push(RfCall::Discover(config.clone()));
        if let Some(err) = self.discover_error.clone() {
            return Err(err);
        }
        if self.state == RfState::NotInit {
            return Err(Error::WrongState);
        }
        self.state = if config.wakeup_enabled {
            RfState::WakeupMode
        } else {
            RfState::PollTechDetect
        };
        Ok(())
    }

    fn deactivate(&mut self, keep_context: bool) -> Result<()> {
        self.calls.push(RfCall::Deactivate(keep_context));
        if self.state != RfState::NotInit {
            self.state = RfState::Idle;
        }
        self.device = None;
        self.pending = None;
        Ok(())
    }

    fn worker(&mut self) -> Option<RfEvent> {
        self.worker_calls += 1;
        if self.discovering() {
            let ready = match self.arrivals.front_mut() {
                Some(front) if front.after_workers == 0 => true,
                Some(front) => {
                    front.after_workers -= 1;
                    false
                }
                None => false,
            };
            if let Some(arrival) = ready.then(|| self.arrivals.pop_front()).flatten() {
                self.device = Some(arrival.device);
                self.state = RfState::Activated;
            }
        }
        self.events.pop_front()
    }

    fn state(&self) -> RfState {
        self.state
    }

    fn active_device(&self) -> Option<ActiveDevice> {
        self.device
    }

    fn data_exchange_start(&mut self, tx: &[u8], _fwt: Fwt) -> Result<()> {
        if self.pending.is_some() {
            return Err(Error::WrongState);
        }
        self.sent.push(tx.to_vec());
        // An unscripted exchange behaves like a silent tag.
        let next = self
            .exchanges
            .pop_front()
            .unwrap_or_else(|| ScriptedExchange::failing(ExchangeStatus::Timeout));
        if let Some(err) = next.start_error {
            return Err(err);
        }
        self.pending = Some(next);
        if self.state.is_activated() {
            self.state = RfState::DataExchange;
        }
        Ok(())
    }

    fn data_exchange_status(&mut self) -> ExchangeStatus {
        self.status_polls += 1;
        let Some(pending) = self.pending.as_mut() else {
            return ExchangeStatus::Param;
        };
        if pending.busy_polls > 0 {
            pending.busy_polls -= 1;
            return ExchangeStatus::Busy;
        }
        let Some(done) = self.pending.take() else {
            return ExchangeStatus::Param;
        };
        self.response = done.response;
        if self.state == RfState::DataExchange {
            self.state = RfState::DataExchangeDone;
        }
        done.status
    }

    fn response(&self) -> &[u8] {
        &self.response
    }

    fn select(&mut self, index: usize) -> Result<()> {
        self.calls.push(RfCall::Select(index));
        let device = *self.devices.get(index).ok_or(Error::Param)?;
        self.device = Some(device);
        self.state = RfState::PollActivation;
        Ok(())
    }

    fn devices_found(&self) -> &[ActiveDevice] {
        &self.devices
    }

    fn nfcv_poller_initialize(&mut self) -> Result<()> {
        self.calls.push(RfCall::NfcvPollerInitialize);
        Ok(())
    }

    fn nfcv_inventory(&mut self, uid: &Nfcid) -> Result<()> {
        self.calls.push(RfCall::NfcvInventory(*uid));
        if self.inventory_successes > 0 {
            self.inventory_successes -= 1;
            Ok(())
        } else {
            Err(Error::Timeout)
        }
    }
}

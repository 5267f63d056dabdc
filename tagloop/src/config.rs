// tagloop/src/config.rs
//! Discovery parameters handed to the RF layer on every discovery start.

use crate::constants::{
    DEFAULT_DISCOVERY_DURATION_MS, NFCDEP_GB_MAX_LEN, P2P_GENERAL_BYTES, P2P_NFCID3,
};
use crate::types::{BitRate, ComplianceMode, PollTechs};
use crate::{Error, Result};

/// Local identity advertised when acting as an NFC-DEP initiator
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct P2pIdentity {
    pub nfcid3: [u8; 10],
    pub general_bytes: Vec<u8>,
}

impl Default for P2pIdentity {
    fn default() -> Self {
        Self {
            nfcid3: P2P_NFCID3,
            general_bytes: P2P_GENERAL_BYTES.to_vec(),
        }
    }
}

/// Discovery configuration. Mutated only between discovery passes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscoveryConfig {
    pub compliance_mode: ComplianceMode,
    pub device_limit: u8,
    pub techs: PollTechs,
    pub total_duration_ms: u16,
    pub wakeup_enabled: bool,
    pub wakeup_config_default: bool,
    pub nfcf_bit_rate: BitRate,
    pub ap2p_bit_rate: BitRate,
    pub p2p: Option<P2pIdentity>,
    /// Report RF state changes (wake-up, multiple devices) as worker events
    pub notify_events: bool,
}

impl Default for DiscoveryConfig {
    /// NFC-V polling, one device, one second per pass.
    fn default() -> Self {
        Self {
            compliance_mode: ComplianceMode::Nfc,
            device_limit: 1,
            techs: PollTechs::V,
            total_duration_ms: DEFAULT_DISCOVERY_DURATION_MS,
            wakeup_enabled: false,
            wakeup_config_default: true,
            nfcf_bit_rate: BitRate::Br212,
            ap2p_bit_rate: BitRate::Br424,
            p2p: None,
            notify_events: false,
        }
    }
}

impl DiscoveryConfig {
    /// NFC-V only, event notifications on.
    pub fn nfcv() -> Self {
        Self {
            notify_events: true,
            ..Self::default()
        }
    }

    /// NFC-B only, event notifications on.
    pub fn nfcb() -> Self {
        Self {
            techs: PollTechs::B,
            notify_events: true,
            ..Self::default()
        }
    }

    /// Active P2P at 106 kbit/s (Type A modulation) with the default
    /// NFCID3 and LLCP general bytes.
    pub fn active_p2p() -> Self {
        Self {
            techs: PollTechs::AP2P,
            ap2p_bit_rate: BitRate::Br106,
            p2p: Some(P2pIdentity::default()),
            notify_events: true,
            ..Self::default()
        }
    }

    pub fn with_techs(mut self, techs: PollTechs) -> Self {
        self.techs = techs;
        self
    }

    /// Flip the wake-up flag and return its new value.
    pub fn toggle_wakeup(&mut self) -> bool {
        self.wakeup_enabled = !self.wakeup_enabled;
        self.wakeup_enabled
    }

    pub fn validate(&self) -> Result<()> {
        if self.device_limit == 0 {
            return Err(Error::InvalidConfig("device limit must be at least 1".into()));
        }
        if self.techs.is_empty() {
            return Err(Error::InvalidConfig("no technology selected".into()));
        }
        if let Some(p2p) = &self.p2p {
            if p2p.general_bytes.len() > NFCDEP_GB_MAX_LEN {
                return Err(Error::InvalidConfig(format!(
                    "general bytes too long: {} > {}",
                    p2p.general_bytes.len(),
                    NFCDEP_GB_MAX_LEN
                )));
            }
        }
        Ok(())
    }
}

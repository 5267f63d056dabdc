// tagloop/src/prelude.rs

pub use crate::config::{DiscoveryConfig, P2pIdentity};
pub use crate::demo::{ButtonAction, Demo, DemoBuilder, DemoState, TickOutcome};
pub use crate::dispatch::{Handler, classify};
pub use crate::exchange::transceive_blocking;
pub use crate::flows::{DemoMessages, NdefFeature, Stage};
pub use crate::ndef::{MessageCodec, NdefMessage, NdefPoller, NdefRecord, NdefState};
pub use crate::platform::Platform;
pub use crate::rf::{RfEvent, RfLayer, RfState};
pub use crate::{
    ActiveDevice, BitRate, ComplianceMode, Error, ExchangeStatus, Fwt, Led, NfcaSubtype,
    NfcbInfo, Nfcid, PollTechs, Result, Technology,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex_spaced, hex_dump_lines};

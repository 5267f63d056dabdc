// tagloop/src/dispatch.rs

//! Per-technology handling of an activated device.
//!
//! [`classify`] is a pure mapping from the device to a [`Handler`];
//! [`dispatch`] runs the handler. Flow failures are logged and dropped here,
//! so a bad tag never stops the discovery loop.

use log::{debug, info, warn};

use crate::constants::PRESENCE_POLL_INTERVAL_MS;
use crate::flows::{NdefFlowOptions, is_id_card, read_id_card, run_apdu, run_ndef, run_p2p};
use crate::ndef::{MessageCodec, NdefPoller};
use crate::platform::Platform;
use crate::rf::RfLayer;
use crate::types::{ActiveDevice, Led, NfcaSubtype, Technology};

/// What to do with an activated device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// NDEF flow, then wait for the tag to leave
    NfcvNdef,
    NfcaP2p,
    /// Log the UID only
    NfcaIdentify,
    NfcbApdu,
    NfcbIdCard,
    NfcbIdentify,
    ActiveP2p,
    /// Technology not handled by the loop
    Ignore,
}

impl Handler {
    /// Indicator lit while the handler runs
    pub fn led(&self) -> Option<Led> {
        match self {
            Handler::NfcvNdef => Some(Led::V),
            Handler::NfcaP2p | Handler::NfcaIdentify => Some(Led::A),
            Handler::NfcbApdu | Handler::NfcbIdCard | Handler::NfcbIdentify => Some(Led::B),
            Handler::ActiveP2p => Some(Led::Ap2p),
            Handler::Ignore => None,
        }
    }
}

pub fn classify(device: &ActiveDevice) -> Handler {
    match device.technology() {
        Technology::NfcV => Handler::NfcvNdef,
        Technology::NfcA(NfcaSubtype::NfcDep) => Handler::NfcaP2p,
        Technology::NfcA(_) => Handler::NfcaIdentify,
        Technology::NfcB(info) if info.is_iso_dep_supported() => Handler::NfcbApdu,
        Technology::NfcB(_) if is_id_card(device) => Handler::NfcbIdCard,
        Technology::NfcB(_) => Handler::NfcbIdentify,
        Technology::ActiveP2p => Handler::ActiveP2p,
        Technology::NfcF | Technology::St25tb => Handler::Ignore,
    }
}

/// Classify `device` and run its handler. Returns the handler that ran.
pub fn dispatch<R, N, P>(
    rf: &mut R,
    ndef: &mut N,
    platform: &mut P,
    device: &ActiveDevice,
    ndef_opts: &NdefFlowOptions<'_>,
    buf: &mut [u8],
) -> Handler
where
    R: RfLayer,
    N: NdefPoller + MessageCodec,
    P: Platform,
{
    let handler = classify(device);
    if let Some(led) = handler.led() {
        platform.led_on(led);
    }
    let id = device.nfcid();

    match handler {
        Handler::NfcvNdef => {
            info!("ISO15693/NFC-V card found. UID: {}", id.reversed().to_hex());
            if let Err(e) = run_ndef(rf, ndef, device, ndef_opts, buf) {
                debug!("ndef flow ended: {}", e);
            }
            info!("Operation completed");
            info!("Tag can be removed from the field");
            wait_for_removal(rf, platform, device);
        }
        Handler::NfcaP2p => {
            info!("NFCA Passive P2P device found. NFCID: {}", id.to_hex());
            if let Err(e) = run_p2p(rf, platform) {
                debug!("p2p flow ended: {}", e);
            }
        }
        Handler::NfcaIdentify => {
            info!("ISO14443A/NFC-A card found. UID: {}", id.to_hex());
        }
        Handler::NfcbApdu | Handler::NfcbIdCard | Handler::NfcbIdentify => {
            info!("ISO14443B/NFC-B card found. UID: {}", id.to_hex());
            if handler == Handler::NfcbApdu {
                let report = run_apdu(rf);
                debug!("apdu sequence complete, all ok: {}", report.all_ok());
            } else if handler == Handler::NfcbIdCard {
                if let Err(e) = read_id_card(rf) {
                    debug!("id card flow ended: {}", e);
                }
            }
        }
        Handler::ActiveP2p => {
            info!("NFC Active P2P device found. NFCID3: {}", id.to_hex());
            if let Err(e) = run_p2p(rf, platform) {
                debug!("p2p flow ended: {}", e);
            }
        }
        Handler::Ignore => {
            debug!("no handler for {} device {}", device.technology(), id.to_hex());
        }
    }
    handler
}

/// Address inventories to the tag until it stops answering.
fn wait_for_removal<R, P>(rf: &mut R, platform: &mut P, device: &ActiveDevice)
where
    R: RfLayer,
    P: Platform,
{
    if let Err(e) = rf.nfcv_poller_initialize() {
        warn!("NFC-V poller initialization failed ({})", e);
        return;
    }
    let mut polls = 0usize;
    while rf.nfcv_inventory(device.nfcid()).is_ok() {
        polls += 1;
        platform.delay_ms(PRESENCE_POLL_INTERVAL_MS);
    }
    debug!("tag left the field after {} presence polls", polls);
}

// tagloop/src/flows/id_card.rs

//! Identity cards that answer NFC-B polling without ISO-DEP support. They
//! report an all-zero PUPI prefix and need a proprietary command sequence.

use log::{debug, info, warn};

use crate::Result;
use crate::constants::{ID_CARD_ATTRIB, ID_CARD_GET_UID, ID_CARD_UID_LOG_LEN};
use crate::exchange::transceive_blocking;
use crate::rf::RfLayer;
use crate::types::{ActiveDevice, Fwt, Technology};
use crate::utils::bytes_to_hex_spaced;

/// NFC-B device without ISO-DEP whose first four NFCID bytes are zero
pub fn is_id_card(device: &ActiveDevice) -> bool {
    let Technology::NfcB(info) = device.technology() else {
        return false;
    };
    let id = device.nfcid().as_bytes();
    !info.is_iso_dep_supported() && id.len() >= 4 && id[..4] == [0, 0, 0, 0]
}

/// ATTRIB then GET UID. Returns the (up to 10) UID bytes.
pub fn read_id_card(rf: &mut dyn RfLayer) -> Result<Vec<u8>> {
    info!("ID card activated.");
    // Some cards answer ATTRIB with garbage but still accept GET UID.
    if let Err(e) = transceive_blocking(rf, &ID_CARD_ATTRIB, Fwt::NONE) {
        debug!("ATTRIB failed: {}", e);
    }
    match transceive_blocking(rf, &ID_CARD_GET_UID, Fwt::NONE) {
        Ok(resp) => {
            let uid = resp[..resp.len().min(ID_CARD_UID_LOG_LEN)].to_vec();
            info!("ID card found. 'UID': {}", bytes_to_hex_spaced(&uid));
            Ok(uid)
        }
        Err(e) => {
            warn!("ID card UID read failed ({})", e);
            Err(e)
        }
    }
}

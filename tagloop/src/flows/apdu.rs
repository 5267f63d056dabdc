// tagloop/src/flows/apdu.rs

use log::{info, warn};

use crate::Result;
use crate::exchange::transceive_blocking;
use crate::protocol::{Apdu, StatusWord};
use crate::rf::RfLayer;
use crate::types::Fwt;
use crate::utils::bytes_to_hex_spaced;

/// Outcome of one command of the APDU sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduStep {
    pub name: &'static str,
    pub response: Result<Vec<u8>>,
}

impl ApduStep {
    pub fn is_ok(&self) -> bool {
        self.response.is_ok()
    }

    /// ISO 7816 status word, when the response carries one
    pub fn status_word(&self) -> Option<StatusWord> {
        self.response
            .as_ref()
            .ok()
            .and_then(|r| StatusWord::from_response(r))
    }
}

/// All three steps, in order. A failed step never prevents the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduReport {
    pub steps: [ApduStep; 3],
}

impl ApduReport {
    pub fn all_ok(&self) -> bool {
        self.steps.iter().all(ApduStep::is_ok)
    }
}

fn step(rf: &mut dyn RfLayer, name: &'static str, apdu: Result<Apdu>) -> ApduStep {
    let response = apdu.and_then(|apdu| {
        transceive_blocking(rf, &apdu.encode(), Fwt::NONE).map(<[u8]>::to_vec)
    });
    match &response {
        Ok(data) => info!(" {}: OK Data: {}", name, bytes_to_hex_spaced(data)),
        Err(e) => warn!(" {}: FAIL Data: ({})", name, e),
    }
    ApduStep { name, response }
}

/// Select the NDEF application, select the CC file and read it.
pub fn run_apdu(rf: &mut dyn RfLayer) -> ApduReport {
    ApduReport {
        steps: [
            step(rf, "Select NDEF Application", Apdu::select_ndef_application()),
            step(rf, "Select CC", Ok(Apdu::select_cc_file())),
            step(rf, "Read CC", Ok(Apdu::read_cc_file())),
        ],
    }
}

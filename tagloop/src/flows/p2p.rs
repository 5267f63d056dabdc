// tagloop/src/flows/p2p.rs

//! NFC-DEP initiator flow: open an LLCP link to the SNEP server, push a URI
//! and keep the link alive until the peer leaves.

use log::{debug, info, warn};

use crate::Result;
use crate::constants::{LLCP_SNEP_CONNECT, LLCP_SYMM, P2P_KEEPALIVE_INTERVAL_MS, SNEP_PUT_URI};
use crate::exchange::transceive_blocking;
use crate::platform::Platform;
use crate::rf::RfLayer;
use crate::types::Fwt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct P2pReport {
    /// SYMM frames answered before the link dropped
    pub keepalives: usize,
}

pub fn run_p2p(rf: &mut dyn RfLayer, platform: &mut dyn Platform) -> Result<P2pReport> {
    if let Err(e) = transceive_blocking(rf, &LLCP_SNEP_CONNECT, Fwt::NONE) {
        warn!(" Initialize device .. failed ({})", e);
        return Err(e);
    }
    info!(" Initialize device .. succeeded.");

    if let Err(e) = transceive_blocking(rf, &SNEP_PUT_URI, Fwt::NONE) {
        warn!(" Push NDEF Uri: www.st.com .. failed ({})", e);
        return Err(e);
    }
    info!(" Push NDEF Uri: www.st.com .. succeeded.");

    info!(" Device present, maintaining connection");
    let mut keepalives = 0;
    loop {
        let res = transceive_blocking(rf, &LLCP_SYMM, Fwt::NONE).map(|_| ());
        platform.delay_ms(P2P_KEEPALIVE_INTERVAL_MS);
        if let Err(e) = res {
            debug!("keep-alive ended after {} frames: {}", keepalives, e);
            break;
        }
        keepalives += 1;
    }
    info!(" Device removed.");
    Ok(P2pReport { keepalives })
}

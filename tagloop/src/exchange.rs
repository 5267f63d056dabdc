// tagloop/src/exchange.rs

//! Blocking wrapper around the RF layer's asynchronous data exchange.

use log::trace;

use crate::Result;
use crate::rf::RfLayer;
use crate::types::Fwt;

/// Send `tx` and spin until the exchange leaves the busy state.
///
/// The worker is serviced between status polls, so discovery, activation
/// and exchange progress continue, but nothing else in the loop runs until
/// the exchange completes. Completion is bounded by `fwt` and the
/// transport's own retry and timeout handling. This is a plain spin loop,
/// not a yielding task.
///
/// The returned slice borrows the RF layer and is invalidated by the next
/// exchange.
pub fn transceive_blocking<'a, R>(rf: &'a mut R, tx: &[u8], fwt: Fwt) -> Result<&'a [u8]>
where
    R: RfLayer + ?Sized,
{
    rf.data_exchange_start(tx, fwt)?;

    let mut polls = 0usize;
    loop {
        if let Some(event) = rf.worker() {
            trace!("rf event during exchange: {:?}", event);
        }
        let status = rf.data_exchange_status();
        if !status.is_busy() {
            trace!("exchange done after {} polls: {:?}", polls, status);
            status.into_result()?;
            break;
        }
        polls += 1;
        core::hint::spin_loop();
    }

    let rf: &'a R = rf;
    Ok(rf.response())
}

#[path = "../common/mod.rs"]
mod common;

use tagloop::rf::mock::ScriptedExchange;
use tagloop::rf::{MockRf, RfLayer, RfState};
use tagloop::test_support::nfcv_device;
use tagloop::{Error, ExchangeStatus, Fwt, transceive_blocking};

#[test]
fn back_to_back_exchanges_each_get_their_response() {
    let mut rf = MockRf::new();
    rf.activate(nfcv_device());
    rf.push_exchange(ScriptedExchange::ok(vec![0x00, 0x01]).after_busy(3));
    rf.push_exchange(ScriptedExchange::ok(vec![0x00, 0x02]));

    let first = transceive_blocking(&mut rf, &[0x22, 0x20, 0x00], Fwt::new(4096))
        .unwrap()
        .to_vec();
    assert_eq!(rf.state(), RfState::DataExchangeDone);
    let second = transceive_blocking(&mut rf, &[0x22, 0x20, 0x01], Fwt::new(4096)).unwrap();

    assert_eq!(first, vec![0x00, 0x01]);
    assert_eq!(second, &[0x00, 0x02]);
    assert_eq!(rf.sent.len(), 2);
}

#[test]
fn failed_exchange_leaves_layer_ready_for_next() {
    let mut rf = MockRf::new();
    rf.activate(nfcv_device());
    rf.push_exchange(ScriptedExchange::failing(ExchangeStatus::Protocol).after_busy(1));
    rf.push_exchange(ScriptedExchange::ok(common::fixtures::sw_success()));

    assert_eq!(
        transceive_blocking(&mut rf, &[0x01], Fwt::NONE),
        Err(Error::Protocol)
    );
    assert_eq!(
        transceive_blocking(&mut rf, &[0x02], Fwt::NONE).map(<[u8]>::to_vec),
        Ok(vec![0x90, 0x00])
    );
}

#[test]
fn worker_keeps_running_during_long_exchange() {
    let mut rf = MockRf::new();
    rf.push_exchange(ScriptedExchange::ok(Vec::new()).after_busy(100));
    transceive_blocking(&mut rf, &[0x00], Fwt::NONE).unwrap();
    assert_eq!(rf.worker_calls, 101);
    assert_eq!(rf.status_polls, 101);
}

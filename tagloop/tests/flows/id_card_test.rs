#[path = "../common/mod.rs"]
mod common;

use tagloop::dispatch::{Handler, classify};
use tagloop::flows::{is_id_card, read_id_card};
use tagloop::constants::{ID_CARD_ATTRIB, ID_CARD_GET_UID};
use tagloop::ndef::MockNdef;
use tagloop::rf::MockRf;
use tagloop::rf::mock::ScriptedExchange;
use tagloop::test_support::{capture_logs, initialized_mock_demo, nfcb_device, take_logs};
use tagloop::{DiscoveryConfig, ExchangeStatus};

use common::fixtures;
use common::helpers::{count_line, tick_until_dispatched};

#[test]
fn id_card_uid_read_even_when_attrib_fails() {
    capture_logs();
    let mut demo = initialized_mock_demo(MockNdef::empty(), DiscoveryConfig::nfcb()).unwrap();
    demo.tick();
    demo.rf_mut()
        .push_exchange(ScriptedExchange::failing(ExchangeStatus::Framing));
    demo.rf_mut()
        .push_exchange(ScriptedExchange::ok(fixtures::id_card_uid_response()));
    demo.rf_mut().present(fixtures::id_card_device());

    assert_eq!(tick_until_dispatched(&mut demo, 3), Some(Handler::NfcbIdCard));
    assert_eq!(
        demo.rf().sent,
        vec![ID_CARD_ATTRIB.to_vec(), ID_CARD_GET_UID.to_vec()]
    );

    let logs = take_logs();
    assert_eq!(count_line(&logs, "ISO14443B/NFC-B card found. UID: 00 00 00 00 5A 6B"), 1);
    assert_eq!(count_line(&logs, "ID card activated."), 1);
    assert_eq!(
        count_line(&logs, "ID card found. 'UID': 01 02 03 04 05 06 07 08 90 00"),
        1
    );
}

#[test]
fn long_uid_answer_is_cut_to_ten_bytes() {
    let mut rf = MockRf::new();
    rf.push_exchange(ScriptedExchange::ok(vec![0x90, 0x00]));
    rf.push_exchange(ScriptedExchange::ok((1..=16).collect()));
    let uid = read_id_card(&mut rf).unwrap();
    assert_eq!(uid, (1..=10).collect::<Vec<u8>>());
}

#[test]
fn silent_id_card_is_an_error() {
    let mut rf = MockRf::new();
    assert!(read_id_card(&mut rf).is_err());
    assert_eq!(rf.sent.len(), 2);
}

#[test]
fn nfcb_without_zero_prefix_is_only_identified() {
    let plain = nfcb_device(0x00, &[0x00, 0x00, 0x01, 0x00]);
    assert!(!is_id_card(&plain));
    assert_eq!(classify(&plain), Handler::NfcbIdentify);
    assert_eq!(classify(&fixtures::id_card_device()), Handler::NfcbIdCard);
    assert_eq!(classify(&fixtures::isodep_card_device()), Handler::NfcbApdu);
}

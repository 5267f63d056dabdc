#[path = "../common/mod.rs"]
mod common;

use tagloop::DiscoveryConfig;
use tagloop::Led;
use tagloop::constants::{COOL_DOWN_MS, PRESENCE_POLL_INTERVAL_MS};
use tagloop::demo::TickOutcome;
use tagloop::dispatch::Handler;
use tagloop::ndef::MockNdef;
use tagloop::ndef::mock::NdefCall;
use tagloop::rf::mock::RfCall;
use tagloop::test_support::{capture_logs, initialized_mock_demo, nfcv_device, take_logs};

use common::helpers::{count_line, tick_until_dispatched};

#[test]
fn hello_tag_is_read_dumped_and_waited_out() {
    capture_logs();
    let ndef = MockNdef::with_message(&common::fixtures::hello_message()).unwrap();
    let mut demo = initialized_mock_demo(ndef, DiscoveryConfig::default()).unwrap();
    assert_eq!(demo.tick(), TickOutcome::DiscoveryStarted);

    demo.rf_mut().inventory_successes = 3;
    demo.rf_mut().present(nfcv_device());
    assert_eq!(tick_until_dispatched(&mut demo, 5), Some(Handler::NfcvNdef));

    let logs = take_logs();
    assert_eq!(
        count_line(&logs, "ISO15693/NFC-V card found. UID: 08 07 06 05 04 03 02 01"),
        1
    );
    assert_eq!(count_line(&logs, "READ/WRITE NDEF detected."), 1);
    assert_eq!(count_line(&logs, " Record #1: Text (en) \"hello\""), 1);
    assert!(!logs.iter().any(|l| l.starts_with(" Record #2")));
    assert_eq!(count_line(&logs, "Tag can be removed from the field"), 1);

    // Three answered inventories, then the one that found the field empty
    assert_eq!(demo.rf().inventory_count(), 4);
    let presence_waits = demo
        .platform()
        .delays
        .iter()
        .filter(|&&d| d == PRESENCE_POLL_INTERVAL_MS)
        .count();
    assert_eq!(presence_waits, 3);
    assert_eq!(demo.platform().delays.last(), Some(&COOL_DOWN_MS));

    assert_eq!(demo.ndef().count(|c| *c == NdefCall::ReadRaw), 1);
    assert_eq!(
        demo.ndef().count(|c| matches!(c, NdefCall::WriteRaw(_) | NdefCall::Format(_))),
        0
    );
}

#[test]
fn nfcv_led_lit_during_handling_and_cleared_on_restart() {
    let mut demo = initialized_mock_demo(MockNdef::empty(), DiscoveryConfig::default()).unwrap();
    demo.tick();
    demo.rf_mut().present(nfcv_device());
    assert_eq!(demo.tick(), TickOutcome::Dispatched(Handler::NfcvNdef));
    assert!(demo.platform().led(Led::V));

    assert_eq!(demo.tick(), TickOutcome::DiscoveryStarted);
    assert!(!demo.platform().any_led_on());
}

#[test]
fn initialized_tag_is_not_read() {
    capture_logs();
    let mut demo = initialized_mock_demo(MockNdef::empty(), DiscoveryConfig::default()).unwrap();
    demo.tick();
    demo.rf_mut().present(nfcv_device());
    assert_eq!(tick_until_dispatched(&mut demo, 3), Some(Handler::NfcvNdef));

    let logs = take_logs();
    assert_eq!(count_line(&logs, "INITIALIZED NDEF detected."), 1);
    assert_eq!(demo.ndef().count(|c| *c == NdefCall::ReadRaw), 0);
    assert!(!logs.iter().any(|l| l.starts_with(" Record #")));
}

#[test]
fn each_tag_pass_handled_once() {
    let ndef = MockNdef::with_message(&common::fixtures::uri_and_text_message()).unwrap();
    let mut demo = initialized_mock_demo(ndef, DiscoveryConfig::default()).unwrap();
    demo.tick();

    for pass in 1..=3 {
        demo.rf_mut().present(nfcv_device());
        assert_eq!(tick_until_dispatched(&mut demo, 4), Some(Handler::NfcvNdef));
        assert_eq!(demo.tick(), TickOutcome::DiscoveryStarted);
        assert_eq!(demo.tick(), TickOutcome::Waiting);
        assert_eq!(demo.ndef().count(|c| *c == NdefCall::ReadRaw), pass);
    }
    assert_eq!(demo.rf().discover_count(), 4);
    let released = demo
        .rf()
        .calls
        .iter()
        .filter(|c| **c == RfCall::Deactivate(false))
        .count();
    // One deactivation after every handler and one before every discovery
    assert_eq!(released, 3 + 4);
}

#[test]
fn unreadable_message_still_releases_the_tag() {
    capture_logs();
    let mut ndef = MockNdef::with_message(&common::fixtures::hello_message()).unwrap();
    ndef.read_error = Some(tagloop::Error::Timeout);
    let mut demo = initialized_mock_demo(ndef, DiscoveryConfig::default()).unwrap();
    demo.tick();
    demo.rf_mut().present(nfcv_device());
    assert_eq!(tick_until_dispatched(&mut demo, 3), Some(Handler::NfcvNdef));

    let logs = take_logs();
    assert!(
        logs.iter()
            .any(|l| l.starts_with("NDEF message cannot be read"))
    );
    assert_eq!(count_line(&logs, "Operation completed"), 1);
    assert_eq!(demo.rf().inventory_count(), 1);
}

#[path = "../common/mod.rs"]
mod common;

use tagloop::flows::{DemoMessages, NdefFeature, NdefFlowOptions, NdefOutcome, Stage, run_ndef};
use tagloop::ndef::mock::NdefCall;
use tagloop::ndef::{MockNdef, SystemInformation};
use tagloop::rf::MockRf;
use tagloop::test_support::{capture_logs, nfcv_device, take_logs};
use tagloop::Error;

fn active_rf() -> MockRf {
    let mut rf = MockRf::new();
    rf.activate(nfcv_device());
    rf
}

fn options(feature: NdefFeature, verbose: bool, messages: &DemoMessages) -> NdefFlowOptions<'_> {
    NdefFlowOptions {
        feature,
        verbose,
        messages,
    }
}

#[test]
fn verbose_read_dumps_system_info_cc_and_raw_bytes() {
    capture_logs();
    let mut rf = active_rf();
    let mut ndef = MockNdef::with_message(&common::fixtures::uri_and_text_message()).unwrap();
    ndef.sys_info = Some(SystemInformation {
        info_flags: 0x0F,
        dsfid: 0x00,
        afi: 0x00,
        number_of_blocks: 0x7F,
        block_size: 0x03,
        ic_ref: 0x24,
        supported_cmd: 0,
    });
    let messages = DemoMessages::default();
    let mut buf = vec![0u8; 256];

    let outcome = run_ndef(
        &mut rf,
        &mut ndef,
        &nfcv_device(),
        &options(NdefFeature::Read, true, &messages),
        &mut buf,
    )
    .unwrap();
    assert_eq!(
        outcome,
        NdefOutcome::Read(common::fixtures::uri_and_text_message())
    );

    let logs = take_logs();
    assert!(logs.iter().any(|l| l.ends_with("byte(s) memory addressing")));
    assert!(logs.iter().any(|l| l.ends_with("] Special Frame")));
    assert!(logs.iter().any(|l| l.starts_with(" CC Raw Data (")));
    assert!(logs.iter().any(|l| l.starts_with(" NDEF Content (")));
    assert!(logs.iter().any(|l| l.starts_with("NDEF Len: ")));
    assert!(logs.iter().any(|l| l == " Record #1: URI https://www.st.com"));
    assert!(logs.iter().any(|l| l == " Record #2: Text (fr) \"bonjour\""));
}

#[test]
fn quiet_read_keeps_cc_summary_only() {
    capture_logs();
    let mut rf = active_rf();
    let mut ndef = MockNdef::with_message(&common::fixtures::hello_message()).unwrap();
    ndef.sys_info = Some(SystemInformation::default());
    let messages = DemoMessages::default();
    let mut buf = vec![0u8; 64];

    run_ndef(
        &mut rf,
        &mut ndef,
        &nfcv_device(),
        &options(NdefFeature::Read, false, &messages),
        &mut buf,
    )
    .unwrap();

    let logs = take_logs();
    assert!(logs.iter().any(|l| l.starts_with(" * Block Length: ")));
    assert!(logs.iter().any(|l| l.starts_with(" * Magic: E1h")));
    assert!(!logs.iter().any(|l| l.contains("memory addressing")));
    assert!(!logs.iter().any(|l| l.contains("Raw Data") || l.contains("NDEF Content")));
}

#[test]
fn message_larger_than_buffer_is_not_read() {
    let mut rf = active_rf();
    let mut ndef = MockNdef::with_message(&common::fixtures::uri_and_text_message()).unwrap();
    let messages = DemoMessages::default();
    let mut buf = [0u8; 8];

    let err = run_ndef(
        &mut rf,
        &mut ndef,
        &nfcv_device(),
        &options(NdefFeature::Read, false, &messages),
        &mut buf,
    )
    .unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Read));
    assert_eq!(ndef.count(|c| *c == NdefCall::ReadRaw), 0);
}

#[test]
fn released_tag_fails_at_context_init() {
    let mut rf = MockRf::new();
    let mut ndef = MockNdef::empty();
    let messages = DemoMessages::default();
    let mut buf = [0u8; 64];

    let err = run_ndef(
        &mut rf,
        &mut ndef,
        &nfcv_device(),
        &options(NdefFeature::WriteOneRecord, false, &messages),
        &mut buf,
    )
    .unwrap_err();
    assert_eq!(err.stage(), Some(Stage::ContextInit));
    assert!(matches!(
        err,
        Error::Flow { ref source, .. } if **source == Error::WrongState
    ));
    assert_eq!(ndef.calls.len(), 1);
}

#[test]
fn custom_messages_are_written() {
    let mut rf = active_rf();
    let mut ndef = MockNdef::empty();
    let messages = DemoMessages {
        uri: "tel:+33123456789".into(),
        ..DemoMessages::default()
    };
    let mut buf = vec![0u8; 128];

    let outcome = run_ndef(
        &mut rf,
        &mut ndef,
        &nfcv_device(),
        &options(NdefFeature::WriteOneRecord, false, &messages),
        &mut buf,
    )
    .unwrap();
    assert_eq!(outcome, NdefOutcome::Written(NdefFeature::WriteOneRecord));
    let stored = ndef.stored_message().unwrap();
    assert_eq!(stored.records()[0].payload[0], 0x05);
}

#[path = "../common/mod.rs"]
mod common;

use tagloop::constants::{LLCP_SNEP_CONNECT, LLCP_SYMM, P2P_KEEPALIVE_INTERVAL_MS, SNEP_PUT_URI};
use tagloop::dispatch::Handler;
use tagloop::flows::run_p2p;
use tagloop::ndef::MockNdef;
use tagloop::platform::MockPlatform;
use tagloop::rf::MockRf;
use tagloop::rf::mock::ScriptedExchange;
use tagloop::test_support::{capture_logs, initialized_mock_demo, take_logs};
use tagloop::{DiscoveryConfig, ExchangeStatus, Led, PollTechs};

use common::fixtures;
use common::helpers::{count_line, tick_until_dispatched};

fn script_link(rf: &mut MockRf, symm_answers: usize) {
    rf.push_exchange(ScriptedExchange::ok(vec![0x81, 0x84]));
    rf.push_exchange(ScriptedExchange::ok(vec![0x13, 0x20, 0x00, 0x10, 0x81]).after_busy(1));
    for _ in 0..symm_answers {
        rf.push_exchange(ScriptedExchange::ok(LLCP_SYMM.to_vec()));
    }
    rf.push_exchange(ScriptedExchange::failing(ExchangeStatus::Timeout));
}

#[test]
fn passive_target_gets_uri_then_keepalives() {
    capture_logs();
    let config = DiscoveryConfig::default().with_techs(PollTechs::A);
    let mut demo = initialized_mock_demo(MockNdef::empty(), config).unwrap();
    demo.tick();
    script_link(demo.rf_mut(), 4);
    demo.rf_mut().present(fixtures::nfca_p2p_device());

    assert_eq!(tick_until_dispatched(&mut demo, 3), Some(Handler::NfcaP2p));
    assert!(demo.platform().led(Led::A));

    let sent = &demo.rf().sent;
    assert_eq!(sent.len(), 2 + 5);
    assert_eq!(sent[0], LLCP_SNEP_CONNECT.to_vec());
    assert_eq!(sent[1], SNEP_PUT_URI.to_vec());
    assert!(sent[2..].iter().all(|f| *f == LLCP_SYMM.to_vec()));

    // settle, one wait per SYMM, cool-down
    let delays = &demo.platform().delays;
    assert_eq!(delays.len(), 1 + 5 + 1);
    assert!(delays[1..6].iter().all(|&d| d == P2P_KEEPALIVE_INTERVAL_MS));

    let logs = take_logs();
    assert_eq!(count_line(&logs, "NFCA Passive P2P device found. NFCID: 08 11 22 33"), 1);
    assert_eq!(count_line(&logs, " Initialize device .. succeeded."), 1);
    assert_eq!(count_line(&logs, " Push NDEF Uri: www.st.com .. succeeded."), 1);
    assert_eq!(count_line(&logs, " Device removed."), 1);
}

#[test]
fn active_initiator_runs_same_link() {
    let mut demo =
        initialized_mock_demo(MockNdef::empty(), DiscoveryConfig::active_p2p()).unwrap();
    demo.tick();
    script_link(demo.rf_mut(), 0);
    demo.rf_mut().present(fixtures::ap2p_device());

    assert_eq!(tick_until_dispatched(&mut demo, 3), Some(Handler::ActiveP2p));
    assert!(demo.platform().led(Led::Ap2p));
    assert_eq!(demo.rf().sent.len(), 3);
}

#[test]
fn failed_connect_skips_push_and_keepalive() {
    capture_logs();
    let mut rf = MockRf::new();
    rf.push_exchange(ScriptedExchange::failing(ExchangeStatus::Protocol));
    let mut platform = MockPlatform::new();

    assert!(run_p2p(&mut rf, &mut platform).is_err());
    assert_eq!(rf.sent.len(), 1);
    assert!(platform.delays.is_empty());
    assert!(
        take_logs()
            .iter()
            .any(|l| l.starts_with(" Initialize device .. failed"))
    );
}

#[test]
fn keepalive_count_matches_answered_symm() {
    let mut rf = MockRf::new();
    script_link(&mut rf, 7);
    let mut platform = MockPlatform::new();
    let report = run_p2p(&mut rf, &mut platform).unwrap();
    assert_eq!(report.keepalives, 7);
}

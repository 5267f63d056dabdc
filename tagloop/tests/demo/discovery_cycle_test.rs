#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use tagloop::constants::BUTTON_DEBOUNCE_MS;
use tagloop::demo::{DemoState, TickOutcome};
use tagloop::dispatch::Handler;
use tagloop::ndef::MockNdef;
use tagloop::platform::Platform;
use tagloop::rf::mock::RfCall;
use tagloop::rf::{RfEvent, RfState};
use tagloop::test_support::{capture_logs, initialized_mock_demo, take_logs};
use tagloop::{DiscoveryConfig, Error, Led, PollTechs};

use common::helpers::{count_line, tick_until_dispatched};

fn arb_config() -> impl Strategy<Value = DiscoveryConfig> {
    (1u16..=PollTechs::ALL.bits(), 1u8..=4, any::<bool>(), any::<bool>()).prop_map(
        |(bits, limit, wakeup, notify)| {
            let mut cfg = DiscoveryConfig::default();
            cfg.techs = PollTechs::from_bits_truncate(bits);
            cfg.device_limit = limit;
            cfg.wakeup_enabled = wakeup;
            cfg.notify_events = notify;
            cfg
        },
    )
}

proptest! {
    #[test]
    fn discovery_start_clears_leds_then_releases_then_discovers(cfg in arb_config()) {
        let mut demo = initialized_mock_demo(MockNdef::empty(), cfg.clone()).unwrap();
        for led in [Led::A, Led::V, Led::Field] {
            demo.platform_mut().led_on(led);
        }
        prop_assert_eq!(demo.tick(), TickOutcome::DiscoveryStarted);
        prop_assert!(!demo.platform().any_led_on());
        prop_assert_eq!(
            demo.rf().calls.clone(),
            vec![RfCall::Initialize, RfCall::Deactivate(false), RfCall::Discover(cfg)]
        );
        prop_assert_eq!(demo.state(), DemoState::Discovery);
    }
}

#[test]
fn failed_initialization_leaves_loop_idle() {
    capture_logs();
    let mut demo = tagloop::Demo::new(
        tagloop::rf::MockRf::new(),
        MockNdef::empty(),
        tagloop::platform::MockPlatform::new(),
        DiscoveryConfig::default(),
    );
    demo.rf_mut().fail_initialize = true;
    assert_eq!(demo.initialize(), Err(Error::InitFailed));
    for _ in 0..3 {
        assert_eq!(demo.tick(), TickOutcome::NotInitialized);
    }
    assert_eq!(demo.rf().discover_count(), 0);
    assert!(
        take_logs()
            .iter()
            .any(|l| l.starts_with("Initialization failed"))
    );
}

#[test]
fn invalid_config_is_rejected_before_rf_bring_up() {
    let cfg = DiscoveryConfig::default().with_techs(PollTechs::NONE);
    let mut demo = tagloop::Demo::new(
        tagloop::rf::MockRf::new(),
        MockNdef::empty(),
        tagloop::platform::MockPlatform::new(),
        cfg,
    );
    assert!(matches!(demo.initialize(), Err(Error::InvalidConfig(_))));
    assert!(demo.rf().calls.is_empty());
}

#[test]
fn wakeup_toggle_restarts_discovery_and_reports_events() {
    capture_logs();
    let mut demo = initialized_mock_demo(MockNdef::empty(), DiscoveryConfig::nfcv()).unwrap();
    demo.tick();

    demo.platform_mut().press_button(3);
    demo.tick();
    demo.platform_mut().advance(u64::from(BUTTON_DEBOUNCE_MS));
    assert_eq!(demo.tick(), TickOutcome::DiscoveryStarted);
    assert!(demo.config().wakeup_enabled);

    demo.rf_mut()
        .push_event(RfEvent::StateChanged(RfState::WakeupMode));
    demo.tick();
    demo.rf_mut()
        .push_event(RfEvent::StateChanged(RfState::PollTechDetect));
    demo.tick();

    let logs = take_logs();
    assert_eq!(count_line(&logs, "Toggling Wake Up mode ON"), 1);
    assert_eq!(count_line(&logs, "Wake Up mode started"), 1);
    assert_eq!(
        count_line(&logs, "Wake Up mode terminated. Polling for devices"),
        1
    );
    assert_eq!(demo.rf().discover_count(), 2);
}

#[test]
fn short_glitch_on_button_is_ignored() {
    let mut demo = initialized_mock_demo(MockNdef::empty(), DiscoveryConfig::default()).unwrap();
    demo.tick();
    demo.platform_mut().press_button(1);
    demo.tick();
    demo.tick();
    assert!(!demo.config().wakeup_enabled);
    assert_eq!(demo.rf().discover_count(), 1);
}

#[test]
fn unsupported_technology_is_released_without_handling() {
    let mut demo = initialized_mock_demo(
        MockNdef::empty(),
        DiscoveryConfig::default().with_techs(PollTechs::F),
    )
    .unwrap();
    demo.tick();
    demo.rf_mut().present(tagloop::ActiveDevice::new(
        tagloop::Technology::NfcF,
        tagloop::test_support::nfcid(&[1, 2, 3, 4, 5, 6, 7, 8]),
    ));
    assert_eq!(tick_until_dispatched(&mut demo, 3), Some(Handler::Ignore));
    assert!(demo.ndef().calls.is_empty());
    assert!(demo.rf().sent.is_empty());
    assert_eq!(demo.tick(), TickOutcome::DiscoveryStarted);
}

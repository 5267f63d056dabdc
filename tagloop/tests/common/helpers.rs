// helpers.rs: build and drive a demo loop over the mock collaborators

use tagloop::demo::{ButtonAction, DemoBuilder, TickOutcome};
use tagloop::dispatch::Handler;
use tagloop::ndef::MockNdef;
use tagloop::platform::MockPlatform;
use tagloop::rf::MockRf;
use tagloop::test_support::MockDemo;
use tagloop::{DiscoveryConfig, Result};

/// Initialized demo with an immediate (undebounced) feature-cycling
/// button, already past its first discovery start.
pub fn menu_demo(ndef: MockNdef, config: DiscoveryConfig) -> Result<MockDemo> {
    let mut demo = DemoBuilder::new()
        .with_rf(MockRf::new())
        .with_ndef(ndef)
        .with_platform(MockPlatform::new())
        .config(config)
        .button_action(ButtonAction::CycleFeature)
        .debounce_ms(0)
        .build()?;
    demo.initialize()?;
    demo.tick();
    Ok(demo)
}

/// One press and release of the user button, two ticks.
pub fn press(demo: &mut MockDemo) {
    demo.platform_mut().press_button(1);
    demo.tick();
    demo.tick();
}

/// Tick until a handler runs, giving up after `max_ticks`.
pub fn tick_until_dispatched(demo: &mut MockDemo, max_ticks: usize) -> Option<Handler> {
    (0..max_ticks).find_map(|_| match demo.tick() {
        TickOutcome::Dispatched(handler) => Some(handler),
        _ => None,
    })
}

pub fn count_line(logs: &[String], line: &str) -> usize {
    logs.iter().filter(|l| *l == line).count()
}

// Host-side run of the discovery loop against the mock collaborators.
//
// A few devices are scripted to arrive one after another: an NFC-V tag
// holding a text record, an ISO-DEP card and a passive P2P target. Run with
// `RUST_LOG=info cargo run --example simulated_loop` to see the operator log.

use anyhow::Context;
use tagloop::demo::TickOutcome;
use tagloop::ndef::{MockNdef, NdefMessage, NdefRecord};
use tagloop::platform::MockPlatform;
use tagloop::prelude::*;
use tagloop::rf::MockRf;
use tagloop::rf::mock::{Arrival, ScriptedExchange};
use tagloop::test_support::{nfcb_device, nfcid, nfcv_device};

const MAX_TICKS: usize = 200;

fn scripted_rf() -> MockRf {
    let mut rf = MockRf::new();
    rf.inventory_successes = 2;

    rf.arrivals.push_back(Arrival {
        after_workers: 3,
        device: nfcv_device(),
    });

    // ISO-DEP card: SELECT application, SELECT CC, READ BINARY
    rf.arrivals.push_back(Arrival {
        after_workers: 5,
        device: nfcb_device(0x01, &[0x11, 0x22, 0x33, 0x44]),
    });
    rf.push_exchange(ScriptedExchange::ok(vec![0x90, 0x00]));
    rf.push_exchange(ScriptedExchange::ok(vec![0x90, 0x00]).after_busy(3));
    rf.push_exchange(ScriptedExchange::ok(vec![
        0x00, 0x0F, 0x20, 0x00, 0x3B, 0x00, 0x34, 0x04, 0x06, 0xE1, 0x04, 0x00, 0xFF, 0x00, 0xFF,
        0x90, 0x00,
    ]));

    // Passive P2P target: connect, push, two keep-alives then gone
    rf.arrivals.push_back(Arrival {
        after_workers: 5,
        device: ActiveDevice::new(
            Technology::NfcA(NfcaSubtype::NfcDep),
            nfcid(&[0x08, 0x11, 0x22, 0x33]),
        ),
    });
    rf.push_exchange(ScriptedExchange::ok(vec![0x81, 0x84]));
    rf.push_exchange(ScriptedExchange::ok(vec![0x13, 0x20, 0x00, 0x10, 0x81]));
    rf.push_exchange(ScriptedExchange::ok(vec![0x00, 0x00]));
    rf.push_exchange(ScriptedExchange::ok(vec![0x00, 0x00]));
    rf.push_exchange(ScriptedExchange::failing(ExchangeStatus::Timeout));
    rf
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let message = NdefMessage::new().with(NdefRecord::text("en", "hello")?);
    let ndef = MockNdef::with_message(&message).context("encoding tag contents")?;

    let config = DiscoveryConfig::default().with_techs(PollTechs::A | PollTechs::B | PollTechs::V);
    let mut demo = DemoBuilder::new()
        .with_rf(scripted_rf())
        .with_ndef(ndef)
        .with_platform(MockPlatform::new())
        .config(config)
        .verbose(true)
        .build()
        .context("building demo loop")?;
    demo.initialize().context("bringing up the RF layer")?;

    let mut handled = Vec::new();
    for _ in 0..MAX_TICKS {
        if let TickOutcome::Dispatched(handler) = demo.tick() {
            handled.push(handler);
        }
        if demo.rf().arrivals.is_empty() && demo.state() == DemoState::Discovery {
            break;
        }
    }

    println!("\n=== Handled devices ===");
    for (i, handler) in handled.iter().enumerate() {
        println!("  #{} {:?}", i + 1, handler);
    }
    println!(
        "Simulated time: {} ms, discovery passes: {}",
        demo.platform().now,
        demo.rf().discover_count()
    );
    Ok(())
}

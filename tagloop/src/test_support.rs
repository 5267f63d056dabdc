//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize log capture and the common mock setup so tests
//! across the crate and the tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::DiscoveryConfig;
use crate::demo::Demo;
use crate::ndef::{MessageCodec, MockNdef, NdefMessage, NdefRecord, TestCodec};
use crate::platform::MockPlatform;
use crate::rf::MockRf;
use crate::types::{ActiveDevice, NfcbInfo, Nfcid, Technology};
use crate::Result;

thread_local! {
    static CAPTURED: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| {
            if let Some(lines) = c.borrow_mut().as_mut() {
                lines.push((record.level(), record.args().to_string()));
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Start capturing log records emitted on the current thread. Discards
/// anything captured earlier on this thread.
#[doc(hidden)]
pub fn capture_logs() {
    INSTALL.call_once(|| {
        // Another logger may already be installed; capture is then a no-op.
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    CAPTURED.with(|c| *c.borrow_mut() = Some(Vec::new()));
}

/// Drain captured records with their level.
#[doc(hidden)]
pub fn take_records() -> Vec<(Level, String)> {
    CAPTURED.with(|c| c.borrow_mut().as_mut().map(std::mem::take).unwrap_or_default())
}

/// Drain captured messages.
#[doc(hidden)]
pub fn take_logs() -> Vec<String> {
    take_records().into_iter().map(|(_, msg)| msg).collect()
}

/// NFC-V tag with UID 01 02 .. 08 (as received, LSB first)
#[doc(hidden)]
pub fn nfcv_device() -> ActiveDevice {
    ActiveDevice::new(Technology::NfcV, nfcid(&[1, 2, 3, 4, 5, 6, 7, 8]))
}

#[doc(hidden)]
pub fn nfcb_device(protocol_type: u8, id: &[u8]) -> ActiveDevice {
    ActiveDevice::new(Technology::NfcB(NfcbInfo::new(protocol_type)), nfcid(id))
}

/// Panics when `bytes` is longer than an NFCID.
#[doc(hidden)]
pub fn nfcid(bytes: &[u8]) -> Nfcid {
    match Nfcid::try_from(bytes) {
        Ok(id) => id,
        Err(e) => panic!("bad test nfcid: {}", e),
    }
}

/// Raw bytes of a single English text record
#[doc(hidden)]
pub fn text_message_raw(text: &str) -> Result<Vec<u8>> {
    let message = NdefMessage::new().with(NdefRecord::text("en", text)?);
    let mut buf = vec![0u8; text.len() + 16];
    let n = TestCodec.encode(&message, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

pub type MockDemo = Demo<MockRf, MockNdef, MockPlatform>;

/// Convenience: create and initialize a demo loop over fresh mocks, with
/// `ndef` as the tag contents. Delays are kept at their defaults.
#[doc(hidden)]
pub fn initialized_mock_demo(ndef: MockNdef, config: DiscoveryConfig) -> Result<MockDemo> {
    let mut demo = Demo::new(MockRf::new(), ndef, MockPlatform::new(), config);
    demo.initialize()?;
    Ok(demo)
}

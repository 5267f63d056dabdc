// tagloop/src/constants.rs
//! Timing, sizing and protocol constants used across the crate

/// Delay between deactivating a tag and restarting discovery (ms)
pub const COOL_DOWN_MS: u32 = 500;

/// Delay after activation before a flow runs (ms)
pub const ACTIVATION_SETTLE_MS: u32 = 50;

/// Spacing of NFC-V inventory commands while waiting for tag removal (ms)
pub const PRESENCE_POLL_INTERVAL_MS: u32 = 130;

/// Spacing of LLCP SYMM frames while a P2P link is kept alive (ms)
pub const P2P_KEEPALIVE_INTERVAL_MS: u32 = 50;

/// Write/format menu selection reverts to read after this long (ms)
pub const WRITE_FORMAT_TIMEOUT_MS: u32 = 10_000;

/// LED blink period while a destructive menu feature is armed (ms)
pub const LED_BLINK_MS: u32 = 250;

/// The button must read low this long before a press is reported (ms)
pub const BUTTON_DEBOUNCE_MS: u32 = 50;

/// Default capacity of the raw NDEF message buffer in bytes
pub const DEFAULT_RAW_MESSAGE_CAPACITY: usize = 8192;

/// Default total discovery duration (ms)
pub const DEFAULT_DISCOVERY_DURATION_MS: u16 = 1000;

/// Longest NFCID handled (NFCID3 is 10 bytes)
pub const NFCID_MAX_LEN: usize = 10;

/// NFC-V UID length
pub const NFCV_UID_LEN: usize = 8;

/// Maximum NFC-DEP general bytes length
pub const NFCDEP_GB_MAX_LEN: usize = 48;

/// ISO 14443-4 compliance bit in the NFC-B ATQB protocol-info byte
pub const NFCB_PROTOCOL_TYPE_ISODEP: u8 = 0x01;

/// Number of UID bytes logged by the ID-card flow
pub const ID_CARD_UID_LOG_LEN: usize = 10;

/// NFC Forum Type 4 NDEF application identifier
pub const NDEF_APPLICATION_AID: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

/// Type 4 capability container file identifier
pub const CC_FILE_ID: [u8; 2] = [0xE1, 0x03];

/// Number of CC bytes requested by the read-binary step
pub const CC_READ_LEN: u8 = 0x0F;

/// Default local NFCID3 advertised in P2P mode
pub const P2P_NFCID3: [u8; 10] = [0x01, 0xFE, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A];

/// Default LLCP general bytes advertised in P2P mode
pub const P2P_GENERAL_BYTES: [u8; 20] = [
    0x46, 0x66, 0x6d, 0x01, 0x01, 0x11, 0x02, 0x02, 0x07, 0x80, 0x03, 0x02, 0x00, 0x03, 0x04,
    0x01, 0x32, 0x07, 0x01, 0x03,
];

/// LLCP SYMM PDU
pub const LLCP_SYMM: [u8; 2] = [0x00, 0x00];

/// LLCP CONNECT to the SNEP service (`urn:nfc:sn:snep`)
pub const LLCP_SNEP_CONNECT: [u8; 26] = [
    0x05, 0x20, 0x06, 0x0F, 0x75, 0x72, 0x6E, 0x3A, 0x6E, 0x66, 0x63, 0x3A, 0x73, 0x6E, 0x3A,
    0x73, 0x6E, 0x65, 0x70, 0x02, 0x02, 0x07, 0x80, 0x05, 0x01, 0x02,
];

/// LLCP I-frame carrying a SNEP PUT of a URI record for `http://www.st.com`
pub const SNEP_PUT_URI: [u8; 34] = [
    0x13, 0x20, 0x00, 0x10, 0x02, 0x00, 0x00, 0x00, 0x19, 0xc1, 0x01, 0x00, 0x00, 0x00, 0x12,
    0x55, 0x00, 0x68, 0x74, 0x74, 0x70, 0x3a, 0x2f, 0x2f, 0x77, 0x77, 0x77, 0x2e, 0x73, 0x74,
    0x2e, 0x63, 0x6f, 0x6d,
];

/// ISO 14443-B ATTRIB used to activate an ID card without ISO-DEP support
pub const ID_CARD_ATTRIB: [u8; 9] = [0x1d, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x01, 0x00];

/// Proprietary GET UID command of the ID card
pub const ID_CARD_GET_UID: [u8; 5] = [0x00, 0x36, 0x00, 0x00, 0x08];

/// Android package launched by the default AAR record
pub const DEFAULT_AAR_PACKAGE: &str = "com.st.st25nfc";

/// Default URI written by the one-record message
pub const DEFAULT_URI: &str = "https://www.st.com/st25-demo";

/// Default text appended by the two-record message
pub const DEFAULT_TEXT: &str = "Welcome to ST NFC demo";

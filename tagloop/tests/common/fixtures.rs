// fixtures.rs: provides commonly used devices, tag contents and APDU frames

use tagloop::ndef::{NdefMessage, NdefRecord};
use tagloop::test_support::{nfcb_device, nfcid};
use tagloop::{ActiveDevice, NfcaSubtype, Technology};

fn frame(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("fixture hex")
}

pub fn hello_message() -> NdefMessage {
    NdefMessage::new().with(NdefRecord::text("en", "hello").expect("text record"))
}

pub fn uri_and_text_message() -> NdefMessage {
    NdefMessage::new()
        .with(NdefRecord::uri("https://www.st.com"))
        .with(NdefRecord::text("fr", "bonjour").expect("text record"))
}

pub fn nfca_p2p_device() -> ActiveDevice {
    ActiveDevice::new(
        Technology::NfcA(NfcaSubtype::NfcDep),
        nfcid(&[0x08, 0x11, 0x22, 0x33]),
    )
}

pub fn nfca_t2t_device() -> ActiveDevice {
    ActiveDevice::new(
        Technology::NfcA(NfcaSubtype::T2t),
        nfcid(&[0x04, 0xA1, 0xB2, 0xC3, 0xD4, 0xE5, 0xF6]),
    )
}

pub fn ap2p_device() -> ActiveDevice {
    ActiveDevice::new(Technology::ActiveP2p, nfcid(&tagloop::constants::P2P_NFCID3))
}

/// NFC-B card with ISO-DEP support
pub fn isodep_card_device() -> ActiveDevice {
    nfcb_device(0x01, &[0x11, 0x22, 0x33, 0x44])
}

/// NFC-B card without ISO-DEP whose PUPI starts with four zero bytes
pub fn id_card_device() -> ActiveDevice {
    nfcb_device(0x00, &[0x00, 0x00, 0x00, 0x00, 0x5A, 0x6B])
}

pub fn select_ndef_app_frame() -> Vec<u8> {
    frame("00a4040007d276000085010100")
}

pub fn select_cc_frame() -> Vec<u8> {
    frame("00a4000c02e103")
}

pub fn read_cc_frame() -> Vec<u8> {
    frame("00b000000f")
}

pub fn sw_success() -> Vec<u8> {
    frame("9000")
}

pub fn sw_file_not_found() -> Vec<u8> {
    frame("6a82")
}

/// Type 4 CC file followed by SW 90 00
pub fn cc_file_response() -> Vec<u8> {
    frame("000f20003b00340406e10400ff00ff9000")
}

/// GET UID answer of an identity card: 8 UID bytes and SW 90 00
pub fn id_card_uid_response() -> Vec<u8> {
    frame("01020304050607089000")
}

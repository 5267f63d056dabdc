// tagloop/src/protocol/apdu.rs

//! ISO 7816-4 command APDUs used by the ISO-DEP flow.

use crate::constants::{CC_FILE_ID, CC_READ_LEN, NDEF_APPLICATION_AID};
use crate::{Error, Result};

const INS_SELECT: u8 = 0xA4;
const INS_READ_BINARY: u8 = 0xB0;
/// Lc is a single byte in a short APDU
const MAX_DATA_LEN: usize = u8::MAX as usize;

/// Short command APDU (CLA INS P1 P2 [Lc data] [Le])
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apdu {
    cla: u8,
    ins: u8,
    p1: u8,
    p2: u8,
    data: Vec<u8>,
    le: Option<u8>,
}

impl Apdu {
    /// SELECT by DF name (application identifier), first occurrence
    pub fn select_application(aid: &[u8]) -> Result<Self> {
        if aid.len() > MAX_DATA_LEN {
            return Err(Error::InvalidLength {
                max: MAX_DATA_LEN,
                actual: aid.len(),
            });
        }
        Ok(Self {
            cla: 0x00,
            ins: INS_SELECT,
            p1: 0x04,
            p2: 0x00,
            data: aid.to_vec(),
            le: Some(0x00),
        })
    }

    /// SELECT elementary file by identifier, no response data
    pub fn select_file(file_id: [u8; 2]) -> Self {
        Self {
            cla: 0x00,
            ins: INS_SELECT,
            p1: 0x00,
            p2: 0x0C,
            data: file_id.to_vec(),
            le: None,
        }
    }

    /// READ BINARY of `len` bytes at `offset` in the selected file
    pub fn read_binary(offset: u16, len: u8) -> Self {
        let [hi, lo] = offset.to_be_bytes();
        Self {
            cla: 0x00,
            ins: INS_READ_BINARY,
            p1: hi & 0x7F,
            p2: lo,
            data: Vec::new(),
            le: Some(len),
        }
    }

    pub fn select_ndef_application() -> Result<Self> {
        Self::select_application(&NDEF_APPLICATION_AID)
    }

    pub fn select_cc_file() -> Self {
        Self::select_file(CC_FILE_ID)
    }

    pub fn read_cc_file() -> Self {
        Self::read_binary(0, CC_READ_LEN)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(6 + self.data.len());
        out.extend_from_slice(&[self.cla, self.ins, self.p1, self.p2]);
        // Constructors keep `data` within a single-byte Lc
        if let Ok(lc @ 1..) = u8::try_from(self.data.len()) {
            out.push(lc);
            out.extend_from_slice(&self.data);
        }
        if let Some(le) = self.le {
            out.push(le);
        }
        out
    }
}

/// Trailing SW1 SW2 of a response APDU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusWord(u16);

impl StatusWord {
    pub const SUCCESS: Self = Self(0x9000);

    pub const fn new(sw: u16) -> Self {
        Self(sw)
    }

    /// Extract the status word from the last two bytes of a response.
    pub fn from_response(resp: &[u8]) -> Option<Self> {
        match resp {
            [.., sw1, sw2] => Some(Self(u16::from_be_bytes([*sw1, *sw2]))),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }
}

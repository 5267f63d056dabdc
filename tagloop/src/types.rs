// tagloop/src/types.rs

use std::convert::TryFrom;
use std::ops::BitOr;

use derive_more::Display;

use crate::Error;
use crate::constants::{NFCB_PROTOCOL_TYPE_ISODEP, NFCID_MAX_LEN};

/// Device identifier (UID / NFCID1 / PUPI / NFCID3), at most 10 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nfcid {
    bytes: [u8; NFCID_MAX_LEN],
    len: u8,
}

impl Nfcid {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy with byte order reversed. NFC-V UIDs travel LSB first and are
    /// shown MSB first.
    pub fn reversed(&self) -> Self {
        let mut out = *self;
        out.bytes[..self.len()].reverse();
        out
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Nfcid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() > NFCID_MAX_LEN {
            return Err(Error::InvalidLength {
                max: NFCID_MAX_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; NFCID_MAX_LEN];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len() as u8,
        })
    }
}

/// NFC-A listener subtype reported at activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NfcaSubtype {
    T1t,
    T2t,
    T4t,
    NfcDep,
    T4tNfcDep,
}

/// NFC-B sub-record: the protocol-info byte of the ATQB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NfcbInfo {
    pub protocol_type: u8,
}

impl NfcbInfo {
    pub const fn new(protocol_type: u8) -> Self {
        Self { protocol_type }
    }

    pub fn is_iso_dep_supported(&self) -> bool {
        self.protocol_type & NFCB_PROTOCOL_TYPE_ISODEP != 0
    }
}

/// Technology of an activated device, with its technology-specific data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Technology {
    #[display(fmt = "NFC-A")]
    NfcA(NfcaSubtype),
    #[display(fmt = "NFC-B")]
    NfcB(NfcbInfo),
    #[display(fmt = "NFC-F")]
    NfcF,
    #[display(fmt = "NFC-V")]
    NfcV,
    #[display(fmt = "ST25TB")]
    St25tb,
    #[display(fmt = "AP2P")]
    ActiveP2p,
}

/// The currently activated remote device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDevice {
    technology: Technology,
    nfcid: Nfcid,
}

impl ActiveDevice {
    pub fn new(technology: Technology, nfcid: Nfcid) -> Self {
        Self { technology, nfcid }
    }

    pub fn technology(&self) -> Technology {
        self.technology
    }

    pub fn nfcid(&self) -> &Nfcid {
        &self.nfcid
    }
}

/// Technologies probed during discovery (bitmask)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollTechs(u16);

impl PollTechs {
    pub const NONE: Self = Self(0x0000);
    pub const A: Self = Self(0x0001);
    pub const B: Self = Self(0x0002);
    pub const F: Self = Self(0x0004);
    pub const V: Self = Self(0x0008);
    pub const AP2P: Self = Self(0x0010);
    pub const ST25TB: Self = Self(0x0020);
    pub const ALL: Self = Self(0x003F);

    /// Unknown bits are dropped.
    pub const fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for PollTechs {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Compliance mode used by the RF layer during discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComplianceMode {
    #[default]
    Nfc,
    Emv,
    Iso,
}

/// RF bit rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitRate {
    Br106,
    Br212,
    Br424,
    Br848,
}

/// Frame waiting time in 1/fc units, or [`Fwt::NONE`] to let the active
/// protocol (ISO-DEP, NFC-DEP) pick its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fwt(u32);

impl Fwt {
    pub const NONE: Self = Self(u32::MAX);

    pub const fn new(fc: u32) -> Self {
        Self(fc)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Final or intermediate status of a data exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeStatus {
    Busy,
    Success,
    Timeout,
    Framing,
    Protocol,
    Param,
}

impl ExchangeStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, ExchangeStatus::Busy)
    }

    pub fn into_result(self) -> crate::Result<()> {
        match self {
            ExchangeStatus::Success => Ok(()),
            ExchangeStatus::Busy => Err(Error::Busy),
            ExchangeStatus::Timeout => Err(Error::Timeout),
            ExchangeStatus::Framing => Err(Error::Framing),
            ExchangeStatus::Protocol => Err(Error::Protocol),
            ExchangeStatus::Param => Err(Error::Param),
        }
    }
}

/// Board indicator LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Led {
    A,
    B,
    F,
    V,
    Ap2p,
    Field,
}

impl Led {
    pub const ALL: [Led; 6] = [Led::A, Led::B, Led::F, Led::V, Led::Ap2p, Led::Field];

    pub fn index(&self) -> usize {
        match self {
            Led::A => 0,
            Led::B => 1,
            Led::F => 2,
            Led::V => 3,
            Led::Ap2p => 4,
            Led::Field => 5,
        }
    }
}

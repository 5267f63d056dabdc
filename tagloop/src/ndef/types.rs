// tagloop/src/ndef/types.rs

use derive_more::Display;

use crate::types::ActiveDevice;
use crate::{Error, Result};

/// NDEF lifecycle state of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NdefState {
    /// Not NDEF formatted; only format is meaningful
    #[display(fmt = "INVALID")]
    Invalid,
    /// Formatted, no message yet
    #[display(fmt = "INITIALIZED")]
    Initialized,
    #[display(fmt = "READ/WRITE")]
    ReadWrite,
    #[display(fmt = "READ-ONLY")]
    ReadOnly,
}

/// Result of an NDEF detect procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NdefInfo {
    pub major_version: u8,
    pub minor_version: u8,
    pub area_len: u32,
    pub area_available_space_len: u32,
    pub message_len: u32,
    pub state: NdefState,
}

const T5T_MAGIC_1: u8 = 0xE1;
const T5T_MAGIC_2: u8 = 0xE2;
const T5T_FLAG_MBREAD: u8 = 0x01;
const T5T_FLAG_LOCK_BLOCK: u8 = 0x08;
const T5T_FLAG_SPECIAL_FRAME: u8 = 0x10;

/// Type 5 tag capability container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct T5tCapabilityContainer {
    /// 4 or 8 bytes
    pub cc_len: u8,
    pub magic_number: u8,
    pub major_version: u8,
    pub minor_version: u8,
    /// Data area size in 8-byte units
    pub memory_len: u16,
    pub read_access: u8,
    pub write_access: u8,
    pub special_frame: bool,
    pub multiple_block_read: bool,
    pub lock_block: bool,
}

impl T5tCapabilityContainer {
    /// Version 1.0 CC with free read/write access for a data area of
    /// `area_bytes` bytes.
    pub fn for_area(area_bytes: usize) -> Self {
        let units = (area_bytes / 8) as u32;
        let (magic_number, cc_len) = if units > 0xFF {
            (T5T_MAGIC_2, 8)
        } else {
            (T5T_MAGIC_1, 4)
        };
        Self {
            cc_len,
            magic_number,
            major_version: 1,
            minor_version: 0,
            memory_len: units.min(u32::from(u16::MAX)) as u16,
            read_access: 0,
            write_access: 0,
            special_frame: false,
            multiple_block_read: true,
            lock_block: false,
        }
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        if raw.len() < 4 {
            return Err(Error::InvalidLength {
                max: 4,
                actual: raw.len(),
            });
        }
        let magic_number = raw[0];
        if magic_number != T5T_MAGIC_1 && magic_number != T5T_MAGIC_2 {
            return Err(Error::NotNdef);
        }
        let (cc_len, memory_len) = if raw[2] == 0 {
            if raw.len() < 8 {
                return Err(Error::InvalidLength {
                    max: 8,
                    actual: raw.len(),
                });
            }
            (8, u16::from_be_bytes([raw[6], raw[7]]))
        } else {
            (4, u16::from(raw[2]))
        };
        Ok(Self {
            cc_len,
            magic_number,
            major_version: (raw[1] >> 6) & 0x03,
            minor_version: (raw[1] >> 4) & 0x03,
            memory_len,
            read_access: (raw[1] >> 2) & 0x03,
            write_access: raw[1] & 0x03,
            special_frame: raw[3] & T5T_FLAG_SPECIAL_FRAME != 0,
            multiple_block_read: raw[3] & T5T_FLAG_MBREAD != 0,
            lock_block: raw[3] & T5T_FLAG_LOCK_BLOCK != 0,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let version = (self.major_version & 0x03) << 6
            | (self.minor_version & 0x03) << 4
            | (self.read_access & 0x03) << 2
            | (self.write_access & 0x03);
        let mut flags = 0u8;
        if self.multiple_block_read {
            flags |= T5T_FLAG_MBREAD;
        }
        if self.lock_block {
            flags |= T5T_FLAG_LOCK_BLOCK;
        }
        if self.special_frame {
            flags |= T5T_FLAG_SPECIAL_FRAME;
        }
        if self.cc_len == 8 {
            let [hi, lo] = self.memory_len.to_be_bytes();
            vec![self.magic_number, version, 0x00, flags, 0x00, 0x00, hi, lo]
        } else {
            vec![self.magic_number, version, self.memory_len as u8, flags]
        }
    }

    /// Data area size in bytes
    pub fn memory_bytes(&self) -> u32 {
        u32::from(self.memory_len) * 8
    }
}

const SYSINFO_DSFID: u8 = 0x01;
const SYSINFO_AFI: u8 = 0x02;
const SYSINFO_MEMSIZE: u8 = 0x04;
const SYSINFO_ICREF: u8 = 0x08;
const SYSINFO_MOI: u8 = 0x10;
const SYSINFO_CMDLIST: u8 = 0x20;

/// Names of the commands in the system-information command list, indexed
/// by bit position.
pub const SYSINFO_COMMANDS: [(u32, &str); 22] = [
    (0, "ReadSingleBlock"),
    (1, "WriteSingleBlock"),
    (2, "LockSingleBlock"),
    (3, "ReadMultipleBlocks"),
    (4, "WriteMultipleBlocks"),
    (5, "Select"),
    (6, "ResetToReady"),
    (7, "GetMultipleBlockSecStatus"),
    (8, "WriteAFI"),
    (9, "LockAFI"),
    (10, "WriteDSFID"),
    (11, "LockDSFID"),
    (12, "GetSystemInformation"),
    (13, "CustomCmds"),
    (14, "FastReadMultipleBlocks"),
    (16, "ExtReadSingleBlock"),
    (17, "ExtWriteSingleBlock"),
    (18, "ExtLockSingleBlock"),
    (19, "ExtReadMultipleBlocks"),
    (20, "ExtWriteMultipleBlocks"),
    (21, "ExtGetMultipleBlockSecStatus"),
    (22, "FastExtendedReadMultipleBlocks"),
];

/// NFC-V (extended) Get System Information response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemInformation {
    pub info_flags: u8,
    pub dsfid: u8,
    pub afi: u8,
    pub number_of_blocks: u16,
    pub block_size: u8,
    pub ic_ref: u8,
    pub supported_cmd: u32,
}

impl SystemInformation {
    /// Bytes used to address a block (1 or 2)
    pub fn memory_addressing_bytes(&self) -> u8 {
        if self.info_flags & SYSINFO_MOI != 0 { 2 } else { 1 }
    }

    pub fn dsfid_present(&self) -> bool {
        self.info_flags & SYSINFO_DSFID != 0
    }

    pub fn afi_present(&self) -> bool {
        self.info_flags & SYSINFO_AFI != 0
    }

    pub fn mem_size_present(&self) -> bool {
        self.info_flags & SYSINFO_MEMSIZE != 0
    }

    pub fn ic_ref_present(&self) -> bool {
        self.info_flags & SYSINFO_ICREF != 0
    }

    pub fn cmd_list_present(&self) -> bool {
        self.info_flags & SYSINFO_CMDLIST != 0
    }

    pub fn supports(&self, bit: u32) -> bool {
        self.supported_cmd & (1 << bit) != 0
    }
}

/// NDEF context bound to one activated tag. Dropped on deactivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefContext {
    pub device: ActiveDevice,
    pub state: NdefState,
    pub cc: Option<T5tCapabilityContainer>,
    pub cc_raw: Vec<u8>,
    pub block_len: u8,
    pub sys_info: Option<SystemInformation>,
    pub message_offset: u32,
    pub message_len: u32,
}

impl NdefContext {
    pub fn new(device: ActiveDevice) -> Self {
        Self {
            device,
            state: NdefState::Invalid,
            cc: None,
            cc_raw: Vec::new(),
            block_len: 4,
            sys_info: None,
            message_offset: 0,
            message_len: 0,
        }
    }
}

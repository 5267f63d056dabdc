// tagloop/src/ndef/mock.rs

use std::collections::VecDeque;

use crate::ndef::message::{NdefMessage, NdefRecord, Tnf};
use crate::ndef::traits::{MessageCodec, NdefPoller};
use crate::ndef::types::{
    NdefContext, NdefInfo, NdefState, SystemInformation, T5tCapabilityContainer,
};
use crate::rf::RfLayer;
use crate::types::{ActiveDevice, Technology};
use crate::{Error, Result};

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;

/// Plain NDEF record codec (no chunking). Short records are used whenever
/// the payload fits in 255 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestCodec;

fn encoded_record_len(r: &NdefRecord) -> usize {
    let short = r.payload.len() <= 0xFF;
    let mut n = 2 + if short { 1 } else { 4 };
    if !r.id.is_empty() {
        n += 1 + r.id.len();
    }
    n + r.record_type.len() + r.payload.len()
}

impl MessageCodec for TestCodec {
    fn encode(&self, message: &NdefMessage, buf: &mut [u8]) -> Result<usize> {
        let len: usize = message.records().iter().map(encoded_record_len).sum();
        if len > buf.len() {
            return Err(Error::MessageTooLarge {
                len,
                capacity: buf.len(),
            });
        }
        let last = message.len().saturating_sub(1);
        let mut pos = 0;
        for (i, r) in message.records().iter().enumerate() {
            if r.record_type.len() > 0xFF || r.id.len() > 0xFF {
                return Err(Error::MalformedRecord("type or id longer than 255".into()));
            }
            let short = r.payload.len() <= 0xFF;
            let mut header = r.tnf as u8;
            if i == 0 {
                header |= FLAG_MB;
            }
            if i == last {
                header |= FLAG_ME;
            }
            if short {
                header |= FLAG_SR;
            }
            if !r.id.is_empty() {
                header |= FLAG_IL;
            }
            buf[pos] = header;
            buf[pos + 1] = r.record_type.len() as u8;
            pos += 2;
            if short {
                buf[pos] = r.payload.len() as u8;
                pos += 1;
            } else {
                buf[pos..pos + 4].copy_from_slice(&(r.payload.len() as u32).to_be_bytes());
                pos += 4;
            }
            if !r.id.is_empty() {
                buf[pos] = r.id.len() as u8;
                pos += 1;
            }
            for part in [&r.record_type, &r.id, &r.payload] {
                buf[pos..pos + part.len()].copy_from_slice(part);
                pos += part.len();
            }
        }
        Ok(pos)
    }

    fn decode(&self, raw: &[u8]) -> Result<NdefMessage> {
        fn take<'a>(raw: &'a [u8], pos: &mut usize, n: usize) -> Result<&'a [u8]> {
            let end = pos
                .checked_add(n)
                .filter(|&end| end <= raw.len())
                .ok_or_else(|| Error::MalformedRecord("truncated record".into()))?;
            let out = &raw[*pos..end];
            *pos = end;
            Ok(out)
        }

        let mut message = NdefMessage::new();
        let mut pos = 0;
        while pos < raw.len() {
            let header = take(raw, &mut pos, 1)?[0];
            if header & FLAG_CF != 0 {
                return Err(Error::UnsupportedOperation("chunked records".into()));
            }
            let tnf = Tnf::from_bits(header)?;
            let type_len = usize::from(take(raw, &mut pos, 1)?[0]);
            let payload_len = if header & FLAG_SR != 0 {
                usize::from(take(raw, &mut pos, 1)?[0])
            } else {
                let b = take(raw, &mut pos, 4)?;
                u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize
            };
            let id_len = if header & FLAG_IL != 0 {
                usize::from(take(raw, &mut pos, 1)?[0])
            } else {
                0
            };
            let record_type = take(raw, &mut pos, type_len)?.to_vec();
            let id = take(raw, &mut pos, id_len)?.to_vec();
            let payload = take(raw, &mut pos, payload_len)?.to_vec();
            message.append(NdefRecord {
                tnf,
                record_type,
                id,
                payload,
            });
            if header & FLAG_ME != 0 {
                break;
            }
        }
        Ok(message)
    }
}

/// Recorded NDEF library calls, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NdefCall {
    ContextInit(ActiveDevice),
    Detect,
    ReadRaw,
    WriteRaw(Vec<u8>),
    Format(Option<T5tCapabilityContainer>),
}

/// Mock NDEF library backed by an in-memory tag.
///
/// `memory` holds the raw message: `None` for a tag without NDEF
/// formatting, `Some(empty)` for an initialized tag. Detect derives the
/// lifecycle state from it unless `detect_script` has entries, which are
/// returned first.
#[derive(Debug)]
pub struct MockNdef {
    pub calls: Vec<NdefCall>,
    pub memory: Option<Vec<u8>>,
    /// Data area size in bytes
    pub area_len: u32,
    pub read_only: bool,
    pub sys_info: Option<SystemInformation>,
    pub detect_script: VecDeque<Result<NdefInfo>>,
    pub context_error: Option<Error>,
    pub read_error: Option<Error>,
    pub write_error: Option<Error>,
    pub format_error: Option<Error>,
    /// Length reported by `read_raw_message` in place of the real one
    pub reported_len: Option<usize>,
    pub codec: TestCodec,
}

impl Default for MockNdef {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            memory: None,
            area_len: 512,
            read_only: false,
            sys_info: None,
            detect_script: VecDeque::new(),
            context_error: None,
            read_error: None,
            write_error: None,
            format_error: None,
            reported_len: None,
            codec: TestCodec,
        }
    }
}

impl MockNdef {
    /// Tag without NDEF formatting
    pub fn blank() -> Self {
        Self::default()
    }

    /// Formatted tag holding no message
    pub fn empty() -> Self {
        Self {
            memory: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn with_raw(raw: Vec<u8>) -> Self {
        Self {
            memory: Some(raw),
            ..Self::default()
        }
    }

    /// Formatted tag holding `message`, encoded with [`TestCodec`]
    pub fn with_message(message: &NdefMessage) -> Result<Self> {
        let mut buf = vec![0u8; 4096];
        let n = TestCodec.encode(message, &mut buf)?;
        buf.truncate(n);
        Ok(Self::with_raw(buf))
    }

    /// Decode whatever is currently stored on the tag
    pub fn stored_message(&self) -> Result<NdefMessage> {
        let raw = self.memory.as_ref().ok_or(Error::NotNdef)?;
        self.codec.decode(raw)
    }

    pub fn count(&self, pred: impl Fn(&NdefCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn current_state(&self) -> Option<NdefState> {
        let raw = self.memory.as_ref()?;
        Some(if self.read_only {
            NdefState::ReadOnly
        } else if raw.is_empty() {
            NdefState::Initialized
        } else {
            NdefState::ReadWrite
        })
    }
}

impl NdefPoller for MockNdef {
    fn context_init(
        &mut self,
        rf: &mut dyn RfLayer,
        device: &ActiveDevice,
    ) -> Result<NdefContext> {
        self.calls.push(NdefCall::ContextInit(*device));
        if !rf.is_activated() {
            return Err(Error::WrongState);
        }
        if let Some(err) = self.context_error.clone() {
            return Err(err);
        }
        let mut ctx = NdefContext::new(*device);
        if device.technology() == Technology::NfcV {
            ctx.sys_info = self.sys_info;
        }
        Ok(ctx)
    }

    fn detect(&mut self, _rf: &mut dyn RfLayer, ctx: &mut NdefContext) -> Result<NdefInfo> {
        self.calls.push(NdefCall::Detect);
        if let Some(scripted) = self.detect_script.pop_front() {
            if let Ok(info) = &scripted {
                ctx.state = info.state;
                ctx.message_len = info.message_len;
            }
            return scripted;
        }
        let state = self.current_state().ok_or(Error::NotNdef)?;
        let cc = T5tCapabilityContainer::for_area(self.area_len as usize);
        let message_len = self.memory.as_ref().map_or(0, |m| m.len()) as u32;
        ctx.cc_raw = cc.to_bytes();
        ctx.cc = Some(cc);
        ctx.state = state;
        // CC followed by the NDEF TLV tag and length bytes
        ctx.message_offset = u32::from(cc.cc_len) + if message_len < 0xFF { 2 } else { 4 };
        ctx.message_len = message_len;
        Ok(NdefInfo {
            major_version: cc.major_version,
            minor_version: cc.minor_version,
            area_len: self.area_len,
            area_available_space_len: self.area_len.saturating_sub(ctx.message_offset),
            message_len,
            state,
        })
    }

    fn read_raw_message(
        &mut self,
        _rf: &mut dyn RfLayer,
        _ctx: &mut NdefContext,
        buf: &mut [u8],
    ) -> Result<usize> {
        self.calls.push(NdefCall::ReadRaw);
        if let Some(err) = self.read_error.clone() {
            return Err(err);
        }
        let raw = self.memory.as_ref().ok_or(Error::NotNdef)?;
        if raw.len() > buf.len() {
            return Err(Error::MessageTooLarge {
                len: raw.len(),
                capacity: buf.len(),
            });
        }
        buf[..raw.len()].copy_from_slice(raw);
        Ok(self.reported_len.unwrap_or(raw.len()))
    }

    fn write_raw_message(
        &mut self,
        _rf: &mut dyn RfLayer,
        ctx: &mut NdefContext,
        raw: &[u8],
    ) -> Result<()> {
        self.calls.push(NdefCall::WriteRaw(raw.to_vec()));
        if self.read_only {
            return Err(Error::ReadOnly);
        }
        if let Some(err) = self.write_error.clone() {
            return Err(err);
        }
        if self.memory.is_none() {
            return Err(Error::NotNdef);
        }
        if raw.len() > self.area_len as usize {
            return Err(Error::MessageTooLarge {
                len: raw.len(),
                capacity: self.area_len as usize,
            });
        }
        self.memory = Some(raw.to_vec());
        ctx.message_len = raw.len() as u32;
        ctx.state = if raw.is_empty() {
            NdefState::Initialized
        } else {
            NdefState::ReadWrite
        };
        Ok(())
    }

    fn format(
        &mut self,
        _rf: &mut dyn RfLayer,
        ctx: &mut NdefContext,
        cc: Option<&T5tCapabilityContainer>,
    ) -> Result<()> {
        self.calls.push(NdefCall::Format(cc.copied()));
        if self.read_only {
            return Err(Error::ReadOnly);
        }
        if let Some(err) = self.format_error.clone() {
            return Err(err);
        }
        if let Some(cc) = cc {
            self.area_len = cc.memory_bytes();
        }
        self.memory = Some(Vec::new());
        ctx.state = NdefState::Initialized;
        ctx.message_len = 0;
        Ok(())
    }
}

impl MessageCodec for MockNdef {
    fn encode(&self, message: &NdefMessage, buf: &mut [u8]) -> Result<usize> {
        self.codec.encode(message, buf)
    }

    fn decode(&self, raw: &[u8]) -> Result<NdefMessage> {
        self.codec.decode(raw)
    }
}

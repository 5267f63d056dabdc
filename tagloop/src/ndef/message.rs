// tagloop/src/ndef/message.rs

//! In-memory NDEF records and messages. Binary encoding is left to the
//! [`MessageCodec`](crate::ndef::MessageCodec) implementation.

use crate::{Error, Result};

/// Type name format of a record
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tnf {
    Empty = 0,
    WellKnown = 1,
    Media = 2,
    AbsoluteUri = 3,
    External = 4,
    Unknown = 5,
    Unchanged = 6,
}

impl Tnf {
    pub fn from_bits(bits: u8) -> Result<Self> {
        Ok(match bits & 0x07 {
            0 => Tnf::Empty,
            1 => Tnf::WellKnown,
            2 => Tnf::Media,
            3 => Tnf::AbsoluteUri,
            4 => Tnf::External,
            5 => Tnf::Unknown,
            6 => Tnf::Unchanged,
            other => return Err(Error::MalformedRecord(format!("reserved TNF {}", other))),
        })
    }
}

const RTD_TEXT: &[u8] = b"T";
const RTD_URI: &[u8] = b"U";
const AAR_TYPE: &[u8] = b"android.com:pkg";
const TEXT_UTF16: u8 = 0x80;
const TEXT_LANG_LEN_MASK: u8 = 0x3F;

/// URI identifier codes; longer prefixes first so the best match wins
const URI_PREFIXES: [(u8, &str); 6] = [
    (0x02, "https://www."),
    (0x01, "http://www."),
    (0x04, "https://"),
    (0x03, "http://"),
    (0x06, "mailto:"),
    (0x05, "tel:"),
];

/// Decoded view of a record, for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    Text { lang: String, text: String },
    Uri(String),
    AndroidApp(String),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    pub tnf: Tnf,
    pub record_type: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    pub fn new(tnf: Tnf, record_type: &[u8], payload: Vec<u8>) -> Self {
        Self {
            tnf,
            record_type: record_type.to_vec(),
            id: Vec::new(),
            payload,
        }
    }

    /// Well-known text record, UTF-8
    pub fn text(lang: &str, text: &str) -> Result<Self> {
        if lang.len() > usize::from(TEXT_LANG_LEN_MASK) {
            return Err(Error::MalformedRecord(format!(
                "language code too long: {}",
                lang.len()
            )));
        }
        let mut payload = Vec::with_capacity(1 + lang.len() + text.len());
        payload.push(lang.len() as u8);
        payload.extend_from_slice(lang.as_bytes());
        payload.extend_from_slice(text.as_bytes());
        Ok(Self::new(Tnf::WellKnown, RTD_TEXT, payload))
    }

    /// Well-known URI record, abbreviating the longest known prefix
    pub fn uri(uri: &str) -> Self {
        let (code, rest) = URI_PREFIXES
            .iter()
            .find_map(|(code, prefix)| uri.strip_prefix(prefix).map(|rest| (*code, rest)))
            .unwrap_or((0x00, uri));
        let mut payload = Vec::with_capacity(1 + rest.len());
        payload.push(code);
        payload.extend_from_slice(rest.as_bytes());
        Self::new(Tnf::WellKnown, RTD_URI, payload)
    }

    /// Android Application Record launching `package`
    pub fn android_app(package: &str) -> Self {
        Self::new(Tnf::External, AAR_TYPE, package.as_bytes().to_vec())
    }

    pub fn kind(&self) -> Result<RecordKind> {
        match (self.tnf, self.record_type.as_slice()) {
            (Tnf::WellKnown, RTD_TEXT) => {
                let (&status, rest) = self
                    .payload
                    .split_first()
                    .ok_or_else(|| Error::MalformedRecord("empty text payload".into()))?;
                if status & TEXT_UTF16 != 0 {
                    return Err(Error::MalformedRecord("UTF-16 text not supported".into()));
                }
                let lang_len = usize::from(status & TEXT_LANG_LEN_MASK);
                if lang_len > rest.len() {
                    return Err(Error::MalformedRecord(format!(
                        "language length {} exceeds payload",
                        lang_len
                    )));
                }
                let (lang, text) = rest.split_at(lang_len);
                Ok(RecordKind::Text {
                    lang: String::from_utf8_lossy(lang).into_owned(),
                    text: String::from_utf8_lossy(text).into_owned(),
                })
            }
            (Tnf::WellKnown, RTD_URI) => {
                let (&code, rest) = self
                    .payload
                    .split_first()
                    .ok_or_else(|| Error::MalformedRecord("empty uri payload".into()))?;
                let prefix = URI_PREFIXES
                    .iter()
                    .find(|(c, _)| *c == code)
                    .map(|(_, p)| *p)
                    .unwrap_or("");
                Ok(RecordKind::Uri(format!(
                    "{}{}",
                    prefix,
                    String::from_utf8_lossy(rest)
                )))
            }
            (Tnf::External, AAR_TYPE) => Ok(RecordKind::AndroidApp(
                String::from_utf8_lossy(&self.payload).into_owned(),
            )),
            _ => Ok(RecordKind::Other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

impl NdefMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: NdefRecord) {
        self.records.push(record);
    }

    pub fn with(mut self, record: NdefRecord) -> Self {
        self.append(record);
        self
    }

    pub fn records(&self) -> &[NdefRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<NdefRecord>> for NdefMessage {
    fn from(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }
}

// tagloop/src/flows/mod.rs

//! Application-level flows run against an activated device.

use derive_more::Display;

pub mod apdu;
pub mod id_card;
pub mod ndef;
pub mod p2p;

pub use apdu::{ApduReport, ApduStep, run_apdu};
pub use id_card::{is_id_card, read_id_card};
pub use ndef::{DemoMessages, NdefFlowOptions, NdefOutcome, run_ndef};
pub use p2p::{P2pReport, run_p2p};

/// Step of the NDEF flow, carried by [`crate::Error::Flow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Stage {
    #[display(fmt = "context init")]
    ContextInit,
    #[display(fmt = "detect")]
    Detect,
    #[display(fmt = "read")]
    Read,
    #[display(fmt = "decode")]
    Decode,
    #[display(fmt = "dump")]
    Dump,
    #[display(fmt = "format")]
    Format,
    #[display(fmt = "build")]
    Build,
    #[display(fmt = "encode")]
    Encode,
    #[display(fmt = "write")]
    Write,
}

/// What the NDEF flow does with a detected tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NdefFeature {
    #[default]
    #[display(fmt = "Read NDEF")]
    Read,
    #[display(fmt = "Write one NDEF record")]
    WriteOneRecord,
    #[display(fmt = "Write two NDEF records")]
    WriteTwoRecords,
    #[display(fmt = "Write AAR record")]
    WriteAar,
    #[display(fmt = "Format tag")]
    Format,
}

impl NdefFeature {
    pub const ALL: [NdefFeature; 5] = [
        NdefFeature::Read,
        NdefFeature::WriteOneRecord,
        NdefFeature::WriteTwoRecords,
        NdefFeature::WriteAar,
        NdefFeature::Format,
    ];

    /// Next entry of the menu, wrapping back to read
    pub fn next(self) -> Self {
        match self {
            NdefFeature::Read => NdefFeature::WriteOneRecord,
            NdefFeature::WriteOneRecord => NdefFeature::WriteTwoRecords,
            NdefFeature::WriteTwoRecords => NdefFeature::WriteAar,
            NdefFeature::WriteAar => NdefFeature::Format,
            NdefFeature::Format => NdefFeature::Read,
        }
    }

    /// Anything but read modifies the tag.
    pub fn is_destructive(self) -> bool {
        self != NdefFeature::Read
    }

    /// A failed detect falls through to formatting instead of aborting.
    pub fn formats_blank_tags(self) -> bool {
        matches!(self, NdefFeature::Format | NdefFeature::WriteAar)
    }
}

// tagloop/src/ndef/mod.rs

//! NDEF library interface: tag-level operations, message model and
//! diagnostic dumps.

pub mod dump;
pub mod message;
pub mod mock;
pub mod traits;
pub mod types;

pub use message::{NdefMessage, NdefRecord, RecordKind, Tnf};
pub use mock::{MockNdef, TestCodec};
pub use traits::{MessageCodec, NdefPoller};
pub use types::{NdefContext, NdefInfo, NdefState, SystemInformation, T5tCapabilityContainer};

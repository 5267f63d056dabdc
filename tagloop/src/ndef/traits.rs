// tagloop/src/ndef/traits.rs

use crate::Result;
use crate::ndef::message::NdefMessage;
use crate::ndef::types::{NdefContext, NdefInfo, T5tCapabilityContainer};
use crate::rf::RfLayer;
use crate::types::ActiveDevice;

/// Tag-level NDEF operations. Implementations exchange frames with the
/// activated tag through the RF layer passed to each call.
pub trait NdefPoller {
    /// Bind a fresh context to the activated device
    fn context_init(&mut self, rf: &mut dyn RfLayer, device: &ActiveDevice)
    -> Result<NdefContext>;

    /// Read the capability container and locate the message. Refreshes
    /// `ctx` on success.
    fn detect(&mut self, rf: &mut dyn RfLayer, ctx: &mut NdefContext) -> Result<NdefInfo>;

    /// Read the raw message into `buf`, returning its length
    fn read_raw_message(
        &mut self,
        rf: &mut dyn RfLayer,
        ctx: &mut NdefContext,
        buf: &mut [u8],
    ) -> Result<usize>;

    fn write_raw_message(
        &mut self,
        rf: &mut dyn RfLayer,
        ctx: &mut NdefContext,
        raw: &[u8],
    ) -> Result<()>;

    /// Write an empty NDEF structure. `cc` overrides the default capability
    /// container for the tag type.
    fn format(
        &mut self,
        rf: &mut dyn RfLayer,
        ctx: &mut NdefContext,
        cc: Option<&T5tCapabilityContainer>,
    ) -> Result<()>;
}

/// Binary NDEF message encoding
pub trait MessageCodec {
    /// Encode into `buf`, returning the number of bytes used. Fails with
    /// `MessageTooLarge` when `buf` is too small.
    fn encode(&self, message: &NdefMessage, buf: &mut [u8]) -> Result<usize>;

    fn decode(&self, raw: &[u8]) -> Result<NdefMessage>;
}

// tagloop/src/flows/ndef.rs

//! NDEF flow: context init, detect, then read or format/write depending on
//! the selected menu feature.

use log::{debug, info, warn};

use crate::constants::{DEFAULT_AAR_PACKAGE, DEFAULT_TEXT, DEFAULT_URI};
use crate::flows::{NdefFeature, Stage};
use crate::ndef::dump::{dump_buffer, dump_cc, dump_message, dump_sys_info};
use crate::ndef::{MessageCodec, NdefContext, NdefMessage, NdefPoller, NdefRecord, NdefState};
use crate::rf::RfLayer;
use crate::types::{ActiveDevice, Technology};
use crate::{Error, Result};

/// Contents written by the write features
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemoMessages {
    pub uri: String,
    pub text_lang: String,
    pub text: String,
    pub aar_package: String,
}

impl Default for DemoMessages {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            text_lang: "en".to_string(),
            text: DEFAULT_TEXT.to_string(),
            aar_package: DEFAULT_AAR_PACKAGE.to_string(),
        }
    }
}

impl DemoMessages {
    /// Message written by `feature`; read and format write nothing.
    pub fn build(&self, feature: NdefFeature) -> Result<NdefMessage> {
        let mut message = NdefMessage::new();
        match feature {
            NdefFeature::WriteOneRecord => message.append(NdefRecord::uri(&self.uri)),
            NdefFeature::WriteTwoRecords => {
                message.append(NdefRecord::uri(&self.uri));
                message.append(NdefRecord::text(&self.text_lang, &self.text)?);
            }
            NdefFeature::WriteAar => message.append(NdefRecord::android_app(&self.aar_package)),
            NdefFeature::Read | NdefFeature::Format => {
                return Err(Error::UnsupportedOperation(format!(
                    "'{}' does not write a message",
                    feature
                )));
            }
        }
        Ok(message)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NdefFlowOptions<'a> {
    pub feature: NdefFeature,
    pub verbose: bool,
    pub messages: &'a DemoMessages,
}

/// How the flow ended for a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NdefOutcome {
    /// The tag is initialized but holds no message
    Empty,
    Read(NdefMessage),
    Formatted,
    Written(NdefFeature),
}

/// Run the NDEF flow against `device`. `buf` is the raw message buffer; its
/// length is the capacity for both reads and encodes.
///
/// Every failure is logged here; the returned error carries the failing
/// [`Stage`].
pub fn run_ndef<N>(
    rf: &mut dyn RfLayer,
    ndef: &mut N,
    device: &ActiveDevice,
    opts: &NdefFlowOptions<'_>,
    buf: &mut [u8],
) -> Result<NdefOutcome>
where
    N: NdefPoller + MessageCodec + ?Sized,
{
    let mut ctx = ndef.context_init(rf, device).map_err(|e| {
        warn!("NDEF NOT DETECTED (context init returns {})", e);
        e.at(Stage::ContextInit)
    })?;

    if opts.verbose && device.technology() == Technology::NfcV {
        if let Some(sys_info) = ctx.sys_info.as_ref() {
            dump_sys_info(sys_info);
        }
    }

    let detected = match ndef.detect(rf, &mut ctx) {
        Ok(info) => {
            info!("{} NDEF detected.", info.state);
            dump_cc(&ctx, opts.verbose);
            if opts.verbose {
                info!("NDEF Len: {}, Offset={}", ctx.message_len, ctx.message_offset);
            }
            Some(info)
        }
        Err(e) => {
            warn!("NDEF NOT DETECTED (detect returns {})", e);
            if !opts.feature.formats_blank_tags() {
                return Err(e.at(Stage::Detect));
            }
            None
        }
    };

    match (opts.feature, detected) {
        (NdefFeature::Read, Some(info)) => {
            if info.state == NdefState::Initialized {
                debug!("tag initialized, nothing to read");
                return Ok(NdefOutcome::Empty);
            }
            read_message(rf, ndef, &mut ctx, info.message_len as usize, opts.verbose, buf)
                .map(NdefOutcome::Read)
        }
        (NdefFeature::Read, None) => Err(Error::NotNdef.at(Stage::Detect)),
        (feature, detected) => {
            if detected.is_none() || feature == NdefFeature::Format {
                format_tag(rf, ndef, &mut ctx, opts.verbose)?;
                if feature == NdefFeature::Format {
                    info!("Tag formatted");
                    return Ok(NdefOutcome::Formatted);
                }
            }
            write_message(rf, ndef, &mut ctx, feature, opts.messages, buf)?;
            Ok(NdefOutcome::Written(feature))
        }
    }
}

fn read_message<N>(
    rf: &mut dyn RfLayer,
    ndef: &mut N,
    ctx: &mut NdefContext,
    message_len: usize,
    verbose: bool,
    buf: &mut [u8],
) -> Result<NdefMessage>
where
    N: NdefPoller + MessageCodec + ?Sized,
{
    if message_len > buf.len() {
        let err = Error::MessageTooLarge {
            len: message_len,
            capacity: buf.len(),
        };
        warn!("NDEF message cannot be read ({})", err);
        return Err(err.at(Stage::Read));
    }

    let len = ndef.read_raw_message(rf, ctx, buf).map_err(|e| {
        warn!("NDEF message cannot be read ({})", e);
        e.at(Stage::Read)
    })?;
    let capacity = buf.len();
    let raw = buf.get(..len).ok_or_else(|| {
        let err = Error::InvalidLength {
            max: capacity,
            actual: len,
        };
        warn!("NDEF message cannot be read ({})", err);
        err.at(Stage::Read)
    })?;
    if verbose {
        dump_buffer(" NDEF Content", raw);
    }

    let message = ndef.decode(raw).map_err(|e| {
        warn!("NDEF message cannot be decoded ({})", e);
        e.at(Stage::Decode)
    })?;
    dump_message(&message, verbose).map_err(|e| {
        warn!("NDEF message cannot be displayed ({})", e);
        e.at(Stage::Dump)
    })?;
    Ok(message)
}

/// Format, then detect again so the context describes the fresh layout.
fn format_tag<N>(
    rf: &mut dyn RfLayer,
    ndef: &mut N,
    ctx: &mut NdefContext,
    verbose: bool,
) -> Result<()>
where
    N: NdefPoller + ?Sized,
{
    info!("Formatting & Initializing T5T CC file...");
    // Only the re-detect decides whether the tag is usable.
    if let Err(e) = ndef.format(rf, ctx, None) {
        warn!("format returns {}, detecting again", e);
    }
    match ndef.detect(rf, ctx) {
        Ok(info) => {
            debug!("re-detect after format: {}", info.state);
            dump_cc(ctx, verbose);
            Ok(())
        }
        Err(e) => {
            warn!("Tag cannot be formatted (detect returns {})", e);
            Err(e.at(Stage::Format))
        }
    }
}

fn write_message<N>(
    rf: &mut dyn RfLayer,
    ndef: &mut N,
    ctx: &mut NdefContext,
    feature: NdefFeature,
    messages: &DemoMessages,
    buf: &mut [u8],
) -> Result<()>
where
    N: NdefPoller + MessageCodec + ?Sized,
{
    let message = messages.build(feature).map_err(|e| {
        warn!("Raw message creation failed ({})", e);
        e.at(Stage::Build)
    })?;
    let len = ndef.encode(&message, buf).map_err(|e| {
        warn!("Raw message creation failed ({})", e);
        e.at(Stage::Encode)
    })?;
    ndef.write_raw_message(rf, ctx, &buf[..len]).map_err(|e| {
        warn!("Message cannot be written ({})", e);
        e.at(Stage::Write)
    })?;

    match feature {
        NdefFeature::WriteAar => info!("Wrote AAR record to the Tag"),
        _ => info!("Wrote {} record(s) to the Tag", message.len()),
    }
    Ok(())
}

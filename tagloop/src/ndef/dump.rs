// tagloop/src/ndef/dump.rs

//! Operator-facing dumps of NDEF structures. Everything goes to `info!`.

use log::info;

use crate::Result;
use crate::ndef::message::{NdefMessage, RecordKind};
use crate::ndef::types::{NdefContext, SYSINFO_COMMANDS, SystemInformation};
use crate::utils::hex_dump_lines;

const DUMP_LINE_LEN: usize = 16;

fn mark(flag: bool) -> char {
    if flag { 'X' } else { ' ' }
}

/// Hex dump, 16 bytes per line
pub fn dump_buffer(label: &str, bytes: &[u8]) {
    info!("{} ({} bytes):", label, bytes.len());
    for line in hex_dump_lines(bytes, DUMP_LINE_LEN) {
        info!("{}", line);
    }
}

/// Capability container summary; flag detail and raw bytes only when
/// `verbose`.
pub fn dump_cc(ctx: &NdefContext, verbose: bool) {
    info!(" * Block Length: {}", ctx.block_len);
    let Some(cc) = ctx.cc.as_ref() else {
        return;
    };
    info!(" * {} bytes CC", cc.cc_len);
    info!(
        " * Magic: {:02X}h Version: {}.{} MLEN: {} ({} bytes)",
        cc.magic_number,
        cc.major_version,
        cc.minor_version,
        cc.memory_len,
        cc.memory_bytes()
    );
    info!(
        " * readAccess: {:02x}h writeAccess: {:02x}h",
        cc.read_access, cc.write_access
    );
    if verbose {
        info!(" * [{}] Special Frame", mark(cc.special_frame));
        info!(" * [{}] Multiple block Read", mark(cc.multiple_block_read));
        info!(" * [{}] Lock Block", mark(cc.lock_block));
        dump_buffer(" CC Raw Data", &ctx.cc_raw);
    }
}

pub fn dump_sys_info(sys_info: &SystemInformation) {
    info!(
        " * {} byte(s) memory addressing",
        sys_info.memory_addressing_bytes()
    );
    if sys_info.dsfid_present() {
        info!(" * DSFID={:02X}h", sys_info.dsfid);
    }
    if sys_info.afi_present() {
        info!(" * AFI={:02X}h", sys_info.afi);
    }
    if sys_info.mem_size_present() {
        info!(
            " * {} blocks, {} bytes per block",
            sys_info.number_of_blocks, sys_info.block_size
        );
    }
    if sys_info.ic_ref_present() {
        info!(" * ICRef={:02x}h", sys_info.ic_ref);
    }
    if sys_info.cmd_list_present() {
        for (bit, name) in SYSINFO_COMMANDS {
            info!(" * [{}] {}", mark(sys_info.supports(bit)), name);
        }
    }
}

/// Log every record of `message`. Fails on the first record whose payload
/// cannot be interpreted.
pub fn dump_message(message: &NdefMessage, verbose: bool) -> Result<()> {
    if message.is_empty() {
        info!("Empty NDEF message");
        return Ok(());
    }
    for (i, record) in message.records().iter().enumerate() {
        match record.kind()? {
            RecordKind::Text { lang, text } => {
                info!(" Record #{}: Text ({}) \"{}\"", i + 1, lang, text)
            }
            RecordKind::Uri(uri) => info!(" Record #{}: URI {}", i + 1, uri),
            RecordKind::AndroidApp(pkg) => {
                info!(" Record #{}: Android Application Record {}", i + 1, pkg)
            }
            RecordKind::Other => info!(
                " Record #{}: TNF {:?} type \"{}\" ({} bytes)",
                i + 1,
                record.tnf,
                String::from_utf8_lossy(&record.record_type),
                record.payload.len()
            ),
        }
        if verbose && !record.payload.is_empty() {
            dump_buffer(" Payload", &record.payload);
        }
    }
    Ok(())
}

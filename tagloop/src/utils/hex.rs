// tagloop/src/utils/hex.rs

//! Hex rendering for the operator log. Uppercase, space separated, as the
//! serial console shows it.

use std::fmt::Write;

/// `&[0x08, 0x07, 0xab]` -> `"08 07 AB"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = write!(s, "{:02X}", b);
    }
    s
}

/// Offset-prefixed dump lines, `width` bytes per line: `" 0010: 0A 0B ..."`.
/// A zero `width` is treated as one byte per line.
pub fn hex_dump_lines(bytes: &[u8], width: usize) -> impl Iterator<Item = String> + '_ {
    let width = width.max(1);
    bytes
        .chunks(width)
        .enumerate()
        .map(move |(i, chunk)| format!(" {:04X}: {}", i * width, bytes_to_hex_spaced(chunk)))
}

// tagloop/src/utils/mod.rs

pub mod hex;

pub use hex::{bytes_to_hex_spaced, hex_dump_lines};

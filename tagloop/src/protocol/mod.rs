// tagloop/src/protocol/mod.rs

pub mod apdu;

pub use apdu::{Apdu, StatusWord};

// tagloop/src/lib.rs

//! tagloop
//!
//! Contactless tag discovery and exchange orchestration: a cooperative
//! discovery loop over an injected RF layer, NDEF library and board
//! platform, with per-technology flows for NDEF, ISO-DEP APDUs, NFC-DEP
//! peer-to-peer and NFC-B identity cards.

pub mod config;
pub mod constants;
pub mod demo;
pub mod dispatch;
pub mod error;
pub mod exchange;
pub mod flows;
pub mod ndef;
pub mod platform;
pub mod prelude;
pub mod protocol;
pub mod rf;
pub mod test_support;
pub mod types;
pub mod utils;

// Errors and core types live at the crate root; the prelude adds the
// loop, flow and collaborator traits on top.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;

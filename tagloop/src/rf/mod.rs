// tagloop/src/rf/mod.rs

pub mod mock;
pub mod traits;

pub use mock::MockRf;
pub use traits::{RfEvent, RfLayer, RfState};

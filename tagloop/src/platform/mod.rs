// tagloop/src/platform/mod.rs

pub mod mock;
pub mod traits;

pub use mock::MockPlatform;
pub use traits::{Platform, Timer};

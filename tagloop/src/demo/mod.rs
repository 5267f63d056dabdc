// tagloop/src/demo/mod.rs

//! The cooperative discovery loop and its user-facing controls.

pub mod builder;
pub mod button;
pub mod handle;
pub mod menu;

pub use builder::DemoBuilder;
pub use button::{ButtonAction, Debouncer};
pub use handle::{Demo, DemoOptions, DemoState, TickOutcome};
pub use menu::{FeatureMenu, ModeTimer};

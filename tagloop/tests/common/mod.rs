// Shared helpers for the integration test crates. Each aggregator pulls
// this in through a `#[path]` module, so not every crate uses every item.
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

//! CLI command implementations

pub mod dataset;
pub mod export;
pub mod split;
pub mod stats;

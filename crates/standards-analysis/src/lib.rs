//! Standards pipeline: turns governance documents into a validated,
//! integrity-checked rule index, plus the read-only tools built on it.
//!
//! Flow: sources → extraction (detect, normalize, dedup, id) → seed/overrides
//! merge → validation → index build → atomic write. Diff, gap, enforcement,
//! prompt seeds and metrics consume a built index and never mutate it.

pub mod build;
pub mod diff;
pub mod document;
pub mod enforcement;
pub mod extraction;
pub mod gap;
pub mod metrics;
pub mod prompt_seed;
pub mod query;

pub use build::{build_index, build_index_and_write, BuildReport, BuildRequest};

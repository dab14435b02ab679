//! Core types, errors, configuration, and tracing shared by the standards
//! index pipeline and its downstream tools.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use types::{Index, Rule, Severity};

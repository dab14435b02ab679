//! Persisted data model: severities, rules, categories, sources, and the index.

pub mod catalog;
pub mod index;
pub mod rule;
pub mod severity;

pub use catalog::{CategoriesDocument, CategoryMeta, RawCategory, SourceEntry};
pub use index::{Coverage, Index, Metadata, SourceStats};
pub use rule::{Rule, RuleExamples, SourceRef};
pub use severity::Severity;

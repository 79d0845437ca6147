//! Archive assembly.
//!
//! This module turns a resolved build configuration and a descriptor into a
//! WAR file: it walks the configured source trees, maps each file to its
//! archive path, applies exclusion rules, and streams accepted files into
//! the container.

pub mod filters;
pub mod manifest;
pub mod paths;
pub mod report;
pub mod walker;
pub mod writer;

// Re-exports for public API
pub use filters::ExclusionRules;
pub use manifest::Manifest;
pub use report::BuildReport;
pub use walker::SourceTree;
pub use walker::TreeFile;
pub use writer::WarWriter;

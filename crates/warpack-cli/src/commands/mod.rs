//! Subcommand implementations.

pub mod completion;
pub mod war;
pub mod web_xml;

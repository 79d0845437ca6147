//! `web-xml` command implementation.

use crate::error::add_project_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use std::path::Path;
use warpack_core::ArchiveKind;
use warpack_core::config::load_build_config;
use warpack_core::descriptor::descriptor_text;

pub fn execute(project: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = add_project_context(load_build_config(project, ArchiveKind::War), project)?;
    let xml = add_project_context(descriptor_text(&config), project)?;
    formatter.format_descriptor(&xml)
}

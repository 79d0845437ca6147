//! Error conversion utilities for CLI.
//!
//! Converts warpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use warpack_core::WarError;

/// Converts `WarError` to user-friendly anyhow error with context
pub fn convert_build_error(err: WarError, project: &Path) -> anyhow::Error {
    match err {
        WarError::ConfigParse(parse_err) => {
            anyhow!(
                "Cannot parse project file '{}': {}\n\
                 HINT: Keys are kebab-case, e.g. [ring] handler = \"myapp.core/handler\".",
                project.display(),
                parse_err
            )
        }
        WarError::Config { reason } => {
            anyhow!(
                "Invalid configuration in '{}': {}\n\
                 HINT: Check the [project] and [ring] tables of the project file.",
                project.display(),
                reason
            )
        }
        WarError::InvalidPattern { pattern, source } => {
            anyhow!(
                "Invalid war-exclusions pattern '{pattern}': {source}\n\
                 HINT: Patterns are regular expressions matched against archive paths."
            )
        }
        WarError::CompileFailed { reason } => {
            anyhow!(
                "Compilation failed: {reason}\n\
                 HINT: Fix the compile errors, or pass --no-compile to package existing classes."
            )
        }
        WarError::TargetDir { path, source } => {
            anyhow!(
                "Cannot create target directory '{}': {}\n\
                 HINT: Check permissions, or set [project] target-path.",
                path.display(),
                source
            )
        }
        WarError::Io(io_err) => {
            anyhow!(
                "I/O error while building '{}': {}",
                project.display(),
                io_err
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error building project '{}'", project.display())),
    }
}

/// Adds project context to a core result
pub fn add_project_context<T>(
    result: Result<T, WarError>,
    project: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_build_error(e, project))
}

//! `war` and `uberwar` command implementation.

use crate::cli::BuildArgs;
use crate::error::add_project_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use std::path::Path;
use warpack_core::ArchiveKind;
use warpack_core::assemble_war;
use warpack_core::build_war;
use warpack_core::compiler::compiler_for;
use warpack_core::config::load_build_config;

pub fn execute(
    project: &Path,
    args: &BuildArgs,
    kind: ArchiveKind,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut config = add_project_context(load_build_config(project, kind), project)?;
    if let Some(name) = &args.name {
        config = config.with_war_name(name.clone());
    }

    tracing::debug!(
        kind = ?config.kind,
        archive = %config.archive_path().display(),
        compile = args.should_compile(),
        "resolved build configuration"
    );

    let result = if args.should_compile() {
        let compiler = compiler_for(&config);
        build_war(&config, compiler.as_ref())
    } else {
        if !config.compile_path.is_dir() {
            formatter.format_warning(&format!(
                "compiled output {} does not exist; the archive will contain no classes",
                config.compile_path.display()
            ));
        }
        assemble_war(&config)
    };
    let report = add_project_context(result, project)?;

    let operation = match kind {
        ArchiveKind::War => "war",
        ArchiveKind::Uberwar => "uberwar",
    };
    formatter.format_build_result(operation, &report)
}

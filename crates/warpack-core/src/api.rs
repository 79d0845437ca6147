//! High-level API for building web archives.

use crate::BuildConfig;
use crate::Result;
use crate::assembly::BuildReport;
use crate::assembly::WarWriter;
use crate::compiler::CompileRequest;
use crate::compiler::CompilerService;
use crate::descriptor::descriptor_text;

/// Compiles and assembles a web archive.
///
/// The compile step runs first; its failure stops the build before any
/// archive output is created. The descriptor is then produced, and only
/// after that does the archive writer open its output.
///
/// # Errors
///
/// Returns an error if:
/// - The compiler service fails
/// - The deployment descriptor cannot be produced
/// - The target directory cannot be created
/// - Walking a source tree or writing the archive fails
///
/// # Examples
///
/// ```no_run
/// use warpack_core::ArchiveKind;
/// use warpack_core::build_war;
/// use warpack_core::compiler::compiler_for;
/// use warpack_core::config::load_build_config;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_build_config(Path::new("warpack.toml"), ArchiveKind::War)?;
/// let report = build_war(&config, compiler_for(&config).as_ref())?;
/// println!("Wrote {} entries to {}", report.entry_count(), report.output_path.display());
/// # Ok(())
/// # }
/// ```
pub fn build_war(config: &BuildConfig, compiler: &dyn CompilerService) -> Result<BuildReport> {
    let request = CompileRequest::from_config(config);
    tracing::info!(compiler = compiler.name(), handler = %request.handler, "compiling");
    let output = compiler.compile(&request)?;
    tracing::debug!(classes = %output.classes_dir.display(), "compile step finished");

    assemble_war(config)
}

/// Assembles a web archive from already compiled output.
///
/// # Errors
///
/// Same as [`build_war`], except for compile failures.
pub fn assemble_war(config: &BuildConfig) -> Result<BuildReport> {
    let descriptor = descriptor_text(config)?;
    WarWriter::new(config).write(&descriptor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::WarError;
    use crate::compiler::CompiledOutput;
    use crate::compiler::PrecompiledClasses;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    struct FailingCompiler;

    impl CompilerService for FailingCompiler {
        fn compile(&self, _request: &CompileRequest) -> Result<CompiledOutput> {
            Err(WarError::CompileFailed {
                reason: "syntax error".into(),
            })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct CountingCompiler {
        calls: Cell<usize>,
    }

    impl CompilerService for CountingCompiler {
        fn compile(&self, request: &CompileRequest) -> Result<CompiledOutput> {
            self.calls.set(self.calls.get() + 1);
            fs::create_dir_all(&request.compile_path)?;
            Ok(CompiledOutput {
                classes_dir: request.compile_path.clone(),
            })
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn config(root: &std::path::Path) -> BuildConfig {
        BuildConfig::new("myapp", "0.1.0", "myapp.core/handler", root).unwrap()
    }

    #[test]
    fn test_compile_failure_stops_assembly() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());

        let err = build_war(&config, &FailingCompiler).unwrap_err();
        assert!(matches!(err, WarError::CompileFailed { .. }));
        assert!(!config.target_dir.exists());
    }

    #[test]
    fn test_build_war_compiles_then_assembles() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let compiler = CountingCompiler {
            calls: Cell::new(0),
        };

        let report = build_war(&config, &compiler).unwrap();
        assert_eq!(compiler.calls.get(), 1);
        assert_eq!(report.output_path, config.archive_path());
        assert!(config.archive_path().is_file());
    }

    #[test]
    fn test_precompiled_requires_compile_path() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        assert!(build_war(&config, &PrecompiledClasses).is_err());

        fs::create_dir_all(&config.compile_path).unwrap();
        assert!(build_war(&config, &PrecompiledClasses).is_ok());
    }

    #[test]
    fn test_descriptor_failure_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path()).with_web_xml_file(temp.path().join("missing.xml"));

        assert!(assemble_war(&config).is_err());
        assert!(!config.target_dir.exists());
    }
}

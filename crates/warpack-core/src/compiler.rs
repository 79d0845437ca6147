//! Compile step that must succeed before assembly.
//!
//! Producing class files (and the servlet adapter class) is delegated to an
//! external tool. Assembly only relies on the compiled-output directory being
//! populated by the time it runs.

use crate::BuildConfig;
use crate::Result;
use crate::WarError;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

/// What the compile step is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Handler reference the adapter delegates to.
    pub handler: String,
    /// Fully qualified adapter class name.
    pub servlet_class: String,
    /// Adapter class location relative to the compiled-output root.
    pub servlet_class_path: String,
    /// Whether the adapter propagates path info.
    pub servlet_path_info: bool,
    /// Directory compiled classes must land in.
    pub compile_path: PathBuf,
}

impl CompileRequest {
    /// Builds the request for a resolved configuration.
    #[must_use]
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            handler: config.handler.clone(),
            servlet_class: config.servlet_class.clone(),
            servlet_class_path: config.servlet_class_path(),
            servlet_path_info: config.servlet_path_info,
            compile_path: config.compile_path.clone(),
        }
    }
}

/// Result of a successful compile step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledOutput {
    /// Directory holding the compiled classes.
    pub classes_dir: PathBuf,
}

/// External compiler collaborator.
pub trait CompilerService {
    /// Produces compiled output for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`WarError::CompileFailed`] if compilation does not succeed.
    fn compile(&self, request: &CompileRequest) -> Result<CompiledOutput>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Assumes classes were compiled beforehand; only checks they exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecompiledClasses;

impl CompilerService for PrecompiledClasses {
    fn compile(&self, request: &CompileRequest) -> Result<CompiledOutput> {
        if !request.compile_path.is_dir() {
            return Err(WarError::CompileFailed {
                reason: format!(
                    "compiled output directory {} does not exist",
                    request.compile_path.display()
                ),
            });
        }
        Ok(CompiledOutput {
            classes_dir: request.compile_path.clone(),
        })
    }

    fn name(&self) -> &str {
        "precompiled"
    }
}

/// Runs a shell command in the project root.
///
/// The request is exported to the command as `WARPACK_HANDLER`,
/// `WARPACK_SERVLET_CLASS`, `WARPACK_SERVLET_CLASS_PATH`,
/// `WARPACK_SERVLET_PATH_INFO` and `WARPACK_COMPILE_PATH`.
///
/// # Examples
///
/// ```no_run
/// use warpack_core::BuildConfig;
/// use warpack_core::compiler::CommandCompiler;
/// use warpack_core::compiler::CompileRequest;
/// use warpack_core::compiler::CompilerService;
///
/// let config = BuildConfig::new("myapp", "0.1.0", "myapp.core/handler", ".")?;
/// let compiler = CommandCompiler::new("lein compile", ".");
/// compiler.compile(&CompileRequest::from_config(&config))?;
/// # Ok::<(), warpack_core::WarError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCompiler {
    command: String,
    working_dir: PathBuf,
}

impl CommandCompiler {
    /// Creates a compiler running `command` inside `working_dir`.
    #[must_use]
    pub fn new(command: impl Into<String>, working_dir: impl AsRef<Path>) -> Self {
        Self {
            command: command.into(),
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    /// The shell command line.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    fn shell(&self) -> Command {
        let (shell, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };
        let mut cmd = Command::new(shell);
        cmd.arg(flag).arg(&self.command);
        cmd
    }
}

impl CompilerService for CommandCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<CompiledOutput> {
        tracing::info!(command = %self.command, "running compile command");

        let status = self
            .shell()
            .current_dir(&self.working_dir)
            .env("WARPACK_HANDLER", &request.handler)
            .env("WARPACK_SERVLET_CLASS", &request.servlet_class)
            .env("WARPACK_SERVLET_CLASS_PATH", &request.servlet_class_path)
            .env(
                "WARPACK_SERVLET_PATH_INFO",
                request.servlet_path_info.to_string(),
            )
            .env("WARPACK_COMPILE_PATH", &request.compile_path)
            .status()
            .map_err(|e| WarError::CompileFailed {
                reason: format!("cannot run '{}': {e}", self.command),
            })?;

        if !status.success() {
            return Err(WarError::CompileFailed {
                reason: format!("'{}' exited with {status}", self.command),
            });
        }

        Ok(CompiledOutput {
            classes_dir: request.compile_path.clone(),
        })
    }

    fn name(&self) -> &str {
        "command"
    }
}

/// Picks the compiler for a configuration: the configured compile command,
/// or [`PrecompiledClasses`] when there is none.
#[must_use]
pub fn compiler_for(config: &BuildConfig) -> Box<dyn CompilerService> {
    match &config.compile_command {
        Some(command) => Box::new(CommandCompiler::new(command, &config.project_root)),
        None => Box::new(PrecompiledClasses),
    }
}

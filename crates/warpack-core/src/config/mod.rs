//! Project configuration.
//!
//! A project is described by a `warpack.toml` file. [`ProjectFile`] is the
//! raw, deserialized form; [`BuildConfig`] is the fully resolved value object
//! every other component consumes. Defaults are applied exactly once, during
//! [`BuildConfig::resolve`].

pub mod build;
pub mod webxml;

pub use build::ArchiveKind;
pub use build::BuildConfig;
pub use webxml::FilterDef;
pub use webxml::FilterMapping;
pub use webxml::ListenerDef;
pub use webxml::ResourceRef;
pub use webxml::ServletDef;
pub use webxml::ServletMapping;
pub use webxml::WebXmlConfig;

use crate::Result;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;

/// Conventional project file name.
pub const PROJECT_FILE_NAME: &str = "warpack.toml";

/// Raw contents of a project file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectFile {
    /// Project identity and source layout.
    pub project: ProjectSection,

    /// Web application settings.
    #[serde(default)]
    pub ring: RingSection,

    /// Build environment settings.
    #[serde(default)]
    pub build: BuildSection,
}

/// The `[project]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectSection {
    /// Project name, used for the default archive name.
    pub name: String,
    /// Project version, used for the default archive name.
    pub version: String,
    /// Compiled-output directory. Default: `target/classes`.
    pub compile_path: Option<PathBuf>,
    /// Source directories. Default: `["src"]`.
    pub source_paths: Option<Vec<PathBuf>>,
    /// Resource directories. Default: `["resources"]`.
    pub resource_paths: Option<Vec<PathBuf>>,
    /// Directory the archive is written to. Default: `target`.
    pub target_path: Option<PathBuf>,
    /// Dependency jars bundled into `WEB-INF/lib/` by uberwar builds.
    #[serde(default)]
    pub library_jars: Vec<PathBuf>,
}

/// The `[ring]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RingSection {
    /// Handler reference, `namespace/name`.
    pub handler: Option<String>,
    /// Archive file name override for `war` builds.
    pub war_name: Option<String>,
    /// Archive file name override for `uberwar` builds.
    pub uberwar_name: Option<String>,
    /// Regular expressions matched against archive paths.
    pub war_exclusions: Option<Vec<String>>,
    /// Static resources mounted at the archive root. Default: `war-resources`.
    pub war_resources_path: Option<PathBuf>,
    /// Servlet name override.
    pub servlet_name: Option<String>,
    /// Servlet class override.
    pub servlet_class: Option<String>,
    /// URL pattern override. Default: `/*`.
    pub url_pattern: Option<String>,
    /// Whether the adapter propagates path info. Default: `true`.
    pub servlet_path_info: Option<bool>,
    /// Hand-written descriptor used instead of the generated one.
    pub web_xml: Option<PathBuf>,
    /// Descriptor customization block.
    #[serde(default)]
    pub webxml: WebXmlConfig,
}

/// The `[build]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildSection {
    /// Shell command that produces the compiled output.
    pub compile_command: Option<String>,
    /// Manifest `Built-By` value. Default: `$USER`.
    pub built_by: Option<String>,
    /// Manifest `Build-Jdk` value. Default: `$JAVA_VERSION`.
    pub build_jdk: Option<String>,
}

impl ProjectFile {
    /// Parses a project file from TOML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpack_core::config::ProjectFile;
    ///
    /// let project = ProjectFile::from_toml_str(
    ///     r#"
    ///     [project]
    ///     name = "myapp"
    ///     version = "0.1.0"
    ///
    ///     [ring]
    ///     handler = "myapp.core/handler"
    ///     "#,
    /// )?;
    /// assert_eq!(project.project.name, "myapp");
    /// # Ok::<(), warpack_core::WarError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a project file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Loads a project file and resolves it into a [`BuildConfig`].
///
/// Relative paths in the file are resolved against the directory that
/// contains it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if
/// resolution fails (see [`BuildConfig::resolve`]).
pub fn load_build_config(project_file: &Path, kind: ArchiveKind) -> Result<BuildConfig> {
    let project = ProjectFile::load(project_file)?;
    let root = project_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    tracing::debug!(path = %project_file.display(), "loaded project file");
    BuildConfig::resolve(&project, root, kind)
}

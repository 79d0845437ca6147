//! Fully resolved build configuration.

use crate::Result;
use crate::WarError;
use crate::assembly::filters::DEFAULT_WAR_EXCLUSIONS;
use crate::assembly::filters::ExclusionRules;
use crate::assembly::manifest::Manifest;
use crate::config::ProjectFile;
use crate::config::ProjectSection;
use crate::config::webxml::WebXmlConfig;
use std::path::Path;
use std::path::PathBuf;

/// Catch-all URL pattern the handler servlet is mapped to by default.
pub const DEFAULT_URL_PATTERN: &str = "/*";

/// Which flavour of archive is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveKind {
    /// Application classes, sources, resources and static files.
    #[default]
    War,
    /// A `War` that additionally bundles dependency jars in `WEB-INF/lib/`.
    Uberwar,
}

/// Immutable, fully resolved configuration for a single build.
///
/// Every default (archive name, servlet naming, exclusion rules, manifest
/// provenance, filesystem roots) is computed once by [`BuildConfig::resolve`]
/// so no downstream component re-derives it.
///
/// # Examples
///
/// ```
/// use warpack_core::BuildConfig;
///
/// let config = BuildConfig::new("myapp", "0.1.0", "myapp.core/handler", ".")?;
/// assert_eq!(config.war_name, "myapp-0.1.0.war");
/// assert_eq!(config.servlet_name, "myapp.core/handler servlet");
/// assert_eq!(config.servlet_class, "myapp.servlet");
/// assert_eq!(config.url_pattern, "/*");
/// # Ok::<(), warpack_core::WarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project name.
    pub name: String,
    /// Project version.
    pub version: String,
    /// Archive flavour.
    pub kind: ArchiveKind,
    /// Directory relative paths were resolved against.
    pub project_root: PathBuf,
    /// Handler reference, `namespace/name`.
    pub handler: String,
    /// Name of the synthesized handler servlet.
    pub servlet_name: String,
    /// Class of the synthesized handler servlet.
    pub servlet_class: String,
    /// URL pattern of the synthesized servlet mapping.
    pub url_pattern: String,
    /// Whether the adapter propagates path info to the handler.
    pub servlet_path_info: bool,
    /// Archive file name.
    pub war_name: String,
    /// Directory the archive is written to.
    pub target_dir: PathBuf,
    /// Compiled-output tree.
    pub compile_path: PathBuf,
    /// Source trees, in traversal order.
    pub source_paths: Vec<PathBuf>,
    /// Resource trees, in traversal order.
    pub resource_paths: Vec<PathBuf>,
    /// Static resources tree mounted at the archive root.
    pub war_resources_path: PathBuf,
    /// Dependency jars for uberwar builds.
    pub library_jars: Vec<PathBuf>,
    /// User-supplied exclusion patterns.
    pub exclusions: ExclusionRules,
    /// Descriptor customization block.
    pub webxml: WebXmlConfig,
    /// Hand-written descriptor that replaces the generated one.
    pub web_xml_file: Option<PathBuf>,
    /// Shell command producing the compiled output.
    pub compile_command: Option<String>,
    /// Manifest provenance.
    pub manifest: Manifest,
}

impl BuildConfig {
    /// Resolves a project file into a build configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `project.name`, `project.version` or `ring.handler` is missing
    /// - the handler is not a qualified `namespace/name` reference and no
    ///   `servlet-class` override is given
    /// - an exclusion pattern is not a valid regular expression
    pub fn resolve(project: &ProjectFile, root: &Path, kind: ArchiveKind) -> Result<Self> {
        let ProjectSection {
            name,
            version,
            compile_path,
            source_paths,
            resource_paths,
            target_path,
            library_jars,
        } = &project.project;
        let ring = &project.ring;

        require("project.name", name)?;
        require("project.version", version)?;
        let handler = ring
            .handler
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| WarError::Config {
                reason: "ring.handler is required".to_string(),
            })?;

        let servlet_name = ring
            .servlet_name
            .clone()
            .unwrap_or_else(|| default_servlet_name(handler));
        let servlet_class = match &ring.servlet_class {
            Some(class) => class.clone(),
            None => default_servlet_class(handler)?,
        };

        let war_name = match kind {
            ArchiveKind::War => ring
                .war_name
                .clone()
                .unwrap_or_else(|| default_war_name(name, version)),
            ArchiveKind::Uberwar => ring
                .uberwar_name
                .clone()
                .unwrap_or_else(|| default_uberwar_name(name, version)),
        };

        let exclusions = match &ring.war_exclusions {
            Some(patterns) => ExclusionRules::new(patterns.as_slice())?,
            None => ExclusionRules::new(DEFAULT_WAR_EXCLUSIONS)?,
        };

        let under_root = |p: &Path| root.join(p);
        let source_paths = source_paths
            .as_ref()
            .map_or_else(|| vec![PathBuf::from("src")], Clone::clone);
        let resource_paths = resource_paths
            .as_ref()
            .map_or_else(|| vec![PathBuf::from("resources")], Clone::clone);

        let built_by = project
            .build
            .built_by
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .unwrap_or_else(|| "unknown".to_string());
        let build_jdk = project
            .build
            .build_jdk
            .clone()
            .or_else(|| std::env::var("JAVA_VERSION").ok())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Self {
            name: name.clone(),
            version: version.clone(),
            kind,
            project_root: root.to_path_buf(),
            handler: handler.to_string(),
            servlet_name,
            servlet_class,
            url_pattern: ring
                .url_pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_URL_PATTERN.to_string()),
            servlet_path_info: ring.servlet_path_info.unwrap_or(true),
            war_name,
            target_dir: under_root(target_path.as_deref().unwrap_or_else(|| Path::new("target"))),
            compile_path: under_root(
                compile_path
                    .as_deref()
                    .unwrap_or_else(|| Path::new("target/classes")),
            ),
            source_paths: source_paths.iter().map(|p| under_root(p)).collect(),
            resource_paths: resource_paths.iter().map(|p| under_root(p)).collect(),
            war_resources_path: under_root(
                ring.war_resources_path
                    .as_deref()
                    .unwrap_or_else(|| Path::new("war-resources")),
            ),
            library_jars: library_jars.iter().map(|p| under_root(p)).collect(),
            exclusions,
            webxml: ring.webxml.clone(),
            web_xml_file: ring.web_xml.as_deref().map(under_root),
            compile_command: project.build.compile_command.clone(),
            manifest: Manifest::new(built_by, build_jdk),
        })
    }

    /// Creates a `war` configuration with every optional setting defaulted.
    ///
    /// # Errors
    ///
    /// Same as [`BuildConfig::resolve`].
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        handler: impl Into<String>,
        root: impl AsRef<Path>,
    ) -> Result<Self> {
        let mut project = ProjectFile::default();
        project.project.name = name.into();
        project.project.version = version.into();
        project.ring.handler = Some(handler.into());
        Self::resolve(&project, root.as_ref(), ArchiveKind::War)
    }

    /// Full path of the archive this build produces.
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.target_dir.join(&self.war_name)
    }

    /// Location of the servlet class relative to the compiled-output root,
    /// without extension (`myapp.servlet` becomes `myapp/servlet`).
    #[must_use]
    pub fn servlet_class_path(&self) -> String {
        self.servlet_class.replace('.', "/")
    }

    /// Sets the archive file name.
    #[must_use]
    pub fn with_war_name(mut self, war_name: impl Into<String>) -> Self {
        self.war_name = war_name.into();
        self
    }

    /// Sets the target directory.
    #[must_use]
    pub fn with_target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_dir = dir.into();
        self
    }

    /// Sets the compiled-output tree.
    #[must_use]
    pub fn with_compile_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.compile_path = dir.into();
        self
    }

    /// Sets the source trees.
    #[must_use]
    pub fn with_source_paths(mut self, dirs: Vec<PathBuf>) -> Self {
        self.source_paths = dirs;
        self
    }

    /// Sets the resource trees.
    #[must_use]
    pub fn with_resource_paths(mut self, dirs: Vec<PathBuf>) -> Self {
        self.resource_paths = dirs;
        self
    }

    /// Sets the static resources tree.
    #[must_use]
    pub fn with_war_resources_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.war_resources_path = dir.into();
        self
    }

    /// Sets the archive kind. Only [`ArchiveKind::Uberwar`] bundles jars.
    #[must_use]
    pub fn with_kind(mut self, kind: ArchiveKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the dependency jars bundled into an uberwar.
    #[must_use]
    pub fn with_library_jars(mut self, jars: Vec<PathBuf>) -> Self {
        self.library_jars = jars;
        self
    }

    /// Sets the exclusion rules.
    #[must_use]
    pub fn with_exclusions(mut self, rules: ExclusionRules) -> Self {
        self.exclusions = rules;
        self
    }

    /// Sets the descriptor customization block.
    #[must_use]
    pub fn with_webxml(mut self, webxml: WebXmlConfig) -> Self {
        self.webxml = webxml;
        self
    }

    /// Uses a hand-written descriptor instead of the generated one.
    #[must_use]
    pub fn with_web_xml_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.web_xml_file = Some(path.into());
        self
    }

    /// Sets the manifest provenance.
    #[must_use]
    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = manifest;
        self
    }
}

fn require(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WarError::Config {
            reason: format!("{key} is required"),
        });
    }
    Ok(())
}

/// Default archive name for `war` builds: `<name>-<version>.war`.
#[must_use]
pub fn default_war_name(name: &str, version: &str) -> String {
    format!("{name}-{version}.war")
}

/// Default archive name for `uberwar` builds: `<name>-<version>-standalone.war`.
#[must_use]
pub fn default_uberwar_name(name: &str, version: &str) -> String {
    format!("{name}-{version}-standalone.war")
}

/// Default servlet name: `"<handler> servlet"`.
#[must_use]
pub fn default_servlet_name(handler: &str) -> String {
    format!("{handler} servlet")
}

/// Default servlet class derived from the handler's namespace.
///
/// The last namespace segment is replaced with `servlet` and dashes become
/// underscores.
///
/// # Examples
///
/// ```
/// use warpack_core::config::build::default_servlet_class;
///
/// assert_eq!(default_servlet_class("myapp.core/handler")?, "myapp.servlet");
/// assert_eq!(
///     default_servlet_class("my-app.web.routes/app")?,
///     "my_app.web.servlet"
/// );
/// # Ok::<(), warpack_core::WarError>(())
/// ```
pub fn default_servlet_class(handler: &str) -> Result<String> {
    let namespace = handler
        .split_once('/')
        .map(|(ns, _)| ns)
        .filter(|ns| !ns.is_empty())
        .ok_or_else(|| WarError::Config {
            reason: format!(
                "handler '{handler}' must be a qualified reference (namespace/name); \
                 set ring.servlet-class to override"
            ),
        })?;

    let munged = namespace.replace('-', "_");
    let mut segments: Vec<&str> = munged.split('.').collect();
    segments.pop();
    segments.push("servlet");
    Ok(segments.join("."))
}

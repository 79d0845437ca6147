//! Archive manifest.

/// Provenance written to `META-INF/MANIFEST.MF`.
///
/// # Examples
///
/// ```
/// use warpack_core::assembly::manifest::Manifest;
///
/// let manifest = Manifest::new("ci", "17");
/// let text = manifest.render();
/// assert!(text.starts_with("Manifest-Version: 1.0\r\n"));
/// assert!(text.contains("Built-By: ci\r\n"));
/// assert!(text.ends_with("Build-Jdk: 17\r\n\r\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Tool that produced the archive.
    pub created_by: String,
    /// User that ran the build.
    pub built_by: String,
    /// Build environment version.
    pub build_jdk: String,
}

impl Manifest {
    /// Manifest format version.
    pub const VERSION: &'static str = "1.0";

    /// Creates a manifest attributed to this tool.
    #[must_use]
    pub fn new(built_by: impl Into<String>, build_jdk: impl Into<String>) -> Self {
        Self {
            created_by: format!("warpack {}", env!("CARGO_PKG_VERSION")),
            built_by: built_by.into(),
            build_jdk: build_jdk.into(),
        }
    }

    /// Renders the main section: one `Name: value` line per header, CRLF line
    /// endings, terminated by a blank line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in [
            ("Manifest-Version", Self::VERSION),
            ("Created-By", self.created_by.as_str()),
            ("Built-By", self.built_by.as_str()),
            ("Build-Jdk", self.build_jdk.as_str()),
        ] {
            out.push_str(name);
            out.push_str(": ");
            // Header values cannot span lines.
            out.push_str(&value.replace(['\r', '\n'], " "));
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
        out
    }
}

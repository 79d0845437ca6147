//! Deployment descriptor (`WEB-INF/web.xml`) generation.
//!
//! The descriptor is built as a [`Node`] tree that may contain absent
//! branches, pruned, and then serialized to XML.

pub mod builder;
pub mod node;
pub mod xml;

pub use builder::build_descriptor;
pub use node::Node;
pub use xml::serialize;

use crate::BuildConfig;
use crate::Result;
use crate::WarError;

/// Builds, prunes and serializes the descriptor for `config`.
///
/// # Examples
///
/// ```
/// use warpack_core::BuildConfig;
/// use warpack_core::descriptor::render_descriptor;
///
/// let config = BuildConfig::new("myapp", "0.1.0", "myapp.core/handler", ".")?;
/// let xml = render_descriptor(&config)?;
/// assert!(xml.contains("<servlet-class>myapp.servlet</servlet-class>"));
/// assert!(xml.contains("<url-pattern>/*</url-pattern>"));
/// # Ok::<(), warpack_core::WarError>(())
/// ```
pub fn render_descriptor(config: &BuildConfig) -> Result<String> {
    let root = build_descriptor(config)
        .prune()
        .ok_or_else(|| WarError::Descriptor {
            reason: "descriptor root is absent".to_string(),
        })?;
    serialize(&root)
}

/// Returns the descriptor text for a build: the configured hand-written
/// file when there is one, the generated document otherwise.
///
/// # Errors
///
/// Returns [`WarError::Config`] if the configured file cannot be read, or
/// any error from [`render_descriptor`].
pub fn descriptor_text(config: &BuildConfig) -> Result<String> {
    match &config.web_xml_file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| WarError::Config {
            reason: format!("cannot read web-xml {}: {e}", path.display()),
        }),
        None => render_descriptor(config),
    }
}

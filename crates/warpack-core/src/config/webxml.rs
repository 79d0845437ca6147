//! Declarative records for the deployment descriptor customization block.
//!
//! Each record maps one-to-one onto a `web.xml` element. Map-valued fields
//! use `BTreeMap` so that the generated descriptor is stable across runs.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The `[ring.webxml]` block of a project file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct WebXmlConfig {
    /// `<filter>` elements.
    #[serde(default)]
    pub filters: Vec<FilterDef>,

    /// `<filter-mapping>` elements.
    #[serde(default)]
    pub filter_mappings: Vec<FilterMapping>,

    /// `<listener>` elements.
    #[serde(default)]
    pub listeners: Vec<ListenerDef>,

    /// Extra `<servlet>` elements, emitted before the handler servlet.
    #[serde(default)]
    pub servlets: Vec<ServletDef>,

    /// Extra `<servlet-mapping>` elements, emitted before the handler mapping.
    #[serde(default)]
    pub servlet_mappings: Vec<ServletMapping>,

    /// `<resource-ref>` elements.
    #[serde(default)]
    pub resource_refs: Vec<ResourceRef>,
}

/// A servlet filter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilterDef {
    /// Filter name referenced by mappings.
    pub filter_name: String,
    /// Fully qualified filter class.
    pub filter_class: String,
    /// Initialization parameters.
    #[serde(default)]
    pub init_params: BTreeMap<String, String>,
}

/// Binds a filter to a URL pattern or servlet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilterMapping {
    /// Name of the mapped filter.
    pub filter_name: String,
    /// URL pattern the filter applies to.
    pub url_pattern: Option<String>,
    /// Servlet the filter applies to.
    pub servlet_name: Option<String>,
    /// Dispatcher types (`REQUEST`, `FORWARD`, ...).
    #[serde(default)]
    pub dispatchers: Vec<String>,
}

/// A context listener declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ListenerDef {
    /// Fully qualified listener class.
    pub listener_class: String,
}

/// A servlet declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServletDef {
    /// Servlet name referenced by mappings.
    pub servlet_name: String,
    /// Fully qualified servlet class.
    pub servlet_class: String,
    /// Initialization parameters.
    #[serde(default)]
    pub init_params: BTreeMap<String, String>,
    /// Startup order; the element is omitted when unset.
    pub load_on_startup: Option<i32>,
}

/// Binds a servlet to a URL pattern.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServletMapping {
    /// Name of the mapped servlet.
    pub servlet_name: String,
    /// URL pattern.
    pub url_pattern: String,
}

/// A container-managed resource reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResourceRef {
    /// Optional human-readable description.
    pub description: Option<String>,
    /// JNDI name, e.g. `jdbc/main`.
    #[serde(alias = "name")]
    pub res_ref_name: String,
    /// Resource type, e.g. `javax.sql.DataSource`.
    #[serde(alias = "type")]
    pub res_type: String,
    /// Sign-on mode. Defaults to [`ResourceRef::DEFAULT_AUTH`].
    #[serde(alias = "auth")]
    pub res_auth: Option<String>,
    /// Sharing scope. Defaults to [`ResourceRef::DEFAULT_SCOPE`].
    #[serde(alias = "scope")]
    pub res_sharing_scope: Option<String>,
}

impl ResourceRef {
    /// Sign-on mode used when none is configured.
    pub const DEFAULT_AUTH: &'static str = "Container";

    /// Sharing scope used when none is configured.
    pub const DEFAULT_SCOPE: &'static str = "Shareable";

    /// Configured auth, or the container-managed default.
    #[must_use]
    pub fn auth(&self) -> &str {
        self.res_auth.as_deref().unwrap_or(Self::DEFAULT_AUTH)
    }

    /// Configured scope, or the shareable default.
    #[must_use]
    pub fn scope(&self) -> &str {
        self.res_sharing_scope
            .as_deref()
            .unwrap_or(Self::DEFAULT_SCOPE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_ref_defaults() {
        let r: ResourceRef = toml::from_str(
            r#"
            res-ref-name = "jdbc/main"
            res-type = "javax.sql.DataSource"
            "#,
        )
        .unwrap();
        assert_eq!(r.auth(), "Container");
        assert_eq!(r.scope(), "Shareable");
    }

    #[test]
    fn test_resource_ref_short_aliases() {
        let r: ResourceRef = toml::from_str(
            r#"
            name = "jdbc/main"
            type = "javax.sql.DataSource"
            auth = "Application"
            scope = "Unshareable"
            "#,
        )
        .unwrap();
        assert_eq!(r.res_ref_name, "jdbc/main");
        assert_eq!(r.auth(), "Application");
        assert_eq!(r.scope(), "Unshareable");
    }

    #[test]
    fn test_servlet_def_init_params_sorted() {
        let s: ServletDef = toml::from_str(
            r#"
            servlet-name = "s"
            servlet-class = "a.S"
            init-params = { zeta = "1", alpha = "2" }
            "#,
        )
        .unwrap();
        let keys: Vec<_> = s.init_params.keys().cloned().collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
        assert_eq!(s.load_on_startup, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<ListenerDef, _> =
            toml::from_str(r#"listener-klass = "a.L""#);
        assert!(result.is_err());
    }
}

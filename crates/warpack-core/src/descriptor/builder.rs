//! Builds the `web.xml` tree from configuration.

use crate::BuildConfig;
use crate::config::FilterDef;
use crate::config::FilterMapping;
use crate::config::ListenerDef;
use crate::config::ResourceRef;
use crate::config::ServletDef;
use crate::config::ServletMapping;
use crate::descriptor::Node;
use std::collections::BTreeMap;

/// Root element name.
pub const ROOT_TAG: &str = "web-app";

/// Builds the unpruned descriptor tree.
///
/// Children of the root appear in a fixed category order: filters,
/// filter-mappings, listeners, servlets, servlet-mappings, resource-refs.
/// The handler servlet and its mapping are appended after any configured
/// ones.
///
/// # Examples
///
/// ```
/// use warpack_core::BuildConfig;
/// use warpack_core::descriptor::build_descriptor;
///
/// let config = BuildConfig::new("myapp", "0.1.0", "myapp.core/handler", ".")?;
/// let root = build_descriptor(&config);
/// let tags: Vec<_> = root.children().iter().filter_map(|n| n.tag()).collect();
/// assert_eq!(tags, vec!["servlet", "servlet-mapping"]);
/// # Ok::<(), warpack_core::WarError>(())
/// ```
#[must_use]
pub fn build_descriptor(config: &BuildConfig) -> Node {
    let webxml = &config.webxml;

    let handler_servlet = ServletDef {
        servlet_name: config.servlet_name.clone(),
        servlet_class: config.servlet_class.clone(),
        init_params: BTreeMap::new(),
        load_on_startup: None,
    };
    let handler_mapping = ServletMapping {
        servlet_name: config.servlet_name.clone(),
        url_pattern: config.url_pattern.clone(),
    };

    let children = webxml
        .filters
        .iter()
        .map(filter)
        .chain(webxml.filter_mappings.iter().map(filter_mapping))
        .chain(webxml.listeners.iter().map(listener))
        .chain(
            webxml
                .servlets
                .iter()
                .chain(std::iter::once(&handler_servlet))
                .map(servlet),
        )
        .chain(
            webxml
                .servlet_mappings
                .iter()
                .chain(std::iter::once(&handler_mapping))
                .map(servlet_mapping),
        )
        .chain(webxml.resource_refs.iter().map(resource_ref));

    Node::element(ROOT_TAG, children)
}

fn init_params(params: &BTreeMap<String, String>) -> impl Iterator<Item = Node> + '_ {
    params.iter().map(|(name, value)| {
        Node::element(
            "init-param",
            [
                Node::text("param-name", name),
                Node::text("param-value", value),
            ],
        )
    })
}

fn filter(def: &FilterDef) -> Node {
    Node::element(
        "filter",
        [
            Node::text("filter-name", &def.filter_name),
            Node::text("filter-class", &def.filter_class),
        ]
        .into_iter()
        .chain(init_params(&def.init_params)),
    )
}

fn filter_mapping(def: &FilterMapping) -> Node {
    Node::element(
        "filter-mapping",
        [
            Node::text("filter-name", &def.filter_name),
            Node::optional("url-pattern", def.url_pattern.as_ref()),
            Node::optional("servlet-name", def.servlet_name.as_ref()),
        ]
        .into_iter()
        .chain(def.dispatchers.iter().map(|d| Node::text("dispatcher", d))),
    )
}

fn listener(def: &ListenerDef) -> Node {
    Node::element(
        "listener",
        [Node::text("listener-class", &def.listener_class)],
    )
}

fn servlet(def: &ServletDef) -> Node {
    Node::element(
        "servlet",
        [
            Node::text("servlet-name", &def.servlet_name),
            Node::text("servlet-class", &def.servlet_class),
        ]
        .into_iter()
        .chain(init_params(&def.init_params))
        .chain(std::iter::once(Node::optional(
            "load-on-startup",
            def.load_on_startup,
        ))),
    )
}

fn servlet_mapping(def: &ServletMapping) -> Node {
    Node::element(
        "servlet-mapping",
        [
            Node::text("servlet-name", &def.servlet_name),
            Node::text("url-pattern", &def.url_pattern),
        ],
    )
}

fn resource_ref(def: &ResourceRef) -> Node {
    Node::element(
        "resource-ref",
        [
            Node::optional("description", def.description.as_ref()),
            Node::text("res-ref-name", &def.res_ref_name),
            Node::text("res-type", &def.res_type),
            Node::text("res-auth", def.auth()),
            Node::text("res-sharing-scope", def.scope()),
        ],
    )
}

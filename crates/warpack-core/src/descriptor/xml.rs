//! XML serialization of descriptor trees.

use crate::Result;
use crate::WarError;
use crate::descriptor::Node;
use std::fmt::Write;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// Serializes a pruned tree as an XML document.
///
/// Elements without children are written self-closed; text is escaped.
/// Output depends only on the tree, so equal trees give byte-identical
/// documents.
///
/// # Errors
///
/// Returns [`WarError::Descriptor`] if the tree still contains absent
/// nodes, has an element with an invalid name, or holds text with a
/// character XML 1.0 cannot represent.
///
/// # Examples
///
/// ```
/// use warpack_core::descriptor::Node;
/// use warpack_core::descriptor::serialize;
///
/// let doc = serialize(&Node::element(
///     "web-app",
///     [Node::text("display-name", "Tom & Jerry")],
/// ))?;
/// assert!(doc.contains("<display-name>Tom &amp; Jerry</display-name>"));
/// # Ok::<(), warpack_core::WarError>(())
/// ```
pub fn serialize(root: &Node) -> Result<String> {
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    write_node(&mut out, root, 0)?;
    Ok(out)
}

fn write_node(out: &mut String, node: &Node, depth: usize) -> Result<()> {
    let indent = INDENT.repeat(depth);
    match node {
        Node::Element { tag, children } => {
            check_tag(tag)?;
            if children.is_empty() {
                let _ = writeln!(out, "{indent}<{tag}/>");
                return Ok(());
            }
            let _ = writeln!(out, "{indent}<{tag}>");
            for child in children {
                write_node(out, child, depth + 1)?;
            }
            let _ = writeln!(out, "{indent}</{tag}>");
        }
        Node::Text {
            tag,
            value: Some(value),
        } => {
            check_tag(tag)?;
            check_text(tag, value)?;
            let _ = writeln!(out, "{indent}<{tag}>{}</{tag}>", escape(value));
        }
        Node::Text { tag, value: None } => {
            return Err(WarError::Descriptor {
                reason: format!("element <{tag}> has no value; prune the tree first"),
            });
        }
        Node::Absent => {
            return Err(WarError::Descriptor {
                reason: "absent node in tree; prune the tree first".to_string(),
            });
        }
    }
    Ok(())
}

fn check_tag(tag: &str) -> Result<()> {
    let mut chars = tag.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) {
        Ok(())
    } else {
        Err(WarError::Descriptor {
            reason: format!("invalid element name '{tag}'"),
        })
    }
}

/// Rejects characters outside the XML 1.0 `Char` production.
fn check_text(tag: &str, value: &str) -> Result<()> {
    match value.chars().find(|&c| !is_xml_char(c)) {
        None => Ok(()),
        Some(c) => Err(WarError::Descriptor {
            reason: format!(
                "element <{tag}> contains U+{:04X}, which XML 1.0 cannot represent",
                u32::from(c)
            ),
        }),
    }
}

const fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escapes text for use in XML content.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

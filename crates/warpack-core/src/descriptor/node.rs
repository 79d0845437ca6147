//! Descriptor document tree.

/// A node in a descriptor document.
///
/// Builders emit [`Node::Absent`] (or a [`Node::Text`] without a value) for
/// anything the configuration leaves out; [`Node::prune`] removes those
/// before serialization. Pruning never reorders surviving siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with ordered children.
    Element {
        /// Element name.
        tag: String,
        /// Child nodes, in document order.
        children: Vec<Node>,
    },
    /// An element holding a single text value.
    Text {
        /// Element name.
        tag: String,
        /// Text content; `None` makes the node absent.
        value: Option<String>,
    },
    /// A branch that is not present in the document.
    Absent,
}

impl Node {
    /// Creates an element.
    pub fn element(tag: impl Into<String>, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Element {
            tag: tag.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Creates a text leaf.
    pub fn text(tag: impl Into<String>, value: impl ToString) -> Self {
        Self::Text {
            tag: tag.into(),
            value: Some(value.to_string()),
        }
    }

    /// Creates a text leaf that is absent when `value` is `None`.
    pub fn optional<T: ToString>(tag: impl Into<String>, value: Option<T>) -> Self {
        Self::Text {
            tag: tag.into(),
            value: value.map(|v| v.to_string()),
        }
    }

    /// Element name, or `None` for [`Node::Absent`].
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } | Self::Text { tag, .. } => Some(tag),
            Self::Absent => None,
        }
    }

    /// Child nodes; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Whether this node will be removed by pruning.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent | Self::Text { value: None, .. })
    }

    /// Removes absent branches, post-order.
    ///
    /// Returns `None` if the node itself is absent. Elements survive even
    /// when all their children are pruned; they serialize as empty elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use warpack_core::descriptor::Node;
    ///
    /// let servlet = Node::element(
    ///     "servlet",
    ///     [
    ///         Node::text("servlet-name", "app"),
    ///         Node::optional::<i32>("load-on-startup", None),
    ///         Node::Absent,
    ///     ],
    /// );
    /// let pruned = servlet.prune().unwrap();
    /// assert_eq!(pruned.children().len(), 1);
    /// assert_eq!(pruned.children()[0].tag(), Some("servlet-name"));
    /// ```
    #[must_use]
    pub fn prune(self) -> Option<Self> {
        match self {
            Self::Absent | Self::Text { value: None, .. } => None,
            Self::Text { .. } => Some(self),
            Self::Element { tag, children } => Some(Self::Element {
                tag,
                children: children.into_iter().filter_map(Self::prune).collect(),
            }),
        }
    }
}

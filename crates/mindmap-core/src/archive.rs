//! Archival output shape.
//!
//! The archival shape is a flat, text-keyed representation of a map meant for
//! storage and search. Hierarchy survives as `parent` references holding the
//! parent's display text, and connections point at display texts instead of
//! document identifiers.
//!
//! Absent optional fields are omitted from the serialized JSON entirely.

use serde::Serialize;

use crate::{category::Category, geometry::Point};

/// Content extracted from a single node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedNode {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    position: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
}

impl ParsedNode {
    /// Creates a parsed node with the given display text and position.
    pub fn new(text: impl Into<String>, position: Point) -> Self {
        Self {
            text: text.into(),
            url: None,
            note: None,
            position,
            category: None,
        }
    }

    /// Sets the extracted hyperlink target.
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    /// Sets the extracted note text.
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Returns the display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the hyperlink target, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the note text, if the node has a note.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the node position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the category, if the text carried a recognized emoji prefix.
    pub fn category(&self) -> Option<Category> {
        self.category
    }
}

/// A nested node together with its parent's display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSubnode {
    #[serde(flatten)]
    node: ParsedNode,
    parent: String,
}

impl ParsedSubnode {
    /// Creates a subnode from its parsed content and its parent's display text.
    pub fn new(node: ParsedNode, parent: impl Into<String>) -> Self {
        Self {
            node,
            parent: parent.into(),
        }
    }

    /// Returns the parsed content of the subnode.
    pub fn node(&self) -> &ParsedNode {
        &self.node
    }

    /// Returns the display text of the immediate parent.
    pub fn parent(&self) -> &str {
        &self.parent
    }
}

/// A connection with endpoints resolved to display texts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedConnection {
    source: String,
    target: String,
    curve: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl ParsedConnection {
    /// Creates a resolved connection.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        curve: Point,
        text: Option<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            curve,
            text,
        }
    }

    /// Returns the display text of the source node.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the display text of the target node.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the bezier focal point offset.
    pub fn curve(&self) -> Point {
        self.curve
    }

    /// Returns the connection label, if the connection had a title.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// The complete archival form of one map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchivedMap {
    title: String,
    nodes: Vec<ParsedNode>,
    subnodes: Vec<ParsedSubnode>,
    connections: Vec<ParsedConnection>,
}

impl ArchivedMap {
    pub fn new(
        title: impl Into<String>,
        nodes: Vec<ParsedNode>,
        subnodes: Vec<ParsedSubnode>,
        connections: Vec<ParsedConnection>,
    ) -> Self {
        Self {
            title: title.into(),
            nodes,
            subnodes,
            connections,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the top-level nodes in document order.
    pub fn nodes(&self) -> &[ParsedNode] {
        &self.nodes
    }

    /// Returns every nested node in pre-order.
    pub fn subnodes(&self) -> &[ParsedSubnode] {
        &self.subnodes
    }

    pub fn connections(&self) -> &[ParsedConnection] {
        &self.connections
    }
}

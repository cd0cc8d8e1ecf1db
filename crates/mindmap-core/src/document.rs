//! Input document model.
//!
//! These types mirror the JSON export of the mind-mapping application
//! closely enough to be decoded directly with serde. Optional fields stay
//! optional; nothing is validated here beyond the shape of the JSON.
//!
//! # Example
//!
//! ```
//! # use mindmap_core::document::RawDocument;
//! let json = r#"{
//!     "title": "Rust",
//!     "nodes": [{
//!         "id": "1",
//!         "title": { "text": "<p>Rust</p>" },
//!         "location": { "x": 0, "y": 0 }
//!     }],
//!     "connections": []
//! }"#;
//!
//! let document = RawDocument::from_json(json).expect("valid document");
//! assert_eq!(document.title(), "Rust");
//! assert_eq!(document.node_count(), 1);
//! ```

use serde::Deserialize;

use crate::{geometry::Point, identifier::Id};

/// A whole mind map as exported by the application.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    title: String,
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    connections: Vec<RawConnection>,
}

impl RawDocument {
    /// Creates a document from already-built parts.
    pub fn new(
        title: impl Into<String>,
        nodes: Vec<RawNode>,
        connections: Vec<RawConnection>,
    ) -> Self {
        Self {
            title: title.into(),
            nodes,
            connections,
        }
    }

    /// Decodes a document from its JSON export.
    ///
    /// Nodes may nest to any depth. The JSON recursion limit is lifted and
    /// the decoder grows its stack on the heap as needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] when the text is not JSON
    /// or does not have the shape of a mind map export.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let document = Self::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(document)
    }

    /// Returns the document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the top-level nodes in document order.
    pub fn nodes(&self) -> &[RawNode] {
        &self.nodes
    }

    /// Returns mutable access to the top-level nodes.
    pub fn nodes_mut(&mut self) -> &mut [RawNode] {
        &mut self.nodes
    }

    /// Returns the connections in document order.
    pub fn connections(&self) -> &[RawConnection] {
        &self.connections
    }

    /// Returns mutable access to the connections.
    pub fn connections_mut(&mut self) -> &mut [RawConnection] {
        &mut self.connections
    }

    /// Counts every node of the document across all nesting depths.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(RawNode::subtree_len).sum()
    }
}

/// A titled, positioned node, possibly with nested children.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    id: Id,
    title: RawTitle,
    #[serde(default)]
    note: Option<RawNote>,
    location: Point,
    #[serde(default)]
    shape_style: Option<ShapeStyle>,
    #[serde(default)]
    nodes: Vec<RawNode>,
}

impl RawNode {
    /// Creates a node with the given identifier, title markup, and location.
    pub fn new(id: impl Into<Id>, title: impl Into<String>, location: Point) -> Self {
        Self {
            id: id.into(),
            title: RawTitle::new(title),
            note: None,
            location,
            shape_style: None,
            nodes: Vec::new(),
        }
    }

    /// Sets the note markup.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(RawNote { text: note.into() });
        self
    }

    /// Sets the maximum title width.
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.title.max_width = Some(max_width);
        self
    }

    /// Sets the border color.
    pub fn with_border_color(mut self, color: impl Into<String>) -> Self {
        self.shape_style = Some(ShapeStyle {
            border_stroke_style: Some(BorderStrokeStyle {
                color: Some(color.into()),
            }),
        });
        self
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: RawNode) -> Self {
        self.nodes.push(child);
        self
    }

    /// Returns the document-local identifier.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Replaces the identifier.
    pub fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    /// Returns the raw title markup.
    pub fn title_markup(&self) -> &str {
        &self.title.text
    }

    /// Returns the maximum title width, if the document specifies one.
    pub fn max_width(&self) -> Option<f64> {
        self.title.max_width
    }

    /// Returns the raw note markup, if the node has a note.
    pub fn note_markup(&self) -> Option<&str> {
        self.note.as_ref().map(|note| note.text.as_str())
    }

    /// Returns the node location.
    pub fn location(&self) -> Point {
        self.location
    }

    /// Returns the border color, if the node carries a border style.
    pub fn border_color(&self) -> Option<&str> {
        self.shape_style
            .as_ref()
            .and_then(|style| style.border_stroke_style.as_ref())
            .and_then(|stroke| stroke.color.as_deref())
    }

    /// Returns the nested children in document order.
    pub fn children(&self) -> &[RawNode] {
        &self.nodes
    }

    /// Returns mutable access to the nested children.
    pub fn children_mut(&mut self) -> &mut [RawNode] {
        &mut self.nodes
    }

    /// Counts this node and all of its descendants.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.nodes);
        }
        count
    }
}

// Children are detached before they drop, so dropping a deep chain never
// recurses.
impl Drop for RawNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.nodes);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.nodes);
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTitle {
    #[serde(default)]
    text: String,
    #[serde(default)]
    max_width: Option<f64>,
}

impl RawTitle {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_width: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawNote {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShapeStyle {
    #[serde(default)]
    border_stroke_style: Option<BorderStrokeStyle>,
}

#[derive(Debug, Clone, Deserialize)]
struct BorderStrokeStyle {
    #[serde(default)]
    color: Option<String>,
}

/// A directed link between two nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConnection {
    #[serde(rename = "startNodeID")]
    start_node_id: Id,
    #[serde(rename = "endNodeID")]
    end_node_id: Id,
    #[serde(default)]
    title: Option<RawTitle>,
    #[serde(rename = "wayPointOffset", default)]
    way_point_offset: Point,
}

impl RawConnection {
    /// Creates a connection between two node identifiers with a curve offset.
    pub fn new(start: impl Into<Id>, end: impl Into<Id>, curve: Point) -> Self {
        Self {
            start_node_id: start.into(),
            end_node_id: end.into(),
            title: None,
            way_point_offset: curve,
        }
    }

    /// Sets the title markup.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(RawTitle::new(title));
        self
    }

    /// Returns the identifier of the start node.
    pub fn start(&self) -> &Id {
        &self.start_node_id
    }

    /// Returns the identifier of the end node.
    pub fn end(&self) -> &Id {
        &self.end_node_id
    }

    /// Replaces both endpoint identifiers.
    pub fn set_endpoints(&mut self, start: Id, end: Id) {
        self.start_node_id = start;
        self.end_node_id = end;
    }

    /// Returns the title markup, if the connection has a title.
    pub fn title_markup(&self) -> Option<&str> {
        self.title.as_ref().map(|title| title.text.as_str())
    }

    /// Returns the focal point offset of the connection's bezier curve.
    pub fn curve(&self) -> Point {
        self.way_point_offset
    }
}

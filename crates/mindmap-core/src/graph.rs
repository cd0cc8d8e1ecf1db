//! Graph output shape for force-directed rendering.
//!
//! Unlike the archival shape, everything here is keyed by document
//! identifiers, and node content is kept as embeddable markup. Pinned
//! coordinates are always serialized, as `null` when the layout is free to
//! move the element.

use serde::Serialize;

use crate::{geometry::Point, identifier::Id};

/// Pinned coordinates of a node or curve.
///
/// Each axis is `None` when the element floats. Serializes as
/// `{ "x": .., "y": .. }` with `null` for floating axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Pin {
    x: Option<f64>,
    y: Option<f64>,
}

impl Pin {
    /// Pins both axes to the given point.
    pub fn fixed(point: Point) -> Self {
        Self {
            x: Some(point.x()),
            y: Some(point.y()),
        }
    }

    /// Leaves both axes free.
    pub fn floating() -> Self {
        Self::default()
    }

    /// Pins `point` when `fixed` is true, otherwise floats.
    pub fn select(point: Point, fixed: bool) -> Self {
        if fixed {
            Self::fixed(point)
        } else {
            Self::floating()
        }
    }

    pub fn x(&self) -> Option<f64> {
        self.x
    }

    pub fn y(&self) -> Option<f64> {
        self.y
    }

    /// Returns `true` if at least one axis is pinned.
    pub fn is_fixed(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// A node ready to be handed to a force-directed renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    id: Id,
    html: String,
    fx: Option<f64>,
    fy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
    height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<Id>,
}

impl GraphNode {
    /// Creates a graph node.
    ///
    /// # Arguments
    ///
    /// * `id` - Document identifier of the node
    /// * `html` - Rendered markup (styles stripped, emoji converted)
    /// * `pin` - Pinned position, floating when the node is free
    /// * `width` - Layout width, if known
    /// * `height` - Layout height including padding
    pub fn new(
        id: Id,
        html: impl Into<String>,
        pin: Pin,
        width: Option<f64>,
        height: f64,
    ) -> Self {
        Self {
            color: None,
            id,
            html: html.into(),
            fx: pin.x(),
            fy: pin.y(),
            width,
            height,
            parent: None,
        }
    }

    /// Sets the border color.
    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    /// Sets the identifier of the immediate parent.
    pub fn with_parent(mut self, parent: Option<Id>) -> Self {
        self.parent = parent;
        self
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the pinned position of the node.
    pub fn pin(&self) -> Pin {
        Pin {
            x: self.fx,
            y: self.fy,
        }
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the identifier of the immediate parent, `None` for top-level nodes.
    pub fn parent(&self) -> Option<&Id> {
        self.parent.as_ref()
    }
}

/// A link between two nodes, keyed by raw identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphLink {
    source: Id,
    target: Id,
    curve: Pin,
}

impl GraphLink {
    pub fn new(source: Id, target: Id, curve: Pin) -> Self {
        Self {
            source,
            target,
            curve,
        }
    }

    pub fn source(&self) -> &Id {
        &self.source
    }

    pub fn target(&self) -> &Id {
        &self.target
    }

    /// Returns the pinned curve offset.
    pub fn curve(&self) -> Pin {
        self.curve
    }
}

/// The complete graph form of one map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphMap {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
    subnodes: Vec<GraphNode>,
}

impl GraphMap {
    pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphLink>, subnodes: Vec<GraphNode>) -> Self {
        Self {
            nodes,
            links,
            subnodes,
        }
    }

    /// Returns every node across all depths in pre-order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    /// Returns the nested nodes only, in pre-order.
    pub fn subnodes(&self) -> &[GraphNode] {
        &self.subnodes
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_floating_node_serializes_nulls() {
        let node = GraphNode::new(Id::new("n1"), "<p>A</p>", Pin::floating(), None, 22.0);
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(
            value,
            json!({ "id": "n1", "html": "<p>A</p>", "fx": null, "fy": null, "height": 22.0 })
        );
    }

    #[test]
    fn test_fixed_node_with_parent_and_color() {
        let node = GraphNode::new(
            Id::new("n2"),
            "<p>B</p>",
            Pin::fixed(Point::new(3.0, 4.0)),
            Some(150.0),
            30.0,
        )
        .with_color(Some("#000000".to_string()))
        .with_parent(Some(Id::new("n1")));
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["fx"], json!(3.0));
        assert_eq!(value["fy"], json!(4.0));
        assert_eq!(value["width"], json!(150.0));
        assert_eq!(value["color"], json!("#000000"));
        assert_eq!(value["parent"], json!("n1"));
        assert!(node.pin().is_fixed());
    }

    #[test]
    fn test_link_curve_nulls_when_floating() {
        let link = GraphLink::new(Id::new("a"), Id::new("b"), Pin::floating());
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(
            value,
            json!({ "source": "a", "target": "b", "curve": { "x": null, "y": null } })
        );
    }

    #[test]
    fn test_pin_select() {
        let point = Point::new(1.0, 2.0);
        assert_eq!(Pin::select(point, true), Pin::fixed(point));
        assert_eq!(Pin::select(point, false), Pin::floating());
        assert!(!Pin::floating().is_fixed());
    }
}

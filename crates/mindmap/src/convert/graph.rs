use log::{debug, info, trace};
use rand::Rng;

use mindmap_core::{
    document::{RawConnection, RawDocument, RawNode},
    geometry::Point,
    graph::{GraphLink, GraphMap, GraphNode, Pin},
    measure::{Measure, MeasureConstraints, MeasureError},
};
use mindmap_parser::{convert_emojis, strip_style_attributes};

use crate::{config::GraphConfig, error::MindmapError, flatten::FlatTree};

/// Decides which nodes and links keep their document coordinates.
///
/// Each decision draws one number from the supplied random source, so a
/// seeded source makes the whole conversion reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinningPolicy {
    node_fixed_ratio: f64,
    link_fixed_ratio: f64,
}

impl PinningPolicy {
    /// Creates a policy from the two pinning probabilities.
    ///
    /// A ratio of `1.0` pins everything, `0.0` nothing.
    pub fn new(node_fixed_ratio: f64, link_fixed_ratio: f64) -> Self {
        Self {
            node_fixed_ratio,
            link_fixed_ratio,
        }
    }

    /// Pins `location` with probability `node_fixed_ratio`.
    pub fn pin_node<R: Rng + ?Sized>(&self, location: Point, rng: &mut R) -> Pin {
        Pin::select(location, rng.random::<f64>() < self.node_fixed_ratio)
    }

    /// Pins `curve` with probability `link_fixed_ratio`.
    pub fn pin_curve<R: Rng + ?Sized>(&self, curve: Point, rng: &mut R) -> Pin {
        Pin::select(curve, rng.random::<f64>() < self.link_fixed_ratio)
    }
}

impl From<&GraphConfig> for PinningPolicy {
    fn from(config: &GraphConfig) -> Self {
        Self::new(config.node_fixed_ratio(), config.link_fixed_ratio())
    }
}

/// Converts documents into the force-graph shape.
///
/// Node markup is measured with the injected [`Measure`] implementation and
/// pinning decisions come from the random source passed to
/// [`convert`](Self::convert). Neither is global state.
///
/// # Examples
///
/// ```
/// # use mindmap::config::GraphConfig;
/// # use mindmap::convert::GraphConverter;
/// # use mindmap::document::{RawDocument, RawNode};
/// # use mindmap::geometry::{Point, Size};
/// # use mindmap::measure::{Measure, MeasureConstraints, MeasureError};
/// # use rand::{SeedableRng, rngs::StdRng};
/// struct OneLine;
///
/// impl Measure for OneLine {
///     fn measure(&self, _: &str, _: &MeasureConstraints, _: &str) -> Result<Size, MeasureError> {
///         Ok(Size::new(80.0, 18.0))
///     }
/// }
///
/// let document = RawDocument::new(
///     "Map",
///     vec![RawNode::new("1", "<p>Rust</p>", Point::new(5.0, 5.0))],
///     Vec::new(),
/// );
/// let config = GraphConfig::default();
/// let converter = GraphConverter::new(OneLine, &config);
///
/// let graph = converter.convert(&document, &mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(graph.nodes()[0].height(), 22.0);
/// ```
#[derive(Debug)]
pub struct GraphConverter<'c, M> {
    measurer: M,
    config: &'c GraphConfig,
    pinning: PinningPolicy,
}

impl<'c, M: Measure> GraphConverter<'c, M> {
    /// Creates a converter.
    ///
    /// # Arguments
    ///
    /// * `measurer` - Measures node markup; pass a reference to share one
    /// * `config` - Pinning ratios, height padding and the node style class
    pub fn new(measurer: M, config: &'c GraphConfig) -> Self {
        Self {
            measurer,
            config,
            pinning: PinningPolicy::from(config),
        }
    }

    /// Converts a document into its graph shape.
    ///
    /// `nodes` holds every node at every depth in pre-order and `subnodes`
    /// the nested ones only. Each node is measured and pinned once, so a
    /// node appearing in both lists is identical in both. Links keep the raw
    /// connection identifiers.
    ///
    /// Random draws happen in a fixed order, nodes in pre-order and then
    /// links in document order.
    ///
    /// # Errors
    ///
    /// Returns [`MindmapError::Measure`] if any node cannot be measured.
    pub fn convert<R: Rng + ?Sized>(
        &self,
        document: &RawDocument,
        rng: &mut R,
    ) -> Result<GraphMap, MindmapError> {
        info!(title = document.title(); "Converting map to graph shape");

        let tree = FlatTree::new(document.nodes());
        let annotated =
            tree.try_annotate(|node| self.convert_node(node, rng), |node, _| node.id().clone())?;

        let mut nodes = Vec::with_capacity(annotated.len());
        let mut subnodes = Vec::new();
        for entry in annotated {
            let (node, parent) = entry.into_parts();
            let node = node.with_parent(parent);
            if node.parent().is_some() {
                subnodes.push(node.clone());
            }
            nodes.push(node);
        }

        let links: Vec<GraphLink> = document
            .connections()
            .iter()
            .map(|connection| self.convert_link(connection, rng))
            .collect();

        debug!(
            nodes = nodes.len(),
            subnodes = subnodes.len(),
            links = links.len();
            "Graph conversion complete"
        );

        Ok(GraphMap::new(nodes, links, subnodes))
    }

    fn convert_node<R: Rng + ?Sized>(
        &self,
        node: &RawNode,
        rng: &mut R,
    ) -> Result<GraphNode, MeasureError> {
        let html = convert_emojis(&strip_style_attributes(node.title_markup()));
        let constraints = MeasureConstraints::new(node.max_width());
        let size = self
            .measurer
            .measure(&html, &constraints, self.config.style_class())?
            .grow_height(self.config.height_padding());

        let pin = self.pinning.pin_node(node.location(), rng);
        let width = node.max_width().unwrap_or(f64::from(size.width()));
        trace!(id:% = node.id(), fixed = pin.is_fixed(); "Converted node");

        Ok(GraphNode::new(
            node.id().clone(),
            html,
            pin,
            Some(width),
            f64::from(size.height()),
        )
        .with_color(node.border_color().map(str::to_string)))
    }

    fn convert_link<R: Rng + ?Sized>(&self, connection: &RawConnection, rng: &mut R) -> GraphLink {
        let curve = self.pinning.pin_curve(connection.curve(), rng);
        GraphLink::new(connection.start().clone(), connection.end().clone(), curve)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use float_cmp::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use mindmap_core::{geometry::Size, identifier::Id};

    use super::*;

    /// Reports one fixed-height line per call and counts the calls.
    #[derive(Default)]
    struct CountingMeasure {
        calls: Cell<usize>,
    }

    impl Measure for CountingMeasure {
        fn measure(
            &self,
            markup: &str,
            constraints: &MeasureConstraints,
            _style_class: &str,
        ) -> Result<Size, MeasureError> {
            self.calls.set(self.calls.get() + 1);
            let width = constraints.max_width().unwrap_or(markup.len() as f64) as f32;
            Ok(Size::new(width, 18.0))
        }
    }

    struct FailingMeasure;

    impl Measure for FailingMeasure {
        fn measure(&self, _: &str, _: &MeasureConstraints, _: &str) -> Result<Size, MeasureError> {
            Err(MeasureError::Layout("no fonts".to_string()))
        }
    }

    fn sample() -> RawDocument {
        RawDocument::new(
            "Map",
            vec![
                RawNode::new("1", r#"<p style="color: red">A</p>"#, Point::new(10.0, 20.0))
                    .with_max_width(150.0)
                    .with_border_color("#ff0000")
                    .with_child(
                        RawNode::new("1a", "<p>A1</p>", Point::new(1.0, 1.0))
                            .with_child(RawNode::new("1a1", "<p>A1x</p>", Point::new(2.0, 2.0))),
                    ),
                RawNode::new("2", "<p>\u{1F4D6} B</p>", Point::new(30.0, 40.0)),
            ],
            vec![RawConnection::new("1", "2", Point::new(7.0, 8.0))],
        )
    }

    fn all_pinned() -> GraphConfig {
        GraphConfig::default()
            .with_node_fixed_ratio(1.0)
            .with_link_fixed_ratio(1.0)
    }

    fn none_pinned() -> GraphConfig {
        GraphConfig::default()
            .with_node_fixed_ratio(0.0)
            .with_link_fixed_ratio(0.0)
    }

    #[test]
    fn test_nodes_include_every_depth() {
        let measure = CountingMeasure::default();
        let config = GraphConfig::default();
        let converter = GraphConverter::new(&measure, &config);

        let graph = converter
            .convert(&sample(), &mut StdRng::seed_from_u64(1))
            .unwrap();
        let ids: Vec<Id> = graph.nodes().iter().map(|n| n.id().clone()).collect();
        let sub_ids: Vec<Id> = graph.subnodes().iter().map(|n| n.id().clone()).collect();

        assert_eq!(ids, ["1", "1a", "1a1", "2"].map(Id::new));
        assert_eq!(sub_ids, ["1a", "1a1"].map(Id::new));
        assert_eq!(measure.calls.get(), 4);
    }

    #[test]
    fn test_subnodes_match_their_entries_in_nodes() {
        let measure = CountingMeasure::default();
        let config = GraphConfig::default();
        let converter = GraphConverter::new(&measure, &config);

        let graph = converter
            .convert(&sample(), &mut StdRng::seed_from_u64(99))
            .unwrap();

        for subnode in graph.subnodes() {
            let node = graph.nodes().iter().find(|n| n.id() == subnode.id()).unwrap();
            assert_eq!(node, subnode);
        }
    }

    #[test]
    fn test_parents_are_identifiers() {
        let config = GraphConfig::default();
        let converter = GraphConverter::new(CountingMeasure::default(), &config);
        let graph = converter
            .convert(&sample(), &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(graph.nodes()[0].parent(), None);
        assert_eq!(graph.subnodes()[0].parent(), Some(&Id::new("1")));
        assert_eq!(graph.subnodes()[1].parent(), Some(&Id::new("1a")));
    }

    #[test]
    fn test_node_markup_and_sizing() {
        let config = GraphConfig::default();
        let converter = GraphConverter::new(CountingMeasure::default(), &config);
        let graph = converter
            .convert(&sample(), &mut StdRng::seed_from_u64(1))
            .unwrap();

        let first = &graph.nodes()[0];
        assert_eq!(first.html(), "<p >A</p>");
        assert_eq!(first.color(), Some("#ff0000"));
        assert_eq!(first.width(), Some(150.0));
        assert_approx_eq!(f64, first.height(), 22.0);

        let last = &graph.nodes()[3];
        assert!(last.html().contains("unicode/1f4d6.png"));
        assert_eq!(last.color(), None);
        assert_eq!(last.width(), Some(last.html().len() as f64));
    }

    #[test]
    fn test_height_padding_is_configurable() {
        let config = GraphConfig::default().with_height_padding(10.0);
        let converter = GraphConverter::new(CountingMeasure::default(), &config);
        let graph = converter
            .convert(&sample(), &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_approx_eq!(f64, graph.nodes()[0].height(), 28.0);
    }

    #[test]
    fn test_full_pinning_keeps_coordinates() {
        let config = all_pinned();
        let converter = GraphConverter::new(CountingMeasure::default(), &config);
        let graph = converter
            .convert(&sample(), &mut StdRng::seed_from_u64(3))
            .unwrap();

        let pin = graph.nodes()[0].pin();
        assert_eq!((pin.x(), pin.y()), (Some(10.0), Some(20.0)));
        let curve = graph.links()[0].curve();
        assert_eq!((curve.x(), curve.y()), (Some(7.0), Some(8.0)));
    }

    #[test]
    fn test_no_pinning_floats_everything() {
        let config = none_pinned();
        let converter = GraphConverter::new(CountingMeasure::default(), &config);
        let graph = converter
            .convert(&sample(), &mut StdRng::seed_from_u64(3))
            .unwrap();

        assert!(graph.nodes().iter().all(|n| !n.pin().is_fixed()));
        assert!(!graph.links()[0].curve().is_fixed());
    }

    #[test]
    fn test_links_keep_raw_identifiers() {
        let config = GraphConfig::default();
        let converter = GraphConverter::new(CountingMeasure::default(), &config);
        let graph = converter
            .convert(&sample(), &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(graph.links()[0].source(), "1");
        assert_eq!(graph.links()[0].target(), "2");
    }

    #[test]
    fn test_same_seed_same_graph() {
        let config = GraphConfig::default();
        let converter = GraphConverter::new(CountingMeasure::default(), &config);
        let document = sample();

        let first = converter
            .convert(&document, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let second = converter
            .convert(&document, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_measure_failure_propagates() {
        let config = GraphConfig::default();
        let converter = GraphConverter::new(FailingMeasure, &config);
        let err = converter
            .convert(&sample(), &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, MindmapError::Measure(MeasureError::Layout(_))));
    }

    #[test]
    fn test_pinning_ratio_statistics() {
        let policy = PinningPolicy::new(0.85, 0.75);
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 20_000;

        let fixed_nodes = (0..trials)
            .filter(|_| policy.pin_node(Point::new(1.0, 1.0), &mut rng).is_fixed())
            .count();
        let fixed_links = (0..trials)
            .filter(|_| policy.pin_curve(Point::new(1.0, 1.0), &mut rng).is_fixed())
            .count();

        let node_ratio = fixed_nodes as f64 / trials as f64;
        let link_ratio = fixed_links as f64 / trials as f64;
        assert!((node_ratio - 0.85).abs() < 0.02, "node ratio {node_ratio}");
        assert!((link_ratio - 0.75).abs() < 0.02, "link ratio {link_ratio}");
    }
}

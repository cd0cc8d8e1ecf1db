//! Behavioral properties of both conversions over generated documents.

use mindmap::{
    MapConverter,
    document::{RawConnection, RawDocument, RawNode},
    geometry::{Point, Size},
    identifier::Id,
    measure::{Measure, MeasureConstraints, MeasureError},
};
use mindmap_parser::error::ErrorCode;
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

struct FixedLines;

impl Measure for FixedLines {
    fn measure(&self, _: &str, _: &MeasureConstraints, _: &str) -> Result<Size, MeasureError> {
        Ok(Size::new(100.0, 20.0))
    }
}

fn node(id: &str, text: &str) -> RawNode {
    RawNode::new(id, format!("<p>{text}</p>"), Point::new(1.0, 1.0))
}

#[test]
fn test_connection_resolution_by_text() {
    let document = RawDocument::new(
        "Map",
        vec![node("1", "A"), node("2", "B")],
        vec![RawConnection::new("1", "2", Point::new(0.5, 0.5))],
    );

    let archive = MapConverter::default().archive(&document).unwrap();
    assert_eq!(archive.connections()[0].source(), "A");
    assert_eq!(archive.connections()[0].target(), "B");
}

#[test]
fn test_missing_endpoint_is_an_error_naming_it() {
    let document = RawDocument::new(
        "Map",
        vec![node("1", "A"), node("2", "B")],
        vec![RawConnection::new("1", "3", Point::default())],
    );

    let err = MapConverter::default().archive(&document).unwrap_err();
    assert!(err.to_string().contains("`3`"), "unexpected error: {err}");
    assert!(err.to_string().contains(ErrorCode::E200.as_str()));
}

#[test]
fn test_pinning_statistics_over_large_map() {
    let nodes: Vec<RawNode> = (0..4000)
        .map(|i| node(&format!("n{i}"), &format!("Node {i}")))
        .collect();
    let connections: Vec<RawConnection> = (1..4000)
        .map(|i| RawConnection::new(format!("n{}", i - 1), format!("n{i}"), Point::new(2.0, 2.0)))
        .collect();
    let document = RawDocument::new("Large", nodes, connections);

    let graph = MapConverter::default()
        .graph(&document, &FixedLines, &mut StdRng::seed_from_u64(0x5eed))
        .unwrap();

    let pinned_nodes = graph.nodes().iter().filter(|n| n.pin().is_fixed()).count();
    let pinned_links = graph.links().iter().filter(|l| l.curve().is_fixed()).count();
    let node_ratio = pinned_nodes as f64 / graph.nodes().len() as f64;
    let link_ratio = pinned_links as f64 / graph.links().len() as f64;

    assert!((node_ratio - 0.85).abs() < 0.04, "node ratio {node_ratio}");
    assert!((link_ratio - 0.75).abs() < 0.04, "link ratio {link_ratio}");
}

fn nested_json(depth: usize) -> String {
    let mut json = String::from(r#"{ "title": "Deep", "nodes": ["#);
    for level in 0..depth {
        json.push_str(&format!(
            r#"{{ "id": {level}, "title": {{ "text": "<p>L{level}</p>" }}, "location": {{ "x": 0, "y": 0 }}, "nodes": ["#
        ));
    }
    json.push_str(&"] }".repeat(depth));
    json.push_str(r#"], "connections": [] }"#);
    json
}

#[test]
fn test_deeply_nested_export_converts() {
    let converter = MapConverter::default();
    for depth in [64, 65, 300] {
        let document = converter.load(&nested_json(depth)).expect("deep document loads");
        assert_eq!(document.node_count(), depth);

        let archive = converter.archive(&document).unwrap();
        assert_eq!(archive.nodes().len(), 1);
        assert_eq!(archive.subnodes().len(), depth - 1);
        let deepest = archive.subnodes().last().unwrap();
        assert_eq!(deepest.node().text(), format!("L{}", depth - 1));
        assert_eq!(deepest.parent(), format!("L{}", depth - 2));

        let graph = converter
            .graph(&document, &FixedLines, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(graph.nodes().len(), depth);
        let parent = graph.subnodes().last().unwrap().parent().unwrap();
        assert_eq!(parent, format!("{}", depth - 2).as_str());
    }
}

#[test]
fn test_parallel_conversions_are_independent() {
    let converter = MapConverter::default();
    let left = RawDocument::new(
        "Left",
        vec![node("1", "Ownership").with_child(node("2", "Borrowing")), node("3", "Traits")],
        vec![RawConnection::new("1", "3", Point::default())],
    );
    let right = RawDocument::new(
        "Right",
        vec![node("1", "Tokio"), node("2", "Async").with_child(node("3", "Futures"))],
        vec![RawConnection::new("2", "1", Point::default())],
    );
    let expected_left = converter.archive(&left).unwrap();
    let expected_right = converter.archive(&right).unwrap();

    let (from_left, from_right) = std::thread::scope(|scope| {
        let left = scope.spawn(|| {
            let renamed = converter.rewrite_ids(left.clone()).unwrap();
            (converter.archive(&left).unwrap(), renamed)
        });
        let right = scope.spawn(|| converter.archive(&right).unwrap());
        (left.join().unwrap(), right.join().unwrap())
    });

    assert_eq!(from_left.0, expected_left);
    assert_eq!(from_right, expected_right);
    assert_eq!(from_left.1.nodes()[0].id(), "Ownership");
    assert_eq!(left.nodes()[0].id(), "1");
    assert_eq!(right.nodes()[0].id(), "1");
    assert_eq!(from_right.connections()[0].source(), "Async");
}

fn arb_node(prefix: String, depth: u32) -> BoxedStrategy<RawNode> {
    let text = "[A-Za-z]{1,8}";
    if depth == 0 {
        return text.prop_map(move |text| node(&prefix, &text)).boxed();
    }
    (text, 0usize..3)
        .prop_flat_map(move |(text, count)| {
            let children: Vec<BoxedStrategy<RawNode>> = (0..count)
                .map(|i| arb_node(format!("{prefix}.{i}"), depth - 1))
                .collect();
            let prefix = prefix.clone();
            children.prop_map(move |children| {
                children
                    .into_iter()
                    .fold(node(&prefix, &text), |parent, child| parent.with_child(child))
            })
        })
        .boxed()
}

fn arb_document() -> impl Strategy<Value = RawDocument> {
    (1usize..5)
        .prop_flat_map(|count| {
            let roots: Vec<BoxedStrategy<RawNode>> =
                (0..count).map(|i| arb_node(format!("r{i}"), 3)).collect();
            (roots, prop::collection::vec((0..count, 0..count), 0..4))
        })
        .prop_map(|(roots, pairs)| {
            let connections = pairs
                .into_iter()
                .map(|(a, b)| RawConnection::new(format!("r{a}"), format!("r{b}"), Point::default()))
                .collect();
            RawDocument::new("Generated", roots, connections)
        })
}

proptest! {
    #[test]
    fn every_subnode_parent_is_an_archived_text(document in arb_document()) {
        let archive = MapConverter::default().archive(&document).unwrap();
        let texts: Vec<&str> = archive
            .nodes()
            .iter()
            .chain(archive.subnodes().iter().map(|s| s.node()))
            .map(|n| n.text())
            .collect();

        prop_assert_eq!(
            archive.nodes().len() + archive.subnodes().len(),
            document.node_count()
        );
        for subnode in archive.subnodes() {
            prop_assert!(texts.contains(&subnode.parent()));
        }
        for connection in archive.connections() {
            prop_assert!(archive.nodes().iter().any(|n| n.text() == connection.source()));
            prop_assert!(archive.nodes().iter().any(|n| n.text() == connection.target()));
        }
    }

    #[test]
    fn every_graph_subnode_parent_is_a_node_id(document in arb_document(), seed in any::<u64>()) {
        let graph = MapConverter::default()
            .graph(&document, &FixedLines, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let ids: Vec<&Id> = graph.nodes().iter().map(|n| n.id()).collect();

        prop_assert_eq!(graph.nodes().len(), document.node_count());
        prop_assert_eq!(graph.links().len(), document.connections().len());
        for subnode in graph.subnodes() {
            let parent = subnode.parent().unwrap();
            prop_assert!(ids.contains(&parent));
        }
    }

    #[test]
    fn archival_conversion_is_deterministic(document in arb_document()) {
        let converter = MapConverter::default();
        prop_assert_eq!(
            converter.archive(&document).unwrap(),
            converter.archive(&document).unwrap()
        );
    }
}

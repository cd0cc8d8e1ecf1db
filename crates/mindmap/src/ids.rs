//! Identifier rewriting.
//!
//! Exported maps identify nodes by opaque generated identifiers. For
//! hand-editing and diffing it is easier when nodes are identified by their
//! display text, so [`rewrite_ids`] replaces every identifier with the node's
//! extracted text and updates connection endpoints to match.

use std::collections::HashSet;

use log::debug;

use mindmap_core::{document::RawDocument, identifier::Id};
use mindmap_parser::{
    error::{Diagnostic, DiagnosticCollector, ParseError},
    extract_text,
};

use crate::{
    flatten::{FlatTree, for_each_mut},
    resolve::NodeLookup,
};

/// Replaces node identifiers with display texts.
///
/// Every node at every depth is renamed to its extracted title text. When two
/// nodes share a text, the later one in pre-order receives the first free
/// name of the form `text (2)`, `text (3)` and so on, so identifiers stay
/// unique, and each such rename is reported as a warning. Connection
/// endpoints are rewritten through the same mapping.
///
/// # Errors
///
/// Returns a [`ParseError`] if the document reuses an identifier or a
/// connection names a node that does not exist. The document is consumed
/// either way.
///
/// # Examples
///
/// ```
/// # use mindmap::ids::rewrite_ids;
/// # use mindmap::document::{RawConnection, RawDocument, RawNode};
/// # use mindmap::geometry::Point;
/// let document = RawDocument::new(
///     "Map",
///     vec![
///         RawNode::new("9F2A", "<p>Ownership</p>", Point::default()),
///         RawNode::new("71C0", "<p>Borrowing</p>", Point::default()),
///     ],
///     vec![RawConnection::new("9F2A", "71C0", Point::default())],
/// );
///
/// let document = rewrite_ids(document).unwrap();
/// assert_eq!(document.nodes()[0].id(), "Ownership");
/// assert_eq!(document.connections()[0].end(), "Borrowing");
/// ```
pub fn rewrite_ids(mut document: RawDocument) -> Result<RawDocument, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut renames: NodeLookup<Id> = NodeLookup::new();
    let mut taken = HashSet::new();
    let mut new_ids = Vec::new();

    for entry in FlatTree::new(document.nodes()).iter() {
        let node = entry.node();
        let name = unique_name(extract_text(node.title_markup()), &mut taken, &mut collector);
        let new_id = Id::from(name);
        if let Err(diagnostic) = renames.insert(node.id().clone(), new_id.clone()) {
            collector.emit(diagnostic);
        }
        new_ids.push(new_id);
    }

    for connection in document.connections() {
        for endpoint in [connection.start(), connection.end()] {
            if let Err(diagnostic) = renames.resolve(endpoint) {
                collector.emit(diagnostic);
            }
        }
    }
    collector.finish()?;

    for_each_mut(document.nodes_mut(), |index, node| {
        if let Some(id) = new_ids.get(index) {
            node.set_id(id.clone());
        }
    });

    for connection in document.connections_mut() {
        let start = renames.get(connection.start()).cloned();
        let end = renames.get(connection.end()).cloned();
        if let (Some(start), Some(end)) = (start, end) {
            connection.set_endpoints(start, end);
        }
    }

    debug!(nodes = renames.len(); "Rewrote node identifiers");
    Ok(document)
}

/// Returns `name`, or the first free `name (n)` when it is already taken.
///
/// Every rename is emitted to `collector` as a warning.
fn unique_name(
    name: String,
    taken: &mut HashSet<String>,
    collector: &mut DiagnosticCollector,
) -> String {
    let unique = if taken.contains(&name) {
        let candidate = (2..)
            .map(|n| format!("{name} ({n})"))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_default();
        collector.emit(
            Diagnostic::warning(format!(
                "node text `{name}` is used by more than one node, renamed to `{candidate}`"
            ))
            .with_help("give nodes distinct titles to keep their identifiers stable"),
        );
        candidate
    } else {
        name
    };
    taken.insert(unique.clone());
    unique
}

#[cfg(test)]
mod tests {
    use mindmap_core::{
        document::{RawConnection, RawNode},
        geometry::Point,
    };
    use mindmap_parser::error::ErrorCode;

    use super::*;

    fn node(id: &str, text: &str) -> RawNode {
        RawNode::new(id, format!("<p>{text}</p>"), Point::default())
    }

    #[test]
    fn test_rewrites_every_depth() {
        let document = RawDocument::new(
            "Map",
            vec![
                node("x1", "Rust").with_child(node("x2", "Cargo").with_child(node("x3", "Crates"))),
            ],
            Vec::new(),
        );

        let document = rewrite_ids(document).unwrap();
        let root = &document.nodes()[0];
        assert_eq!(root.id(), "Rust");
        assert_eq!(root.children()[0].id(), "Cargo");
        assert_eq!(root.children()[0].children()[0].id(), "Crates");
    }

    #[test]
    fn test_connections_follow_renames() {
        let document = RawDocument::new(
            "Map",
            vec![node("a", "Tokio"), node("b", "Async")],
            vec![RawConnection::new("b", "a", Point::new(1.0, 1.0)).with_title("<p>runtime</p>")],
        );

        let document = rewrite_ids(document).unwrap();
        let connection = &document.connections()[0];
        assert_eq!(connection.start(), "Async");
        assert_eq!(connection.end(), "Tokio");
        assert_eq!(connection.title_markup(), Some("<p>runtime</p>"));
    }

    #[test]
    fn test_duplicate_texts_are_disambiguated() {
        let document = RawDocument::new(
            "Map",
            vec![
                node("1", "Docs").with_child(node("2", "Docs")),
                node("3", "Docs"),
                node("4", "Docs (2)"),
            ],
            vec![RawConnection::new("3", "1", Point::default())],
        );

        let document = rewrite_ids(document).unwrap();
        let ids: Vec<String> = FlatTree::new(document.nodes())
            .iter()
            .map(|entry| entry.node().id().to_string())
            .collect();

        assert_eq!(ids, ["Docs", "Docs (2)", "Docs (3)", "Docs (2) (2)"]);
        assert_eq!(document.connections()[0].start(), "Docs (3)");
        assert_eq!(document.connections()[0].end(), "Docs");
    }

    #[test]
    fn test_unknown_connection_endpoint() {
        let document = RawDocument::new(
            "Map",
            vec![node("a", "A")],
            vec![RawConnection::new("a", "missing", Point::default())],
        );

        let err = rewrite_ids(document).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
    }

    #[test]
    fn test_reused_identifier() {
        let document = RawDocument::new(
            "Map",
            vec![node("a", "A").with_child(node("a", "B"))],
            Vec::new(),
        );

        let err = rewrite_ids(document).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E201));
    }

    #[test]
    fn test_unique_name() {
        let mut taken = HashSet::new();
        let mut collector = DiagnosticCollector::new();
        let mut name = |text: &str| unique_name(text.to_string(), &mut taken, &mut collector);

        assert_eq!(name("A"), "A");
        assert_eq!(name("A"), "A (2)");
        assert_eq!(name("A"), "A (3)");
        assert_eq!(name("B"), "B");

        let warnings = collector.diagnostics();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|d| d.severity().is_warning()));
        assert!(warnings[1].message().contains("renamed to `A (3)`"));
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_duplicate_texts_do_not_block_reported_errors() {
        let document = RawDocument::new(
            "Map",
            vec![node("1", "Docs"), node("2", "Docs")],
            vec![RawConnection::new("1", "9", Point::default())],
        );

        let err = rewrite_ids(document).unwrap_err();
        let severities: Vec<bool> = err
            .diagnostics()
            .iter()
            .map(|d| d.severity().is_warning())
            .collect();
        assert_eq!(severities, [true, false]);
        assert_eq!(err.diagnostics()[1].code(), Some(ErrorCode::E200));
    }
}

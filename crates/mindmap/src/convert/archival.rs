use log::{debug, info};

use mindmap_core::{
    archive::{ArchivedMap, ParsedNode, ParsedSubnode},
    document::RawDocument,
};
use mindmap_parser::{error::DiagnosticCollector, error::ParseError, parse_node};

use crate::{
    flatten::FlatTree,
    resolve::{NodeLookup, resolve_connections},
};

/// Converts a document into its archival shape.
///
/// Top-level nodes keep document order in `nodes`; every nested node, at any
/// depth, lands in `subnodes` in pre-order with its immediate parent's
/// display text. Connections are resolved against the top-level nodes only,
/// after all of them have been parsed.
///
/// The conversion is deterministic: the same document always yields the
/// same map.
///
/// # Errors
///
/// Returns a [`ParseError`] listing every duplicate top-level identifier and
/// every connection endpoint that names no top-level node.
pub fn archive_map(document: &RawDocument) -> Result<ArchivedMap, ParseError> {
    info!(title = document.title(); "Converting map to archival shape");

    let mut collector = DiagnosticCollector::new();
    let Partition {
        nodes,
        subnodes,
        lookup,
    } = partition(&FlatTree::new(document.nodes()), &mut collector);

    collector.finish()?;
    let connections = resolve_connections(document.connections(), &lookup)?;

    debug!(
        nodes = nodes.len(),
        subnodes = subnodes.len(),
        connections = connections.len();
        "Archival conversion complete"
    );

    Ok(ArchivedMap::new(
        document.title(),
        nodes,
        subnodes,
        connections,
    ))
}

/// Parsed nodes split by depth, with the text lookup of the top level.
struct Partition {
    nodes: Vec<ParsedNode>,
    subnodes: Vec<ParsedSubnode>,
    lookup: NodeLookup,
}

/// Parses every node once and keys each top-level node's text by its raw
/// identifier. Duplicate identifiers are emitted to `collector`.
fn partition(tree: &FlatTree<'_>, collector: &mut DiagnosticCollector) -> Partition {
    let annotated = tree.annotate(parse_node, |_, parsed: &ParsedNode| {
        parsed.text().to_string()
    });

    let mut lookup: NodeLookup = NodeLookup::new();
    let mut nodes = Vec::new();
    let mut subnodes = Vec::new();

    for entry in annotated {
        let id = entry.node().id().clone();
        let (parsed, parent) = entry.into_parts();
        match parent {
            Some(parent) => subnodes.push(ParsedSubnode::new(parsed, parent)),
            None => {
                if let Err(diagnostic) = lookup.insert(id, parsed.text().to_string()) {
                    collector.emit(diagnostic);
                }
                nodes.push(parsed);
            }
        }
    }

    Partition {
        nodes,
        subnodes,
        lookup,
    }
}

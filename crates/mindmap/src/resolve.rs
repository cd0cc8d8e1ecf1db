//! Connection endpoint resolution.
//!
//! Connections in a document point at node identifiers. The archival shape
//! replaces those identifiers with display texts, and identifier rewriting
//! replaces them with new identifiers; both go through a [`NodeLookup`].

use std::collections::{HashMap, hash_map::Entry};

use mindmap_core::{archive::ParsedConnection, document::RawConnection, identifier::Id};
use mindmap_parser::{
    connection_text,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
};

/// Maps node identifiers to a resolved value, display text by default.
#[derive(Debug, Clone)]
pub struct NodeLookup<V = String> {
    entries: HashMap<Id, V>,
}

impl<V> Default for NodeLookup<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> NodeLookup<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the value for `id`.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorCode::E201`] diagnostic if `id` is already present.
    /// The first value is kept.
    pub fn insert(&mut self, id: Id, value: V) -> Result<(), Diagnostic> {
        match self.entries.entry(id) {
            Entry::Occupied(entry) => Err(Diagnostic::error(format!(
                "node identifier `{}` is used by more than one node",
                entry.key()
            ))
            .with_code(ErrorCode::E201)
            .with_help("give every node a unique identifier")),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: &Id) -> Option<&V> {
        self.entries.get(id)
    }

    /// Returns the value for a connection endpoint.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorCode::E200`] diagnostic naming `id` when it is not in
    /// the lookup.
    pub fn resolve(&self, id: &Id) -> Result<&V, Diagnostic> {
        self.get(id).ok_or_else(|| unknown_endpoint(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn unknown_endpoint(id: &Id) -> Diagnostic {
    Diagnostic::error(format!("connection references unknown node `{id}`"))
        .with_code(ErrorCode::E200)
        .with_help("connections may only join top-level nodes of the same map")
}

/// Resolves one connection into its archival form.
///
/// Source and target become the display texts of the endpoint nodes, the
/// curve is copied, and the label is extracted from the connection title.
///
/// # Errors
///
/// Returns an [`ErrorCode::E200`] diagnostic for every endpoint missing from
/// `lookup`.
pub fn resolve_connection(
    raw: &RawConnection,
    lookup: &NodeLookup,
) -> Result<ParsedConnection, ParseError> {
    match (lookup.resolve(raw.start()), lookup.resolve(raw.end())) {
        (Ok(source), Ok(target)) => Ok(ParsedConnection::new(
            source.as_str(),
            target.as_str(),
            raw.curve(),
            connection_text(raw),
        )),
        (source, target) => Err(ParseError::new(
            [source.err(), target.err()].into_iter().flatten().collect(),
        )),
    }
}

/// Resolves every connection, reporting all unknown endpoints at once.
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic per unknown endpoint.
pub fn resolve_connections(
    connections: &[RawConnection],
    lookup: &NodeLookup,
) -> Result<Vec<ParsedConnection>, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut resolved = Vec::with_capacity(connections.len());

    for raw in connections {
        match resolve_connection(raw, lookup) {
            Ok(connection) => resolved.push(connection),
            Err(err) => {
                for diagnostic in err.diagnostics() {
                    collector.emit(diagnostic.clone());
                }
            }
        }
    }

    collector.finish()?;
    Ok(resolved)
}

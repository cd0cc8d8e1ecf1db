//! Tree flattening.
//!
//! A map is a forest of arbitrarily deep node trees. Both output shapes need
//! that forest as flat lists in which every node knows its immediate parent.
//! [`FlatTree`] does the traversal once, into an indexed arena of entries in
//! pre-order, and the converters then project each node exactly once with
//! [`FlatTree::annotate`], choosing what a parent reference should hold
//! (display text for the archival shape, identifier for the graph shape).
//!
//! # Example
//!
//! ```
//! # use mindmap::flatten::FlatTree;
//! # use mindmap::document::RawNode;
//! # use mindmap::geometry::Point;
//! let roots = vec![
//!     RawNode::new("a", "<p>A</p>", Point::default())
//!         .with_child(RawNode::new("a1", "<p>A1</p>", Point::default())),
//!     RawNode::new("b", "<p>B</p>", Point::default()),
//! ];
//!
//! let tree = FlatTree::new(&roots);
//! let ids: Vec<String> = tree.iter().map(|entry| entry.node().id().to_string()).collect();
//! assert_eq!(ids, ["a", "a1", "b"]);
//!
//! let annotated = tree.annotate(|node| node.id(), |_, id| (*id).clone());
//! assert_eq!(annotated[1].parent(), Some(roots[0].id()));
//! ```

use std::{convert::Infallible, slice};

use mindmap_core::document::RawNode;

/// Borrowed access to a node's children, shared or exclusive.
trait Branch: Sized {
    type Children: DoubleEndedIterator<Item = Self>;

    fn into_children(self) -> Self::Children;
}

impl<'a> Branch for &'a RawNode {
    type Children = slice::Iter<'a, RawNode>;

    fn into_children(self) -> Self::Children {
        self.children().iter()
    }
}

impl<'a> Branch for &'a mut RawNode {
    type Children = slice::IterMut<'a, RawNode>;

    fn into_children(self) -> Self::Children {
        self.children_mut().iter_mut()
    }
}

/// The one pre-order traversal behind [`FlatTree`] and [`for_each_mut`].
///
/// `visit` receives each node with its parent's index before the node's
/// children are expanded. Indices count visits from zero.
fn walk_pre_order<N, I, F>(roots: I, mut visit: F)
where
    N: Branch,
    I: DoubleEndedIterator<Item = N>,
    F: FnMut(&mut N, Option<usize>),
{
    let mut stack: Vec<(N, Option<usize>)> = roots.rev().map(|node| (node, None)).collect();
    let mut index = 0;

    while let Some((mut node, parent)) = stack.pop() {
        visit(&mut node, parent);
        stack.extend(
            node.into_children()
                .rev()
                .map(|child| (child, Some(index))),
        );
        index += 1;
    }
}

/// One node of a flattened forest.
#[derive(Debug, Clone, Copy)]
pub struct FlatEntry<'a> {
    node: &'a RawNode,
    parent: Option<usize>,
}

impl<'a> FlatEntry<'a> {
    /// Returns the raw node.
    pub fn node(&self) -> &'a RawNode {
        self.node
    }

    /// Returns the arena index of the immediate parent, `None` at top level.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Returns `true` for nodes that are not nested in another node.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// A node projected to a value, together with its parent's key.
#[derive(Debug, Clone)]
pub struct Annotated<'a, T, K> {
    node: &'a RawNode,
    value: T,
    parent: Option<K>,
}

impl<'a, T, K> Annotated<'a, T, K> {
    /// Returns the raw node the value was computed from.
    pub fn node(&self) -> &'a RawNode {
        self.node
    }

    /// Returns the projected value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the key of the immediate parent, `None` at top level.
    pub fn parent(&self) -> Option<&K> {
        self.parent.as_ref()
    }

    /// Returns `true` for nodes that are not nested in another node.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Splits the annotation into its value and parent key.
    pub fn into_parts(self) -> (T, Option<K>) {
        (self.value, self.parent)
    }
}

/// A forest of nodes flattened into pre-order.
///
/// Every node appears exactly once, each node before its descendants and a
/// node's whole subtree before its next sibling. Parents therefore always
/// precede their children in the arena.
#[derive(Debug, Clone)]
pub struct FlatTree<'a> {
    entries: Vec<FlatEntry<'a>>,
}

impl<'a> FlatTree<'a> {
    /// Flattens the given top-level nodes.
    ///
    /// Uses an explicit stack, so nesting depth is limited only by memory.
    pub fn new(roots: &'a [RawNode]) -> Self {
        let mut entries = Vec::new();
        walk_pre_order(roots.iter(), |node: &mut &'a RawNode, parent| {
            entries.push(FlatEntry {
                node: *node,
                parent,
            });
        });

        Self { entries }
    }

    /// Returns the number of nodes across all depths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&FlatEntry<'a>> {
        self.entries.get(index)
    }

    /// Iterates over the entries in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &FlatEntry<'a>> {
        self.entries.iter()
    }

    /// Projects every node once and annotates it with its parent's key.
    ///
    /// # Arguments
    ///
    /// * `compute` - Produces the value for a node; called once per node, in
    ///   pre-order
    /// * `key` - Derives from a node and its value what its children should
    ///   record as their parent
    pub fn annotate<T, K, C, P>(&self, mut compute: C, key: P) -> Vec<Annotated<'a, T, K>>
    where
        K: Clone,
        C: FnMut(&'a RawNode) -> T,
        P: Fn(&'a RawNode, &T) -> K,
    {
        match self.try_annotate(|node| Ok::<_, Infallible>(compute(node)), key) {
            Ok(annotated) => annotated,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`annotate`](Self::annotate).
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error produced by `compute`.
    pub fn try_annotate<T, K, E, C, P>(
        &self,
        mut compute: C,
        key: P,
    ) -> Result<Vec<Annotated<'a, T, K>>, E>
    where
        K: Clone,
        C: FnMut(&'a RawNode) -> Result<T, E>,
        P: Fn(&'a RawNode, &T) -> K,
    {
        let mut keys: Vec<K> = Vec::with_capacity(self.entries.len());
        let mut annotated = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let value = compute(entry.node)?;
            keys.push(key(entry.node, &value));
            // Parents precede children in pre-order, so their key exists.
            let parent = entry.parent.map(|index| keys[index].clone());
            annotated.push(Annotated {
                node: entry.node,
                value,
                parent,
            });
        }

        Ok(annotated)
    }
}

/// Flattens the given top-level nodes into pre-order.
///
/// Shorthand for [`FlatTree::new`].
pub fn flatten(roots: &[RawNode]) -> FlatTree<'_> {
    FlatTree::new(roots)
}

/// Visits every node mutably, in the order of [`FlatTree`].
///
/// `visit` receives the arena index the node has in a [`FlatTree`] built
/// from the same roots, so values computed from a flat tree can be written
/// back by index.
pub fn for_each_mut<F>(roots: &mut [RawNode], mut visit: F)
where
    F: FnMut(usize, &mut RawNode),
{
    let mut index = 0;
    walk_pre_order(roots.iter_mut(), |node: &mut &mut RawNode, _| {
        visit(index, &mut **node);
        index += 1;
    });
}

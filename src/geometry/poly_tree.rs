use slotmap::SlotMap;

use super::{Path, Paths};

slotmap::new_key_type! {
    /// Unique identifier for a node in a [`PolyTree`].
    pub struct PolyNodeId;
}

/// A closed output ring and its place in the containment hierarchy.
#[derive(Debug, Clone)]
pub struct PolyNode {
    path: Path,
    parent: Option<PolyNodeId>,
    children: Vec<PolyNodeId>,
    depth: usize,
}

impl PolyNode {
    /// The ring of this node.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The enclosing node, or `None` when the parent is the synthetic root.
    #[must_use]
    pub fn parent(&self) -> Option<PolyNodeId> {
        self.parent
    }

    /// Directly nested rings: holes of an outer, or islands inside a hole.
    #[must_use]
    pub fn children(&self) -> &[PolyNodeId] {
        &self.children
    }

    /// Nesting depth; top-level outers have depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true for rings at odd depth.
    #[must_use]
    pub fn is_hole(&self) -> bool {
        self.depth % 2 == 1
    }
}

/// Hierarchical result of a Boolean operation.
///
/// Nodes live in an arena and refer to each other by [`PolyNodeId`]. The
/// root is synthetic: top-level outers are listed in [`PolyTree::roots`].
#[derive(Debug, Clone, Default)]
pub struct PolyTree {
    nodes: SlotMap<PolyNodeId, PolyNode>,
    roots: Vec<PolyNodeId>,
}

impl PolyTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a ring under `parent` (or under the root) and returns its ID.
    ///
    /// Children are listed in insertion order. An unknown `parent` attaches
    /// the ring to the root.
    pub fn add(&mut self, path: Path, parent: Option<PolyNodeId>) -> PolyNodeId {
        let parent = parent.filter(|p| self.nodes.contains_key(*p));
        let depth = parent
            .and_then(|p| self.nodes.get(p))
            .map_or(0, |p| p.depth + 1);
        let id = self.nodes.insert(PolyNode {
            path,
            parent,
            children: Vec::new(),
            depth,
        });
        match parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(node) => node.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// IDs of the top-level rings.
    #[must_use]
    pub fn roots(&self) -> &[PolyNodeId] {
        &self.roots
    }

    /// Returns the node for `id`.
    #[must_use]
    pub fn node(&self, id: PolyNodeId) -> Option<&PolyNode> {
        self.nodes.get(id)
    }

    /// Number of rings in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no ring.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node IDs in pre-order (parent before children, siblings in order).
    #[must_use]
    pub fn pre_order(&self) -> Vec<PolyNodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<PolyNodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Flattens the tree into a path set in pre-order.
    #[must_use]
    pub fn to_paths(&self) -> Paths {
        self.pre_order()
            .into_iter()
            .filter_map(|id| self.nodes.get(id))
            .map(|node| node.path.clone())
            .collect()
    }

    /// Sum of signed ring areas (outers positive, holes negative for a
    /// non-reversed solution).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.nodes.values().map(|n| n.path.signed_area()).sum()
    }
}

// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core diagram implementation: node storage, structure, accessors.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Line;
use smallvec::SmallVec;

use crate::error::DiagramError;
use crate::layout::LayoutConfig;
use crate::picking::{ColorAllocator, PickingConfig};
use crate::types::{ColorId, Displacement, NodeId};

/// A single-rooted tree of labeled blocks.
///
/// Nodes live in a generational arena. Each node exclusively owns its
/// children; the flat registry holds non-owning handles to every live node and
/// is what picking, drawing, and traversal iterate over.
///
/// Structural changes do **not** move anything. Displacements are only
/// (re)assigned by [`Diagram::compute_layout`], which callers invoke after they
/// finish building the tree.
///
/// ## Example
///
/// ```rust
/// use gds_diagram::Diagram;
///
/// let mut diagram = Diagram::new();
/// let root = diagram.insert(None, "Main loop").unwrap();
/// let input = diagram.insert(Some(root), "Input").unwrap();
/// let output = diagram.insert(Some(root), "Output").unwrap();
///
/// diagram.compute_layout().unwrap();
///
/// assert_eq!(diagram.displacement(input).unwrap().x, 10);
/// assert_eq!(diagram.displacement(output).unwrap().x, 20);
/// assert_eq!(diagram.displacement(root).unwrap().x, 15);
/// ```
pub struct Diagram {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees and clears)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: Option<NodeId>,
    pub(crate) registry: Vec<NodeId>,
    colors: ColorAllocator,
    layout_config: LayoutConfig,
    picking_config: PickingConfig,
    pub(crate) laid_out: bool,
}

impl core::fmt::Debug for Diagram {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Diagram")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.registry.len())
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .field("laid_out", &self.laid_out)
            .finish_non_exhaustive()
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) label: String,
    pub(crate) depth: u32,
    pub(crate) displacement: Displacement,
    pub(crate) color: ColorId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
}

impl Diagram {
    /// Create an empty diagram with the default spacing and background color.
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default(), PickingConfig::default())
    }

    /// Create an empty diagram with explicit layout and picking configuration.
    pub fn with_config(layout_config: LayoutConfig, picking_config: PickingConfig) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: None,
            registry: Vec::new(),
            colors: ColorAllocator::new(picking_config.background),
            layout_config,
            picking_config,
            laid_out: false,
        }
    }

    /// Insert a new node as the last child of `parent`, or as the root if `None`.
    ///
    /// The node gets its depth from the parent and a fresh pick color. Its
    /// horizontal displacement stays zero until the next layout pass.
    ///
    /// Fails with [`DiagramError::RootAlreadySet`] when `parent` is `None` and
    /// the diagram already has a root, and with [`DiagramError::StaleNode`]
    /// when `parent` does not name a live node.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        label: impl Into<String>,
    ) -> Result<NodeId, DiagramError> {
        let depth = match parent {
            None => {
                if let Some(root) = self.root {
                    tracing::warn!(?root, "root element already set");
                    return Err(DiagramError::RootAlreadySet { root });
                }
                0
            }
            Some(p) => self.node_checked(p)?.depth + 1,
        };
        let color = self.colors.allocate()?;
        let node = Node {
            generation: 0,
            label: label.into(),
            depth,
            displacement: Displacement::new(0, -(i64::from(depth) * self.layout_config.y_spacing)),
            color,
            parent: None,
            children: SmallVec::new(),
        };

        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node { generation, ..node });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId slots are 32-bit."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node { generation, ..node }));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId slots are 32-bit."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        match parent {
            Some(p) => self.link_parent(id, p),
            None => self.root = Some(id),
        }
        self.registry.push(id);
        self.laid_out = false;
        Ok(id)
    }

    /// Remove a node and its whole subtree.
    ///
    /// Removing the root empties the diagram. Surviving nodes keep their pick
    /// colors.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DiagramError> {
        self.node_checked(id)?;
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.root = None,
        }
        self.free_subtree(id);
        let nodes = &self.nodes;
        self.registry.retain(|r| nodes[r.idx()].is_some());
        self.laid_out = false;
        Ok(())
    }

    /// Destroy every node and rewind the color allocator.
    ///
    /// Handles issued before the clear become stale. The diagram accepts a new
    /// root afterwards.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.nodes.iter_mut().enumerate().rev() {
            *slot = None;
            self.free_list.push(idx);
        }
        self.root = None;
        self.registry.clear();
        self.colors.reset();
        self.laid_out = false;
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if the diagram has no nodes.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Returns true if displacements reflect the current structure.
    ///
    /// Any insert, remove, or clear resets this until the next
    /// [`Diagram::compute_layout`].
    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    /// Every live node.
    ///
    /// Insertion order until the first layout pass, post-order afterwards.
    pub fn registry(&self) -> &[NodeId] {
        &self.registry
    }

    /// Returns the label of a live node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.label.as_str())
    }

    /// Replace the label of a live node.
    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> Result<(), DiagramError> {
        self.node_opt_mut(id).ok_or(DiagramError::StaleNode(id))?.label = label.into();
        Ok(())
    }

    /// Returns the depth of a live node (the root is at depth zero).
    pub fn depth(&self, id: NodeId) -> Option<u32> {
        self.node_opt(id).map(|n| n.depth)
    }

    /// Returns the displacement of a live node as of the last layout pass.
    pub fn displacement(&self, id: NodeId) -> Option<Displacement> {
        self.node_opt(id).map(|n| n.displacement)
    }

    /// Returns the pick color of a live node.
    pub fn color(&self, id: NodeId) -> Option<ColorId> {
        self.node_opt(id).map(|n| n.color)
    }

    /// Returns the parent of a node if live, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// Spacing used by the layout pass.
    pub fn layout_config(&self) -> LayoutConfig {
        self.layout_config
    }

    /// Background color and other picking settings.
    pub fn picking_config(&self) -> PickingConfig {
        self.picking_config
    }

    /// One segment per parent/child edge, between displacements.
    pub fn connection_lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.registry.iter().filter_map(|&id| {
            let node = self.node_opt(id)?;
            let parent = self.node_opt(node.parent?)?;
            Some(Line::new(
                parent.displacement.to_point(),
                node.displacement.to_point(),
            ))
        })
    }

    // --- internals ---

    /// Access a live node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_checked(&self, id: NodeId) -> Result<&Node, DiagramError> {
        self.node_opt(id).ok_or(DiagramError::StaleNode(id))
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = self.node(id).children.clone();
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn insert_assigns_depth_and_vertical_displacement() {
        let mut diagram = Diagram::new();
        let root = diagram.insert(None, "root").unwrap();
        let a = diagram.insert(Some(root), "a").unwrap();
        let b = diagram.insert(Some(a), "b").unwrap();

        assert_eq!(diagram.depth(root), Some(0));
        assert_eq!(diagram.depth(a), Some(1));
        assert_eq!(diagram.depth(b), Some(2));
        assert_eq!(diagram.displacement(b), Some(Displacement::new(0, -10)));
        assert_eq!(diagram.children_of(root), &[a]);
        assert_eq!(diagram.parent_of(b), Some(a));
        assert_eq!(diagram.registry(), &[root, a, b]);
        assert!(!diagram.is_laid_out(), "insert never lays out");
    }

    #[test]
    fn second_root_is_rejected() {
        let mut diagram = Diagram::new();
        let root = diagram.insert(None, "root").unwrap();
        assert_eq!(
            diagram.insert(None, "other"),
            Err(DiagramError::RootAlreadySet { root })
        );
        assert_eq!(diagram.len(), 1, "failed insert must not leave a node behind");
    }

    #[test]
    fn stale_parent_is_rejected() {
        let mut diagram = Diagram::new();
        let root = diagram.insert(None, "root").unwrap();
        let a = diagram.insert(Some(root), "a").unwrap();
        diagram.remove(a).unwrap();
        assert_eq!(diagram.insert(Some(a), "b"), Err(DiagramError::StaleNode(a)));
        assert_eq!(diagram.remove(a), Err(DiagramError::StaleNode(a)));
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut diagram = Diagram::new();
        let root = diagram.insert(None, "root").unwrap();
        let a = diagram.insert(Some(root), "a").unwrap();

        assert!(diagram.is_alive(root));
        assert!(diagram.is_alive(a));

        diagram.remove(a).unwrap();
        assert!(!diagram.is_alive(a));

        // Might reuse the slot, but the generation bumps.
        let b = diagram.insert(Some(root), "b").unwrap();
        assert!(diagram.is_alive(b));
        assert!(!diagram.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn remove_drops_whole_subtree_from_registry() {
        let mut diagram = Diagram::new();
        let root = diagram.insert(None, "root").unwrap();
        let a = diagram.insert(Some(root), "a").unwrap();
        let a1 = diagram.insert(Some(a), "a1").unwrap();
        let a2 = diagram.insert(Some(a), "a2").unwrap();
        let b = diagram.insert(Some(root), "b").unwrap();
        let b_color = diagram.color(b);

        diagram.remove(a).unwrap();
        for gone in [a, a1, a2] {
            assert!(!diagram.is_alive(gone), "{gone:?} must be gone");
        }
        assert_eq!(diagram.registry(), &[root, b]);
        assert_eq!(diagram.children_of(root), &[b]);
        assert_eq!(diagram.color(b), b_color, "survivors keep their colors");
    }

    #[test]
    fn removing_root_empties_the_diagram() {
        let mut diagram = Diagram::new();
        let root = diagram.insert(None, "root").unwrap();
        diagram.insert(Some(root), "a").unwrap();
        diagram.remove(root).unwrap();
        assert!(diagram.is_empty());
        assert_eq!(diagram.root(), None);
        assert!(diagram.insert(None, "fresh").is_ok(), "a new root is accepted");
    }

    #[test]
    fn clear_invalidates_handles_and_rewinds_colors() {
        let mut diagram = Diagram::new();
        let root = diagram.insert(None, "root").unwrap();
        let a = diagram.insert(Some(root), "a").unwrap();
        let first_colors = vec![diagram.color(root), diagram.color(a)];

        diagram.clear();
        assert!(diagram.is_empty());
        assert!(!diagram.is_alive(root));
        assert!(!diagram.is_alive(a));

        let root2 = diagram.insert(None, "root").unwrap();
        let a2 = diagram.insert(Some(root2), "a").unwrap();
        assert!(!diagram.is_alive(root), "old handles stay stale after slot reuse");
        assert_eq!(vec![diagram.color(root2), diagram.color(a2)], first_colors);
    }

    #[test]
    fn labels_round_trip_and_stale_set_fails() {
        let mut diagram = Diagram::new();
        let root = diagram.insert(None, "root").unwrap();
        diagram.set_label(root, "renamed").unwrap();
        assert_eq!(diagram.label(root), Some("renamed"));
        diagram.clear();
        assert_eq!(
            diagram.set_label(root, "x"),
            Err(DiagramError::StaleNode(root))
        );
        assert_eq!(diagram.label(root), None);
        assert!(diagram.children_of(root).is_empty());
    }

    #[test]
    fn connection_lines_follow_edges() {
        let mut diagram = Diagram::new();
        let root = diagram.insert(None, "root").unwrap();
        diagram.insert(Some(root), "a").unwrap();
        diagram.insert(Some(root), "b").unwrap();
        diagram.compute_layout().unwrap();

        let lines: Vec<Line> = diagram.connection_lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line.p0, kurbo::Point::new(15.0, 0.0), "every edge starts at the root");
            assert!((line.p1.y + 5.0).abs() < f64::EPSILON, "children sit one level down");
        }
    }
}

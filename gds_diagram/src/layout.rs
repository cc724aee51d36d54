// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Post-order layout: leaves spread left to right, parents centered over children.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::error::DiagramError;
use crate::tree::Diagram;
use crate::types::{Displacement, NodeId};

/// Fixed spacing used by the layout pass, in diagram units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Horizontal distance between consecutive leaves.
    pub x_spacing: i64,
    /// Vertical distance between consecutive depths.
    pub y_spacing: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_spacing: 10,
            y_spacing: 5,
        }
    }
}

/// Result of a layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutSummary {
    /// Number of nodes placed.
    pub node_count: usize,
    /// Height of the tree: zero for a lone root.
    pub max_depth: u32,
    /// Largest horizontal displacement assigned.
    pub max_x: i64,
}

/// Working state of one layout pass.
struct Pass {
    spacing: i64,
    /// X positions placed so far, per depth, not yet consumed by a parent.
    levels: Vec<SmallVec<[i64; 8]>>,
    max_x: i64,
    order: Vec<NodeId>,
}

impl Diagram {
    /// Assign every node its displacement and rebuild the registry in post-order.
    ///
    /// Leaves are placed at `running_max + x_spacing` in depth-first order.
    /// A parent with one child takes that child's `x`; a parent with several
    /// takes the truncated midpoint of its children's extreme `x` values.
    /// Every node gets `y = -(depth * y_spacing)`.
    ///
    /// Each pass starts from a zero running maximum, so repeating it on an
    /// unchanged tree reproduces the same coordinates.
    ///
    /// Fails with [`DiagramError::Empty`] if there is no root.
    pub fn compute_layout(&mut self) -> Result<LayoutSummary, DiagramError> {
        let root = self.root().ok_or(DiagramError::Empty)?;
        let max_depth = self.subtree_height(root);
        let mut pass = Pass {
            spacing: self.layout_config().x_spacing,
            levels: (0..=max_depth).map(|_| SmallVec::new()).collect(),
            max_x: 0,
            order: Vec::with_capacity(self.len()),
        };
        self.place(root, &mut pass);

        self.registry = pass.order;
        self.laid_out = true;
        let summary = LayoutSummary {
            node_count: self.registry.len(),
            max_depth,
            max_x: pass.max_x,
        };
        tracing::debug!(
            nodes = summary.node_count,
            max_depth = summary.max_depth,
            max_x = summary.max_x,
            "layout computed"
        );
        Ok(summary)
    }

    /// Longest path from `id` down to a leaf, in edges.
    fn subtree_height(&self, id: NodeId) -> u32 {
        self.children_of(id)
            .iter()
            .map(|&child| self.subtree_height(child) + 1)
            .max()
            .unwrap_or(0)
    }

    fn place(&mut self, id: NodeId, pass: &mut Pass) {
        let children = self.node(id).children.clone();
        for &child in &children {
            self.place(child, pass);
        }

        let depth = self.node(id).depth as usize;
        let x = match children.as_slice() {
            [] => pass.max_x + pass.spacing,
            [only] => self.node(*only).displacement.x,
            _ => {
                let below = &mut pass.levels[depth + 1];
                below.sort_unstable();
                let min = below.first().copied().unwrap_or_default();
                let max = below.last().copied().unwrap_or_default();
                (min + max) / 2
            }
        };
        if !children.is_empty() {
            // The children's row has served this parent; siblings start fresh.
            pass.levels[depth + 1].clear();
        }
        pass.levels[depth].push(x);
        pass.max_x = pass.max_x.max(x);

        let y_spacing = self.layout_config().y_spacing;
        let node = self.node_mut(id);
        node.displacement = Displacement::new(x, -(i64::from(node.depth) * y_spacing));
        pass.order.push(id);
    }
}

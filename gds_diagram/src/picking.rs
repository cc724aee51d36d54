// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color-based picking: per-diagram color allocation and pixel resolution.

use crate::error::DiagramError;
use crate::tree::Diagram;
use crate::types::{ColorId, NodeId};

/// Number of distinct values a 24-bit [`ColorId`] can take.
const COLOR_SPACE: u32 = 1 << 24;

/// Picking configuration for a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickingConfig {
    /// The clear color of the picking surface.
    ///
    /// It is never assigned to a node, and sampling it resolves to "nothing".
    pub background: ColorId,
}

impl Default for PickingConfig {
    fn default() -> Self {
        // The dark blue clear color (0.2, 0.0, 0.6) in byte lanes.
        Self {
            background: ColorId(51, 0, 153),
        }
    }
}

/// Monotonic 24-bit color counter with carry across the three byte lanes.
///
/// The counter starts at `(0, 0, 0)` and is only rewound by [`ColorAllocator::reset`].
#[derive(Clone, Debug)]
pub(crate) struct ColorAllocator {
    next: u32,
    background: u32,
}

impl ColorAllocator {
    pub(crate) fn new(background: ColorId) -> Self {
        Self {
            next: 0,
            background: background.ordinal(),
        }
    }

    /// Hands out the next color, stepping over the background once.
    pub(crate) fn allocate(&mut self) -> Result<ColorId, DiagramError> {
        if self.next == self.background {
            self.next += 1;
        }
        if self.next >= COLOR_SPACE {
            return Err(DiagramError::ColorSpaceExhausted);
        }
        let color = ColorId::from_ordinal(self.next);
        self.next += 1;
        Ok(color)
    }

    pub(crate) fn reset(&mut self) {
        self.next = 0;
    }
}

impl Diagram {
    /// Resolve a sampled pixel color to the node drawn with it.
    ///
    /// The background color, and any color no live node carries (for example a
    /// stale pick buffer), resolve to `None`.
    pub fn resolve_color(&self, sampled: ColorId) -> Option<NodeId> {
        if sampled == self.picking_config().background {
            tracing::debug!(%sampled, "pick hit the background");
            return None;
        }
        let hit = self
            .registry()
            .iter()
            .copied()
            .find(|&id| self.color(id) == Some(sampled));
        match hit {
            Some(id) => tracing::debug!(%sampled, ?id, "pick resolved"),
            None => tracing::warn!(%sampled, "sampled color matches no live node"),
        }
        hit
    }

    /// Iterate over `(node, color)` pairs for the picking render pass, in
    /// registry order.
    pub fn pick_table(&self) -> impl Iterator<Item = (NodeId, ColorId)> + '_ {
        self.registry()
            .iter()
            .filter_map(|&id| self.color(id).map(|color| (id, color)))
    }
}

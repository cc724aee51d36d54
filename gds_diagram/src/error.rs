// Copyright 2025 the GDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by diagram operations.

use core::fmt;

use crate::types::NodeId;

/// Precondition violations reported by [`Diagram`](crate::Diagram) operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagramError {
    /// A root was requested while the diagram already has one.
    RootAlreadySet {
        /// The existing root.
        root: NodeId,
    },
    /// The given identifier does not name a live node.
    StaleNode(NodeId),
    /// Layout was requested on a diagram without a root.
    Empty,
    /// Every usable pick color is taken by a live node.
    ColorSpaceExhausted,
}

impl fmt::Display for DiagramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootAlreadySet { root } => {
                write!(f, "root element already set ({root:?})")
            }
            Self::StaleNode(id) => write!(f, "{id:?} does not name a live node"),
            Self::Empty => f.write_str("the diagram has no root"),
            Self::ColorSpaceExhausted => f.write_str("no pick colors left to assign"),
        }
    }
}

impl core::error::Error for DiagramError {}
